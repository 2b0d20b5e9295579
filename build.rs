// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: target name
fn target_arg() -> Arg {
    Arg::new("target")
        .required(true)
        .help("Target name (win32, win10, macos)")
}

/// Common argument: consuming project root
fn root_arg() -> Arg {
    Arg::new("root")
        .short('r')
        .long("root")
        .required(true)
        .help("Root of the project receiving the artifacts")
}

fn build_cli() -> Command {
    Command::new("vorbis-recipe")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Vorbis Recipe Contributors")
        .about("Fetch, patch, build and stage third-party libraries")
        .subcommand_required(false)
        .arg(
            Arg::new("recipe")
                .long("recipe")
                .default_value("libvorbis")
                .help("Recipe to operate on"),
        )
        .subcommand(
            Command::new("targets")
                .about("List targets buildable on a host platform")
                .arg(
                    Arg::new("platform")
                        .short('p')
                        .long("platform")
                        .help("Host platform (defaults to this machine)"),
                ),
        )
        .subcommand(
            Command::new("deps")
                .about("List upstream libraries a target depends on")
                .arg(target_arg()),
        )
        .subcommand(
            Command::new("build")
                .about("Build a target and stage its artifacts")
                .arg(target_arg())
                .arg(
                    Arg::new("working_dir")
                        .short('w')
                        .long("working-dir")
                        .required(true)
                        .help("Scratch directory for sources and intermediate output"),
                )
                .arg(root_arg())
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Recipe configuration file (TOML)"),
                ),
        )
        .subcommand(
            Command::new("artifacts")
                .about("List the files a target build writes into the project")
                .arg(target_arg())
                .arg(root_arg())
                .arg(
                    Arg::new("check")
                        .long("check")
                        .action(clap::ArgAction::SetTrue)
                        .help("Report whether each artifact exists"),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell", "elvish"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=OUT_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = out_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("vorbis-recipe.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
