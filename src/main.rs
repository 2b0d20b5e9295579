// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let recipe = cli.recipe.as_str();

    match cli.command {
        Some(Commands::Targets { platform }) => commands::cmd_targets(recipe, platform.as_deref()),
        Some(Commands::Deps { target }) => commands::cmd_deps(recipe, &target),
        Some(Commands::Build {
            target,
            working_dir,
            root,
            config,
        }) => commands::cmd_build(recipe, &target, &working_dir, &root, config.as_deref()),
        Some(Commands::Artifacts {
            target,
            root,
            check,
        }) => commands::cmd_artifacts(recipe, &target, &root, check),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "vorbis-recipe",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        None => {
            println!("vorbis-recipe v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'vorbis-recipe --help' for usage information");
            Ok(())
        }
    }
}
