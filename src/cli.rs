// src/cli.rs
//! CLI definitions for vorbis-recipe
//!
//! The command implementations live in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "vorbis-recipe")]
#[command(author, version)]
#[command(about = "Fetch, patch, build and stage third-party libraries", long_about = None)]
pub struct Cli {
    /// Recipe to operate on
    #[arg(long, global = true, default_value = "libvorbis")]
    pub recipe: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List targets buildable on a host platform
    Targets {
        /// Host platform (win32, darwin, ...); defaults to this machine
        #[arg(short, long)]
        platform: Option<String>,
    },

    /// List upstream libraries a target depends on
    Deps {
        /// Target name
        target: String,
    },

    /// Build a target and stage its artifacts
    Build {
        /// Target name
        target: String,

        /// Scratch directory for sources and intermediate output
        #[arg(short, long)]
        working_dir: String,

        /// Root of the project receiving the artifacts
        #[arg(short, long)]
        root: String,

        /// Recipe configuration file (TOML)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// List the files a target build writes into the project
    Artifacts {
        /// Target name
        target: String,

        /// Root of the project receiving the artifacts
        #[arg(short, long)]
        root: String,

        /// Report whether each artifact exists
        #[arg(long)]
        check: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
