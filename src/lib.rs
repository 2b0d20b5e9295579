// src/lib.rs

//! Third-party library build recipes
//!
//! Builds libvorbis for the platforms a downstream project ships on and
//! stages the results into that project's tree.
//!
//! # Architecture
//!
//! - Recipes: declarative targets, dependencies and per-target build procedures
//! - Sessions: one build run, owning the patch-once cache
//! - Toolchains: MSBuild, autotools and `patch` behind a trait seam
//! - Staging: fixed library and header destinations in the consuming project

pub mod config;
mod error;
pub mod platform;
pub mod recipe;
pub mod session;
pub mod source;
pub mod staging;
pub mod toolchain;

pub use config::RecipeConfig;
pub use error::{Error, Result};
pub use platform::{BuildPlatform, Configuration, Target};
pub use recipe::{LibVorbis, Recipe};
pub use session::BuildSession;
pub use source::{HttpFetcher, SourceFetcher, SourceRequest};
pub use toolchain::{
    AutotoolsBuild, SystemToolchain, Toolchain, ToolchainEnv, VsArch, VsBuild, VsVersion,
};
