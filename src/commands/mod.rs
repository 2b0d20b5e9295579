// src/commands/mod.rs
//! Command handlers for the vorbis-recipe CLI

mod build;
mod query;

pub use build::cmd_build;
pub use query::{cmd_artifacts, cmd_deps, cmd_targets};

use anyhow::{anyhow, Result};
use vorbis_recipe::recipe::{self, Recipe};

/// Look up a recipe by name, listing the known ones on failure
pub(crate) fn lookup_recipe(name: &str) -> Result<Box<dyn Recipe>> {
    recipe::find(name).ok_or_else(|| {
        let known: Vec<&str> = recipe::all().iter().map(|r| r.name()).collect();
        anyhow!("Unknown recipe '{}' (known: {})", name, known.join(", "))
    })
}
