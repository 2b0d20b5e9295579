// src/commands/build.rs

//! Build command - fetch, patch, build and stage one target

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use vorbis_recipe::recipe::parse_target;
use vorbis_recipe::{BuildSession, RecipeConfig};

use super::lookup_recipe;

/// Build `target` of a recipe
///
/// # Arguments
/// * `recipe_name` - Recipe to build
/// * `target` - Target name (e.g. `win10`)
/// * `working_dir` - Scratch directory for sources and intermediate output
/// * `root` - Root of the project receiving the artifacts
/// * `config_path` - Optional TOML configuration
pub fn cmd_build(
    recipe_name: &str,
    target: &str,
    working_dir: &str,
    root: &str,
    config_path: Option<&str>,
) -> Result<()> {
    let recipe = lookup_recipe(recipe_name)?;
    let target = parse_target(recipe.as_ref(), target)?;
    let working_dir = Path::new(working_dir);
    let root = Path::new(root);

    let config = RecipeConfig::load_or_default(config_path.map(Path::new))
        .with_context(|| "Failed to load recipe configuration")?;

    std::fs::create_dir_all(working_dir)
        .with_context(|| format!("Failed to create working directory: {}", working_dir.display()))?;

    let mut session = BuildSession::system(config)?;

    println!("Building {} for {}", recipe.name(), target);
    println!("  Dependencies: {}", recipe.dependencies_for_target(target).join(", "));

    recipe
        .build_for_target(target, &mut session, working_dir, root)
        .with_context(|| format!("Failed to build {} for {}", recipe.name(), target))?;

    let artifacts = recipe.expected_artifacts(target, root);
    println!("\n[COMPLETE] Staged {} artifact(s):", artifacts.len());
    for path in &artifacts {
        println!("  - {}", path.display());
    }

    info!("Successfully built {} for {}", recipe.name(), target);
    Ok(())
}
