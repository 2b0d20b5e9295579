// src/commands/query.rs

//! Read-only recipe queries: targets, dependencies, artifacts

use anyhow::{bail, Result};
use std::path::Path;
use vorbis_recipe::recipe::parse_target;
use vorbis_recipe::BuildPlatform;

use super::lookup_recipe;

/// Print the targets buildable on `platform` (default: this host)
pub fn cmd_targets(recipe_name: &str, platform: Option<&str>) -> Result<()> {
    let recipe = lookup_recipe(recipe_name)?;
    let platform = match platform {
        Some(p) => p.parse::<BuildPlatform>()?,
        None => BuildPlatform::host(),
    };

    let supported = recipe.supported_build_platforms();
    if !supported.contains(&platform) {
        let names: Vec<&str> = supported.iter().map(|p| p.as_str()).collect();
        println!(
            "Note: {} is not a build platform for {} (supported: {})",
            platform,
            recipe.name(),
            names.join(", ")
        );
    }

    for target in recipe.supported_targets_for_build_platform(&platform) {
        println!("{}", target);
    }
    Ok(())
}

/// Print the upstream libraries `target` depends on
pub fn cmd_deps(recipe_name: &str, target: &str) -> Result<()> {
    let recipe = lookup_recipe(recipe_name)?;
    let target = parse_target(recipe.as_ref(), target)?;

    for dep in recipe.dependencies_for_target(target) {
        println!("{}", dep);
    }
    Ok(())
}

/// Print every path a build of `target` writes under `root`
pub fn cmd_artifacts(recipe_name: &str, target: &str, root: &str, check: bool) -> Result<()> {
    let recipe = lookup_recipe(recipe_name)?;
    let target = parse_target(recipe.as_ref(), target)?;

    let mut missing = 0usize;
    for path in recipe.expected_artifacts(target, Path::new(root)) {
        if !check {
            println!("{}", path.display());
            continue;
        }
        let present = path
            .metadata()
            .map(|m| if m.is_dir() { true } else { m.len() > 0 })
            .unwrap_or(false);
        if !present {
            missing += 1;
        }
        println!("[{}] {}", if present { "OK" } else { "MISSING" }, path.display());
    }

    if missing > 0 {
        bail!(
            "{} {} is not fully staged: {} artifact(s) missing",
            recipe.name(),
            target,
            missing
        );
    }
    Ok(())
}
