// src/recipe/mod.rs

//! Third-party library recipes
//!
//! A recipe is the build logic for one third-party dependency. An external
//! driver uses three entry points:
//! - **Targets**: which targets can be built on a given host platform
//! - **Dependencies**: which upstream libraries a target needs built first
//! - **Build**: fetch, patch, build and stage one target
//!
//! Ordering builds across recipes is the driver's job; recipes only
//! declare their dependencies.

mod libvorbis;

pub use libvorbis::LibVorbis;

use crate::error::{Error, Result};
use crate::platform::{BuildPlatform, Target};
use crate::session::BuildSession;
use std::path::{Path, PathBuf};

/// Build logic for one third-party library
pub trait Recipe {
    /// Library name, as other recipes list it in their dependencies
    fn name(&self) -> &'static str;

    /// Host platforms this recipe can build on
    fn supported_build_platforms(&self) -> Vec<BuildPlatform>;

    /// Targets buildable on `platform`
    fn supported_targets_for_build_platform(&self, platform: &BuildPlatform) -> Vec<Target>;

    /// Upstream libraries `target` needs
    fn dependencies_for_target(&self, target: Target) -> Vec<String>;

    /// Pinned upstream source archive URL
    ///
    /// This is the default for `RecipeConfig::download_url`. Builds fetch
    /// from the configured URL, which may point at a mirror of this archive.
    fn download_url(&self) -> &'static str;

    /// Every path a successful build of `target` writes under `root_project`
    fn expected_artifacts(&self, target: Target, root_project: &Path) -> Vec<PathBuf>;

    /// Fetch, patch, build and stage `target`
    fn build_for_target(
        &self,
        target: Target,
        session: &mut BuildSession,
        working_dir: &Path,
        root_project: &Path,
    ) -> Result<()>;
}

/// All known recipes
pub fn all() -> Vec<Box<dyn Recipe>> {
    vec![Box::new(LibVorbis)]
}

/// Look up a recipe by library name
pub fn find(name: &str) -> Option<Box<dyn Recipe>> {
    all().into_iter().find(|r| r.name() == name)
}

/// Parse a target name, rejecting targets the recipe cannot build anywhere
pub fn parse_target(recipe: &dyn Recipe, name: &str) -> Result<Target> {
    let target: Target = name
        .parse()
        .map_err(|_| Error::UnsupportedTarget(name.to_string()))?;

    let buildable = recipe
        .supported_build_platforms()
        .iter()
        .any(|p| recipe.supported_targets_for_build_platform(p).contains(&target));
    if !buildable {
        return Err(Error::UnsupportedTarget(format!(
            "{} cannot build {}",
            recipe.name(),
            target
        )));
    }
    Ok(target)
}
