// src/session.rs

//! Build session: the state of one orchestration run
//!
//! A session bundles the configuration, the toolchain and source fetcher,
//! and the set of source folders already patched during this run. Two
//! sessions never share patch state, so unrelated builds in one process
//! start clean.

use crate::config::RecipeConfig;
use crate::error::{Error, Result};
use crate::source::{HttpFetcher, SourceFetcher, SourceRequest};
use crate::toolchain::{SystemToolchain, Toolchain, ToolchainEnv, VsArch, VsVersion};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub struct BuildSession {
    config: RecipeConfig,
    toolchain: Arc<dyn Toolchain>,
    fetcher: Arc<dyn SourceFetcher>,
    /// Source folders patched during this session
    patched: HashSet<PathBuf>,
}

impl BuildSession {
    pub fn new(
        config: RecipeConfig,
        toolchain: Arc<dyn Toolchain>,
        fetcher: Arc<dyn SourceFetcher>,
    ) -> Self {
        Self {
            config,
            toolchain,
            fetcher,
            patched: HashSet::new(),
        }
    }

    /// Session using the host toolchain and HTTP downloads
    pub fn system(config: RecipeConfig) -> Result<Self> {
        let toolchain = Arc::new(SystemToolchain::new(&config));
        let fetcher = Arc::new(HttpFetcher::new()?);
        Ok(Self::new(config, toolchain, fetcher))
    }

    pub fn config(&self) -> &RecipeConfig {
        &self.config
    }

    pub fn toolchain(&self) -> &dyn Toolchain {
        self.toolchain.as_ref()
    }

    /// Materialize a source checkout
    pub fn fetch(&self, request: &SourceRequest<'_>) -> Result<()> {
        self.fetcher.download_and_extract(request)
    }

    /// Whether `source_folder` was patched during this session
    pub fn is_patched(&self, source_folder: &Path) -> bool {
        self.patched.contains(source_folder)
    }

    /// Apply `patch<postfix>.diff` for `source_folder`, once per session
    ///
    /// The patch is applied from `working_dir`. Returns `false` when the
    /// folder had already been patched and nothing ran.
    pub fn patch_sources(
        &mut self,
        source_folder: &Path,
        working_dir: &Path,
        postfix: &str,
    ) -> Result<bool> {
        if self.is_patched(source_folder) {
            debug!("Sources already patched: {}", source_folder.display());
            return Ok(false);
        }

        let patch_path = std::path::absolute(
            self.config.patch_dir.join(format!("patch{}.diff", postfix)),
        )?;
        if !patch_path.is_file() {
            return Err(Error::NotFound(format!(
                "Patch file not found: {}",
                patch_path.display()
            )));
        }

        info!("Patching {} with {}", source_folder.display(), patch_path.display());
        self.toolchain
            .apply_patch(&patch_path, working_dir, self.config.patch_strip)?;
        self.patched.insert(source_folder.to_path_buf());
        Ok(true)
    }

    /// Visual Studio environment with `include_dir` first on `INCLUDE`
    pub fn vs_env_with_include(
        &self,
        version: VsVersion,
        arch: VsArch,
        include_dir: &Path,
    ) -> Result<ToolchainEnv> {
        let mut env = self.toolchain.vs_env(version, arch)?;
        env.prepend_path("INCLUDE", include_dir);
        Ok(env)
    }
}
