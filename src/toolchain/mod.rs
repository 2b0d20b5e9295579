// src/toolchain/mod.rs

//! Toolchain invocations
//!
//! Recipes never run compilers directly. They describe each invocation as a
//! value ([`VsBuild`], [`AutotoolsBuild`]) and hand it to a [`Toolchain`].
//! [`SystemToolchain`] runs the real tools; tests substitute a recorder.

mod system;

pub use system::SystemToolchain;

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Visual Studio toolchain generations used by the recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VsVersion {
    /// Visual Studio 2013 (toolset v120)
    Vs2013,
    /// Visual Studio 2017
    Vs2017,
}

/// Host/target architecture passed to `vcvarsall.bat`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VsArch {
    X86,
    X64,
    Arm,
}

impl VsArch {
    /// Argument understood by `vcvarsall.bat`
    pub fn vcvars_arg(&self) -> &'static str {
        match self {
            Self::X86 => "x86",
            Self::X64 => "amd64",
            Self::Arm => "x86_arm",
        }
    }
}

/// Environment variables for a single toolchain invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainEnv {
    vars: BTreeMap<String, String>,
}

impl ToolchainEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the output of `set` (one `KEY=VALUE` per line)
    ///
    /// Lines without `=` (banners printed by vcvarsall) are skipped.
    pub fn from_env_dump(dump: &str) -> Result<Self> {
        let mut env = Self::new();
        for line in dump.lines() {
            let line = line.trim_end_matches('\r');
            if let Some((key, value)) = line.split_once('=')
                && !key.is_empty()
                && !key.contains(' ')
            {
                env.set(key, value);
            }
        }
        if env.vars.is_empty() {
            return Err(Error::ParseError(
                "Environment dump contained no variables".to_string(),
            ));
        }
        Ok(env)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Prepend `path` to a `;`-separated search path variable
    pub fn prepend_path(&mut self, key: &str, path: &Path) {
        let path = path.to_string_lossy();
        let value = match self.vars.get(key) {
            Some(existing) if !existing.is_empty() => format!("{};{}", path, existing),
            _ => path.into_owned(),
        };
        self.vars.insert(key.to_string(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl FromIterator<(String, String)> for ToolchainEnv {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

/// One MSBuild invocation against a Visual Studio solution
#[derive(Debug, Clone)]
pub struct VsBuild<'a> {
    pub solution: &'a Path,
    /// `Debug` or `Release`
    pub configuration: &'a str,
    /// MSBuild platform (`Win32`, `x64`, `ARM`)
    pub platform: &'a str,
    /// Project target inside the solution
    pub target: &'a str,
    /// Explicit `PlatformToolset`; `None` keeps the solution's own
    pub toolset: Option<&'a str>,
    pub env: &'a ToolchainEnv,
}

impl VsBuild<'_> {
    /// MSBuild command-line arguments for this build
    pub fn msbuild_args(&self) -> Vec<String> {
        let mut args = vec![
            self.solution.to_string_lossy().into_owned(),
            format!("/t:{}", self.target),
            format!("/p:Configuration={}", self.configuration),
            format!("/p:Platform={}", self.platform),
        ];
        if let Some(toolset) = self.toolset {
            args.push(format!("/p:PlatformToolset={}", toolset));
        }
        args.push("/m".to_string());
        args
    }
}

/// A configure / make / make install sequence
#[derive(Debug, Clone)]
pub struct AutotoolsBuild<'a> {
    pub source_dir: &'a Path,
    pub configure_args: Vec<String>,
    /// Passed as `--prefix`
    pub install_dir: PathBuf,
    pub env: ToolchainEnv,
    /// Run `make clean` after installing
    pub postclean: bool,
}

impl AutotoolsBuild<'_> {
    /// Arguments for `./configure`, prefix first
    pub fn configure_command_args(&self) -> Vec<String> {
        let mut args = vec![format!("--prefix={}", self.install_dir.display())];
        args.extend(self.configure_args.iter().cloned());
        args
    }
}

/// External build tools a recipe drives
///
/// Every method blocks until the tool exits. A non-zero exit is an error;
/// nothing is retried.
pub trait Toolchain {
    /// Capture the environment `vcvarsall.bat` sets up for `arch`
    fn vs_env(&self, version: VsVersion, arch: VsArch) -> Result<ToolchainEnv>;

    /// Build one project of a Visual Studio solution
    fn build_vs(&self, build: &VsBuild<'_>) -> Result<()>;

    /// Configure, build and install an autotools project
    fn build_autotools(&self, build: &AutotoolsBuild<'_>) -> Result<()>;

    /// Apply a unified diff with `cwd` as the working directory
    fn apply_patch(&self, patch: &Path, cwd: &Path, strip: u32) -> Result<()>;
}
