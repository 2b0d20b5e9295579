// src/toolchain/system.rs

//! Toolchain backed by real subprocesses

use crate::config::RecipeConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use super::{AutotoolsBuild, Toolchain, ToolchainEnv, VsArch, VsBuild, VsVersion};

/// Runs MSBuild, vcvarsall, autotools and `patch` on the host
pub struct SystemToolchain {
    msbuild: PathBuf,
    vs2013_vcvarsall: PathBuf,
    vs2017_vcvarsall: PathBuf,
}

impl SystemToolchain {
    pub fn new(config: &RecipeConfig) -> Self {
        Self {
            msbuild: config.msbuild.clone(),
            vs2013_vcvarsall: config.vs2013_vcvarsall.clone(),
            vs2017_vcvarsall: config.vs2017_vcvarsall.clone(),
        }
    }

    fn vcvarsall(&self, version: VsVersion) -> &Path {
        match version {
            VsVersion::Vs2013 => &self.vs2013_vcvarsall,
            VsVersion::Vs2017 => &self.vs2017_vcvarsall,
        }
    }
}

/// Resolve a tool on PATH, or accept an explicit path as-is
fn locate(tool: &Path) -> Result<PathBuf> {
    if tool.components().count() > 1 {
        return Ok(tool.to_path_buf());
    }
    which::which(tool).map_err(|e| Error::ToolchainError {
        tool: tool.display().to_string(),
        message: format!("not found on PATH: {}", e),
    })
}

/// Run a command to completion, returning its stdout
fn run(tool: &str, cmd: &mut Command) -> Result<String> {
    debug!("Running {:?}", cmd);
    let output = cmd.output().map_err(|e| Error::ToolchainError {
        tool: tool.to_string(),
        message: format!("failed to start: {}", e),
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // MSBuild reports errors on stdout
        let detail = if stderr.trim().is_empty() { stdout.as_str() } else { stderr.as_ref() };
        return Err(Error::ToolchainError {
            tool: tool.to_string(),
            message: format!("exit code {:?}\n{}", output.status.code(), detail.trim_end()),
        });
    }
    Ok(stdout)
}

impl Toolchain for SystemToolchain {
    fn vs_env(&self, version: VsVersion, arch: VsArch) -> Result<ToolchainEnv> {
        let vcvarsall = self.vcvarsall(version);
        if !vcvarsall.exists() {
            return Err(Error::NotFound(format!(
                "vcvarsall.bat not found: {}",
                vcvarsall.display()
            )));
        }

        debug!("Capturing {:?} environment for {}", version, arch.vcvars_arg());
        let script = format!("\"{}\" {} && set", vcvarsall.display(), arch.vcvars_arg());
        let mut cmd = Command::new("cmd");
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            cmd.raw_arg(format!("/c \"{}\"", script));
        }
        #[cfg(not(windows))]
        {
            cmd.arg("/c").arg(&script);
        }

        let dump = run("vcvarsall", &mut cmd)?;
        ToolchainEnv::from_env_dump(&dump)
    }

    fn build_vs(&self, build: &VsBuild<'_>) -> Result<()> {
        let msbuild = locate(&self.msbuild)?;
        info!(
            "msbuild {} [{}|{}] {}",
            build.target,
            build.configuration,
            build.platform,
            build.solution.display()
        );

        let mut cmd = Command::new(msbuild);
        cmd.args(build.msbuild_args());
        if let Some(dir) = build.solution.parent() {
            cmd.current_dir(dir);
        }
        if !build.env.is_empty() {
            cmd.env_clear().envs(build.env.iter());
        }
        run("msbuild", &mut cmd).map(|_| ())
    }

    fn build_autotools(&self, build: &AutotoolsBuild<'_>) -> Result<()> {
        let configure = build.source_dir.join("configure");
        if !configure.exists() {
            return Err(Error::NotFound(format!(
                "configure script not found: {}",
                configure.display()
            )));
        }

        info!("configure {}", build.source_dir.display());
        run(
            "configure",
            Command::new("sh")
                .arg(&configure)
                .args(build.configure_command_args())
                .current_dir(build.source_dir)
                .envs(build.env.iter()),
        )?;

        let make = locate(Path::new("make"))?;
        for step in [None, Some("install")] {
            info!("make {}", step.unwrap_or_default());
            run(
                "make",
                Command::new(&make)
                    .args(step)
                    .current_dir(build.source_dir)
                    .envs(build.env.iter()),
            )?;
        }

        if build.postclean {
            run(
                "make",
                Command::new(&make)
                    .arg("clean")
                    .current_dir(build.source_dir)
                    .envs(build.env.iter()),
            )?;
        }
        Ok(())
    }

    fn apply_patch(&self, patch: &Path, cwd: &Path, strip: u32) -> Result<()> {
        let tool = locate(Path::new("patch"))?;
        info!("Applying patch {} in {}", patch.display(), cwd.display());
        run(
            "patch",
            Command::new(tool)
                .arg(format!("-p{}", strip))
                .arg("-i")
                .arg(patch)
                .current_dir(cwd),
        )
        .map(|_| ())
    }
}
