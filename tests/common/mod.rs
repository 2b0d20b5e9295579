// tests/common/mod.rs

//! Shared test doubles for recipe integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use vorbis_recipe::{
    AutotoolsBuild, BuildSession, RecipeConfig, Result, SourceFetcher, SourceRequest, Toolchain,
    ToolchainEnv, VsArch, VsBuild, VsVersion,
};

/// A toolchain invocation seen by [`RecordingToolchain`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    VsEnv(VsVersion, VsArch),
    BuildVs {
        target: String,
        configuration: String,
        platform: String,
        toolset: Option<String>,
        include: Option<String>,
    },
    Autotools {
        configure_args: Vec<String>,
        install_dir: PathBuf,
    },
    Patch {
        patch: PathBuf,
        cwd: PathBuf,
    },
}

/// Toolchain that records calls and fakes the files real tools would write
pub struct RecordingToolchain {
    calls: Mutex<Vec<Call>>,
    produce_outputs: bool,
}

impl RecordingToolchain {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            produce_outputs: true,
        }
    }

    /// A toolchain whose builds "succeed" without writing anything
    pub fn without_outputs() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            produce_outputs: false,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn patch_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Patch { .. }))
            .count()
    }

    pub fn vs_builds(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::BuildVs { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

/// File MSBuild writes for a solution project
fn msvc_output_name(project: &str) -> String {
    match project {
        "libvorbisfile" => "libvorbisfile_static.lib".to_string(),
        other => format!("{other}.lib"),
    }
}

impl Toolchain for RecordingToolchain {
    fn vs_env(&self, version: VsVersion, arch: VsArch) -> Result<ToolchainEnv> {
        self.record(Call::VsEnv(version, arch));
        let mut env = ToolchainEnv::new();
        env.set("INCLUDE", "C:\\VC\\include");
        Ok(env)
    }

    fn build_vs(&self, build: &VsBuild<'_>) -> Result<()> {
        self.record(Call::BuildVs {
            target: build.target.to_string(),
            configuration: build.configuration.to_string(),
            platform: build.platform.to_string(),
            toolset: build.toolset.map(str::to_string),
            include: build.env.get("INCLUDE").map(str::to_string),
        });

        if self.produce_outputs {
            let out_dir = build
                .solution
                .parent()
                .unwrap()
                .join(build.platform)
                .join(build.configuration);
            fs::create_dir_all(&out_dir)?;
            fs::write(
                out_dir.join(msvc_output_name(build.target)),
                format!("{}|{}|{}", build.target, build.configuration, build.platform),
            )?;
        }
        Ok(())
    }

    fn build_autotools(&self, build: &AutotoolsBuild<'_>) -> Result<()> {
        self.record(Call::Autotools {
            configure_args: build.configure_args.clone(),
            install_dir: build.install_dir.clone(),
        });

        if self.produce_outputs {
            let lib_dir = build.install_dir.join("lib");
            let include_dir = build.install_dir.join("include/vorbis");
            fs::create_dir_all(&lib_dir)?;
            fs::create_dir_all(&include_dir)?;
            fs::write(lib_dir.join("libvorbis.a"), b"!<arch>\n")?;
            fs::write(include_dir.join("codec.h"), b"/* installed */\n")?;
        }
        Ok(())
    }

    fn apply_patch(&self, patch: &Path, cwd: &Path, _strip: u32) -> Result<()> {
        self.record(Call::Patch {
            patch: patch.to_path_buf(),
            cwd: cwd.to_path_buf(),
        });
        Ok(())
    }
}

/// Fetcher that lays out a minimal libvorbis checkout instead of downloading
pub struct FakeFetcher {
    fetches: Mutex<Vec<PathBuf>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self {
            fetches: Mutex::new(Vec::new()),
        }
    }

    pub fn fetched(&self) -> Vec<PathBuf> {
        self.fetches.lock().unwrap().clone()
    }
}

impl SourceFetcher for FakeFetcher {
    fn download_and_extract(&self, request: &SourceRequest<'_>) -> Result<()> {
        if request.source_dir.exists() {
            return Ok(());
        }
        self.fetches
            .lock()
            .unwrap()
            .push(request.source_dir.to_path_buf());

        let include = request.source_dir.join("include/vorbis");
        fs::create_dir_all(&include)?;
        fs::create_dir_all(request.source_dir.join("win32/VS2010"))?;
        fs::write(include.join("codec.h"), b"/* codec */\n")?;
        fs::write(include.join("vorbisfile.h"), b"/* vorbisfile */\n")?;
        fs::write(request.source_dir.join("win32/VS2010/vorbis_static.sln"), b"sln")?;
        Ok(())
    }
}

/// Scratch layout for one test: working dir, project root, patch dir
pub struct Fixture {
    pub temp: TempDir,
    pub working_dir: PathBuf,
    pub root: PathBuf,
    pub patch_dir: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let working_dir = temp.path().join("thirdparty/libvorbis");
        let root = temp.path().join("project");
        let patch_dir = temp.path().join("patches");
        fs::create_dir_all(&working_dir).unwrap();
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&patch_dir).unwrap();
        fs::write(patch_dir.join("patch_win10.diff"), b"--- a\n+++ b\n").unwrap();
        Self {
            temp,
            working_dir,
            root,
            patch_dir,
        }
    }

    pub fn config(&self) -> RecipeConfig {
        RecipeConfig {
            patch_dir: self.patch_dir.clone(),
            archive_sha256: None,
            ..RecipeConfig::default()
        }
    }

    pub fn session(&self, toolchain: Arc<RecordingToolchain>) -> BuildSession {
        self.session_with_fetcher(toolchain, Arc::new(FakeFetcher::new()))
    }

    pub fn session_with_fetcher(
        &self,
        toolchain: Arc<RecordingToolchain>,
        fetcher: Arc<FakeFetcher>,
    ) -> BuildSession {
        BuildSession::new(self.config(), toolchain, fetcher)
    }
}
