// src/recipe/libvorbis.rs

//! libvorbis 1.3.5
//!
//! | Target  | Toolchain              | Architectures      | Patched |
//! |---------|------------------------|--------------------|---------|
//! | `win32` | MSBuild, toolset v120  | x86, x64           | no      |
//! | `win10` | MSBuild, VS2017        | Win32, x64, ARM    | yes     |
//! | `macos` | autotools              | x86_64             | no      |
//!
//! The win10 sources are patched, so they live in their own checkout
//! (`libvorbis_source_win10`) next to the pristine one.

use crate::config::DEFAULT_DOWNLOAD_URL;
use crate::error::Result;
use crate::platform::{BuildPlatform, Configuration, Target};
use crate::session::BuildSession;
use crate::source::{url_file_name_no_ext, SourceRequest};
use crate::staging::{clean_copy_includes, copy_artifact};
use crate::toolchain::{AutotoolsBuild, ToolchainEnv, VsArch, VsBuild, VsVersion};
use std::path::{Component, Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::info;

use super::Recipe;

const SOLUTION: &str = "win32/VS2010/vorbis_static.sln";
const WIN10_SUFFIX: &str = "_win10";

/// One MSBuild platform of a Windows target
struct MsvcArch {
    /// MSBuild platform, also the output directory under `win32/VS2010`
    platform: &'static str,
    env_arch: VsArch,
    /// Directory name under the target's library root
    lib_dir: &'static str,
}

/// A library built from one solution project
struct MsvcLib {
    project: &'static str,
    /// File MSBuild writes
    output: &'static str,
    /// Staged file name without extension
    staged: &'static str,
}

/// Everything that differs between the two Windows targets
struct MsvcTarget {
    suffix: &'static str,
    ogg_source: &'static str,
    vs: VsVersion,
    toolset: Option<&'static str>,
    lib_root: &'static str,
    arches: &'static [MsvcArch],
    libs: &'static [MsvcLib],
    /// Append `_d` to Debug library names
    debug_suffix: bool,
}

const WIN32: MsvcTarget = MsvcTarget {
    suffix: "",
    ogg_source: "libogg_source",
    vs: VsVersion::Vs2013,
    toolset: Some("v120"),
    lib_root: "Libs/lib_CMake/win",
    arches: &[
        MsvcArch { platform: "Win32", env_arch: VsArch::X86, lib_dir: "x86" },
        MsvcArch { platform: "x64", env_arch: VsArch::X64, lib_dir: "x64" },
    ],
    libs: &[
        MsvcLib {
            project: "libvorbis_static",
            output: "libvorbis_static.lib",
            staged: "libvorbis_static",
        },
        MsvcLib {
            project: "libvorbisfile",
            output: "libvorbisfile_static.lib",
            staged: "libvorbisfile_static",
        },
    ],
    debug_suffix: true,
};

const WIN10: MsvcTarget = MsvcTarget {
    suffix: WIN10_SUFFIX,
    ogg_source: "libogg_source_win10",
    vs: VsVersion::Vs2017,
    toolset: None,
    lib_root: "Libs/lib_CMake/win10",
    arches: &[
        MsvcArch { platform: "Win32", env_arch: VsArch::X86, lib_dir: "Win32" },
        MsvcArch { platform: "x64", env_arch: VsArch::X64, lib_dir: "x64" },
        MsvcArch { platform: "ARM", env_arch: VsArch::Arm, lib_dir: "arm" },
    ],
    libs: &[MsvcLib {
        project: "libvorbis_static",
        output: "libvorbis_static.lib",
        staged: "libvorbis_static",
    }],
    debug_suffix: false,
};

const MACOS_LIB: &str = "Libs/lib_CMake/mac/libvorbis_macos.a";
const INCLUDE_DEST: &str = "Sources/External/vorbis";

impl MsvcTarget {
    /// (built file, staged file) for every arch, library and configuration
    fn outputs(&self, source_dir: &Path, root_project: &Path) -> Vec<(PathBuf, PathBuf)> {
        let mut outputs = Vec::new();
        for arch in self.arches {
            for lib in self.libs {
                for config in Configuration::iter() {
                    let built = source_dir
                        .join("win32/VS2010")
                        .join(arch.platform)
                        .join(config.as_str())
                        .join(lib.output);
                    let suffix = if self.debug_suffix { config.lib_suffix() } else { "" };
                    let staged = root_project
                        .join(self.lib_root)
                        .join(arch.lib_dir)
                        .join(config.as_str())
                        .join(format!("{}{}.lib", lib.staged, suffix));
                    outputs.push((built, staged));
                }
            }
        }
        outputs
    }
}

/// `<working_dir>/../<relative>`, made absolute with `.` and `..` folded away
fn sibling_path(working_dir: &Path, relative: &str) -> Result<PathBuf> {
    let joined = std::path::absolute(working_dir)?.join("..").join(relative);
    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            // `..` at the root stays at the root
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    Ok(resolved)
}

/// The libvorbis recipe
#[derive(Debug, Clone, Copy, Default)]
pub struct LibVorbis;

impl LibVorbis {
    fn source_dir(working_dir: &Path, suffix: &str) -> PathBuf {
        working_dir.join(format!("libvorbis_source{}", suffix))
    }

    fn download_and_extract(
        &self,
        session: &BuildSession,
        working_dir: &Path,
        suffix: &str,
    ) -> Result<PathBuf> {
        let source_dir = Self::source_dir(working_dir, suffix);
        let config = session.config();
        let url = config.download_url.as_str();
        session.fetch(&SourceRequest {
            url,
            working_dir,
            source_dir: &source_dir,
            inner_dir: url_file_name_no_ext(url)?,
            sha256: config.archive_sha256.as_deref(),
        })?;
        Ok(source_dir)
    }

    fn build_msvc(
        &self,
        msvc: &MsvcTarget,
        session: &mut BuildSession,
        working_dir: &Path,
        root_project: &Path,
    ) -> Result<()> {
        let source_dir = self.download_and_extract(session, working_dir, msvc.suffix)?;
        if !msvc.suffix.is_empty() {
            session.patch_sources(&source_dir, working_dir, msvc.suffix)?;
        }

        let ogg_include = sibling_path(
            working_dir,
            &format!("libogg/{}/include", msvc.ogg_source),
        )?;
        let solution = source_dir.join(SOLUTION);

        for arch in msvc.arches {
            let env = session.vs_env_with_include(msvc.vs, arch.env_arch, &ogg_include)?;
            for lib in msvc.libs {
                for config in Configuration::iter() {
                    session.toolchain().build_vs(&VsBuild {
                        solution: &solution,
                        configuration: config.as_str(),
                        platform: arch.platform,
                        target: lib.project,
                        toolset: msvc.toolset,
                        env: &env,
                    })?;
                }
            }
        }

        for (built, staged) in msvc.outputs(&source_dir, root_project) {
            copy_artifact(&built, &staged)?;
        }
        copy_headers(&source_dir, root_project)
    }

    fn build_macos(
        &self,
        session: &BuildSession,
        working_dir: &Path,
        root_project: &Path,
    ) -> Result<()> {
        let source_dir = self.download_and_extract(session, working_dir, "")?;

        let ogg_install = sibling_path(working_dir, "libogg/gen/install_macos")?;
        let install_dir = std::path::absolute(working_dir)?.join("gen/install_macos");
        let env: ToolchainEnv = session
            .config()
            .macos_env
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        session.toolchain().build_autotools(&AutotoolsBuild {
            source_dir: &source_dir,
            configure_args: vec![
                format!("--with-ogg={}", ogg_install.display()),
                "--disable-examples".to_string(),
                "--host=x86_64-apple-darwin".to_string(),
                "--disable-shared".to_string(),
                "--enable-static".to_string(),
            ],
            install_dir: install_dir.clone(),
            env,
            postclean: false,
        })?;

        copy_artifact(
            &install_dir.join("lib/libvorbis.a"),
            &root_project.join(MACOS_LIB),
        )?;
        copy_headers(&install_dir, root_project)
    }
}

/// Mirror `<dir>/include/vorbis` into the project's external headers
fn copy_headers(dir: &Path, root_project: &Path) -> Result<()> {
    clean_copy_includes(&dir.join("include/vorbis"), &root_project.join(INCLUDE_DEST))
}

impl Recipe for LibVorbis {
    fn name(&self) -> &'static str {
        "libvorbis"
    }

    fn supported_build_platforms(&self) -> Vec<BuildPlatform> {
        vec![BuildPlatform::Win32, BuildPlatform::Darwin]
    }

    fn supported_targets_for_build_platform(&self, platform: &BuildPlatform) -> Vec<Target> {
        match platform {
            BuildPlatform::Win32 => vec![Target::Win32, Target::Win10],
            _ => vec![Target::Macos],
        }
    }

    fn dependencies_for_target(&self, _target: Target) -> Vec<String> {
        vec!["libogg".to_string()]
    }

    fn download_url(&self) -> &'static str {
        DEFAULT_DOWNLOAD_URL
    }

    fn expected_artifacts(&self, target: Target, root_project: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = match target {
            Target::Win32 => WIN32.outputs(Path::new(""), root_project),
            Target::Win10 => WIN10.outputs(Path::new(""), root_project),
            Target::Macos => vec![(PathBuf::new(), root_project.join(MACOS_LIB))],
        }
        .into_iter()
        .map(|(_, staged)| staged)
        .collect();
        paths.push(root_project.join(INCLUDE_DEST));
        paths
    }

    fn build_for_target(
        &self,
        target: Target,
        session: &mut BuildSession,
        working_dir: &Path,
        root_project: &Path,
    ) -> Result<()> {
        info!("Building {} for {}", self.name(), target);
        match target {
            Target::Win32 => self.build_msvc(&WIN32, session, working_dir, root_project),
            Target::Win10 => self.build_msvc(&WIN10, session, working_dir, root_project),
            Target::Macos => self.build_macos(session, working_dir, root_project),
        }?;
        info!("Built {} for {}", self.name(), target);
        Ok(())
    }
}
