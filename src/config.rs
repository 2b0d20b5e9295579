// src/config.rs

//! Configuration for recipe builds
//!
//! Every field has a built-in default, so an empty TOML file (or no file at
//! all) describes a stock build. Example:
//!
//! ```toml
//! patch_dir = "Thirdparty/libvorbis"
//! msbuild = "C:/Program Files (x86)/MSBuild/14.0/Bin/MSBuild.exe"
//!
//! [macos_env]
//! CFLAGS = "-arch x86_64 -mmacosx-version-min=10.9"
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Pinned libvorbis source archive
pub const DEFAULT_DOWNLOAD_URL: &str =
    "http://downloads.xiph.org/releases/vorbis/libvorbis-1.3.5.tar.gz";

/// Published SHA-256 of libvorbis-1.3.5.tar.gz
pub const DEFAULT_ARCHIVE_SHA256: &str =
    "6efbcecdd3e5dfbf090341b485da9d176eb250d893e3eb378c428a2db38301ce";

const VS2013_VCVARSALL: &str =
    "C:/Program Files (x86)/Microsoft Visual Studio 12.0/VC/vcvarsall.bat";
const VS2017_VCVARSALL: &str =
    "C:/Program Files (x86)/Microsoft Visual Studio/2017/Community/VC/Auxiliary/Build/vcvarsall.bat";

/// Configuration for the libvorbis recipe and its toolchains
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecipeConfig {
    /// Source archive URL
    pub download_url: String,
    /// Expected SHA-256 of the archive (hex); `None` or `""` skips verification
    pub archive_sha256: Option<String>,
    /// Directory holding `patch<postfix>.diff` files
    pub patch_dir: PathBuf,
    /// Strip level passed to `patch -p`
    pub patch_strip: u32,
    /// MSBuild executable
    pub msbuild: PathBuf,
    /// vcvarsall.bat for the VS2013 (v120) toolchain
    pub vs2013_vcvarsall: PathBuf,
    /// vcvarsall.bat for the VS2017 toolchain
    pub vs2017_vcvarsall: PathBuf,
    /// Environment for autotools builds on macOS
    pub macos_env: BTreeMap<String, String>,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            download_url: DEFAULT_DOWNLOAD_URL.to_string(),
            archive_sha256: Some(DEFAULT_ARCHIVE_SHA256.to_string()),
            patch_dir: PathBuf::from("."),
            patch_strip: 0,
            msbuild: PathBuf::from("msbuild"),
            vs2013_vcvarsall: PathBuf::from(VS2013_VCVARSALL),
            vs2017_vcvarsall: PathBuf::from(VS2017_VCVARSALL),
            macos_env: default_macos_env(),
        }
    }
}

impl RecipeConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigError(e.to_string()))
    }

    /// Load from `path` if given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

fn default_macos_env() -> BTreeMap<String, String> {
    let flags = "-arch x86_64 -mmacosx-version-min=10.8".to_string();
    BTreeMap::from([
        ("CC".to_string(), "clang".to_string()),
        ("CXX".to_string(), "clang++".to_string()),
        ("CFLAGS".to_string(), flags.clone()),
        ("CXXFLAGS".to_string(), flags.clone()),
        ("LDFLAGS".to_string(), flags),
    ])
}
