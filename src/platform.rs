// src/platform.rs

//! Build platforms and build targets
//!
//! A [`BuildPlatform`] is the host OS family a build runs on. A [`Target`] is
//! one platform + architecture + toolchain configuration a recipe can produce.

use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Host platform a build is driven from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuildPlatform {
    /// Windows hosts
    Win32,
    /// macOS hosts
    Darwin,
    /// Any host the recipes do not recognize
    Other(String),
}

impl BuildPlatform {
    /// Platform of the running process
    pub fn host() -> Self {
        match std::env::consts::OS {
            "windows" => Self::Win32,
            "macos" => Self::Darwin,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Win32 => "win32",
            Self::Darwin => "darwin",
            Self::Other(name) => name,
        }
    }
}

impl FromStr for BuildPlatform {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "win32" => Self::Win32,
            "darwin" => Self::Darwin,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for BuildPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A buildable configuration of a third-party library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Target {
    /// Classic desktop Windows, VS2013 toolset, x86 + x64
    Win32,
    /// Universal Windows, VS2017 toolchain, x86 + x64 + ARM
    Win10,
    /// macOS x86_64 via autotools
    Macos,
}

/// Build configuration of a Visual Studio project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Configuration {
    Debug,
    Release,
}

impl Configuration {
    /// Name used by MSBuild and in output directories
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }

    /// Suffix appended to library names staged for this configuration
    pub fn lib_suffix(&self) -> &'static str {
        match self {
            Self::Debug => "_d",
            Self::Release => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_build_platform_parse() {
        assert_eq!("win32".parse::<BuildPlatform>().unwrap(), BuildPlatform::Win32);
        assert_eq!("darwin".parse::<BuildPlatform>().unwrap(), BuildPlatform::Darwin);
        assert_eq!(
            "linux".parse::<BuildPlatform>().unwrap(),
            BuildPlatform::Other("linux".to_string())
        );
    }

    #[test]
    fn test_build_platform_display_roundtrip() {
        for name in ["win32", "darwin", "freebsd"] {
            let platform: BuildPlatform = name.parse().unwrap();
            assert_eq!(platform.to_string(), name);
        }
    }

    #[test]
    fn test_target_names() {
        assert_eq!(Target::Win32.to_string(), "win32");
        assert_eq!(Target::Win10.to_string(), "win10");
        assert_eq!("macos".parse::<Target>().unwrap(), Target::Macos);
        assert!("android".parse::<Target>().is_err());
        assert_eq!(Target::iter().count(), 3);
    }

    #[test]
    fn test_configuration_suffix() {
        assert_eq!(Configuration::Debug.lib_suffix(), "_d");
        assert_eq!(Configuration::Release.lib_suffix(), "");
        assert_eq!(Configuration::Release.to_string(), "Release");
        assert_eq!(Configuration::Debug.as_str(), "Debug");
    }
}
