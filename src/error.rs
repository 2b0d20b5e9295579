// src/error.rs

//! Error types for recipe builds
//!
//! Every failure is fatal to the build that raised it. Nothing here is
//! retried or recovered; callers propagate with `?` until the driver exits.

use thiserror::Error;

/// Errors that can occur while fetching, patching, building or staging
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem or process I/O failure
    #[error("I/O error: {0}")]
    IoError(String),

    /// Source archive could not be downloaded
    #[error("Download failed: {0}")]
    DownloadError(String),

    /// Downloaded archive does not match the pinned checksum
    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// A required file or directory does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed input (archive names, environment dumps, target names)
    #[error("Parse error: {0}")]
    ParseError(String),

    /// An external toolchain invocation failed
    #[error("{tool} failed: {message}")]
    ToolchainError { tool: String, message: String },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The recipe has no build procedure for this target
    #[error("Unsupported target: {0}")]
    UnsupportedTarget(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::IoError(ref msg) if msg.contains("gone")));
    }

    #[test]
    fn test_toolchain_error_display() {
        let err = Error::ToolchainError {
            tool: "msbuild".to_string(),
            message: "exit code 1".to_string(),
        };
        assert_eq!(err.to_string(), "msbuild failed: exit code 1");
    }
}
