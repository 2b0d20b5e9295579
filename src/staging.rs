// src/staging.rs

//! Artifact staging into the consuming project tree

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Copy a built library to its destination, replacing any previous copy
///
/// Missing parent directories of `dst` are created. A missing `src` means
/// the toolchain did not produce the expected output.
pub fn copy_artifact(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_file() {
        return Err(Error::NotFound(format!(
            "Build output missing: {}",
            src.display()
        )));
    }
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst).map_err(|e| {
        Error::IoError(format!(
            "Failed to copy {} to {}: {}",
            src.display(),
            dst.display(),
            e
        ))
    })?;
    info!("Staged {}", dst.display());
    Ok(())
}

/// Replace `dst_dir` with a recursive copy of `src_dir`
pub fn clean_copy_includes(src_dir: &Path, dst_dir: &Path) -> Result<()> {
    if !src_dir.is_dir() {
        return Err(Error::NotFound(format!(
            "Include directory missing: {}",
            src_dir.display()
        )));
    }
    if dst_dir.exists() {
        debug!("Removing stale headers in {}", dst_dir.display());
        fs::remove_dir_all(dst_dir)?;
    }
    fs::create_dir_all(dst_dir)?;

    let mut copied = 0usize;
    for entry in WalkDir::new(src_dir).min_depth(1) {
        let entry = entry.map_err(|e| Error::IoError(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(src_dir)
            .map_err(|e| Error::IoError(e.to_string()))?;
        let target = dst_dir.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    info!(
        "Copied {} header(s) from {} to {}",
        copied,
        src_dir.display(),
        dst_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_artifact_creates_parents_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("libvorbis_static.lib");
        let dst = dir.path().join("Libs/lib_CMake/win/x86/Debug/libvorbis_static_d.lib");

        fs::write(&src, b"new").unwrap();
        fs::create_dir_all(dst.parent().unwrap()).unwrap();
        fs::write(&dst, b"old contents").unwrap();

        copy_artifact(&src, &dst).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"new");
    }

    #[test]
    fn test_copy_artifact_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let result = copy_artifact(&dir.path().join("missing.lib"), &dir.path().join("out.lib"));
        assert!(matches!(result, Err(Error::NotFound(ref msg)) if msg.contains("missing.lib")));
    }

    #[test]
    fn test_clean_copy_includes_removes_stale_files() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("include/vorbis");
        let dst = dir.path().join("Sources/External/vorbis");

        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("codec.h"), b"codec").unwrap();
        fs::write(src.join("nested/extra.h"), b"extra").unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(dst.join("stale.h"), b"stale").unwrap();

        clean_copy_includes(&src, &dst).unwrap();

        assert_eq!(fs::read(dst.join("codec.h")).unwrap(), b"codec");
        assert_eq!(fs::read(dst.join("nested/extra.h")).unwrap(), b"extra");
        assert!(!dst.join("stale.h").exists());
    }

    #[test]
    fn test_clean_copy_includes_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let result = clean_copy_includes(&dir.path().join("nope"), &dir.path().join("out"));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
