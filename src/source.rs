// src/source.rs

//! Source acquisition: download, verify and extract pinned archives

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;
use tar::Archive;
use tracing::{debug, info};

/// Timeout for the archive download
const HTTP_TIMEOUT: Duration = Duration::from_secs(300);

/// File name component of a URL (`.../libvorbis-1.3.5.tar.gz` → `libvorbis-1.3.5.tar.gz`)
pub fn url_file_name(url: &str) -> Result<&str> {
    url.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::ParseError(format!("URL has no file name: {}", url)))
}

/// URL file name with archive extensions removed (`libvorbis-1.3.5`)
///
/// This is also the name of the top-level directory inside upstream
/// release tarballs.
pub fn url_file_name_no_ext(url: &str) -> Result<&str> {
    let name = url_file_name(url)?;
    for ext in [".tar.gz", ".tgz", ".tar.bz2", ".tar.xz", ".zip", ".tar"] {
        if let Some(stem) = name.strip_suffix(ext) {
            return Ok(stem);
        }
    }
    Ok(name)
}

/// Where a source archive goes and what to verify it against
#[derive(Debug, Clone)]
pub struct SourceRequest<'a> {
    pub url: &'a str,
    /// Directory the archive is downloaded and extracted into
    pub working_dir: &'a Path,
    /// Final location of the extracted sources
    pub source_dir: &'a Path,
    /// Top-level directory inside the archive
    pub inner_dir: &'a str,
    /// Expected hex SHA-256 of the archive
    pub sha256: Option<&'a str>,
}

/// Materializes source checkouts
pub trait SourceFetcher {
    /// Make `request.source_dir` contain the extracted archive
    fn download_and_extract(&self, request: &SourceRequest<'_>) -> Result<()>;
}

/// Fetches archives over HTTP(S) and unpacks gzip tarballs
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::DownloadError(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        info!("Downloading: {}", url);
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::DownloadError(format!("{url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::DownloadError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let temp_path = dest.with_extension("part");
        let mut file = File::create(&temp_path)?;
        let written = match io::copy(&mut response, &mut file) {
            Ok(written) => written,
            Err(e) => {
                drop(file);
                let _ = fs::remove_file(&temp_path);
                return Err(Error::DownloadError(format!("Failed to read {url}: {e}")));
            }
        };
        drop(file);
        fs::rename(&temp_path, dest)?;
        debug!("Downloaded {} bytes to {}", written, dest.display());
        Ok(())
    }
}

impl SourceFetcher for HttpFetcher {
    fn download_and_extract(&self, request: &SourceRequest<'_>) -> Result<()> {
        if request.source_dir.exists() {
            debug!("Using existing sources: {}", request.source_dir.display());
            return Ok(());
        }

        fs::create_dir_all(request.working_dir)?;
        let archive_path = request.working_dir.join(url_file_name(request.url)?);
        if archive_path.exists() {
            debug!("Using cached archive: {}", archive_path.display());
        } else {
            self.download(request.url, &archive_path)?;
        }

        if let Some(expected) = request.sha256.filter(|s| !s.is_empty())
            && let Err(e) = verify_sha256(&archive_path, expected)
        {
            let _ = fs::remove_file(&archive_path);
            return Err(e);
        }

        extract_tar_gz(&archive_path, request.working_dir)?;
        let extracted = request.working_dir.join(request.inner_dir);
        if !extracted.is_dir() {
            return Err(Error::NotFound(format!(
                "Archive {} did not contain {}",
                archive_path.display(),
                request.inner_dir
            )));
        }
        if extracted != request.source_dir {
            fs::rename(&extracted, request.source_dir)?;
        }
        info!("Extracted sources to {}", request.source_dir.display());
        Ok(())
    }
}

/// Hex SHA-256 of a file
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Fail with [`Error::ChecksumMismatch`] unless the file hashes to `expected`
pub fn verify_sha256(path: &Path, expected: &str) -> Result<()> {
    let actual = sha256_file(path)?;
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(Error::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        });
    }
    debug!("Checksum verified for {}", path.display());
    Ok(())
}

/// Unpack a `.tar.gz` into `dest`
pub fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| {
        Error::NotFound(format!("Archive {}: {}", archive.display(), e))
    })?;
    let mut tarball = Archive::new(GzDecoder::new(file));
    tarball
        .unpack(dest)
        .map_err(|e| Error::IoError(format!("Failed to extract {}: {}", archive.display(), e)))
}
