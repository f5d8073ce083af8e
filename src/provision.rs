//! Provisioning: make sure a default clip exists on disk before loading it.

use crate::error::{IdleError, Result};
use reqwest::blocking::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Well-known location of the default idle clip.
pub const DEFAULT_CLIP_URL: &str = "https://raw.githubusercontent.com/AnimaVR/NeuroSync_Player/refs/heads/main/livelink/animations/default_anim/default.csv";

/// Conventional path of the default clip relative to the working directory.
pub const DEFAULT_CLIP_PATH: &str = "animations/default_anim/default.csv";

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Return `path` if it already exists, otherwise download `url` into it.
///
/// Missing parent directories are created. Nothing is written unless the
/// whole response body arrived with a success status.
pub fn ensure_clip(path: impl AsRef<Path>, url: &str) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_file() {
        log::debug!("clip already present: {}", path.display());
        return Ok(path.to_path_buf());
    }

    let fail = |reason: String| IdleError::Provision {
        url: url.to_string(),
        reason,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| fail(format!("cannot create {}: {e}", parent.display())))?;
    }

    log::info!("clip not found at {}, downloading {url}", path.display());
    let client = Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .map_err(|e| fail(e.to_string()))?;
    let body = client
        .get(url)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .and_then(reqwest::blocking::Response::bytes)
        .map_err(|e| fail(e.to_string()))?;

    fs::write(path, &body).map_err(|e| fail(format!("cannot write {}: {e}", path.display())))?;
    log::info!("downloaded {} bytes to {}", body.len(), path.display());
    Ok(path.to_path_buf())
}

/// [`ensure_clip`] for the default clip at its conventional path.
pub fn ensure_default_clip() -> Result<PathBuf> {
    ensure_clip(DEFAULT_CLIP_PATH, DEFAULT_CLIP_URL)
}
