//! Transient on-disk storage for uploaded images.
//!
//! An uploaded image lives on disk only for the duration of the request that
//! created it. The handle returned by [`ImageSpool::acquire`] must be released
//! on every exit path; release is idempotent and never fails the caller. If a
//! request future is dropped before release runs (client disconnect, timeout),
//! the handle's `Drop` impl reclaims the file.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// Writes uploaded blobs to uniquely named files under a spool directory.
#[derive(Debug, Clone)]
pub struct ImageSpool {
    dir: PathBuf,
}

impl ImageSpool {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `bytes` to a uniquely named file and return a scoped handle.
    ///
    /// The file name extension is derived from the declared content type,
    /// falling back to `jpg`. Handles are never reused across requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the spool directory is unusable or the write
    /// fails; this happens before any provider call is launched.
    pub async fn acquire(&self, bytes: &[u8], declared_type: &str) -> anyhow::Result<SpooledImage> {
        let path = self
            .dir
            .join(format!("sky-{}.{}", Uuid::now_v7(), extension_for(declared_type)));

        tokio::fs::write(&path, bytes).await.map_err(|e| {
            anyhow::anyhow!("Failed to spool upload to {}: {}", path.display(), e)
        })?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Spooled upload");
        Ok(SpooledImage {
            path,
            released: AtomicBool::new(false),
        })
    }
}

/// Handle to one spooled upload. Owned exclusively by the request that
/// acquired it.
#[derive(Debug)]
pub struct SpooledImage {
    path: PathBuf,
    released: AtomicBool,
}

impl SpooledImage {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the backing file. Idempotent: calling it again, or on a handle
    /// whose file is already gone, is safe. Deletion failures are logged and
    /// swallowed so they can never mask the primary result.
    pub async fn release(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove spooled upload");
        } else {
            tracing::debug!(path = %self.path.display(), "Released spooled upload");
        }
    }
}

impl Drop for SpooledImage {
    fn drop(&mut self) {
        // Fallback for futures dropped mid-flight; the async release path has
        // already marked the flag in the normal case.
        if !self.released.swap(true, Ordering::SeqCst) {
            if let Err(e) = std::fs::remove_file(&self.path) {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove spooled upload on drop");
            }
        }
    }
}

fn extension_for(declared_type: &str) -> &'static str {
    match declared_type {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/bmp" => "bmp",
        _ => "jpg",
    }
}
