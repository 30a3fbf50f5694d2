//! Folder scanning and clip ingestion.
//!
//! Files are decoded one at a time on a blocking worker and awaited before
//! the next one starts. A bad file never aborts the batch.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mimic_core::{AudioBuffer, ClipHandle, MIN_RECORDED_DURATION_SECS, PoolKind};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::clip_store::ClipStore;
use crate::decode::AudioDecoder;
use crate::error::{DecodeError, EngineError, Result};

/// Outcome counts for one scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub listed: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub failed: usize,
    pub deleted: usize,
}

/// Recorded clips must be longer than the noise floor; custom clips are
/// always kept.
pub fn accepts(delete_after: bool, duration_secs: f32) -> bool {
    !delete_after || duration_secs > MIN_RECORDED_DURATION_SECS
}

pub struct IngestionPipeline {
    store: ClipStore,
    decoder: Arc<dyn AudioDecoder>,
    cancel: CancellationToken,
}

impl IngestionPipeline {
    pub fn new(store: ClipStore, decoder: Arc<dyn AudioDecoder>) -> Self {
        Self::with_cancellation(store, decoder, CancellationToken::new())
    }

    pub fn with_cancellation(
        store: ClipStore,
        decoder: Arc<dyn AudioDecoder>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            store,
            decoder,
            cancel,
        }
    }

    pub fn store(&self) -> &ClipStore {
        &self.store
    }

    /// Decode every file in `dir` into `kind`.
    ///
    /// With `delete_after`, each file that decodes is removed whether or not
    /// the clip was accepted; files that fail to decode stay for the next
    /// scan. A missing directory yields an empty report.
    pub async fn scan_and_ingest(
        &self,
        dir: &Path,
        kind: PoolKind,
        delete_after: bool,
    ) -> Result<ScanReport> {
        let mut report = ScanReport::default();
        if !dir.is_dir() {
            tracing::debug!("{} missing, skipping {kind} scan", dir.display());
            return Ok(report);
        }

        let files = list_files(dir).map_err(|e| EngineError::io(dir, e))?;
        report.listed = files.len();

        for path in files {
            if self.cancel.is_cancelled() {
                tracing::debug!("scan of {} cancelled", dir.display());
                break;
            }

            let buffer = match self.decode(&path).await {
                Ok(buffer) => buffer,
                Err(e) => {
                    tracing::warn!("skipping {}: {e}", path.display());
                    report.failed += 1;
                    continue;
                }
            };

            let duration = buffer.duration_secs();
            if accepts(delete_after, duration) {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.store.insert(kind, ClipHandle::new(name, buffer));
                report.accepted += 1;
            } else {
                tracing::debug!("rejected {} ({duration:.2}s)", path.display());
                report.rejected += 1;
            }

            if delete_after {
                match fs::remove_file(&path) {
                    Ok(()) => report.deleted += 1,
                    Err(e) => tracing::warn!("failed to delete {}: {e}", path.display()),
                }
            }
        }

        tracing::debug!(
            listed = report.listed,
            accepted = report.accepted,
            rejected = report.rejected,
            failed = report.failed,
            "scanned {} into {kind} pool",
            dir.display()
        );
        Ok(report)
    }

    async fn decode(&self, path: &Path) -> std::result::Result<AudioBuffer, DecodeError> {
        let decoder = Arc::clone(&self.decoder);
        let owned = path.to_path_buf();
        tokio::task::spawn_blocking(move || decoder.decode(&owned))
            .await
            .map_err(|e| DecodeError::Aborted {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?
    }
}

/// Regular files in `dir`, sorted by name. Unreadable entries are logged
/// and skipped.
fn list_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                tracing::warn!("skipping unreadable entry in {}: {e}", dir.display());
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}
