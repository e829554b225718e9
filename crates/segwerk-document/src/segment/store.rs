// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Segmentation record persistence.
//
// The record is pretty-printed JSON so it stays diffable and easy to inspect
// by whoever drives the translation step. It is written to a temporary sibling
// and renamed into place, so readers never observe a half-written record.

use std::path::{Path, PathBuf};

use segwerk_core::{Result, SegmentationMetadata, SegwerkError};
use tracing::{debug, instrument};

/// Read the segmentation record at `path`.
///
/// Fails with `RecordNotFound` when no segment run has written one yet.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_metadata(path: impl AsRef<Path>) -> Result<SegmentationMetadata> {
    let path = path.as_ref();
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(SegwerkError::RecordNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(err) => return Err(err.into()),
    };
    let metadata: SegmentationMetadata = serde_json::from_str(&raw)?;
    debug!(
        segments = metadata.num_segments,
        total_lines = metadata.total_lines,
        "segmentation record loaded"
    );
    Ok(metadata)
}

/// Write the segmentation record to `path`, replacing any previous record.
#[instrument(skip_all, fields(path = %path.as_ref().display(), segments = metadata.num_segments))]
pub fn save_metadata(path: impl AsRef<Path>, metadata: &SegmentationMetadata) -> Result<()> {
    let path = path.as_ref();
    let mut json = serde_json::to_string_pretty(metadata)?;
    json.push('\n');

    write_staged(path, json.as_bytes())?;

    debug!(bytes = json.len(), "segmentation record written");
    Ok(())
}

/// Write `bytes` to a `.tmp` sibling of `path`, then rename it into place.
///
/// On failure the staging file is removed and `path` keeps its previous
/// content, if any.
pub(crate) fn write_staged(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);

    if let Err(err) = std::fs::write(&staging, bytes).and_then(|()| std::fs::rename(&staging, path))
    {
        let _ = std::fs::remove_file(&staging);
        return Err(err.into());
    }
    Ok(())
}
