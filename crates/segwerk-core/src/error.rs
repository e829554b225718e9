// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Segwerk.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Segwerk operations.
///
/// Every variant is fatal for the operation in progress. Recoverable
/// conditions (a missing translated counterpart, a malformed page-range
/// token) are reported through return values instead.
#[derive(Debug, Error)]
pub enum SegwerkError {
    // -- Input / lookup --
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("{} is not valid UTF-8 text: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("{} contains no lines to segment", path.display())]
    EmptyDocument { path: PathBuf },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // -- Metadata --
    /// No segment run has written a record at `path` yet.
    #[error("segmentation record not found: {}", path.display())]
    RecordNotFound { path: PathBuf },

    #[error("segmentation metadata is inconsistent: {0}")]
    InvalidMetadata(String),

    // -- Documents --
    #[error("PDF operation failed: {0}")]
    Pdf(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SegwerkError {
    /// Build a `NotFound` error for `path`.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// True for both a missing input file and a missing segmentation record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::RecordNotFound { .. })
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SegwerkError>;
