// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tool configuration and the on-disk layout of an output tree.
//
// All file addressing (segment index -> path) lives in `NamingScheme` so the
// segmenter, the merger, and whatever external agent fills `translations/`
// agree on a single policy.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegwerkError};

/// Default number of lines per segment.
pub const DEFAULT_SEGMENT_SIZE: usize = 1000;

/// Default root of the output tree.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Persistent tool settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegwerkConfig {
    /// Root of the output tree.
    pub output_dir: PathBuf,
    /// Lines per segment.
    pub segment_size: usize,
    /// Optional cap on the number of segments (truncates the source).
    pub max_segments: Option<usize>,
    /// File naming policy inside the output tree.
    pub naming: NamingScheme,
}

impl Default for SegwerkConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            segment_size: DEFAULT_SEGMENT_SIZE,
            max_segments: None,
            naming: NamingScheme::default(),
        }
    }
}

impl SegwerkConfig {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SegwerkError::not_found(path));
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// The output tree described by these settings.
    pub fn layout(&self) -> OutputLayout {
        OutputLayout::with_naming(&self.output_dir, self.naming.clone())
    }
}

/// How files inside the output tree are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingScheme {
    /// Prefix for raw segment files (`segment_` -> `segment_3.md`).
    pub segment_prefix: String,
    /// Prefix for translated counterparts.
    pub counterpart_prefix: String,
    /// Prefix for the merged document, followed by the source base name.
    pub final_prefix: String,
    /// Extension shared by segment, counterpart, and merged files.
    pub extension: String,
    /// File name of the segmentation record.
    pub metadata_file: String,
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self {
            segment_prefix: "segment_".into(),
            counterpart_prefix: "translated_segment_".into(),
            final_prefix: "complete_translated_".into(),
            extension: "md".into(),
            metadata_file: "segments_info.json".into(),
        }
    }
}

impl NamingScheme {
    pub fn segment_file_name(&self, index: usize) -> String {
        format!("{}{}.{}", self.segment_prefix, index, self.extension)
    }

    pub fn counterpart_file_name(&self, index: usize) -> String {
        format!("{}{}.{}", self.counterpart_prefix, index, self.extension)
    }

    pub fn final_file_name(&self, base_name: &str) -> String {
        format!("{}{}.{}", self.final_prefix, base_name, self.extension)
    }
}

/// The directory tree shared by a segment run, the external translator, and
/// a merge run.
///
/// ```text
/// <root>/segments/segment_<i>.md
/// <root>/translations/translated_segment_<i>.md
/// <root>/metadata/segments_info.json
/// <root>/final/complete_translated_<base>.md
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
    naming: NamingScheme,
}

impl OutputLayout {
    /// Layout rooted at `root` with the default naming scheme.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_naming(root, NamingScheme::default())
    }

    pub fn with_naming(root: impl Into<PathBuf>, naming: NamingScheme) -> Self {
        Self {
            root: root.into(),
            naming,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn naming(&self) -> &NamingScheme {
        &self.naming
    }

    pub fn segments_dir(&self) -> PathBuf {
        self.root.join("segments")
    }

    pub fn translations_dir(&self) -> PathBuf {
        self.root.join("translations")
    }

    pub fn metadata_dir(&self) -> PathBuf {
        self.root.join("metadata")
    }

    pub fn final_dir(&self) -> PathBuf {
        self.root.join("final")
    }

    /// Path of the raw slice for segment `index` (1-based).
    pub fn segment_path(&self, index: usize) -> PathBuf {
        self.segments_dir().join(self.naming.segment_file_name(index))
    }

    /// Path where the external translator deposits segment `index`.
    pub fn counterpart_path(&self, index: usize) -> PathBuf {
        self.translations_dir()
            .join(self.naming.counterpart_file_name(index))
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.metadata_dir().join(&self.naming.metadata_file)
    }

    /// Path of the merged document for a source with the given base name.
    pub fn final_path(&self, base_name: &str) -> PathBuf {
        self.final_dir().join(self.naming.final_file_name(base_name))
    }

    /// Create every directory of the tree. Safe to call on an existing tree.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            self.segments_dir(),
            self.translations_dir(),
            self.final_dir(),
            self.metadata_dir(),
        ] {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(())
    }
}
