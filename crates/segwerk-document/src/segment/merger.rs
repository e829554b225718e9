// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Merger: reassemble translated segments into one ordered document.
//
// The segmentation record drives the merge: sections appear in ascending
// segment index no matter how the translated files landed on disk. A segment
// without a translated counterpart is reported and left out; it never aborts
// the merge.

use std::path::Path;

use chrono::{DateTime, Local};
use segwerk_core::{
    MergeReport, MissingCounterpart, OutputLayout, Result, SegmentationMetadata, SegwerkError,
};
use tracing::{debug, info, instrument};

use super::store::{load_metadata, write_staged};

/// Base name used when the source path has no usable file stem.
const FALLBACK_BASE_NAME: &str = "document";

/// Merges translated counterparts found in an [`OutputLayout`].
pub struct Merger {
    layout: OutputLayout,
}

impl Merger {
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Merge every available counterpart into the final document, stamping
    /// the header with the current local time.
    ///
    /// `source_override` only changes the name shown in the header and used
    /// for the output file; the record is always read from the layout.
    pub fn merge(&self, source_override: Option<&str>) -> Result<MergeReport> {
        self.merge_at(source_override, Local::now())
    }

    /// Same as [`Merger::merge`] with an explicit completion timestamp.
    #[instrument(skip_all, fields(root = %self.layout.root().display(), source_override = ?source_override))]
    pub fn merge_at(
        &self,
        source_override: Option<&str>,
        completed_at: DateTime<Local>,
    ) -> Result<MergeReport> {
        info!("Merging translated segments");

        let metadata = load_metadata(self.layout.metadata_path())?;
        metadata.validate()?;

        // An empty override counts as no override.
        let display_name = source_override
            .filter(|name| !name.is_empty())
            .unwrap_or(&metadata.source_file);
        let base_name = base_name(display_name);

        let mut document = render_header(&base_name, display_name, &metadata, completed_at);
        let mut merged = Vec::with_capacity(metadata.segments.len());
        let mut missing = Vec::new();

        // validate() guarantees ascending, contiguous indices.
        for segment in &metadata.segments {
            let path = self.layout.counterpart_path(segment.index);
            let Some(content) = read_counterpart(&path)? else {
                // Reported to the caller through the MergeReport.
                debug!(
                    index = segment.index,
                    start_line = segment.start_line,
                    end_line = segment.end_line,
                    path = %path.display(),
                    "translated segment missing, skipping"
                );
                missing.push(MissingCounterpart {
                    index: segment.index,
                    start_line: segment.start_line,
                    end_line: segment.end_line,
                    expected_path: path,
                });
                continue;
            };

            document.push_str(&format!(
                "\n## Segment {} (lines {}-{})\n\n",
                segment.index, segment.start_line, segment.end_line
            ));
            document.push_str(&content);
            document.push_str("\n---\n");

            debug!(index = segment.index, bytes = content.len(), "segment merged");
            merged.push(segment.index);
        }

        std::fs::create_dir_all(self.layout.final_dir())?;
        let output_path = self.layout.final_path(&base_name);
        write_staged(&output_path, document.as_bytes())?;

        info!(
            output = %output_path.display(),
            merged = merged.len(),
            missing = missing.len(),
            "Merge complete"
        );

        Ok(MergeReport {
            output_path,
            merged,
            missing,
        })
    }
}

/// File stem of `source`, or a fixed fallback when it has none.
fn base_name(source: &str) -> String {
    Path::new(source)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| FALLBACK_BASE_NAME.to_string())
}

/// Read a translated counterpart, returning `None` when it does not exist.
fn read_counterpart(path: &Path) -> Result<Option<String>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    String::from_utf8(bytes)
        .map(Some)
        .map_err(|source| SegwerkError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

fn render_header(
    base_name: &str,
    display_name: &str,
    metadata: &SegmentationMetadata,
    completed_at: DateTime<Local>,
) -> String {
    format!(
        "# {base_name} Translation\n\n\
         **Translation info**\n\
         - Original file: {display_name}\n\
         - Total lines: {total}\n\
         - Segments: {segments}\n\
         - Completed: {completed}\n\
         - Tool: segwerk {version}\n\n\
         ---\n\n",
        total = metadata.total_lines,
        segments = metadata.num_segments,
        completed = completed_at.format("%Y-%m-%d %H:%M:%S"),
        version = env!("CARGO_PKG_VERSION"),
    )
}
