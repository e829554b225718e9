// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Segmenter: split a text document into fixed-size, line-aligned segment
// files and record the partition for a later merge run.
//
// Splitting is purely line-count based. A segment cap truncates the source
// (trailing lines are never segmented) rather than growing the segments.

use std::ops::Range;
use std::path::Path;

use segwerk_core::{
    METADATA_VERSION, OutputLayout, Result, SegmentDescriptor, SegmentationMetadata, SegwerkError,
};
use tracing::{debug, info, instrument, warn};

use super::store::save_metadata;

/// Splits documents into segment files inside an [`OutputLayout`].
pub struct Segmenter {
    layout: OutputLayout,
}

impl Segmenter {
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Segment the document at `input` into chunks of `segment_size` lines.
    ///
    /// Writes one file per segment, then the segmentation record. The record
    /// is written last, so a failed run never leaves a fresh record pointing
    /// at missing segment files. Running twice with the same arguments
    /// produces byte-identical output.
    #[instrument(
        skip_all,
        fields(
            input = %input.as_ref().display(),
            segment_size = segment_size,
            max_segments = ?max_segments
        )
    )]
    pub fn segment(
        &self,
        input: impl AsRef<Path>,
        segment_size: usize,
        max_segments: Option<usize>,
    ) -> Result<SegmentationMetadata> {
        let input = input.as_ref();
        let text = read_document(input)?;
        let lines = split_lines(&text);
        let total_lines = lines.len();
        info!(total_lines, "Analysing document");

        if total_lines == 0 {
            return Err(SegwerkError::EmptyDocument {
                path: input.to_path_buf(),
            });
        }

        let plan = plan_segments(total_lines, segment_size, max_segments)?;
        let processed = plan.last().map(|range| range.end).unwrap_or(0);
        if processed < total_lines {
            warn!(
                kept = processed,
                dropped = total_lines - processed,
                "segment cap reached; trailing lines will not be segmented"
            );
        }

        self.layout.ensure_dirs()?;

        let mut segments = Vec::with_capacity(plan.len());
        for (position, range) in plan.iter().enumerate() {
            let index = position + 1;
            let path = self.layout.segment_path(index);
            std::fs::write(&path, lines[range.clone()].concat())?;

            debug!(
                index,
                start_line = range.start + 1,
                end_line = range.end,
                "segment written"
            );

            segments.push(SegmentDescriptor {
                index,
                file: path.display().to_string(),
                start_line: range.start + 1,
                end_line: range.end,
                line_count: range.len(),
            });
        }

        let metadata = SegmentationMetadata {
            version: METADATA_VERSION,
            source_file: input.display().to_string(),
            total_lines,
            num_segments: segments.len(),
            segment_size,
            segments,
        };
        save_metadata(self.layout.metadata_path(), &metadata)?;

        info!(
            segments = metadata.num_segments,
            processed_lines = processed,
            "Segmentation complete"
        );
        Ok(metadata)
    }
}

/// Read a whole document as UTF-8 text.
fn read_document(path: &Path) -> Result<String> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(SegwerkError::not_found(path));
        }
        Err(err) => return Err(err.into()),
    };
    String::from_utf8(bytes).map_err(|source| SegwerkError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Split `text` into lines, each keeping its own terminator. The final line
/// may lack one.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Compute the 0-based, half-open line ranges of each segment.
///
/// `ceil(total_lines / segment_size)` segments, reduced to `max_segments`
/// when a cap is given. Every range but the last spans exactly
/// `segment_size` lines.
pub fn plan_segments(
    total_lines: usize,
    segment_size: usize,
    max_segments: Option<usize>,
) -> Result<Vec<Range<usize>>> {
    if segment_size == 0 {
        return Err(SegwerkError::InvalidArgument(
            "segment size must be at least 1 line".into(),
        ));
    }
    if max_segments == Some(0) {
        return Err(SegwerkError::InvalidArgument(
            "max segments must be at least 1".into(),
        ));
    }

    let mut count = total_lines.div_ceil(segment_size);
    if let Some(cap) = max_segments {
        count = count.min(cap);
    }

    Ok((0..count)
        .map(|i| {
            let start = i * segment_size;
            start..((i + 1) * segment_size).min(total_lines)
        })
        .collect())
}
