// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: the segmentation record shared between the segment and
// merge runs, and the report a merge produces.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegwerkError};

/// Current schema version of the persisted segmentation record.
pub const METADATA_VERSION: u32 = 1;

fn default_version() -> u32 {
    METADATA_VERSION
}

/// Description of how one source document was partitioned.
///
/// Written once by the segmenter and read back, unchanged, by the merger in a
/// later process. A new segment run replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentationMetadata {
    /// Schema version. Records written before versioning load as version 1.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Path of the original document, as given to the segmenter.
    pub source_file: String,
    /// Line count of the source at segmentation time.
    pub total_lines: usize,
    /// Number of segments actually created.
    pub num_segments: usize,
    /// Requested lines per segment.
    pub segment_size: usize,
    /// Segment descriptors, ascending by `index`.
    pub segments: Vec<SegmentDescriptor>,
}

/// One contiguous, line-bounded slice of the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDescriptor {
    /// 1-based position; defines merge order.
    pub index: usize,
    /// Path of the file holding the sliced content.
    pub file: String,
    /// First source line (1-based, inclusive).
    pub start_line: usize,
    /// Last source line (1-based, inclusive).
    pub end_line: usize,
    pub line_count: usize,
}

impl SegmentationMetadata {
    /// Number of source lines covered by the segments.
    pub fn processed_lines(&self) -> usize {
        self.segments
            .iter()
            .fold(0, |total, s| total.saturating_add(s.line_count))
    }

    /// Source lines that were dropped by a segment cap.
    pub fn truncated_lines(&self) -> usize {
        self.total_lines.saturating_sub(self.processed_lines())
    }

    /// Check the partition invariants of the record.
    ///
    /// Segments must be indexed contiguously from 1, cover a contiguous
    /// prefix of the source starting at line 1, and every segment but the
    /// last must hold exactly `segment_size` lines.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SegwerkError::InvalidMetadata(msg));

        if self.segment_size == 0 {
            return invalid("segment_size must be greater than zero".into());
        }
        if self.segments.is_empty() {
            return invalid("record lists no segments".into());
        }
        if self.num_segments != self.segments.len() {
            return invalid(format!(
                "num_segments is {} but {} segments are listed",
                self.num_segments,
                self.segments.len()
            ));
        }

        let last = self.segments.len() - 1;
        let mut expected_start = 1;
        for (position, segment) in self.segments.iter().enumerate() {
            if segment.index != position + 1 {
                return invalid(format!(
                    "segment at position {} has index {}, expected {}",
                    position,
                    segment.index,
                    position + 1
                ));
            }
            if segment.start_line != expected_start {
                return invalid(format!(
                    "segment {} starts at line {}, expected {}",
                    segment.index, segment.start_line, expected_start
                ));
            }
            // start_line >= 1 here, so the span below cannot overflow.
            if segment.line_count == 0
                || segment.end_line < segment.start_line
                || segment.end_line - segment.start_line + 1 != segment.line_count
            {
                return invalid(format!(
                    "segment {} range {}-{} does not match line_count {}",
                    segment.index, segment.start_line, segment.end_line, segment.line_count
                ));
            }
            let full = segment.line_count == self.segment_size;
            if (position < last && !full) || segment.line_count > self.segment_size {
                return invalid(format!(
                    "segment {} holds {} lines with segment_size {}",
                    segment.index, segment.line_count, self.segment_size
                ));
            }
            expected_start = match segment.end_line.checked_add(1) {
                Some(next) => next,
                None => {
                    return invalid(format!(
                        "segment {} ends at line {}, past any addressable line",
                        segment.index, segment.end_line
                    ));
                }
            };
        }

        if self.segments[last].end_line > self.total_lines {
            return invalid(format!(
                "last segment ends at line {} past total_lines {}",
                self.segments[last].end_line, self.total_lines
            ));
        }

        Ok(())
    }
}

/// A segment whose translated counterpart was absent at merge time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCounterpart {
    pub index: usize,
    pub start_line: usize,
    pub end_line: usize,
    /// Where the merger looked for the counterpart.
    pub expected_path: PathBuf,
}

/// Outcome of a merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// The final merged document.
    pub output_path: PathBuf,
    /// Indices of the segments included, ascending.
    pub merged: Vec<usize>,
    /// Segments skipped because their counterpart was missing, ascending.
    pub missing: Vec<MissingCounterpart>,
}

impl MergeReport {
    /// True when every segment made it into the final document.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(index: usize, start: usize, end: usize) -> SegmentDescriptor {
        SegmentDescriptor {
            index,
            file: format!("output/segments/segment_{index}.md"),
            start_line: start,
            end_line: end,
            line_count: end + 1 - start,
        }
    }

    fn record() -> SegmentationMetadata {
        SegmentationMetadata {
            version: METADATA_VERSION,
            source_file: "book.md".into(),
            total_lines: 2500,
            num_segments: 3,
            segment_size: 1000,
            segments: vec![
                descriptor(1, 1, 1000),
                descriptor(2, 1001, 2000),
                descriptor(3, 2001, 2500),
            ],
        }
    }

    #[test]
    fn well_formed_record_validates() {
        let meta = record();
        meta.validate().expect("valid record");
        assert_eq!(meta.processed_lines(), 2500);
        assert_eq!(meta.truncated_lines(), 0);
    }

    #[test]
    fn capped_record_reports_truncation() {
        let mut meta = record();
        meta.segments.truncate(2);
        meta.num_segments = 2;
        meta.validate().expect("capped prefix is valid");
        assert_eq!(meta.truncated_lines(), 500);
    }

    #[test]
    fn gap_between_segments_is_rejected() {
        let mut meta = record();
        meta.segments[1] = descriptor(2, 1002, 2000);
        assert!(matches!(
            meta.validate(),
            Err(SegwerkError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn huge_end_line_is_rejected_without_overflow() {
        let mut meta = record();
        meta.segments = vec![SegmentDescriptor {
            end_line: usize::MAX,
            ..descriptor(1, 1, 3)
        }];
        meta.num_segments = 1;
        assert!(matches!(
            meta.validate(),
            Err(SegwerkError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn segment_ending_at_usize_max_is_rejected() {
        let meta = SegmentationMetadata {
            version: METADATA_VERSION,
            source_file: "book.md".into(),
            total_lines: usize::MAX,
            num_segments: 1,
            segment_size: usize::MAX,
            segments: vec![SegmentDescriptor {
                index: 1,
                file: "s1.md".into(),
                start_line: 1,
                end_line: usize::MAX,
                line_count: usize::MAX,
            }],
        };
        assert!(matches!(
            meta.validate(),
            Err(SegwerkError::InvalidMetadata(_))
        ));
        assert_eq!(meta.processed_lines(), usize::MAX);
    }

    #[test]
    fn out_of_order_indices_are_rejected() {
        let mut meta = record();
        meta.segments.swap(0, 1);
        assert!(meta.validate().is_err());
    }

    #[test]
    fn short_middle_segment_is_rejected() {
        let mut meta = record();
        meta.segments[0] = descriptor(1, 1, 999);
        meta.segments[1] = descriptor(2, 1000, 2000);
        assert!(meta.validate().is_err());
    }

    #[test]
    fn segment_past_end_of_source_is_rejected() {
        let mut meta = record();
        meta.total_lines = 2400;
        assert!(meta.validate().is_err());
    }

    #[test]
    fn count_mismatch_is_rejected() {
        let mut meta = record();
        meta.num_segments = 4;
        assert!(meta.validate().is_err());
    }

    #[test]
    fn record_without_version_loads_as_v1() {
        let json = r#"{
            "source_file": "a.md",
            "total_lines": 3,
            "num_segments": 1,
            "segment_size": 10,
            "segments": [
                {"index": 1, "file": "s1.md", "start_line": 1, "end_line": 3, "line_count": 3}
            ]
        }"#;
        let meta: SegmentationMetadata = serde_json::from_str(json).expect("parse");
        assert_eq!(meta.version, METADATA_VERSION);
        meta.validate().expect("valid");
    }

    #[test]
    fn json_field_names_are_stable() {
        let value = serde_json::to_value(record()).expect("serialize");
        for key in [
            "version",
            "source_file",
            "total_lines",
            "num_segments",
            "segment_size",
            "segments",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        let first = &value["segments"][0];
        assert_eq!(first["start_line"], 1);
        assert_eq!(first["end_line"], 1000);
        assert_eq!(first["line_count"], 1000);
    }
}
