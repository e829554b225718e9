// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// segwerk-document: Document processing for the Segwerk segmentation tool.
//
// Provides line-aligned segmentation of large text documents, ordered
// re-assembly of externally translated segments, and PDF text extraction
// with page-range filtering (the usual producer of segmentation input).

pub mod pdf;
pub mod segment;

// Re-export the primary structs so callers can use `segwerk_document::Segmenter` etc.
pub use pdf::page_range::{PageSelection, parse_page_range};
pub use pdf::reader::PdfTextExtractor;
pub use segment::merger::Merger;
pub use segment::segmenter::Segmenter;
