// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Segment module: splitting a document into line-bounded segments, the
// persisted segmentation record, and merging translated segments back.

pub mod merger;
pub mod segmenter;
pub mod store;

pub use merger::Merger;
pub use segmenter::Segmenter;
pub use store::{load_metadata, save_metadata};
