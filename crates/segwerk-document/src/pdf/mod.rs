// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: page-range selection and plain-text extraction.

pub mod page_range;
pub mod reader;

pub use page_range::{PageSelection, parse_page_range};
pub use reader::PdfTextExtractor;
