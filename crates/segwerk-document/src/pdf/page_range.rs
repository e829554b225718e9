// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page-range expressions such as "1-3,5,7-8".
//
// Parsing is forgiving: malformed tokens are skipped and out-of-range pages
// are dropped. A selection that ends up empty falls back to every page.

use std::collections::BTreeSet;

use tracing::{debug, warn};

/// Which pages of a document to extract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelection {
    /// No filter: every page.
    All,
    /// Only these 1-based page numbers. Never empty.
    Pages(BTreeSet<u32>),
}

impl PageSelection {
    /// Whether the 1-based `page` is selected.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            Self::All => true,
            Self::Pages(pages) => pages.contains(&page),
        }
    }
}

/// Parse a comma-separated list of pages and inclusive ranges against a
/// document of `max_page` pages.
///
/// Reversed ranges (`"5-3"`) are accepted. An empty expression selects every
/// page; so does an expression in which no token survives (all malformed or
/// out of range), which is logged at warn level.
pub fn parse_page_range(expr: &str, max_page: u32) -> PageSelection {
    let mut pages = BTreeSet::new();

    for token in expr.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match parse_token(token) {
            Some((start, end)) => {
                let (low, high) = if start > end { (end, start) } else { (start, end) };
                pages.extend(low.max(1)..=high.min(max_page));
            }
            None => debug!(token, "ignoring malformed page-range token"),
        }
    }

    if pages.is_empty() {
        if !expr.trim().is_empty() {
            warn!(
                expr,
                max_page, "page range selects no pages; extracting every page"
            );
        }
        return PageSelection::All;
    }
    PageSelection::Pages(pages)
}

/// A single page `"n"` or a range `"a-b"`, unvalidated.
fn parse_token(token: &str) -> Option<(u32, u32)> {
    match token.split_once('-') {
        Some((start, end)) => Some((start.trim().parse().ok()?, end.trim().parse().ok()?)),
        None => {
            let page = token.parse().ok()?;
            Some((page, page))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(list: &[u32]) -> PageSelection {
        PageSelection::Pages(list.iter().copied().collect())
    }

    #[test]
    fn mixed_singles_and_ranges() {
        assert_eq!(parse_page_range("1-3,5,7-8", 10), pages(&[1, 2, 3, 5, 7, 8]));
    }

    #[test]
    fn out_of_range_only_falls_back_to_all_pages() {
        // "20" on a 10-page document selects nothing, which means no filter.
        let selection = parse_page_range("20", 10);
        assert_eq!(selection, PageSelection::All);
        assert!((1..=10).all(|p| selection.includes(p)));
    }

    #[test]
    fn all_malformed_falls_back_to_all_pages() {
        assert_eq!(parse_page_range("abc,x-y,-", 10), PageSelection::All);
    }

    #[test]
    fn empty_expression_is_no_filter() {
        assert_eq!(parse_page_range("", 10), PageSelection::All);
        assert_eq!(parse_page_range(" , ", 10), PageSelection::All);
    }

    #[test]
    fn malformed_tokens_are_skipped_not_fatal() {
        assert_eq!(parse_page_range("2,foo,4-x,6", 10), pages(&[2, 6]));
    }

    #[test]
    fn ranges_are_clamped_to_document() {
        assert_eq!(parse_page_range("0-3,9-400", 10), pages(&[1, 2, 3, 9, 10]));
    }

    #[test]
    fn reversed_range_is_swapped() {
        assert_eq!(parse_page_range("5-3", 10), pages(&[3, 4, 5]));
    }

    #[test]
    fn whitespace_around_tokens_is_tolerated() {
        assert_eq!(parse_page_range(" 1 - 2 , 4 ", 10), pages(&[1, 2, 4]));
    }

    #[test]
    fn negative_looking_token_is_malformed() {
        assert_eq!(parse_page_range("-2,3", 10), pages(&[3]));
    }

    #[test]
    fn selection_membership() {
        let selection = parse_page_range("2-3", 5);
        assert!(!selection.includes(1));
        assert!(selection.includes(2));
        assert!(selection.includes(3));
        assert!(!selection.includes(4));
    }
}
