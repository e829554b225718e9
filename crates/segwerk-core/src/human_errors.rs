// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the command line.
//
// Every fatal error is mapped to a plain English summary with a concrete next
// step, so an operator (or the agent driving the tool) knows what to fix.

use crate::error::SegwerkError;

/// A human-readable error with a plain English message and an actionable
/// suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What to try next.
    pub suggestion: String,
}

/// Convert a `SegwerkError` into a `HumanError`.
pub fn humanize_error(err: &SegwerkError) -> HumanError {
    match err {
        SegwerkError::NotFound { path } => HumanError {
            message: format!("Could not find {}.", path.display()),
            suggestion: "Check the path and try again.".into(),
        },

        SegwerkError::RecordNotFound { path } => HumanError {
            message: format!("No segmentation record at {}.", path.display()),
            suggestion: "Run `segwerk segment` with the same --output-dir before merging.".into(),
        },

        SegwerkError::Decode { path, .. } => HumanError {
            message: format!("{} is not UTF-8 text.", path.display()),
            suggestion: "Convert the document to UTF-8 first (for PDFs use `segwerk extract`)."
                .into(),
        },

        SegwerkError::EmptyDocument { path } => HumanError {
            message: format!("{} is empty.", path.display()),
            suggestion: "There is nothing to segment; check you picked the right file.".into(),
        },

        SegwerkError::InvalidArgument(detail) => HumanError {
            message: format!("Invalid option: {detail}."),
            suggestion: "--segment-size and --max-segments must be positive numbers.".into(),
        },

        SegwerkError::InvalidMetadata(detail) => HumanError {
            message: "The segmentation record has been altered or is corrupt.".into(),
            suggestion: format!("Re-run `segwerk segment` to regenerate it. ({detail})"),
        },

        SegwerkError::Pdf(detail) => HumanError {
            message: "There's a problem with this PDF file.".into(),
            suggestion: format!("The file may be damaged or encrypted. ({detail})"),
        },

        SegwerkError::Io(io) => match io.kind() {
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission denied while reading or writing files.".into(),
                suggestion: "Check you can write to the output directory.".into(),
            },
            std::io::ErrorKind::StorageFull => HumanError {
                message: "The disk is full.".into(),
                suggestion: "Free some space and run the command again.".into(),
            },
            _ => HumanError {
                message: "A file could not be read or written.".into(),
                suggestion: format!("Details: {io}"),
            },
        },

        SegwerkError::Serialization(detail) => HumanError {
            message: "A JSON file could not be parsed.".into(),
            suggestion: format!(
                "Fix or delete the file (segments_info.json can be regenerated). ({detail})"
            ),
        },
    }
}
