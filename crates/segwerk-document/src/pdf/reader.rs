// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF text extractor: pull plain text out of existing PDF documents, page by
// page, using the `lopdf` crate. The output is the usual input of a segment
// run.

use std::path::{Path, PathBuf};

use lopdf::Document;
use segwerk_core::{Result, SegwerkError};
use tracing::{debug, info, instrument};

use super::page_range::{PageSelection, parse_page_range};

/// Extracts plain text from a PDF document.
pub struct PdfTextExtractor {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfTextExtractor {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(SegwerkError::not_found(path_ref));
        }
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            SegwerkError::Pdf(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create an extractor from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            SegwerkError::Pdf(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> Result<u32> {
        page_count_u32(self.document.get_pages().len())
    }

    /// Return the source path if the extractor was created via [`PdfTextExtractor::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    // -- Extraction -----------------------------------------------------------

    /// Plain text of a single 1-indexed page.
    pub fn page_text(&self, page_number: u32) -> Result<String> {
        self.document.extract_text(&[page_number]).map_err(|err| {
            SegwerkError::Pdf(format!("failed to extract page {}: {}", page_number, err))
        })
    }

    /// Extract the selected pages in ascending order.
    ///
    /// Each page becomes a block `"\n===== Page <n> =====\n<text>"`; blocks
    /// are joined with a newline.
    #[instrument(skip_all, fields(pages = self.document.get_pages().len()))]
    pub fn extract(&self, selection: &PageSelection) -> Result<String> {
        let mut blocks = Vec::new();
        for page_number in self.document.get_pages().into_keys() {
            if !selection.includes(page_number) {
                continue;
            }
            let text = self.page_text(page_number)?;
            blocks.push(format!("\n===== Page {} =====\n{}", page_number, text));
        }

        info!(extracted = blocks.len(), "PDF text extracted");
        Ok(blocks.join("\n"))
    }

    /// Parse `page_range` against this document and extract the result.
    pub fn extract_range(&self, page_range: &str) -> Result<String> {
        let selection = parse_page_range(page_range, self.page_count()?);
        self.extract(&selection)
    }
}

/// PDF page numbers are `u32`; a larger page tree cannot be addressed.
fn page_count_u32(pages: usize) -> Result<u32> {
    u32::try_from(pages)
        .map_err(|_| SegwerkError::Pdf(format!("page count {} exceeds u32 range", pages)))
}

/// Where `extract --save` writes text for `input`: same directory and stem,
/// `.txt` extension.
pub fn derived_text_path(input: impl AsRef<Path>) -> PathBuf {
    input.as_ref().with_extension("txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    /// Helper: build a PDF with one line of Courier text per entry of `pages`.
    fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), Object::Integer(24)]),
                    Operation::new("Td", vec![Object::Integer(72), Object::Integer(700)]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode content"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("save pdf");
        bytes
    }

    #[test]
    fn counts_pages() {
        let extractor =
            PdfTextExtractor::from_bytes(&pdf_with_pages(&["one", "two", "three"])).expect("load");
        assert_eq!(extractor.page_count().expect("page count"), 3);
        assert_eq!(extractor.source_path(), None);
    }

    #[test]
    fn extracts_every_page_with_markers() {
        let extractor =
            PdfTextExtractor::from_bytes(&pdf_with_pages(&["alpha", "beta"])).expect("load");
        let text = extractor.extract(&PageSelection::All).expect("extract");

        assert!(text.starts_with("\n===== Page 1 =====\n"));
        assert!(text.contains("\n===== Page 2 =====\n"));
        assert!(text.contains("alpha"));
        assert!(text.find("alpha") < text.find("beta"));
    }

    #[test]
    fn page_range_filters_pages() {
        let extractor = PdfTextExtractor::from_bytes(&pdf_with_pages(&["alpha", "beta", "gamma"]))
            .expect("load");
        let text = extractor.extract_range("1,3").expect("extract");

        assert!(text.contains("===== Page 1 ====="));
        assert!(!text.contains("===== Page 2 ====="));
        assert!(text.contains("===== Page 3 ====="));
        assert!(!text.contains("beta"));
    }

    #[test]
    fn range_selecting_nothing_extracts_everything() {
        let extractor =
            PdfTextExtractor::from_bytes(&pdf_with_pages(&["alpha", "beta"])).expect("load");
        let filtered = extractor.extract_range("20").expect("extract");
        let all = extractor.extract(&PageSelection::All).expect("extract");
        assert_eq!(filtered, all);
    }

    #[test]
    fn page_count_beyond_u32_is_a_pdf_error() {
        assert_eq!(page_count_u32(7).expect("fits"), 7);
        assert_eq!(page_count_u32(u32::MAX as usize).expect("fits"), u32::MAX);

        #[cfg(target_pointer_width = "64")]
        {
            let err = page_count_u32(u32::MAX as usize + 1).unwrap_err();
            assert!(matches!(err, SegwerkError::Pdf(ref msg) if msg.contains("exceeds u32")));
        }
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let err = PdfTextExtractor::open("/no/such/file.pdf").err().expect("error");
        assert!(matches!(err, SegwerkError::NotFound { .. }));
    }

    #[test]
    fn open_reads_from_disk() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("report.pdf");
        std::fs::write(&path, pdf_with_pages(&["alpha"])).expect("write pdf");

        let extractor = PdfTextExtractor::open(&path).expect("open");
        assert_eq!(extractor.page_count().expect("page count"), 1);
        assert!(extractor.source_path().is_some());
    }

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        let err = PdfTextExtractor::from_bytes(b"definitely not a pdf")
            .err()
            .expect("error");
        assert!(matches!(err, SegwerkError::Pdf(_)));
    }

    #[test]
    fn derived_path_swaps_extension() {
        assert_eq!(
            derived_text_path("docs/report.pdf"),
            PathBuf::from("docs/report.txt")
        );
    }
}
