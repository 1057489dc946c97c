//! PDF Extractor Unit Tests
//!
//! Extraction against real PDF files: page ordering, placeholder pages and
//! container-level failures.

use std::path::Path;

use crate::core::document::{ExtractionError, PdfExtractor};
use crate::tests::common::*;

// ============================================================================
// Text Extraction
// ============================================================================

#[test]
fn test_extracts_every_page_in_order() {
    let file = create_two_page_pdf();
    let doc = PdfExtractor::extract(file.path()).unwrap();

    assert_eq!(doc.page_count(), 2);
    let numbers: Vec<u32> = doc.pages().iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert!(doc.pages()[0].text.contains("Quarterly revenue grew"));
    assert!(doc.pages()[1].text.contains("Outlook remains stable"));
    assert_eq!(doc.missing_pages(), 0);
}

#[test]
fn test_full_text_has_page_labels() {
    let file = create_two_page_pdf();
    let text = PdfExtractor::extract(file.path()).unwrap().full_text();

    let first = text.find("--- Page 1 ---").unwrap();
    let second = text.find("--- Page 2 ---").unwrap();
    assert!(first < second);
    assert!(text.starts_with("\n--- Page 1 ---\n"));
}

#[test]
fn test_blank_page_becomes_placeholder() {
    let file = create_pdf_with_blank_page();
    let doc = PdfExtractor::extract(file.path()).unwrap();

    assert_eq!(doc.page_count(), 3);
    assert!(doc.pages()[0].extracted);
    assert!(!doc.pages()[1].extracted);
    assert!(doc.pages()[1].text.is_empty());
    assert!(doc.pages()[2].extracted);
    assert!(doc
        .full_text()
        .contains("\n--- Page 2 (No text extracted) ---\n"));
}

#[test]
fn test_filename_is_base_name() {
    let file = create_two_page_pdf();
    let doc = PdfExtractor::extract(file.path()).unwrap();
    let expected = file.path().file_name().unwrap().to_string_lossy();
    assert_eq!(doc.filename, expected);
}

// ============================================================================
// Error Handling
// ============================================================================

#[test]
fn test_missing_file_is_io_error() {
    let err = PdfExtractor::extract(Path::new("/nonexistent/missing.pdf")).unwrap_err();
    assert!(matches!(err, ExtractionError::Io { .. }));
    assert!(err.to_string().contains("missing.pdf"));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let file = create_malformed_pdf();
    let err = PdfExtractor::extract(file.path()).unwrap_err();
    assert!(matches!(err, ExtractionError::Parse { .. }));
}

#[test]
fn test_empty_file_is_parse_error() {
    let file = create_empty_file();
    let err = PdfExtractor::extract(file.path()).unwrap_err();
    assert!(matches!(err, ExtractionError::Parse { .. }));
}
