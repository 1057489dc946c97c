//! Property-based tests for the extracted document model
//!
//! Tests invariants:
//! - Pages are ordered by page number regardless of input order
//! - Every page contributes exactly one label to the full text
//! - Character count agrees with the assembled text
//! - Missing-page count matches the placeholders

use proptest::prelude::*;

use crate::core::document::{Document, Page};

fn arb_pages() -> impl Strategy<Value = Vec<Page>> {
    proptest::collection::vec(proptest::option::of("[a-zA-Z0-9 é]{1,40}"), 1..12)
        .prop_map(|texts| {
            texts
                .into_iter()
                .enumerate()
                .map(|(i, text)| match text {
                    Some(text) => Page::with_text(i as u32 + 1, text),
                    None => Page::placeholder(i as u32 + 1),
                })
                .collect()
        })
        .prop_shuffle()
}

proptest! {
    #[test]
    fn prop_pages_sorted(pages in arb_pages()) {
        let doc = Document::new("x.pdf", pages);
        let numbers: Vec<u32> = doc.pages().iter().map(|p| p.page_number).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        prop_assert_eq!(numbers, sorted);
    }

    #[test]
    fn prop_one_label_per_page(pages in arb_pages()) {
        let doc = Document::new("x.pdf", pages);
        let text = doc.full_text();
        prop_assert_eq!(text.matches("\n--- Page ").count(), doc.page_count());

        let mut last = 0;
        for page in doc.pages() {
            let label = format!("\n--- Page {} ", page.page_number);
            let pos = text.find(&label);
            prop_assert!(pos.is_some(), "Missing label for page {}", page.page_number);
            let pos = pos.unwrap_or_default();
            prop_assert!(pos >= last);
            last = pos;
        }
    }

    #[test]
    fn prop_char_count_matches_text(pages in arb_pages()) {
        let doc = Document::new("x.pdf", pages);
        prop_assert_eq!(doc.char_count(), doc.full_text().chars().count());
    }

    #[test]
    fn prop_missing_pages_match_placeholders(pages in arb_pages()) {
        let placeholders = pages.iter().filter(|p| !p.extracted).count();
        let doc = Document::new("x.pdf", pages);
        prop_assert_eq!(doc.missing_pages(), placeholders);
        prop_assert_eq!(
            doc.full_text().matches("(No text extracted)").count(),
            placeholders
        );
    }
}
