//! Property-based tests for prompt construction
//!
//! Tests invariants:
//! - The embedded context never exceeds the character budget
//! - The context is always a prefix of the document text
//! - Documents under the budget are embedded whole
//! - The question is always present verbatim

use proptest::prelude::*;

use crate::core::prompt::{truncate_chars, PromptBuilder, DEFAULT_MAX_CONTEXT_CHARS};

// ============================================================================
// Strategies
// ============================================================================

/// Mixed ASCII and multi-byte text so truncation hits char boundaries.
fn arb_document_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 .,\n]{0,200}",
        "[a-zé€😀 ]{0,200}",
        proptest::collection::vec(any::<char>(), 0..400)
            .prop_map(|chars| chars.into_iter().collect()),
    ]
}

fn arb_question() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ?]{1,80}"
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_context_within_budget(
        text in arb_document_text(),
        budget in 0usize..300
    ) {
        let context = PromptBuilder::new(budget).context(&text);
        prop_assert!(
            context.chars().count() <= budget,
            "Context of {} chars exceeds budget {}",
            context.chars().count(),
            budget
        );
    }

    #[test]
    fn prop_context_is_prefix(
        text in arb_document_text(),
        budget in 0usize..300
    ) {
        let context = truncate_chars(&text, budget);
        prop_assert!(text.starts_with(context));
        prop_assert_eq!(
            context.chars().count(),
            text.chars().count().min(budget)
        );
    }

    #[test]
    fn prop_short_document_embedded_whole(
        text in arb_document_text(),
        question in arb_question()
    ) {
        // Generated text is well under the default budget
        let prompt = PromptBuilder::default().build(&text, &question);
        let expected = format!("DOCUMENT CONTENT:\n{text}\n\nQUESTION: {question}");
        prop_assert!(prompt.contains(&expected));
    }

    #[test]
    fn prop_question_always_present(
        repeat in 1usize..30,
        question in arb_question()
    ) {
        let text = "0123456789".repeat(repeat * 100);
        let prompt = PromptBuilder::default().build(&text, &question);
        let question_line = format!("QUESTION: {}", question);
        prop_assert!(prompt.contains(&question_line));
        prop_assert!(prompt.len() <= text.len().min(DEFAULT_MAX_CONTEXT_CHARS) + 1000);
    }
}
