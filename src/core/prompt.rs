//! Prompt construction for document-grounded questions.
//!
//! The document context is a hard cut of the first N characters of the
//! extracted text. There is no chunking or relevance ranking: questions about
//! content past the cutoff will be answered as "not in the document".

/// Default size of the document segment embedded in a prompt, in characters.
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 8000;

const PREAMBLE: &str = "You are an AI assistant that answers questions based on provided document \
content. Please read the document carefully and answer the question based only on the \
information in the document.";

const INSTRUCTIONS: &str = "Please provide a detailed answer based on the document content \
above. If the information is not in the document, say so clearly.";

/// Builds the instruction + context + question prompt sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptBuilder {
    max_context_chars: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTEXT_CHARS)
    }
}

impl PromptBuilder {
    pub fn new(max_context_chars: usize) -> Self {
        Self { max_context_chars }
    }

    pub fn max_context_chars(&self) -> usize {
        self.max_context_chars
    }

    /// The slice of `document_text` that will be embedded in the prompt.
    pub fn context<'a>(&self, document_text: &'a str) -> &'a str {
        truncate_chars(document_text, self.max_context_chars)
    }

    pub fn build(&self, document_text: &str, question: &str) -> String {
        let context = self.context(document_text);
        format!(
            "{PREAMBLE}\n\nDOCUMENT CONTENT:\n{context}\n\nQUESTION: {question}\n\n{INSTRUCTIONS}"
        )
    }
}

/// Build a prompt with the default context budget.
pub fn build_prompt(document_text: &str, question: &str) -> String {
    PromptBuilder::default().build(document_text, question)
}

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
