//! Question answering over a loaded document.

use super::document::Document;
use super::llm::{LlmError, OllamaClient};
use super::prompt::PromptBuilder;

/// Build the prompt for `question` from `document` and ask `model`.
pub async fn answer_question(
    client: &OllamaClient,
    model: &str,
    document: &Document,
    question: &str,
    builder: PromptBuilder,
) -> Result<String, LlmError> {
    let text = document.full_text();
    let context_chars = builder.context(&text).chars().count();
    log::debug!(
        "Asking {model} about {} ({context_chars} of {} chars in context)",
        document.filename,
        text.chars().count()
    );

    let prompt = builder.build(&text, question);
    client.generate(model, &prompt).await
}
