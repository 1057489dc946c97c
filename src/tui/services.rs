use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::document::{Document, PdfExtractor};
use crate::core::llm::OllamaClient;
use crate::core::prompt::PromptBuilder;
use crate::core::qa;

use super::events::AppEvent;
use super::tasks::BackgroundTasks;

/// Centralized handle to the backend: the Ollama client, prompt settings and
/// the background task tracker.
///
/// Created once at startup and owned by `AppState`. Each `start_*` method
/// fires one background task whose result arrives as an [`AppEvent`].
pub struct Services {
    pub ollama: OllamaClient,
    pub prompt: PromptBuilder,
    pub tasks: BackgroundTasks,
}

impl Services {
    pub fn new(config: &AppConfig, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        let ollama = OllamaClient::from_config(&config.ollama);
        log::info!("Ollama client targeting {}", ollama.base_url());

        Self {
            ollama,
            prompt: PromptBuilder::new(config.prompt.max_context_chars),
            tasks: BackgroundTasks::new(event_tx),
        }
    }

    /// Extract `path` on the blocking pool.
    pub fn start_extraction(&self, path: PathBuf) {
        self.tasks.spawn("extract_pdf", async move {
            let display = path.display().to_string();
            let joined = tokio::task::spawn_blocking(move || PdfExtractor::extract(&path)).await;
            match joined {
                Ok(Ok(document)) => AppEvent::DocumentLoaded(Arc::new(document)),
                Ok(Err(e)) => {
                    log::error!("Failed to extract {display}: {e}");
                    AppEvent::DocumentFailed(e.to_string())
                }
                Err(e) => {
                    log::error!("Extraction task for {display} panicked: {e}");
                    AppEvent::DocumentFailed(e.to_string())
                }
            }
        });
    }

    pub fn start_probe(&self) {
        let client = self.ollama.clone();
        self.tasks.spawn("probe_models", async move {
            AppEvent::ModelsProbed(client.list_models().await)
        });
    }

    pub fn start_answer(&self, model: String, document: Arc<Document>, question: String) {
        let client = self.ollama.clone();
        let builder = self.prompt;
        self.tasks.spawn("answer_question", async move {
            match qa::answer_question(&client, &model, &document, &question, builder).await {
                Ok(answer) => AppEvent::AnswerReady(answer),
                Err(e) => {
                    log::error!("Inference with {model} failed: {e}");
                    AppEvent::AnswerFailed(e)
                }
            }
        });
    }

    pub fn shutdown(&self) {
        self.tasks.shutdown();
    }
}
