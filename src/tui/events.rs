use std::path::PathBuf;
use std::sync::Arc;

use crate::core::document::Document;
use crate::core::llm::{LlmError, ModelProbe};

/// Events flowing through the Elm-architecture event loop: terminal input
/// plus the one result each background task reports.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// Background extraction finished.
    DocumentLoaded(Arc<Document>),
    /// Background extraction failed; carries the rendered error.
    DocumentFailed(String),
    /// Registry probe finished.
    ModelsProbed(ModelProbe),
    /// Inference finished with an answer.
    AnswerReady(String),
    /// Inference failed.
    AnswerFailed(LlmError),
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Document
    OpenPathPrompt,
    LoadPdf(PathBuf),
    ShowDebug,

    // Models
    RefreshModels,
    OpenModelPicker,
    SelectModel(String),

    // Chat
    AskQuestion(String),

    // Modals
    ShowHelp,
    CloseModal,

    // Application
    Quit,
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

impl Notification {
    /// A notification whose id is assigned by `AppState` on push.
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            id: 0,
            message: message.into(),
            level,
            ttl_ticks: 100,
        }
    }
}

/// Ollama connection state shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Checking,
    Connected,
    NotFound,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Checking => "Checking Ollama...",
            ConnectionStatus::Connected => "Ollama Connected",
            ConnectionStatus::NotFound => "Ollama Not Found",
        }
    }
}
