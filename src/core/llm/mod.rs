//! Local LLM server integration (Ollama).

pub mod ollama;

use thiserror::Error;

pub use ollama::{GenerateOptions, ModelProbe, OllamaClient};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("Request timed out")]
    Timeout,

    #[error("API error: HTTP {status}")]
    Api { status: u16 },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Message shown to the user when an inference call fails.
    pub fn user_message(&self) -> String {
        match self {
            LlmError::Timeout => "Request timed out. Try again.".to_string(),
            LlmError::Api { status } => format!("API Error: {status}"),
            LlmError::Connection(msg) | LlmError::InvalidResponse(msg) => format!("Error: {msg}"),
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else if e.is_decode() {
            LlmError::InvalidResponse(e.to_string())
        } else {
            LlmError::Connection(e.to_string())
        }
    }
}
