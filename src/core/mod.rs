//! Core logic: PDF extraction, prompt construction, the Ollama client and the
//! session transcript. Nothing in here touches the terminal.

pub mod document;
pub mod llm;
pub mod logging;
pub mod prompt;
pub mod qa;
pub mod session_log;
