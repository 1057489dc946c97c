/// PDF Q&A - ask a local Ollama model questions about a PDF (TUI Edition)
///
/// Core library providing PDF text extraction, prompt construction,
/// the Ollama client and the terminal UI built on top of them.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
