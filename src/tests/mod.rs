//! Crate-internal test suite.
//!
//! - `common`: PDF fixtures shared by the other modules
//! - `unit`: extractor and Ollama client tests
//! - `integration`: the full load → prompt → answer pipeline against a mock server
//! - `property`: proptest invariants for prompt construction and extraction

mod common;
mod integration;
mod property;
