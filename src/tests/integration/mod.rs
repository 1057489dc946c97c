//! Integration Tests
//!
//! End-to-end runs of the question pipeline: a real PDF on disk, the
//! extractor, the prompt builder and the Ollama client against wiremock.

mod qa_pipeline;
