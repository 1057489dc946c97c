//! Ollama HTTP client.
//!
//! Two calls only: a single-shot, non-streaming `/api/generate` and the
//! `/api/tags` registry probe. Neither retries.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::LlmError;
use crate::config::OllamaConfig;

/// Returned when a 200 response carries no `response` field.
pub const FALLBACK_RESPONSE: &str = "No response received";

/// Sampling options sent with every generate request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerateOptions {
    pub temperature: f64,
    pub top_p: f64,
    pub num_predict: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_p: 0.9,
            num_predict: 500,
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

/// Outcome of the model registry probe. Never an error: an unreachable
/// server is a state, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelProbe {
    Reachable(Vec<String>),
    Unreachable(String),
}

impl ModelProbe {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ModelProbe::Reachable(_))
    }

    /// Model names in server order; empty when unreachable.
    pub fn models(&self) -> &[String] {
        match self {
            ModelProbe::Reachable(models) => models,
            ModelProbe::Unreachable(_) => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    generate_timeout: Duration,
    probe_timeout: Duration,
    options: GenerateOptions,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            generate_timeout: Duration::from_secs(120),
            probe_timeout: Duration::from_secs(5),
            options: GenerateOptions::default(),
        }
    }

    pub fn localhost() -> Self {
        Self::new("http://localhost:11434")
    }

    pub fn from_config(config: &OllamaConfig) -> Self {
        Self::new(config.base_url.clone())
            .with_generate_timeout(Duration::from_secs(config.generate_timeout_secs))
            .with_probe_timeout(Duration::from_secs(config.probe_timeout_secs))
            .with_options(GenerateOptions {
                temperature: config.temperature,
                top_p: config.top_p,
                num_predict: config.num_predict,
            })
    }

    pub fn with_generate_timeout(mut self, timeout: Duration) -> Self {
        self.generate_timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    pub fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }

    /// Run a single non-streaming completion and return the response text.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: self.options,
        };

        log::info!(
            "Generating with model {model} ({} prompt chars)",
            prompt.chars().count()
        );

        let resp = self
            .client
            .post(self.generate_url())
            .timeout(self.generate_timeout)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            log::warn!("Ollama generate returned HTTP {status}");
            return Err(LlmError::Api {
                status: status.as_u16(),
            });
        }

        let data: GenerateResponse = resp.json().await?;
        let answer = data
            .response
            .unwrap_or_else(|| FALLBACK_RESPONSE.to_string());

        log::debug!("Ollama answered with {} chars", answer.chars().count());
        Ok(answer)
    }

    /// List installed model names. Failures are reported as
    /// [`ModelProbe::Unreachable`].
    pub async fn list_models(&self) -> ModelProbe {
        match self.fetch_tags().await {
            Ok(models) => {
                log::info!("Ollama reachable at {} ({} models)", self.base_url, models.len());
                ModelProbe::Reachable(models)
            }
            Err(reason) => {
                log::warn!("Ollama unreachable at {}: {reason}", self.base_url);
                ModelProbe::Unreachable(reason)
            }
        }
    }

    async fn fetch_tags(&self) -> Result<Vec<String>, String> {
        let resp = self
            .client
            .get(self.tags_url())
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if resp.status() != reqwest::StatusCode::OK {
            return Err(format!("HTTP {}", resp.status()));
        }

        let tags: TagsResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}
