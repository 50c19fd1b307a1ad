/// LLM Client — the single point of entry for all model calls in the coach.
///
/// ARCHITECTURAL RULE: No other module may talk to the model backend directly.
/// Tools and the reasoning loop only ever see `dyn LanguageModel`.
///
/// Backend: a local Ollama server (`POST /api/chat`, non-streaming).
/// One attempt per call, bounded by the HTTP client timeout. No retries.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Inclusive temperature bounds accepted from the settings surface.
pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 1.5;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Model identifier + sampling temperature, owned by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f32,
}

impl ModelConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model cannot be empty".to_string());
        }
        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between {MIN_TEMPERATURE} and {MAX_TEMPERATURE}, got {}",
                self.temperature
            ));
        }
        Ok(())
    }
}

/// A handle to a configured language model.
///
/// `stop` sequences end generation early; an empty slice means "no stop".
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str, stop: &[&str]) -> Result<String, LlmError>;
}

/// Builds a fresh model handle from the settings snapshot of one interaction cycle.
pub trait ModelFactory: Send + Sync {
    fn build(&self, config: &ModelConfig) -> Arc<dyn LanguageModel>;
}

// ────────────────────────────────────────────────────────────────────────────
// Ollama wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
    options: OllamaOptions<'a>,
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct OllamaOptions<'a> {
    temperature: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaReply,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaReply {
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaErrorBody {
    error: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Backend + per-cycle handle
// ────────────────────────────────────────────────────────────────────────────

/// Shared connection to the Ollama server. Cheap to clone; holds one
/// pooled `reqwest::Client` for the lifetime of the process.
#[derive(Clone)]
pub struct OllamaBackend {
    client: Client,
    base_url: String,
}

impl OllamaBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl ModelFactory for OllamaBackend {
    fn build(&self, config: &ModelConfig) -> Arc<dyn LanguageModel> {
        Arc::new(OllamaClient {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            config: config.clone(),
        })
    }
}

/// A model handle bound to one `ModelConfig`.
pub struct OllamaClient {
    client: Client,
    base_url: String,
    config: ModelConfig,
}

#[async_trait]
impl LanguageModel for OllamaClient {
    async fn complete(&self, prompt: &str, stop: &[&str]) -> Result<String, LlmError> {
        let url = format!("{}/api/chat", self.base_url);
        let request_body = OllamaChatRequest {
            model: &self.config.model,
            messages: vec![OllamaMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                stop: stop.to_vec(),
            },
        };

        debug!(model = %self.config.model, "Ollama request to {url}");

        let response = self.client.post(&url).json(&request_body).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<OllamaErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: OllamaChatResponse = serde_json::from_str(&body)?;

        debug!(
            "LLM call succeeded: prompt_tokens={:?}, completion_tokens={:?}",
            parsed.prompt_eval_count, parsed.eval_count
        );

        Ok(parsed.message.content)
    }
}
