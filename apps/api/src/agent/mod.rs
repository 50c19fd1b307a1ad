//! Reasoning loop boundary.
//!
//! The rest of the service only sees `ReasoningLoop::run`. The default
//! implementation is `react::ReactAgent`, a zero-shot reason/act loop that
//! picks tools by matching the request against each tool's description.

pub mod parser;
pub mod prompts;
pub mod react;

use async_trait::async_trait;
use thiserror::Error;

use crate::conversation::Turn;
use crate::llm_client::LlmError;
use crate::tools::Tool;

pub use react::{AgentOptions, ReactAgent};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0}")]
    Model(#[from] LlmError),

    #[error("Could not parse LLM output: {0}")]
    OutputParsing(String),
}

/// `run(utterance, context, tools) -> reply`.
///
/// `context` is the prior conversation in insertion order and is read-only.
/// `tools` is the enabled subset; an empty slice means answer directly.
#[async_trait]
pub trait ReasoningLoop: Send + Sync {
    async fn run(
        &self,
        utterance: &str,
        context: &[Turn],
        tools: &[Tool],
    ) -> Result<String, AgentError>;
}
