use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::agent::react::DEFAULT_MAX_ITERATIONS;
use crate::agent::AgentOptions;
use crate::llm_client::ModelConfig;

/// Application configuration loaded from environment variables.
/// Every variable is optional so the service starts with no arguments.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub ollama_url: String,
    /// Model settings a new session starts with.
    pub default_model: ModelConfig,
    pub agent: AgentOptions,
    pub llm_timeout_secs: u64,
    /// Sessions untouched for this long are evicted.
    pub session_idle_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_model = ModelConfig {
            model: std::env::var("DEFAULT_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),
            temperature: parse_env("DEFAULT_TEMPERATURE", 0.7)?,
        };
        if let Err(msg) = default_model.validate() {
            bail!("Invalid default model settings: {msg}");
        }

        let agent = AgentOptions {
            max_iterations: parse_env("AGENT_MAX_ITERATIONS", DEFAULT_MAX_ITERATIONS)?,
            handle_parsing_errors: parse_env("AGENT_HANDLE_PARSING_ERRORS", true)?,
        };
        if agent.max_iterations == 0 {
            bail!("AGENT_MAX_ITERATIONS must be at least 1");
        }

        Ok(Config {
            port: parse_env("PORT", 8501)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ollama_url: std::env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            default_model,
            agent,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            session_idle_ttl_secs: parse_env("SESSION_IDLE_TTL_SECS", 3600)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
