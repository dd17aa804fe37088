//! Default model configs loaded from environment variables.
//!
//! Two roles are used by the Q&A pipeline:
//!
//! - **Completion** → hosted text-generation endpoint that writes the answer
//! - **Embedding**  → Ollama embedding model for indexing and retrieval
//!
//! # Environment variables
//!
//! Completion:
//! - `COMPLETION_URL`            = base URL (default `http://localhost:8080`)
//! - `COMPLETION_ENDPOINT_NAME`  = endpoint identity (default `llama-1b-endpoint`)
//! - `COMPLETION_API_KEY`        = optional bearer token
//! - `COMPLETION_MAX_NEW_TOKENS` = u32 (default `1000`)
//! - `COMPLETION_TEMPERATURE`    = f32 in `0.0..=2.0` (default `0.2`)
//! - `COMPLETION_TIMEOUT_SECS`   = u64 (default `120`)
//!
//! Embedding:
//! - `EMBEDDING_URL` or `OLLAMA_URL` = Ollama endpoint (default `http://localhost:11434`)
//! - `EMBEDDING_MODEL`               = model (default `bge-small-en-v1.5`)
//! - `EMBEDDING_TIMEOUT_SECS`        = u64 (default `30`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_or, env_parse_or, validate_http_endpoint, validate_range_f32,
    },
};

pub const DEFAULT_COMPLETION_URL: &str = "http://localhost:8080";
pub const DEFAULT_ENDPOINT_NAME: &str = "llama-1b-endpoint";
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

pub const DEFAULT_EMBEDDING_URL: &str = "http://localhost:11434";
pub const DEFAULT_EMBEDDING_MODEL: &str = "bge-small-en-v1.5";

/// Constructs the config for the **completion** endpoint.
///
/// # Errors
///
/// - [`ConfigError::InvalidFormat`] if `COMPLETION_URL` is not http(s)
/// - [`ConfigError::InvalidNumber`] for malformed numbers
/// - [`ConfigError::OutOfRange`] if the temperature is outside `0.0..=2.0`
/// - [`ConfigError::EmptyModel`] if the endpoint name is blank
pub fn config_completion() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = env_or("COMPLETION_URL", DEFAULT_COMPLETION_URL);
    validate_http_endpoint("COMPLETION_URL", &endpoint)?;

    let model = env_or("COMPLETION_ENDPOINT_NAME", DEFAULT_ENDPOINT_NAME);
    let api_key = std::env::var("COMPLETION_API_KEY")
        .ok()
        .filter(|s| !s.trim().is_empty());

    let max_tokens = env_parse_or(
        "COMPLETION_MAX_NEW_TOKENS",
        DEFAULT_MAX_NEW_TOKENS,
        "expected u32",
    )?;
    let temperature = env_parse_or("COMPLETION_TEMPERATURE", DEFAULT_TEMPERATURE, "expected f32")?;
    validate_range_f32("temperature", temperature, 0.0, 2.0)?;
    let timeout_secs = env_parse_or("COMPLETION_TIMEOUT_SECS", 120u64, "expected u64")?;

    completion_config(endpoint, model, api_key, max_tokens, temperature, timeout_secs)
}

/// Builds a completion config from explicit values (no env access).
///
/// # Errors
/// Returns [`ConfigError::EmptyModel`] if `model` is blank.
pub fn completion_config(
    endpoint: impl Into<String>,
    model: impl Into<String>,
    api_key: Option<String>,
    max_tokens: u32,
    temperature: f32,
    timeout_secs: u64,
) -> Result<LlmModelConfig, AiLlmError> {
    let model = model.into();
    if model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    Ok(LlmModelConfig {
        provider: LlmProvider::TextGeneration,
        model,
        endpoint: endpoint.into(),
        api_key,
        max_tokens: Some(max_tokens),
        temperature: Some(temperature),
        timeout_secs: Some(timeout_secs),
    })
}

/// Constructs a config for the **embedding** Ollama model.
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic)
/// - `max_tokens = None`
/// - `timeout_secs = Some(30)`
pub fn config_ollama_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = std::env::var("EMBEDDING_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| env_or("OLLAMA_URL", DEFAULT_EMBEDDING_URL));
    validate_http_endpoint("EMBEDDING_URL", &endpoint)?;

    let model = env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL);
    let timeout_secs = env_parse_or("EMBEDDING_TIMEOUT_SECS", 30u64, "expected u64")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens: None,
        temperature: Some(0.0),
        timeout_secs: Some(timeout_secs),
    })
}
