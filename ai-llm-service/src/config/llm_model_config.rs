use crate::config::llm_provider::LlmProvider;

/// Configuration for a remote model invocation.
///
/// # Fields
///
/// - `provider`: Which backend to call.
/// - `model`: Model identifier for Ollama, or the endpoint name for a
///   text-generation deployment (e.g. `"llama-1b-endpoint"`).
/// - `endpoint`: Base URL of the service.
/// - `api_key`: Optional bearer token.
/// - `max_tokens`: Maximum number of new tokens to generate.
/// - `temperature`: Sampling temperature.
/// - `timeout_secs`: Request timeout in seconds.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::llm_model_config::LlmModelConfig;
/// use ai_llm_service::config::llm_provider::LlmProvider;
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::TextGeneration,
///     model: "llama-1b-endpoint".to_string(),
///     endpoint: "http://localhost:8080".to_string(),
///     api_key: None,
///     max_tokens: Some(1000),
///     temperature: Some(0.2),
///     timeout_secs: Some(120),
/// };
/// assert_eq!(cfg.provider, LlmProvider::TextGeneration);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The backend (Ollama, hosted text-generation).
    pub provider: LlmProvider,

    /// Model identifier or endpoint name.
    pub model: String,

    /// Base URL of the service.
    pub endpoint: String,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
