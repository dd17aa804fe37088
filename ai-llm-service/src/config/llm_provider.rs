/// Represents the backend used for a remote model call.
///
/// The Q&A pipeline talks to two kinds of services: a hosted text-generation
/// endpoint that produces answers, and a local Ollama runtime that produces
/// embeddings.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::llm_provider::LlmProvider;
///
/// fn describe(provider: LlmProvider) -> &'static str {
///     match provider {
///         LlmProvider::Ollama => "local Ollama runtime",
///         LlmProvider::TextGeneration => "hosted text-generation endpoint",
///     }
/// }
/// assert_eq!(describe(LlmProvider::Ollama), "local Ollama runtime");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime (used for embeddings).
    Ollama,
    /// Hosted endpoint speaking the `{inputs, parameters}` → `[{generated_text}]`
    /// protocol (text-generation-inference / SageMaker style).
    TextGeneration,
}
