//! Shared model service with two profiles: `completion` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - HTTP clients are built eagerly, so a bad endpoint fails at startup.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::service_profiles::LlmServiceProfiles;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let svc = Arc::new(LlmServiceProfiles::from_env()?);
//!
//!     let txt = svc.complete("Question: what is Rust?\nAnswer:").await?;
//!     println!("ANSWER: {}", txt);
//!
//!     let emb = svc.embed("Ferris").await?;
//!     println!("Embedding dim = {}", emb.len());
//!     Ok(())
//! }
//! ```

use tracing::info;

use crate::{
    config::{
        default_config::{config_completion, config_ollama_embedding},
        llm_model_config::LlmModelConfig,
    },
    error_handler::AiLlmError,
    services::{completion_service::CompletionService, ollama_service::OllamaService},
};

/// Shared service that owns one client per logical profile.
pub struct LlmServiceProfiles {
    completion: CompletionService,
    embedding: OllamaService,
}

impl LlmServiceProfiles {
    /// Creates the service from explicit profile configs.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if either config targets the wrong provider or
    /// has an invalid endpoint.
    pub fn new(completion: LlmModelConfig, embedding: LlmModelConfig) -> Result<Self, AiLlmError> {
        Ok(Self {
            completion: CompletionService::new(completion)?,
            embedding: OllamaService::new(embedding)?,
        })
    }

    /// Reads both profiles from the environment (see [`crate::config::default_config`]).
    pub fn from_env() -> Result<Self, AiLlmError> {
        let svc = Self::new(config_completion()?, config_ollama_embedding()?)?;
        info!(
            completion_url = %svc.completion.url(),
            embedding_model = %svc.embedding.model(),
            "model profiles ready"
        );
        Ok(svc)
    }

    /// Generates an answer with the **completion** profile.
    ///
    /// The echoed prompt is removed from the output.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the remote call fails or the body is malformed.
    pub async fn complete(&self, prompt: &str) -> Result<String, AiLlmError> {
        self.completion.complete(prompt).await
    }

    /// Computes embeddings using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if embedding fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        self.embedding.embeddings(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_config::completion_config, llm_provider::LlmProvider};

    fn embedding_cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "bge-small-en-v1.5".into(),
            endpoint: "http://localhost:11434".into(),
            api_key: None,
            max_tokens: None,
            temperature: Some(0.0),
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn clients_follow_the_given_profiles() {
        let completion = completion_config("http://svc", "ep", None, 1000, 0.2, 5).unwrap();
        let svc = LlmServiceProfiles::new(completion, embedding_cfg()).unwrap();
        assert_eq!(svc.completion.url(), "http://svc/endpoints/ep/invocations");
        assert_eq!(svc.embedding.model(), "bge-small-en-v1.5");
    }

    #[test]
    fn swapped_profiles_are_rejected() {
        let completion = completion_config("http://svc", "ep", None, 1000, 0.2, 5).unwrap();
        assert!(matches!(
            LlmServiceProfiles::new(embedding_cfg(), completion),
            Err(AiLlmError::InvalidProvider { .. })
        ));
    }
}
