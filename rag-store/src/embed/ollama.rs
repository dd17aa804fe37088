//! Ollama embedding provider backed by the shared model service.

use std::sync::Arc;

use crate::{EmbeddingsProvider, RagError};
use ai_llm_service::service_profiles::LlmServiceProfiles;

/// Ollama embedding provider (async).
#[derive(Clone)]
pub struct OllamaEmbedder {
    svc: Arc<LlmServiceProfiles>,
    dim: usize,
}

impl OllamaEmbedder {
    /// `dim` is the size the collection expects; other sizes are rejected.
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: usize) -> Self {
        Self { svc, dim }
    }
}

impl EmbeddingsProvider for OllamaEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>>
    {
        Box::pin(async move {
            let resp = self.svc.embed(text).await?;

            if resp.len() != self.dim {
                return Err(RagError::VectorSizeMismatch {
                    got: resp.len(),
                    want: self.dim,
                });
            }

            Ok(resp)
        })
    }

    fn dim(&self) -> usize {
        self.dim
    }
}
