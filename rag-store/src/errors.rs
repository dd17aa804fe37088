//! Unified error types for the crate.

use ai_llm_service::error_handler::AiLlmError;
use thiserror::Error;

/// Top-level error for rag-store operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Embedding has the wrong dimensionality for the collection.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// `k` must be at least 1.
    #[error("invalid k: {0} (must be >= 1)")]
    InvalidK(usize),

    /// Embedding provider failed.
    #[error("embedding error: {0}")]
    Embedding(#[from] AiLlmError),

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),
}
