//! Embedding index for document chunks.
//!
//! This crate provides a small API to:
//! - Embed and store chunks (`text`, `source`, `page`) in one collection
//! - Retrieve the top‑K nearest chunks for a textual query
//!
//! Vectors live either in Qdrant (persistent) or in process memory, and are
//! produced by an [`EmbeddingsProvider`] (Ollama or offline feature hashing).
//!
//! # Environment
//! `VECTOR_BACKEND`, `EMBEDDING_PROVIDER`, `QDRANT_URL`, `QDRANT_API_KEY`,
//! `QDRANT_COLLECTION`, `QDRANT_DISTANCE`, `QDRANT_TIMEOUT_SECS`,
//! `QDRANT_EXACT_SEARCH`, `EMBEDDING_DIM`, `EMBED_CONCURRENCY`.

mod backend;
mod config;
mod embed;
mod embed_pool;
mod errors;
mod ingest;
mod record;
mod retrieve;

pub use config::{BackendKind, DistanceKind, EmbedderKind, RagConfig, VectorSpace};
pub use embed::{EmbeddingsProvider, hashing::HashingEmbedder, ollama::OllamaEmbedder};
pub use errors::RagError;
pub use record::{RagHit, RagRecord};

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use ai_llm_service::service_profiles::LlmServiceProfiles;
use tracing::{info, trace};

use backend::{VectorBackend, memory::MemoryIndex, qdrant_facade::QdrantFacade};

/// High-level facade that wires configuration, backend and embedder.
///
/// Built once at startup and shared behind an `Arc`; `add` and `search`
/// may run concurrently.
pub struct RagStore {
    cfg: RagConfig,
    backend: Box<dyn VectorBackend>,
    embedder: Arc<dyn EmbeddingsProvider>,
    next_seq: AtomicU64,
}

impl RagStore {
    /// Connects the configured backend and makes sure the collection exists.
    ///
    /// # Errors
    /// - `RagError::Config` if the config is invalid or the embedder's
    ///   dimension differs from `cfg.dim`
    /// - `RagError::Qdrant` if the collection cannot be checked or created
    pub async fn connect(
        cfg: RagConfig,
        embedder: Arc<dyn EmbeddingsProvider>,
    ) -> Result<Self, RagError> {
        cfg.validate()?;
        if embedder.dim() != cfg.dim {
            return Err(RagError::Config(format!(
                "embedder produces {} dims but the collection expects {}",
                embedder.dim(),
                cfg.dim
            )));
        }

        trace!("RagStore::connect collection={}", cfg.collection);
        let backend: Box<dyn VectorBackend> = match cfg.backend {
            BackendKind::Qdrant => Box::new(QdrantFacade::new(&cfg)?),
            BackendKind::Memory => Box::new(MemoryIndex::new(cfg.distance)),
        };
        let existing = backend.ensure(cfg.space()).await?;
        info!(
            backend = ?cfg.backend,
            collection = %cfg.collection,
            existing,
            "embedding index ready"
        );

        Ok(Self {
            cfg,
            backend,
            embedder,
            next_seq: AtomicU64::new(existing),
        })
    }

    /// Builds the embedder named by `cfg.embedder` and connects.
    pub async fn connect_with(
        cfg: RagConfig,
        svc: Arc<LlmServiceProfiles>,
    ) -> Result<Self, RagError> {
        let embedder: Arc<dyn EmbeddingsProvider> = match cfg.embedder {
            EmbedderKind::Ollama => Arc::new(OllamaEmbedder::new(svc, cfg.dim)),
            EmbedderKind::Hashing => Arc::new(HashingEmbedder::new(cfg.dim)),
        };
        Self::connect(cfg, embedder).await
    }

    /// In-memory store with the hashing embedder.
    pub async fn in_memory(dim: usize) -> Result<Self, RagError> {
        Self::connect(RagConfig::in_memory(dim), Arc::new(HashingEmbedder::new(dim))).await
    }

    pub fn config(&self) -> &RagConfig {
        &self.cfg
    }

    /// Embeds and stores `records`; returns one id per record, in order.
    ///
    /// On error no record of this call is considered stored.
    pub async fn add(&self, records: &[RagRecord]) -> Result<Vec<String>, RagError> {
        ingest::add_records(
            &self.cfg,
            self.backend.as_ref(),
            self.embedder.as_ref(),
            &self.next_seq,
            records,
        )
        .await
    }

    /// Up to `k` nearest records to `query`, ordered by increasing distance;
    /// equal distances keep insertion order.
    ///
    /// # Errors
    /// `RagError::InvalidK` if `k == 0`.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<RagHit>, RagError> {
        retrieve::search_text(self.backend.as_ref(), self.embedder.as_ref(), query, k).await
    }

    /// Number of stored records.
    pub async fn len(&self) -> Result<u64, RagError> {
        self.backend.count().await
    }

    pub async fn is_empty(&self) -> Result<bool, RagError> {
        Ok(self.len().await? == 0)
    }
}
