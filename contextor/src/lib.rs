//! Document Q&A orchestration.
//!
//! Two straight-line flows over shared, injected components:
//! - **answer**: retrieve references → fill the prompt template → complete
//! - **ingest**: load the file by extension → chunk each page → index chunks
//!
//! Any stage failure aborts the call; nothing is retried.

mod api_types;
mod cfg;
mod error;
pub mod llm;
pub mod prompt;
mod retrieve;

pub use api_types::{Answer, Reference};
pub use cfg::ContextorConfig;
pub use error::{ContextorError, ErrorKind};
pub use llm::CompletionBackend;
pub use prompt::{PromptTemplate, REFERENCE_DELIMITER};
pub use retrieve::Retriever;

use std::sync::Arc;

use ai_llm_service::service_profiles::LlmServiceProfiles;
use doc_loader::{Chunker, LoaderRegistry};
use rag_store::{RagConfig, RagRecord, RagStore};
use tracing::{debug, info, instrument};

/// The Q&A pipeline. Build once, share via `Arc`.
pub struct Contextor {
    store: Arc<RagStore>,
    retriever: Retriever,
    template: PromptTemplate,
    completion: Arc<dyn CompletionBackend>,
    loaders: Arc<LoaderRegistry>,
    chunker: Chunker,
}

impl Contextor {
    /// Wires the pipeline from already constructed parts.
    pub fn new(
        cfg: &ContextorConfig,
        store: Arc<RagStore>,
        template: PromptTemplate,
        completion: Arc<dyn CompletionBackend>,
        loaders: LoaderRegistry,
    ) -> Self {
        Self {
            retriever: Retriever::new(store.clone(), cfg.top_k),
            store,
            template,
            completion,
            loaders: Arc::new(loaders),
            chunker: Chunker::new(cfg.chunk),
        }
    }

    /// Builds everything from environment variables: model clients, the
    /// embedding index (collection created if missing) and the template.
    ///
    /// # Errors
    /// Any configuration, template or index connection error.
    pub async fn from_env() -> Result<Self, ContextorError> {
        let cfg = ContextorConfig::from_env()?;
        let template = PromptTemplate::load(&cfg.template_path)?;

        let svc = Arc::new(LlmServiceProfiles::from_env()?);
        let store = RagStore::connect_with(RagConfig::from_env()?, svc.clone()).await?;

        info!(
            top_k = cfg.top_k,
            chunk_size = cfg.chunk.size(),
            chunk_overlap = cfg.chunk.overlap(),
            template = %cfg.template_path.display(),
            "contextor ready"
        );
        Ok(Self::new(
            &cfg,
            Arc::new(store),
            template,
            svc,
            LoaderRegistry::default(),
        ))
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Answers `query` using up to `k` references (default when `None` or ≤ 0).
    ///
    /// # Errors
    /// `Index` if retrieval fails, `Completion` if the model call fails.
    #[instrument(skip_all, fields(query_chars = query.len(), k = ?k))]
    pub async fn answer(&self, query: &str, k: Option<i64>) -> Result<Answer, ContextorError> {
        let references = self.retriever.top_references(query, k).await?;
        let prompt = self.template.build(query, &references);
        debug!(prompt_chars = prompt.len(), references = references.len(), "prompt built");

        let text = self.completion.complete(&prompt).await?;
        info!(references = references.len(), answer_chars = text.len(), "answered");
        Ok(Answer { text, references })
    }

    /// Answers `query` without retrieval; the references placeholder is empty.
    #[instrument(skip_all, fields(query_chars = query.len()))]
    pub async fn answer_without_references(&self, query: &str) -> Result<Answer, ContextorError> {
        let prompt = self.template.build(query, &[]);
        let text = self.completion.complete(&prompt).await?;
        info!(answer_chars = text.len(), "answered without references");
        Ok(Answer {
            text,
            references: Vec::new(),
        })
    }

    /// Loads, chunks and indexes one file; returns the number of chunks added.
    ///
    /// Parsing runs on the blocking pool.
    ///
    /// # Errors
    /// `Load` for unsupported or unreadable files (nothing indexed),
    /// `Index` if embedding or storage fails.
    #[instrument(skip_all, fields(filename = %filename, bytes = bytes.len()))]
    pub async fn ingest(&self, filename: &str, bytes: Vec<u8>) -> Result<usize, ContextorError> {
        let loaders = self.loaders.clone();
        let chunker = self.chunker;
        let name = filename.to_string();

        let chunks = tokio::task::spawn_blocking(move || {
            let docs = loaders.load(&name, &bytes)?;
            Ok::<_, ContextorError>(chunker.split_all(&docs))
        })
        .await??;

        let records: Vec<RagRecord> = chunks
            .into_iter()
            .map(|c| RagRecord {
                text: c.text,
                source: c.source,
                page: c.page,
            })
            .collect();

        let ids = self.store.add(&records).await?;
        info!(chunks = ids.len(), "document ingested");
        Ok(ids.len())
    }
}
