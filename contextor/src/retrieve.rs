//! Retrieval: resolve `k`, search the index, project hits into references.

use std::sync::Arc;

use rag_store::RagStore;
use tracing::{debug, instrument, warn};

use crate::api_types::Reference;
use crate::error::ContextorError;

/// Wraps index search with a process-wide default result count.
#[derive(Clone)]
pub struct Retriever {
    store: Arc<RagStore>,
    default_k: usize,
}

impl Retriever {
    /// `default_k` is clamped to at least 1.
    pub fn new(store: Arc<RagStore>, default_k: usize) -> Self {
        Self {
            store,
            default_k: default_k.max(1),
        }
    }

    pub fn default_k(&self) -> usize {
        self.default_k
    }

    /// The k actually used for `requested`: itself when positive, else the default.
    pub fn effective_k(&self, requested: Option<i64>) -> usize {
        match requested {
            None => self.default_k,
            Some(k) if k > 0 => usize::try_from(k).unwrap_or(usize::MAX),
            Some(k) => {
                warn!(requested = k, default = self.default_k, "non-positive k, using default");
                self.default_k
            }
        }
    }

    /// Top references for `query`, best first.
    ///
    /// # Errors
    /// `ContextorError::Index` when embedding or search fails.
    #[instrument(skip_all, fields(requested_k = ?requested))]
    pub async fn top_references(
        &self,
        query: &str,
        requested: Option<i64>,
    ) -> Result<Vec<Reference>, ContextorError> {
        let k = self.effective_k(requested);
        let hits = self.store.search(query, k).await?;
        debug!(k, hits = hits.len(), "references retrieved");
        Ok(hits.into_iter().map(Reference::from).collect())
    }
}
