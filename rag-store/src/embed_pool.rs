//! Embedding executor with concurrency and dimension checks.

use crate::{embed::EmbeddingsProvider, errors::RagError};
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use std::pin::Pin;
use tracing::debug;

/// Embeds `texts` with at most `concurrency` calls in flight.
///
/// Output order matches input order. The first failure aborts the batch.
///
/// # Errors
/// Returns provider errors or [`RagError::VectorSizeMismatch`] when a
/// vector does not have `expected_dim` entries.
pub async fn embed_all(
    texts: &[&str],
    provider: &dyn EmbeddingsProvider,
    expected_dim: usize,
    concurrency: usize,
) -> Result<Vec<Vec<f32>>, RagError> {
    debug!(total = texts.len(), concurrency, "embed_pool::embed_all");

    // Boxed as `dyn Stream + Send` so callers' futures stay provably `Send`.
    let embeddings: Pin<Box<dyn Stream<Item = Result<Vec<f32>, RagError>> + Send + '_>> =
        Box::pin(
            stream::iter(texts.iter().copied())
                .map(|text| provider.embed(text))
                .buffered(concurrency.max(1)),
        );
    let vectors: Vec<Vec<f32>> = embeddings.try_collect().await?;

    if let Some(bad) = vectors.iter().find(|v| v.len() != expected_dim) {
        return Err(RagError::VectorSizeMismatch {
            got: bad.len(),
            want: expected_dim,
        });
    }
    Ok(vectors)
}
