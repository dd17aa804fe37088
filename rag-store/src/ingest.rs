//! Write path: embed every record, then store them as one unit.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{info, instrument};
use uuid::Uuid;

use crate::backend::VectorBackend;
use crate::config::RagConfig;
use crate::embed::EmbeddingsProvider;
use crate::embed_pool::embed_all;
use crate::errors::RagError;
use crate::record::{RagRecord, StoredPoint};

/// Embeds and stores `records`, returning one id per record in input order.
///
/// Nothing is written until every embedding succeeded.
#[instrument(skip_all, fields(records = records.len()))]
pub(crate) async fn add_records(
    cfg: &RagConfig,
    backend: &dyn VectorBackend,
    provider: &dyn EmbeddingsProvider,
    next_seq: &AtomicU64,
    records: &[RagRecord],
) -> Result<Vec<String>, RagError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
    let vectors = embed_all(&texts, provider, cfg.dim, cfg.embed_concurrency).await?;

    let first_seq = next_seq.fetch_add(records.len() as u64, Ordering::SeqCst);
    let points: Vec<StoredPoint> = records
        .iter()
        .zip(vectors)
        .enumerate()
        .map(|(i, (record, vector))| StoredPoint {
            id: Uuid::new_v4().to_string(),
            seq: first_seq + i as u64,
            vector,
            record: record.clone(),
        })
        .collect();
    let ids: Vec<String> = points.iter().map(|p| p.id.clone()).collect();

    backend.upsert(points).await?;
    info!(added = ids.len(), collection = %cfg.collection, "records stored");
    Ok(ids)
}
