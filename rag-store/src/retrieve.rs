//! Read path: embed the query and rank the nearest stored chunks.

use tracing::{instrument, trace};

use crate::backend::{VectorBackend, rank};
use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::record::{RagHit, ScoredRow};

/// Embeds `query` and returns up to `k` hits, best first.
///
/// `k` is clamped to the number of stored records. A backend only returns
/// `limit` rows, so when rows tie at the k-th distance the limit is widened
/// until every tied row is in hand and insertion order can decide.
///
/// # Errors
/// `RagError::InvalidK` for `k == 0`, otherwise embedding or backend failures.
#[instrument(skip_all, fields(k = k, query_chars = query.len()))]
pub(crate) async fn search_text(
    backend: &dyn VectorBackend,
    provider: &dyn EmbeddingsProvider,
    query: &str,
    k: usize,
) -> Result<Vec<RagHit>, RagError> {
    if k == 0 {
        return Err(RagError::InvalidK(k));
    }

    let qv = provider.embed(query).await?;
    if qv.len() != provider.dim() {
        return Err(RagError::VectorSizeMismatch {
            got: qv.len(),
            want: provider.dim(),
        });
    }

    let total = usize::try_from(backend.count().await?).unwrap_or(usize::MAX);
    if total == 0 {
        return Ok(Vec::new());
    }
    let k = k.min(total);

    let mut limit = k.saturating_add(1).min(total);
    let mut rows = loop {
        let mut rows = backend.search(qv.clone(), limit).await?;
        rank(&mut rows);
        if limit >= total || !ties_past_limit(&rows, k) {
            break rows;
        }
        limit = limit.saturating_mul(2).min(total);
    };
    rows.truncate(k);

    trace!("retrieve::search_text hits={} limit={}", rows.len(), limit);
    Ok(rows.into_iter().map(RagHit::from).collect())
}

/// True when the last fetched row still ties with the k-th one, i.e. rows
/// with that distance may have been cut off by the backend.
fn ties_past_limit(ranked: &[ScoredRow], k: usize) -> bool {
    match (ranked.get(k - 1), ranked.last()) {
        (Some(kth), Some(last)) => ranked.len() > k && last.distance <= kth.distance,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::backend::BoxFut;
    use crate::config::VectorSpace;
    use crate::embed::hashing::HashingEmbedder;
    use crate::record::{RagRecord, StoredPoint};

    /// Returns exactly `k` rows and, among equal distances, prefers the
    /// newest point, like an ANN engine free to pick any tied row.
    struct NewestFirstBackend {
        points: Vec<StoredPoint>,
        limits: Mutex<Vec<usize>>,
    }

    impl NewestFirstBackend {
        fn new(texts: &[&str], embedder: &HashingEmbedder) -> Self {
            let points = texts
                .iter()
                .enumerate()
                .map(|(i, t)| StoredPoint {
                    id: format!("p{i}"),
                    seq: i as u64,
                    vector: embedder.vectorize(t),
                    record: RagRecord {
                        text: t.to_string(),
                        source: format!("doc{i}"),
                        page: 1,
                    },
                })
                .collect();
            Self {
                points,
                limits: Mutex::new(Vec::new()),
            }
        }
    }

    impl VectorBackend for NewestFirstBackend {
        fn ensure<'a>(&'a self, _space: VectorSpace) -> BoxFut<'a, u64> {
            Box::pin(async move { Ok(self.points.len() as u64) })
        }

        fn upsert<'a>(&'a self, _points: Vec<StoredPoint>) -> BoxFut<'a, ()> {
            Box::pin(async { Ok(()) })
        }

        fn search<'a>(&'a self, vector: Vec<f32>, k: usize) -> BoxFut<'a, Vec<ScoredRow>> {
            Box::pin(async move {
                self.limits.lock().unwrap().push(k);
                let mut rows: Vec<ScoredRow> = self
                    .points
                    .iter()
                    .map(|p| ScoredRow {
                        id: p.id.clone(),
                        seq: p.seq,
                        distance: crate::backend::distance(
                            crate::config::DistanceKind::Cosine,
                            &vector,
                            &p.vector,
                        ),
                        record: p.record.clone(),
                    })
                    .collect();
                rows.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(b.seq.cmp(&a.seq)));
                rows.truncate(k);
                Ok(rows)
            })
        }

        fn count<'a>(&'a self) -> BoxFut<'a, u64> {
            Box::pin(async move { Ok(self.points.len() as u64) })
        }
    }

    #[tokio::test]
    async fn ties_at_the_cut_resolve_by_insertion_order() {
        let e = HashingEmbedder::new(64);
        let backend = NewestFirstBackend::new(
            &["same words", "other topic", "same words", "same words"],
            &e,
        );

        let hits = search_text(&backend, &e, "same words", 1).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source, "doc0");

        let hits = search_text(&backend, &e, "same words", 2).await.unwrap();
        let order: Vec<&str> = hits.iter().map(|h| h.source.as_str()).collect();
        assert_eq!(order, vec!["doc0", "doc2"]);
    }

    #[tokio::test]
    async fn huge_k_is_clamped_to_index_size() {
        let e = HashingEmbedder::new(32);
        let backend = NewestFirstBackend::new(&["one", "two", "three"], &e);

        let hits = search_text(&backend, &e, "one", 1_000_000_000_000).await.unwrap();
        assert_eq!(hits.len(), 3);
        assert!(backend.limits.lock().unwrap().iter().all(|&l| l <= 3));
    }

    #[tokio::test]
    async fn empty_index_returns_nothing() {
        let e = HashingEmbedder::new(16);
        let backend = NewestFirstBackend::new(&[], &e);
        assert!(search_text(&backend, &e, "q", 5).await.unwrap().is_empty());
        assert!(backend.limits.lock().unwrap().is_empty());
    }
}
