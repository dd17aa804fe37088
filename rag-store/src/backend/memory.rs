//! Process-local exact index.

use tokio::sync::RwLock;

use super::{BoxFut, VectorBackend, distance};
use crate::config::{DistanceKind, VectorSpace};
use crate::record::{ScoredRow, StoredPoint};

pub(crate) struct MemoryIndex {
    distance: DistanceKind,
    points: RwLock<Vec<StoredPoint>>,
}

impl MemoryIndex {
    pub(crate) fn new(distance: DistanceKind) -> Self {
        Self {
            distance,
            points: RwLock::new(Vec::new()),
        }
    }
}

impl VectorBackend for MemoryIndex {
    fn ensure<'a>(&'a self, _space: VectorSpace) -> BoxFut<'a, u64> {
        Box::pin(async move { Ok(self.points.read().await.len() as u64) })
    }

    fn upsert<'a>(&'a self, points: Vec<StoredPoint>) -> BoxFut<'a, ()> {
        Box::pin(async move {
            // Single write lock: readers see all of the batch or none of it.
            self.points.write().await.extend(points);
            Ok(())
        })
    }

    fn search<'a>(&'a self, vector: Vec<f32>, k: usize) -> BoxFut<'a, Vec<ScoredRow>> {
        Box::pin(async move {
            let guard = self.points.read().await;
            let mut rows: Vec<ScoredRow> = guard
                .iter()
                .map(|p| ScoredRow {
                    id: p.id.clone(),
                    seq: p.seq,
                    distance: distance(self.distance, &vector, &p.vector),
                    record: p.record.clone(),
                })
                .collect();
            drop(guard);

            super::rank(&mut rows);
            rows.truncate(k);
            Ok(rows)
        })
    }

    fn count<'a>(&'a self) -> BoxFut<'a, u64> {
        Box::pin(async move { Ok(self.points.read().await.len() as u64) })
    }
}
