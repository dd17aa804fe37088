//! Storage backends behind one seam.

pub(crate) mod memory;
pub(crate) mod qdrant_facade;

use std::{future::Future, pin::Pin};

use crate::config::{DistanceKind, VectorSpace};
use crate::errors::RagError;
use crate::record::{ScoredRow, StoredPoint};

pub(crate) type BoxFut<'a, T> = Pin<Box<dyn Future<Output = Result<T, RagError>> + Send + 'a>>;

/// Minimal capability set the index needs from a vector store.
///
/// `upsert` is all-or-nothing: on error none of the given points remain visible.
pub(crate) trait VectorBackend: Send + Sync {
    /// Creates the collection if needed and returns the number of stored points.
    fn ensure<'a>(&'a self, space: VectorSpace) -> BoxFut<'a, u64>;

    fn upsert<'a>(&'a self, points: Vec<StoredPoint>) -> BoxFut<'a, ()>;

    /// Up to `k` nearest rows, in any order.
    fn search<'a>(&'a self, vector: Vec<f32>, k: usize) -> BoxFut<'a, Vec<ScoredRow>>;

    fn count<'a>(&'a self) -> BoxFut<'a, u64>;
}

/// Distance between two vectors; smaller is closer for every metric.
pub(crate) fn distance(kind: DistanceKind, a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    match kind {
        DistanceKind::Cosine => {
            let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
            let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
            if na == 0.0 || nb == 0.0 {
                1.0
            } else {
                1.0 - dot / (na * nb)
            }
        }
        DistanceKind::Dot => -dot,
        DistanceKind::Euclid => a
            .iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f32>()
            .sqrt(),
    }
}

/// Converts a Qdrant score into the same distance scale as [`distance`].
///
/// Qdrant reports similarity for Cosine/Dot and the raw L2 distance for Euclid.
pub(crate) fn distance_from_score(kind: DistanceKind, score: f32) -> f32 {
    match kind {
        DistanceKind::Cosine => 1.0 - score,
        DistanceKind::Dot => -score,
        DistanceKind::Euclid => score,
    }
}

/// Orders rows best first; equal distances keep insertion order.
pub(crate) fn rank(rows: &mut [ScoredRow]) {
    rows.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.seq.cmp(&b.seq)));
}
