//! Core data models used by the library.

use serde::{Deserialize, Serialize};

/// A chunk to be embedded and stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagRecord {
    pub text: String,
    pub source: String,
    pub page: u32,
}

/// A single retrieval hit, best first.
///
/// `distance` is smaller for closer matches regardless of the metric.
#[derive(Clone, Debug, PartialEq)]
pub struct RagHit {
    pub id: String,
    pub distance: f32,
    pub text: String,
    pub source: String,
    pub page: u32,
}

/// Stored form of a record: id, vector and insertion sequence number.
#[derive(Clone, Debug)]
pub(crate) struct StoredPoint {
    pub id: String,
    pub seq: u64,
    pub vector: Vec<f32>,
    pub record: RagRecord,
}

/// Raw search row returned by a backend before final ordering.
#[derive(Clone, Debug)]
pub(crate) struct ScoredRow {
    pub id: String,
    pub seq: u64,
    pub distance: f32,
    pub record: RagRecord,
}

impl From<ScoredRow> for RagHit {
    fn from(r: ScoredRow) -> Self {
        RagHit {
            id: r.id,
            distance: r.distance,
            text: r.record.text,
            source: r.record.source,
            page: r.record.page,
        }
    }
}
