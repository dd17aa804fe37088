//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! This facade concentrates all Qdrant interactions behind [`VectorBackend`],
//! hiding the verbose builder pattern from the rest of the crate.
//!
//! Point payload: `{ "text", "source", "page", "seq" }`, ids are UUIDv4 strings.

use std::collections::HashMap;
use std::time::Duration;

use qdrant_client::qdrant::{
    CountPointsBuilder, CreateCollectionBuilder, Distance, PointStruct, ScoredPoint,
    SearchParamsBuilder, SearchPointsBuilder, UpsertPoints, UpsertPointsBuilder, Value as QValue,
    VectorParamsBuilder, point_id::PointIdOptions,
};
use qdrant_client::{Payload, Qdrant};
use serde_json::json;
use tracing::{debug, info};

use super::{BoxFut, VectorBackend, distance_from_score};
use crate::config::{DistanceKind, RagConfig, VectorSpace};
use crate::errors::RagError;
use crate::record::{RagRecord, ScoredRow, StoredPoint};

/// A facade over the Qdrant client bound to one collection.
pub(crate) struct QdrantFacade {
    client: Qdrant,
    collection: String,
    distance: DistanceKind,
    exact: bool,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// No request is made here; the first call is [`VectorBackend::ensure`].
    pub(crate) fn new(cfg: &RagConfig) -> Result<Self, RagError> {
        cfg.validate()?;

        let mut builder =
            Qdrant::from_url(&cfg.qdrant_url).timeout(Duration::from_secs(cfg.timeout_secs));
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| RagError::Qdrant(format!("client build: {e}")))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
            distance: cfg.distance,
            exact: cfg.exact_search,
        })
    }

    async fn count_points(&self) -> Result<u64, RagError> {
        let res = self
            .client
            .count(CountPointsBuilder::new(&self.collection).exact(true))
            .await
            .map_err(|e| RagError::Qdrant(format!("count: {e}")))?;
        Ok(res.result.map(|r| r.count).unwrap_or(0))
    }
}

impl VectorBackend for QdrantFacade {
    fn ensure<'a>(&'a self, space: VectorSpace) -> BoxFut<'a, u64> {
        Box::pin(async move {
            info!(
                "Ensuring collection '{}' with size={} distance={:?}",
                self.collection, space.size, space.distance
            );

            let exists = self
                .client
                .collection_exists(&self.collection)
                .await
                .map_err(|e| RagError::Qdrant(format!("collection_exists: {e}")))?;

            if exists {
                let n = self.count_points().await?;
                debug!("Collection '{}' already exists with {} points", self.collection, n);
                return Ok(n);
            }

            let distance = match space.distance {
                DistanceKind::Cosine => Distance::Cosine,
                DistanceKind::Dot => Distance::Dot,
                DistanceKind::Euclid => Distance::Euclid,
            };

            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection)
                        .vectors_config(VectorParamsBuilder::new(space.size as u64, distance)),
                )
                .await
                .map_err(|e| RagError::Qdrant(format!("create_collection: {e}")))?;

            info!("Collection '{}' created successfully", self.collection);
            Ok(0)
        })
    }

    fn upsert<'a>(&'a self, points: Vec<StoredPoint>) -> BoxFut<'a, ()> {
        Box::pin(async move {
            if points.is_empty() {
                return Ok(());
            }

            // One request per add: Qdrant applies it as a single operation.
            let request = upsert_request(&self.collection, points)?;
            let n = request.points.len();
            self.client
                .upsert_points(request)
                .await
                .map_err(|e| RagError::Qdrant(format!("upsert_points: {e}")))?;

            debug!("Upserted {} points into '{}'", n, self.collection);
            Ok(())
        })
    }

    fn search<'a>(&'a self, vector: Vec<f32>, k: usize) -> BoxFut<'a, Vec<ScoredRow>> {
        Box::pin(async move {
            let mut builder =
                SearchPointsBuilder::new(&self.collection, vector, k as u64).with_payload(true);
            if self.exact {
                builder = builder.params(SearchParamsBuilder::default().exact(true));
            }

            let res = self
                .client
                .search_points(builder)
                .await
                .map_err(|e| RagError::Qdrant(format!("search_points: {e}")))?;

            let rows: Vec<ScoredRow> = res
                .result
                .into_iter()
                .map(|sp| to_row(self.distance, sp))
                .collect();
            debug!("Search completed: {} hits returned", rows.len());
            Ok(rows)
        })
    }

    fn count<'a>(&'a self) -> BoxFut<'a, u64> {
        Box::pin(self.count_points())
    }
}

/// Builds the single upsert carrying every point of one add.
///
/// Fails before any write if a payload cannot be converted.
fn upsert_request(collection: &str, points: Vec<StoredPoint>) -> Result<UpsertPoints, RagError> {
    let structs = points
        .into_iter()
        .map(to_point)
        .collect::<Result<Vec<PointStruct>, RagError>>()?;
    Ok(UpsertPointsBuilder::new(collection, structs).wait(true).build())
}

fn to_point(p: StoredPoint) -> Result<PointStruct, RagError> {
    let payload: Payload = json!({
        "text": p.record.text,
        "source": p.record.source,
        "page": p.record.page,
        "seq": p.seq,
    })
    .try_into()
    .map_err(|e| RagError::Qdrant(format!("payload convert: {e}")))?;
    Ok(PointStruct::new(p.id, p.vector, payload))
}

fn to_row(kind: DistanceKind, sp: ScoredPoint) -> ScoredRow {
    let id = match sp.id.and_then(|pid| pid.point_id_options) {
        Some(PointIdOptions::Uuid(s)) => s,
        Some(PointIdOptions::Num(n)) => n.to_string(),
        None => String::new(),
    };

    let mut payload = sp.payload;
    ScoredRow {
        id,
        seq: take_u64(&mut payload, "seq"),
        distance: distance_from_score(kind, sp.score),
        record: RagRecord {
            text: take_string(&mut payload, "text"),
            source: take_string(&mut payload, "source"),
            page: take_u64(&mut payload, "page") as u32,
        },
    }
}

fn take_string(p: &mut HashMap<String, QValue>, key: &str) -> String {
    p.remove(key)
        .and_then(|v| v.into_json().as_str().map(str::to_owned))
        .unwrap_or_default()
}

fn take_u64(p: &mut HashMap<String, QValue>, key: &str) -> u64 {
    p.remove(key)
        .and_then(|v| v.into_json().as_u64())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(seq: u64) -> StoredPoint {
        StoredPoint {
            id: "3f1c7a52-3b7e-4f0e-9d0a-3c2a1c9f6b11".into(),
            seq,
            vector: vec![0.1, 0.2],
            record: RagRecord {
                text: "chunk text".into(),
                source: "guide.pdf".into(),
                page: 4,
            },
        }
    }

    #[test]
    fn point_and_row_mapping_round_trip_payload() {
        let point = to_point(stored(7)).unwrap();
        let sp = ScoredPoint {
            id: point.id.clone(),
            payload: point.payload.clone(),
            score: 0.9,
            ..Default::default()
        };
        let row = to_row(DistanceKind::Cosine, sp);
        assert_eq!(row.id, "3f1c7a52-3b7e-4f0e-9d0a-3c2a1c9f6b11");
        assert_eq!(row.seq, 7);
        assert_eq!(row.record.page, 4);
        assert_eq!(row.record.source, "guide.pdf");
        assert!((row.distance - 0.1).abs() < 1e-6);
    }

    #[test]
    fn one_add_is_one_upsert_request() {
        let points: Vec<StoredPoint> = (0..300).map(stored).collect();
        let req = upsert_request("general", points).unwrap();
        assert_eq!(req.collection_name, "general");
        assert_eq!(req.points.len(), 300);
        assert_eq!(req.wait, Some(true));
    }

    #[test]
    fn missing_payload_fields_default() {
        let row = to_row(DistanceKind::Euclid, ScoredPoint::default());
        assert_eq!(row.id, "");
        assert_eq!(row.record.text, "");
        assert_eq!(row.seq, 0);
    }
}
