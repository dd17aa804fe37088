//! POST /add_document: loads, chunks and indexes one base64-encoded file.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::info;

use crate::{
    core::{
        app_state::AppState,
        http::{event_request::EventRequest, response_envelope::ApiResponse},
    },
    error_handler::AppResult,
    routes::add_document::add_document_request::{AddDocumentHeaders, decode_body},
};

/// Handler: POST /add_document
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/add_document \
///   -H 'content-type: application/json' \
///   -d "{\"headers\":{\"filename\":\"notes.txt\"},\"body\":\"$(base64 -w0 notes.txt)\"}"
/// ```
pub async fn add_document(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EventRequest<AddDocumentHeaders>>, JsonRejection>,
) -> AppResult<Json<ApiResponse>> {
    let Json(req) = payload?;
    let filename = req.headers.filename()?;
    let bytes = decode_body(&req.body)?;
    info!(filename, bytes = bytes.len(), "add_document");

    let added = state.contextor.ingest(filename, bytes).await?;
    Ok(Json(ApiResponse::message(format!("Added {added} chunks"))))
}
