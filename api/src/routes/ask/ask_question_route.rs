//! POST /ask_question and /ask_question_no_refs: answers with or without RAG context.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::info;

use crate::{
    core::{
        app_state::AppState,
        http::{
            event_request::{EventRequest, NoHeaders},
            response_envelope::ApiResponse,
        },
    },
    error_handler::AppResult,
    routes::ask::ask_request::AskHeaders,
};

/// Handler: POST /ask_question
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/ask_question \
///   -H 'content-type: application/json' \
///   -d '{"headers":{"k":3},"body":"How do crabs walk?"}'
/// ```
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EventRequest<AskHeaders>>, JsonRejection>,
) -> AppResult<Json<ApiResponse>> {
    let Json(req) = payload?;
    let k = req.headers.k()?;
    info!(k = ?k, query_chars = req.body.len(), "ask_question");

    let answer = state.contextor.answer(&req.body, k).await?;
    Ok(Json(ApiResponse::answer(answer.text, answer.references)))
}

/// Handler: POST /ask_question_no_refs
pub async fn ask_question_no_refs(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EventRequest<NoHeaders>>, JsonRejection>,
) -> AppResult<Json<ApiResponse>> {
    let Json(req) = payload?;
    info!(query_chars = req.body.len(), "ask_question_no_refs");

    let answer = state.contextor.answer_without_references(&req.body).await?;
    Ok(Json(ApiResponse::answer(answer.text, answer.references)))
}
