//! GET /heartbeat: liveness only; touches neither the index nor the model.

use axum::Json;

use crate::core::http::response_envelope::ApiResponse;

pub async fn heartbeat() -> Json<ApiResponse> {
    Json(ApiResponse::message("Alive"))
}
