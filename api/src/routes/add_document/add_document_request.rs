use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;

use crate::error_handler::AppError;

/// Headers accepted by /add_document; `Content-Type` and the like are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct AddDocumentHeaders {
    #[serde(default)]
    pub filename: Option<String>,
}

impl AddDocumentHeaders {
    pub fn filename(&self) -> Result<&str, AppError> {
        match self.filename.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(AppError::BadRequest("header 'filename' is required".into())),
        }
    }
}

/// Decodes the standard-alphabet base64 body (surrounding whitespace allowed).
pub fn decode_body(body: &str) -> Result<Vec<u8>, AppError> {
    STANDARD
        .decode(body.trim())
        .map_err(|e| AppError::BadRequest(format!("body is not valid base64: {e}")))
}
