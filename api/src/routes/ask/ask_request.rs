use serde::Deserialize;

use crate::error_handler::AppError;

/// Headers accepted by /ask_question.
#[derive(Debug, Default, Deserialize)]
pub struct AskHeaders {
    /// Number of references; integer or numeric string.
    #[serde(default)]
    pub k: Option<KHeader>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum KHeader {
    Int(i64),
    Text(String),
}

impl AskHeaders {
    /// The requested k, if any. Values ≤ 0 pass through; the retriever
    /// falls back to its default for them.
    pub fn k(&self) -> Result<Option<i64>, AppError> {
        match &self.k {
            None => Ok(None),
            Some(KHeader::Int(k)) => Ok(Some(*k)),
            Some(KHeader::Text(s)) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| AppError::BadRequest(format!("header 'k' must be an integer, got '{s}'"))),
        }
    }
}
