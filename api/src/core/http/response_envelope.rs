use contextor::Reference;
use serde::{Deserialize, Serialize};

/// Success envelope: `{statusCode, body, references?}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<Reference>>,
}

impl ApiResponse {
    /// 200 with a plain message body.
    pub fn message(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
            references: None,
        }
    }

    /// 200 with an answer and the references it was built from (may be empty).
    pub fn answer(body: impl Into<String>, references: Vec<Reference>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
            references: Some(references),
        }
    }
}
