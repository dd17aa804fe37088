//! Request envelope shared by every POST route: `{headers, body, isBase64Encoded?}`.

use serde::Deserialize;

/// Event-style request. Unknown keys, in the envelope or in `headers`, are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest<H> {
    #[serde(default)]
    pub headers: H,
    pub body: String,
    /// Accepted for compatibility; `add_document` bodies are always base64.
    #[serde(default)]
    pub is_base64_encoded: Option<bool>,
}

/// Headers for routes that take nothing.
#[derive(Debug, Default, Deserialize)]
pub struct NoHeaders {}
