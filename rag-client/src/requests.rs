//! Request bodies in the service's event shape: `{headers, body, isBase64Encoded?}`.

use std::path::Path;

use anyhow::{Context, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};

pub const HEARTBEAT: &str = "/heartbeat";
pub const ASK: &str = "/ask_question";
pub const ASK_NO_REF: &str = "/ask_question_no_refs";
pub const ADD: &str = "/add_document";

pub fn ask(query: &str, k: Option<i64>) -> Value {
    let headers = match k {
        Some(k) => json!({ "k": k }),
        None => json!({}),
    };
    json!({ "headers": headers, "body": query })
}

pub fn ask_no_ref(query: &str) -> Value {
    json!({ "headers": {}, "body": query })
}

/// Upload event for raw file bytes.
pub fn add_bytes(filename: &str, bytes: &[u8]) -> Value {
    json!({
        "headers": {
            "Content-Type": "multipart/form-data",
            "filename": filename,
        },
        "body": STANDARD.encode(bytes),
        "isBase64Encoded": true,
    })
}

/// Upload event for a file on disk; `filename` defaults to the path's last component.
pub fn add_file(path: &Path, filename: Option<&str>) -> Result<Value> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = match filename {
        Some(n) => n.to_string(),
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", path.display()))?,
    };
    Ok(add_bytes(&name, &bytes))
}

/// Writes an add_document event to `output` (pretty JSON).
pub fn write_mock_event(path: &Path, filename: &str, output: &Path) -> Result<()> {
    let event = add_file(path, Some(filename))?;
    let text = serde_json::to_string_pretty(&event)?;
    std::fs::write(output, text).with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}
