//! Console rendering and on-disk copies of responses.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use serde_json::Value;

const WRAP_WIDTH: usize = 60;
const INDENT: &str = "  ";
const SEPARATOR: &str = "******";

/// Greedy word wrap; every line starts with `indent` and is at most `width`
/// chars including it. Words longer than a line are split.
pub fn wrap(text: &str, width: usize, indent: &str) -> Vec<String> {
    let room = width.saturating_sub(indent.chars().count()).max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        // Break oversize words into line-sized pieces.
        while chars.len() > room {
            if line_len > 0 {
                lines.push(format!("{indent}{line}"));
                line.clear();
                line_len = 0;
            }
            let rest = chars.split_off(room);
            lines.push(format!("{indent}{}", chars.iter().collect::<String>()));
            chars = rest;
        }
        if chars.is_empty() {
            continue;
        }

        let extra = if line_len == 0 { chars.len() } else { chars.len() + 1 };
        if line_len + extra > room {
            lines.push(format!("{indent}{line}"));
            line.clear();
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(chars.iter());
        line_len += chars.len();
    }
    if line_len > 0 {
        lines.push(format!("{indent}{line}"));
    }
    lines
}

/// `references` sometimes arrives JSON-encoded as a string; decode it in place.
pub fn normalize_references(data: &mut Value) {
    let parsed = match data.get("references") {
        Some(Value::String(raw)) => serde_json::from_str::<Value>(raw).ok(),
        _ => None,
    };
    if let Some(parsed) = parsed {
        data["references"] = parsed;
    }
}

pub fn print_response(data: &Value) {
    if let Some(err) = data.get("error").and_then(Value::as_str) {
        let msg = data.get("message").and_then(Value::as_str).unwrap_or_default();
        println!("{} {}: {}", "===Error===".red().bold(), err, msg);
        return;
    }

    println!("{}", "===Body===:".green().bold());
    match data.get("body") {
        Some(Value::String(s)) => println!("{s}"),
        Some(other) => println!("{other}"),
        None => println!(),
    }

    let Some(refs) = data.get("references").and_then(Value::as_array) else {
        return;
    };
    println!("{}", "===References===".green().bold());
    for r in refs {
        let source = r.get("source").and_then(Value::as_str).unwrap_or("?");
        let page = r.get("page").map(Value::to_string).unwrap_or_else(|| "?".into());
        println!("Source: {}, Page: {}", source.cyan(), page);
        let content = r.get("content").and_then(Value::as_str).unwrap_or_default();
        for line in wrap(content, WRAP_WIDTH, INDENT) {
            println!("{line}");
        }
        println!("{SEPARATOR}");
    }
}

/// Adds `request_type`/`request_body` and writes `response<YYYYMMDD_HHMMSS>.json`
/// under `dir` (created if missing). Returns the written path.
pub fn save_response(
    dir: &Path,
    mut data: Value,
    request_type: &str,
    request_body: &str,
) -> Result<PathBuf> {
    if let Value::Object(map) = &mut data {
        map.insert("request_type".into(), Value::from(request_type));
        map.insert("request_body".into(), Value::from(request_body));
    }

    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(format!("response{}.json", Local::now().format("%Y%m%d_%H%M%S")));
    let text = serde_json::to_string_pretty(&data)?;
    std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
