use scraper::Html;

use crate::errors::LoaderError;
use crate::registry::DocumentLoader;

const SKIPPED: &[&str] = &["script", "style", "noscript", "template"];

/// Visible text of an HTML page; the whole page is one document.
///
/// Text nodes are trimmed and joined with newlines. Content of `script`,
/// `style`, `noscript` and `template` elements is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlLoader;

impl DocumentLoader for HtmlLoader {
    fn load(&self, _filename: &str, bytes: &[u8]) -> Result<Vec<String>, LoaderError> {
        let raw = String::from_utf8_lossy(bytes);
        Ok(vec![visible_text(&raw)])
    }
}

fn visible_text(raw: &str) -> String {
    let html = Html::parse_document(raw);
    let mut parts: Vec<&str> = Vec::new();

    for node in html.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|el| SKIPPED.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        let t = text.trim();
        if !t.is_empty() {
            parts.push(t);
        }
    }

    parts.join("\n")
}
