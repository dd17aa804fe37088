//! Public API types re-used by external crates (e.g., the HTTP API layer).

use rag_store::RagHit;
use serde::{Deserialize, Serialize};

/// Externally visible projection of a retrieved chunk.
///
/// # Example
/// ```
/// use contextor::Reference;
/// let r = Reference { content: "Ferris is a crab.".into(), source: "faq.txt".into(), page: 1 };
/// assert_eq!(serde_json::to_value(&r).unwrap()["page"], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub content: String,
    pub source: String,
    pub page: u32,
}

impl From<RagHit> for Reference {
    fn from(h: RagHit) -> Self {
        Reference {
            content: h.text,
            source: h.source,
            page: h.page,
        }
    }
}

/// Final answer together with the references fed to the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub references: Vec<Reference>,
}
