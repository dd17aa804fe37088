//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;

use doc_loader::ChunkConfig;

use crate::error::ContextorError;

/// Pipeline knobs. All fields have defaults via `from_env`.
#[derive(Clone, Debug)]
pub struct ContextorConfig {
    /// Default number of references when a request does not pick one.
    pub top_k: usize,
    pub chunk: ChunkConfig,
    pub template_path: PathBuf,
}

impl Default for ContextorConfig {
    fn default() -> Self {
        Self {
            top_k: 2,
            chunk: ChunkConfig::default(),
            template_path: PathBuf::from("prompt_template.txt"),
        }
    }
}

impl ContextorConfig {
    /// Build from `RAG_TOP_K`, `CHUNK_SIZE`, `CHUNK_OVERLAP`,
    /// `CHUNK_SEARCH_WINDOW` and `PROMPT_TEMPLATE_PATH`.
    ///
    /// # Errors
    /// `ContextorError::Config` for malformed numbers, `top_k == 0`, or an
    /// overlap that is not smaller than the chunk size.
    pub fn from_env() -> Result<Self, ContextorError> {
        let d = Self::default();

        let top_k = parse("RAG_TOP_K", d.top_k)?;
        if top_k == 0 {
            return Err(ContextorError::Config("RAG_TOP_K must be >= 1".into()));
        }

        let chunk = ChunkConfig::new(
            parse("CHUNK_SIZE", d.chunk.size())?,
            parse("CHUNK_OVERLAP", d.chunk.overlap())?,
            parse("CHUNK_SEARCH_WINDOW", d.chunk.window())?,
        )
        .map_err(|e| ContextorError::Config(e.to_string()))?;

        Ok(Self {
            top_k,
            chunk,
            template_path: PathBuf::from(env("PROMPT_TEMPLATE_PATH", "prompt_template.txt")),
        })
    }
}

fn env(k: &str, dflt: &str) -> String {
    match std::env::var(k) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => dflt.to_string(),
    }
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> Result<T, ContextorError> {
    match std::env::var(k) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map_err(|_| ContextorError::Config(format!("{k} is not a valid number: '{v}'"))),
        _ => Ok(dflt),
    }
}
