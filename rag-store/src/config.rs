//! Runtime and collection configuration.

use std::str::FromStr;

use crate::errors::RagError;

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
}

impl FromStr for DistanceKind {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "dot" => Ok(Self::Dot),
            "euclid" | "euclidean" | "l2" => Ok(Self::Euclid),
            other => Err(RagError::Config(format!("unknown distance '{other}'"))),
        }
    }
}

/// Where vectors live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// Persistent Qdrant collection.
    Qdrant,
    /// Process-local exact index; lost on exit.
    Memory,
}

impl FromStr for BackendKind {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qdrant" => Ok(Self::Qdrant),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(RagError::Config(format!("unknown vector backend '{other}'"))),
        }
    }
}

/// Which embedder turns text into vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbedderKind {
    /// Remote Ollama model via `ai-llm-service`.
    Ollama,
    /// Local feature hashing (no network).
    Hashing,
}

impl FromStr for EmbedderKind {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "hashing" | "hash" => Ok(Self::Hashing),
            other => Err(RagError::Config(format!("unknown embedding provider '{other}'"))),
        }
    }
}

/// Describes the vector space of the collection.
#[derive(Clone, Copy, Debug)]
pub struct VectorSpace {
    /// Dimensionality of vectors.
    pub size: usize,
    /// Distance function.
    pub distance: DistanceKind,
}

/// Configuration for the embedding index.
#[derive(Clone, Debug)]
pub struct RagConfig {
    pub backend: BackendKind,
    pub embedder: EmbedderKind,
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    pub distance: DistanceKind,
    /// Embedding dimension; the collection is created with it.
    pub dim: usize,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
    pub timeout_secs: u64,
    /// Parallel embedding calls during `add`.
    pub embed_concurrency: usize,
}

impl RagConfig {
    /// Creates a sane default config for a given collection name and Qdrant endpoint.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            backend: BackendKind::Qdrant,
            embedder: EmbedderKind::Ollama,
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            distance: DistanceKind::Cosine,
            dim: 384,
            exact_search: false,
            timeout_secs: 30,
            embed_concurrency: 8,
        }
    }

    /// In-memory index with the hashing embedder; no external services.
    pub fn in_memory(dim: usize) -> Self {
        Self {
            backend: BackendKind::Memory,
            embedder: EmbedderKind::Hashing,
            dim,
            ..Self::new_default("memory://", "general")
        }
    }

    /// Reads the config from environment variables (see crate docs for names).
    ///
    /// # Errors
    /// Returns `RagError::Config` for malformed values.
    pub fn from_env() -> Result<Self, RagError> {
        let mut cfg = Self::new_default(
            env_or("QDRANT_URL", "http://127.0.0.1:6334"),
            env_or("QDRANT_COLLECTION", "general"),
        );
        cfg.backend = env_or("VECTOR_BACKEND", "qdrant").parse()?;
        cfg.embedder = env_or("EMBEDDING_PROVIDER", "ollama").parse()?;
        cfg.distance = env_or("QDRANT_DISTANCE", "cosine").parse()?;
        cfg.qdrant_api_key = std::env::var("QDRANT_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty());
        cfg.dim = env_parse("EMBEDDING_DIM", cfg.dim)?;
        cfg.exact_search = env_parse("QDRANT_EXACT_SEARCH", cfg.exact_search)?;
        cfg.timeout_secs = env_parse("QDRANT_TIMEOUT_SECS", cfg.timeout_secs)?;
        cfg.embed_concurrency = env_parse("EMBED_CONCURRENCY", cfg.embed_concurrency)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.backend == BackendKind::Qdrant && self.qdrant_url.trim().is_empty() {
            return Err(RagError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(RagError::Config("collection is empty".into()));
        }
        if self.dim == 0 {
            return Err(RagError::Config("embedding dim must be > 0".into()));
        }
        Ok(())
    }

    pub fn space(&self) -> VectorSpace {
        VectorSpace {
            size: self.dim,
            distance: self.distance,
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

fn env_parse<T: FromStr>(name: &str, default: T) -> Result<T, RagError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map_err(|_| RagError::Config(format!("{name} has an invalid value: '{v}'"))),
        _ => Ok(default),
    }
}
