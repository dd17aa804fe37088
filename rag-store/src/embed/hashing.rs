//! Deterministic bag-of-words embedder using feature hashing.
//!
//! Each lowercase alphanumeric token is hashed with BLAKE3 into one of `dim`
//! buckets with a ±1 sign; the result is L2-normalized. Texts sharing words
//! land close under cosine distance. Useful offline and in tests.

use std::{future::Future, pin::Pin};

use crate::{EmbeddingsProvider, RagError};

#[derive(Clone, Debug)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    /// Synchronous core of [`EmbeddingsProvider::embed`].
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        let lower = text.to_lowercase();
        for token in lower.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
            let h = blake3::hash(token.as_bytes());
            let b = h.as_bytes();
            let mut idx = [0u8; 8];
            idx.copy_from_slice(&b[..8]);
            let bucket = (u64::from_le_bytes(idx) % self.dim as u64) as usize;
            let sign = if b[8] & 1 == 0 { 1.0 } else { -1.0 };
            v[bucket] += sign;
        }

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            v.iter_mut().for_each(|x| *x /= norm);
        }
        v
    }
}

impl EmbeddingsProvider for HashingEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.vectorize(text)) })
    }

    fn dim(&self) -> usize {
        self.dim
    }
}
