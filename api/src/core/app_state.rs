use std::sync::Arc;

use contextor::Contextor;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The Q&A pipeline; owns the embedding index and the model clients.
    pub contextor: Arc<Contextor>,
}

impl AppState {
    pub fn new(contextor: Arc<Contextor>) -> Self {
        Self { contextor }
    }

    /// Builds the pipeline from environment variables.
    ///
    /// Connects to the index once; the handle is reused by every request.
    pub async fn from_env() -> Result<Self, contextor::ContextorError> {
        Ok(Self::new(Arc::new(Contextor::from_env().await?)))
    }
}
