//! Typed error for the contextor crate.

use ai_llm_service::error_handler::AiLlmError;
use doc_loader::LoaderError;
use rag_store::RagError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// Loading or parsing the uploaded file failed.
    #[error(transparent)]
    Load(#[from] LoaderError),

    /// The embedding index failed (embedding, storage or search).
    #[error("index error: {0}")]
    Index(#[from] RagError),

    /// The completion service failed or answered with an unusable body.
    #[error("completion error: {0}")]
    Completion(#[from] AiLlmError),

    /// Prompt template is missing or malformed.
    #[error("prompt template error: {0}")]
    Template(String),

    /// Invalid startup configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A blocking parse task panicked or was cancelled.
    #[error("document parsing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Caller-facing classification of a failed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedFileType,
    LoadFailure,
    IndexFailure,
    CompletionFailure,
    /// Startup problems; never produced by a request in a running service.
    Internal,
}

impl ContextorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContextorError::Load(LoaderError::UnsupportedFileType { .. }) => {
                ErrorKind::UnsupportedFileType
            }
            ContextorError::Load(_) | ContextorError::Task(_) => ErrorKind::LoadFailure,
            ContextorError::Index(_) => ErrorKind::IndexFailure,
            ContextorError::Completion(_) => ErrorKind::CompletionFailure,
            ContextorError::Template(_) | ContextorError::Config(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_lower_errors() {
        let unsupported = ContextorError::from(LoaderError::UnsupportedFileType {
            filename: "x.csv".into(),
        });
        assert_eq!(unsupported.kind(), ErrorKind::UnsupportedFileType);
        assert_eq!(
            unsupported.to_string(),
            "Unsupported file type (unrecognized extension): x.csv"
        );

        let bad_pdf = ContextorError::from(LoaderError::Pdf {
            filename: "x.pdf".into(),
            reason: "eof".into(),
        });
        assert_eq!(bad_pdf.kind(), ErrorKind::LoadFailure);

        assert_eq!(
            ContextorError::from(RagError::Qdrant("down".into())).kind(),
            ErrorKind::IndexFailure
        );
        assert_eq!(
            ContextorError::from(AiLlmError::Decode("no generated_text".into())).kind(),
            ErrorKind::CompletionFailure
        );
    }
}
