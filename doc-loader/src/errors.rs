//! Error types for loading and chunking.

use thiserror::Error;

/// Failure while turning raw bytes into documents or chunks.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// No loader is registered for the file's extension.
    #[error("Unsupported file type (unrecognized extension): {filename}")]
    UnsupportedFileType { filename: String },

    /// Bytes are not valid for the declared type (e.g. non UTF-8 text).
    #[error("cannot decode {filename}: {reason}")]
    Decode { filename: String, reason: String },

    /// The PDF parser rejected the file.
    #[error("pdf extraction failed for {filename}: {reason}")]
    Pdf { filename: String, reason: String },

    /// Scratch file I/O failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Chunk size/overlap/window combination is unusable.
    #[error("invalid chunk config: {0}")]
    InvalidChunkConfig(String),
}
