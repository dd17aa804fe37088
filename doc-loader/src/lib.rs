//! Turning uploaded files into retrievable text.
//!
//! - [`LoaderRegistry`] maps a file extension to a [`DocumentLoader`] and
//!   yields page-level [`Document`]s numbered from 1.
//! - [`Chunker`] splits each document into bounded, overlapping [`Chunk`]s,
//!   preferring paragraph, then sentence, then word boundaries.

mod chunker;
mod document;
mod errors;
mod loaders;
mod registry;
mod scoped_file;

pub use chunker::{Chunk, ChunkConfig, Chunker};
pub use document::Document;
pub use errors::LoaderError;
pub use loaders::{HtmlLoader, PdfLoader, TextLoader};
pub use registry::{DocumentLoader, LoaderRegistry};
