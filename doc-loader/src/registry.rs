//! Extension → loader dispatch.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::document::Document;
use crate::errors::LoaderError;
use crate::loaders::{HtmlLoader, PdfLoader, TextLoader};

/// Parses the raw bytes of one file type into ordered page texts.
///
/// `filename` is only used for error messages.
pub trait DocumentLoader: Send + Sync {
    fn load(&self, filename: &str, bytes: &[u8]) -> Result<Vec<String>, LoaderError>;
}

/// Mapping from lowercase file extension to a loader.
pub struct LoaderRegistry {
    loaders: HashMap<String, Box<dyn DocumentLoader>>,
}

impl Default for LoaderRegistry {
    /// Registry with `txt`, `pdf`, `html` and `htm`.
    fn default() -> Self {
        let mut reg = Self::empty();
        reg.register("txt", TextLoader);
        reg.register("pdf", PdfLoader);
        reg.register("html", HtmlLoader);
        reg.register("htm", HtmlLoader);
        reg
    }
}

impl LoaderRegistry {
    pub fn empty() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Registers (or replaces) the loader for `ext` (case-insensitive, no dot).
    pub fn register(&mut self, ext: &str, loader: impl DocumentLoader + 'static) {
        self.loaders
            .insert(ext.trim_start_matches('.').to_ascii_lowercase(), Box::new(loader));
    }

    /// Sorted list of registered extensions.
    pub fn extensions(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        v.sort_unstable();
        v
    }

    /// Loads `bytes` with the loader registered for `filename`'s extension.
    ///
    /// Pages are numbered from 1 in the order the loader yields them.
    ///
    /// # Errors
    /// - [`LoaderError::UnsupportedFileType`] if the extension is missing or unknown
    /// - any error the selected loader reports
    pub fn load(&self, filename: &str, bytes: &[u8]) -> Result<Vec<Document>, LoaderError> {
        let loader = extension_of(filename)
            .and_then(|ext| self.loaders.get(&ext))
            .ok_or_else(|| LoaderError::UnsupportedFileType {
                filename: filename.to_string(),
            })?;

        let pages = loader.load(filename, bytes)?;
        debug!(filename, pages = pages.len(), "document loaded");

        Ok(pages
            .into_iter()
            .enumerate()
            .map(|(i, text)| Document {
                text,
                source: filename.to_string(),
                page: (i + 1) as u32,
            })
            .collect())
    }
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}
