//! File-backed scratch space for parsers that only accept a path.

use std::io::Write;
use std::path::Path;

use tempfile::Builder;

use crate::errors::LoaderError;

/// Writes `bytes` to a fresh temp file and runs `f` with its path.
///
/// The file is removed when this returns, whether `f` succeeds, fails or unwinds.
pub(crate) fn with_scoped_file<T>(
    suffix: &str,
    bytes: &[u8],
    f: impl FnOnce(&Path) -> Result<T, LoaderError>,
) -> Result<T, LoaderError> {
    let mut file = Builder::new().prefix("doc-loader-").suffix(suffix).tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    f(file.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn file_exists_during_call_and_is_removed_after() {
        let mut seen = PathBuf::new();
        let len = with_scoped_file(".bin", b"abc", |p| {
            seen = p.to_path_buf();
            Ok(std::fs::read(p)?.len())
        })
        .unwrap();
        assert_eq!(len, 3);
        assert!(seen.to_string_lossy().ends_with(".bin"));
        assert!(!seen.exists());
    }

    #[test]
    fn file_is_removed_when_parser_fails() {
        let mut seen = PathBuf::new();
        let res: Result<(), _> = with_scoped_file(".pdf", b"not a pdf", |p| {
            seen = p.to_path_buf();
            Err(LoaderError::Pdf {
                filename: "x.pdf".into(),
                reason: "boom".into(),
            })
        });
        assert!(matches!(res, Err(LoaderError::Pdf { .. })));
        assert!(!seen.as_os_str().is_empty());
        assert!(!seen.exists());
    }
}
