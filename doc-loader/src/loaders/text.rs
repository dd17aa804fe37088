use crate::errors::LoaderError;
use crate::registry::DocumentLoader;

/// Plain UTF-8 text; the whole file is one page.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextLoader;

impl DocumentLoader for TextLoader {
    fn load(&self, filename: &str, bytes: &[u8]) -> Result<Vec<String>, LoaderError> {
        let text = std::str::from_utf8(bytes).map_err(|e| LoaderError::Decode {
            filename: filename.to_string(),
            reason: e.to_string(),
        })?;
        Ok(vec![text.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_text_verbatim() {
        let pages = TextLoader.load("a.txt", "  Ünïcödé\n\nline ".as_bytes()).unwrap();
        assert_eq!(pages, vec!["  Ünïcödé\n\nline ".to_string()]);
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = TextLoader.load("bin.txt", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, LoaderError::Decode { filename, .. } if filename == "bin.txt"));
    }
}
