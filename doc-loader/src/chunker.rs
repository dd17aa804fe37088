//! Boundary-aware, overlapping splitter.
//!
//! Lengths are measured in `char`s. Each chunk is at most `size` chars and
//! every chunk after the first starts exactly `overlap` chars before the end
//! of the previous one, so the chunks cover the page with no gaps.
//!
//! The cut point is searched backwards from `start + size` inside `window`
//! chars, in order of preference:
//! 1. right after a blank line (`"\n\n"`)
//! 2. right after `.`, `!` or `?` followed by whitespace
//! 3. right before any whitespace
//!
//! With no boundary in the window the chunk is cut at exactly `size` chars.

use crate::document::Document;
use crate::errors::LoaderError;

/// Chunking parameters, validated on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkConfig {
    size: usize,
    overlap: usize,
    window: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            size: 2000,
            overlap: 200,
            window: 400,
        }
    }
}

impl ChunkConfig {
    /// # Errors
    /// [`LoaderError::InvalidChunkConfig`] when `size == 0` or `overlap >= size`.
    pub fn new(size: usize, overlap: usize, window: usize) -> Result<Self, LoaderError> {
        if size == 0 {
            return Err(LoaderError::InvalidChunkConfig("chunk size must be > 0".into()));
        }
        if overlap >= size {
            return Err(LoaderError::InvalidChunkConfig(format!(
                "overlap ({overlap}) must be smaller than chunk size ({size})"
            )));
        }
        Ok(Self {
            size,
            overlap,
            window,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

/// A slice of one [`Document`] with the metadata stored alongside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub source: String,
    pub page: u32,
    /// Offset of the first char within the page text.
    pub char_offset: usize,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Chunker {
    cfg: ChunkConfig,
}

impl Chunker {
    pub fn new(cfg: ChunkConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> ChunkConfig {
        self.cfg
    }

    /// Splits every document in order and flattens the result.
    pub fn split_all(&self, docs: &[Document]) -> Vec<Chunk> {
        docs.iter().flat_map(|d| self.split(d)).collect()
    }

    /// Splits one document. Whitespace-only documents yield no chunks.
    pub fn split(&self, doc: &Document) -> Vec<Chunk> {
        if doc.text.trim().is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = doc.text.chars().collect();
        let n = chars.len();
        let ChunkConfig {
            size,
            overlap,
            window,
        } = self.cfg;

        let mut out = Vec::new();
        let mut start = 0usize;
        loop {
            if n - start <= size {
                out.push(self.make_chunk(doc, &chars, start, n));
                break;
            }

            let hard_end = start + size;
            // Keeps the next start strictly after this one.
            let floor = (start + overlap + 1).max(hard_end.saturating_sub(window));
            let end = find_cut(&chars, floor, hard_end).unwrap_or(hard_end);

            out.push(self.make_chunk(doc, &chars, start, end));
            start = end - overlap;
        }
        out
    }

    fn make_chunk(&self, doc: &Document, chars: &[char], start: usize, end: usize) -> Chunk {
        Chunk {
            text: chars[start..end].iter().collect(),
            source: doc.source.clone(),
            page: doc.page,
            char_offset: start,
        }
    }
}

/// Best exclusive end in `floor..=hard_end`; requires `hard_end < chars.len()`.
fn find_cut(chars: &[char], floor: usize, hard_end: usize) -> Option<usize> {
    let candidates = || (floor.max(1)..=hard_end).rev();

    let paragraph = |p: usize| p >= 2 && chars[p - 1] == '\n' && chars[p - 2] == '\n';
    let sentence =
        |p: usize| matches!(chars[p - 1], '.' | '!' | '?') && chars[p].is_whitespace();
    let word = |p: usize| chars[p].is_whitespace() && !chars[p - 1].is_whitespace();

    candidates()
        .find(|&p| paragraph(p))
        .or_else(|| candidates().find(|&p| sentence(p)))
        .or_else(|| candidates().find(|&p| word(p)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document {
            text: text.to_string(),
            source: "manual.txt".into(),
            page: 3,
        }
    }

    fn chunker(size: usize, overlap: usize, window: usize) -> Chunker {
        Chunker::new(ChunkConfig::new(size, overlap, window).unwrap())
    }

    /// Rebuilds the page from chunks by dropping each chunk's overlap prefix.
    fn stitch(chunks: &[Chunk], overlap: usize) -> String {
        let mut s = String::new();
        for (i, c) in chunks.iter().enumerate() {
            if i == 0 {
                s.push_str(&c.text);
            } else {
                s.extend(c.text.chars().skip(overlap));
            }
        }
        s
    }

    #[test]
    fn short_document_is_one_chunk() {
        let chunks = Chunker::default().split(&doc("A short page."));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "A short page.");
        assert_eq!(chunks[0].page, 3);
        assert_eq!(chunks[0].source, "manual.txt");
        assert_eq!(chunks[0].char_offset, 0);
    }

    #[test]
    fn blank_document_has_no_chunks() {
        assert!(Chunker::default().split(&doc(" \n\t ")).is_empty());
        assert!(Chunker::default().split(&doc("")).is_empty());
    }

    #[test]
    fn prefers_paragraph_break() {
        let chunks = chunker(20, 5, 10).split(&doc("aaaa bbbb.\n\ncccc dddd eeee ffff"));
        assert_eq!(chunks[0].text, "aaaa bbbb.\n\n");
        assert_eq!(chunks[1].char_offset, 7);
    }

    #[test]
    fn falls_back_to_sentence_end() {
        let chunks = chunker(20, 2, 15).split(&doc("One two. Three four five six seven"));
        assert_eq!(chunks[0].text, "One two.");
    }

    #[test]
    fn falls_back_to_word_boundary() {
        let chunks = chunker(12, 0, 6).split(&doc("alpha beta gamma delta epsilon"));
        assert_eq!(chunks[0].text, "alpha beta");
    }

    #[test]
    fn hard_cut_without_boundaries() {
        let chunks = chunker(10, 2, 5).split(&doc("abcdefghijklmnopqrstuvwxyz"));
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["abcdefghij", "ijklmnopqr", "qrstuvwxyz"]);
    }

    #[test]
    fn overlap_is_exact_and_coverage_has_no_gaps() {
        let text = "Lorem ipsum dolor sit amet. Consectetur adipiscing elit!\n\n\
                    Sed do eiusmod tempor incididunt ut labore. Et dolore magna aliqua? \
                    Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris.";
        let (size, overlap) = (40, 8);
        let chunks = chunker(size, overlap, 15).split(&doc(text));

        assert!(chunks.len() > 1);
        for c in &chunks {
            assert!(c.text.chars().count() <= size);
        }
        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].text.chars().collect();
            let tail: String = prev[prev.len() - overlap..].iter().collect();
            let head: String = pair[1].text.chars().take(overlap).collect();
            assert_eq!(tail, head);
            assert_eq!(pair[1].char_offset, pair[0].char_offset + prev.len() - overlap);
        }
        assert_eq!(stitch(&chunks, overlap), text);
    }

    #[test]
    fn chunk_count_lower_bound() {
        let text = "word ".repeat(300);
        let (size, overlap) = (50, 10);
        let chunks = chunker(size, overlap, 20).split(&doc(&text));
        let l = text.chars().count();
        let min = (l - overlap).div_ceil(size - overlap);
        assert!(chunks.len() >= min);
    }

    #[test]
    fn measures_chars_not_bytes() {
        let chunks = chunker(10, 0, 0).split(&doc(&"é".repeat(25)));
        let lens: Vec<usize> = chunks.iter().map(|c| c.text.chars().count()).collect();
        assert_eq!(lens, vec![10, 10, 5]);
    }

    #[test]
    fn split_all_keeps_page_order() {
        let docs = vec![
            Document {
                text: "first".into(),
                source: "b.pdf".into(),
                page: 1,
            },
            Document {
                text: "  ".into(),
                source: "b.pdf".into(),
                page: 2,
            },
            Document {
                text: "third".into(),
                source: "b.pdf".into(),
                page: 3,
            },
        ];
        let pages: Vec<u32> = Chunker::default().split_all(&docs).iter().map(|c| c.page).collect();
        assert_eq!(pages, vec![1, 3]);
    }

    #[test]
    fn config_is_validated() {
        assert!(ChunkConfig::new(0, 0, 0).is_err());
        assert!(ChunkConfig::new(100, 100, 10).is_err());
        let cfg = ChunkConfig::new(100, 99, 10).unwrap();
        assert_eq!((cfg.size(), cfg.overlap(), cfg.window()), (100, 99, 10));
        assert_eq!(ChunkConfig::default().size(), 2000);
    }
}
