//! Prompt builder: fills a fixed template with the query and reference text.
//!
//! The template is plain text with two placeholders, `{query}` and
//! `{references}`. `{{` and `}}` stand for literal braces. It is parsed once
//! and only ever filled; values are inserted verbatim.

use std::path::Path;

use crate::api_types::Reference;
use crate::error::ContextorError;

/// Separator placed between reference contents.
pub const REFERENCE_DELIMITER: &str = "\n###\n";

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Query,
    References,
}

/// Parsed prompt template.
///
/// # Example
/// ```
/// use contextor::prompt::PromptTemplate;
/// let t = PromptTemplate::parse("Q: {query}\nContext:\n{references}\nA:").unwrap();
/// assert_eq!(t.render("why?", &["one", "two"]), "Q: why?\nContext:\none\n###\ntwo\nA:");
/// ```
#[derive(Clone, Debug)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Reads and parses a template file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContextorError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ContextorError::Template(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&raw)
    }

    /// Parses template text.
    ///
    /// # Errors
    /// `ContextorError::Template` for unknown or unterminated placeholders,
    /// a stray `}`, or a template missing `{query}` or `{references}`.
    pub fn parse(raw: &str) -> Result<Self, ContextorError> {
        let mut segments = Vec::new();
        let mut lit = String::new();
        let mut chars = raw.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    lit.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    lit.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => name.push(ch),
                            None => {
                                return Err(ContextorError::Template(format!(
                                    "unterminated placeholder '{{{name}'"
                                )));
                            }
                        }
                    }
                    let seg = match name.trim() {
                        "query" => Segment::Query,
                        "references" => Segment::References,
                        other => {
                            return Err(ContextorError::Template(format!(
                                "unknown placeholder '{{{other}}}'"
                            )));
                        }
                    };
                    if !lit.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut lit)));
                    }
                    segments.push(seg);
                }
                '}' => {
                    return Err(ContextorError::Template(
                        "single '}' in template (use '}}' for a literal brace)".into(),
                    ));
                }
                _ => lit.push(c),
            }
        }
        if !lit.is_empty() {
            segments.push(Segment::Literal(lit));
        }

        for (needed, name) in [(Segment::Query, "query"), (Segment::References, "references")] {
            if !segments.contains(&needed) {
                return Err(ContextorError::Template(format!(
                    "template has no {{{name}}} placeholder"
                )));
            }
        }
        Ok(Self { segments })
    }

    /// Fills the template. No references → empty string at `{references}`.
    pub fn render(&self, query: &str, references: &[&str]) -> String {
        let refs = references.join(REFERENCE_DELIMITER);
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(s) => out.push_str(s),
                Segment::Query => out.push_str(query),
                Segment::References => out.push_str(&refs),
            }
        }
        out
    }

    /// [`render`](Self::render) with the contents of `references`.
    pub fn build(&self, query: &str, references: &[Reference]) -> String {
        let contents: Vec<&str> = references.iter().map(|r| r.content.as_str()).collect();
        self.render(query, &contents)
    }
}
