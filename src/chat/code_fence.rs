//! Code fence extraction
//!
//! Messages may embed one snippet between a pair of ```` ``` ```` markers.
//! Only the first fenced segment is ever extracted; anything after the
//! second marker is dropped.

/// Marker that opens and closes an embedded snippet.
pub const FENCE: &str = "```";

/// Result of splitting a message around its first fenced segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSnippet<'a> {
    /// Text before the first fence
    pub prose: &'a str,
    /// Raw text between the first and second fence, info string included
    pub code: &'a str,
}

impl<'a> CodeSnippet<'a> {
    /// Info string on the first line of the snippet (`swift`, `rust`, ...).
    pub fn language(&self) -> Option<&'a str> {
        let (first, rest) = self.code.split_once('\n')?;
        let tag = first.trim();
        if tag.is_empty() || tag.contains(char::is_whitespace) || rest.trim().is_empty() {
            return None;
        }
        Some(tag)
    }

    /// Snippet text to draw: no info line, no surrounding blank lines.
    pub fn body(&self) -> &'a str {
        let code = match (self.language(), self.code.split_once('\n')) {
            (Some(_), Some((_, rest))) => rest,
            _ => self.code,
        };
        code.trim_matches(|c: char| c == '\n' || c == '\r')
    }
}

/// Split `text` into prose and the first fenced snippet.
///
/// Returns `None` unless the text contains at least two fence markers.
pub fn extract_code(text: &str) -> Option<CodeSnippet<'_>> {
    let mut parts = text.split(FENCE);
    let prose = parts.next()?;
    let code = parts.next()?;
    // A third segment only exists when a closing fence was found
    parts.next()?;
    Some(CodeSnippet { prose, code })
}
