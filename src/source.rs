use serde::Serialize;
use swc_common::{comments::SingleThreadedComments, BytePos, Span};
use thiserror::Error;

/// Half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains_range(&self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// 1-based line and column of an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SourceError {
    #[error("range {start}..{end} is outside of the source text (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("range {start}..{end} does not fall on a character boundary")]
    NotCharBoundary { start: usize, end: usize },
}

/// Read-only view over one parsed file: its text, line table and comments.
///
/// swc positions are global to the source map, so every span handed out by the
/// parser is shifted by the file's start position before it is used here.
#[derive(Debug, Clone)]
pub struct SourceFile {
    text: String,
    base: u32,
    line_starts: Vec<usize>,
    comments: Vec<TextRange>,
}

impl SourceFile {
    pub fn new(text: &str, start_pos: BytePos, comments: &SingleThreadedComments) -> Self {
        let base = start_pos.0;
        let mut ranges = Vec::new();
        {
            let (leading, trailing) = comments.borrow_all();
            for comment in leading.values().chain(trailing.values()).flatten() {
                if comment.span.lo.0 < base {
                    continue;
                }
                let range = TextRange::new(
                    (comment.span.lo.0 - base) as usize,
                    (comment.span.hi.0 - base) as usize,
                );
                if range.end <= text.len() {
                    ranges.push(range);
                }
            }
        }
        ranges.sort();
        ranges.dedup();

        Self::from_parts(text, base, ranges)
    }

    /// Build a source file without any comment information.
    pub fn without_comments(text: &str) -> Self {
        Self::from_parts(text, 0, Vec::new())
    }

    fn from_parts(text: &str, base: u32, comments: Vec<TextRange>) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();

        Self {
            text: text.to_string(),
            base,
            line_starts,
            comments,
        }
    }

    /// `"\r\n"` when the file uses CRLF line endings, `"\n"` otherwise.
    pub fn line_ending(&self) -> &'static str {
        if self.text.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }

    pub fn range_of(&self, span: Span) -> TextRange {
        let lo = span.lo.0.saturating_sub(self.base) as usize;
        let hi = span.hi.0.saturating_sub(self.base) as usize;
        TextRange::new(lo, hi.max(lo))
    }

    pub fn slice(&self, range: TextRange) -> Result<&str, SourceError> {
        if range.start > range.end || range.end > self.text.len() {
            return Err(SourceError::OutOfBounds {
                start: range.start,
                end: range.end,
                len: self.text.len(),
            });
        }
        self.text
            .get(range.start..range.end)
            .ok_or(SourceError::NotCharBoundary {
                start: range.start,
                end: range.end,
            })
    }

    /// 1-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(idx) => idx,
        }
    }

    pub fn position_of(&self, offset: usize) -> Position {
        let line = self.line_of(offset);
        let line_start = self.line_starts[line - 1];
        let column = self
            .text
            .get(line_start..offset.min(self.text.len()))
            .map(|prefix| prefix.chars().count())
            .unwrap_or(0);

        Position {
            line,
            column: column + 1,
        }
    }

    /// Comment ranges in source order.
    pub fn comments(&self) -> &[TextRange] {
        &self.comments
    }

    pub fn comments_within(&self, range: TextRange) -> impl Iterator<Item = TextRange> + '_ {
        self.comments
            .iter()
            .copied()
            .filter(move |comment| range.contains_range(*comment))
    }
}
