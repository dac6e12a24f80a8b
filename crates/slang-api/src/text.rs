//! Source positions, tokens and comments.
//!
//! Lines are 1-based and line offsets are 0-based, so the very first
//! character of a file is at `TextPointer::new(1, 0)`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextPointer {
    /// 1-based line number
    pub line: usize,

    /// 0-based column offset in the line
    pub line_offset: usize,
}

impl TextPointer {
    pub fn new(line: usize, line_offset: usize) -> Self {
        Self { line, line_offset }
    }
}

impl fmt::Display for TextPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.line_offset)
    }
}

/// A span between two positions, `start <= end` in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: TextPointer,
    pub end: TextPointer,
}

impl TextRange {
    pub fn new(start: TextPointer, end: TextPointer) -> Self {
        debug_assert!(start <= end, "range start {start} is after end {end}");
        Self { start, end }
    }

    /// Shorthand for `TextRange::new(TextPointer::new(..), TextPointer::new(..))`
    pub fn from_positions(
        start_line: usize,
        start_offset: usize,
        end_line: usize,
        end_offset: usize,
    ) -> Self {
        Self::new(
            TextPointer::new(start_line, start_offset),
            TextPointer::new(end_line, end_offset),
        )
    }

    /// True when `other` lies entirely within this range
    pub fn contains(&self, other: &TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True when this range lies entirely within `other`
    pub fn is_inside(&self, other: &TextRange) -> bool {
        other.contains(self)
    }

    /// Smallest range covering every range of the input, `None` for an empty input
    pub fn merge<'a, I>(ranges: I) -> Option<TextRange>
    where
        I: IntoIterator<Item = &'a TextRange>,
    {
        ranges.into_iter().fold(None, |acc, range| match acc {
            None => Some(*range),
            Some(merged) => Some(TextRange {
                start: merged.start.min(range.start),
                end: merged.end.max(range.end),
            }),
        })
    }

    /// Every line the range touches
    pub fn lines(&self) -> impl Iterator<Item = usize> {
        self.start.line..=self.end.line
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TextRange[{}, {}, {}, {}]",
            self.start.line, self.start.line_offset, self.end.line, self.end.line_offset
        )
    }
}

/// Coarse lexical category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    Keyword,
    StringLiteral,
    Other,
}

/// A lexical token with its text and location
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub range: TextRange,
    pub text: String,
    pub token_type: TokenType,
}

impl Token {
    pub fn new(range: TextRange, text: impl Into<String>, token_type: TokenType) -> Self {
        Self {
            range,
            text: text.into(),
            token_type,
        }
    }

    pub fn is_keyword(&self) -> bool {
        self.token_type == TokenType::Keyword
    }
}

/// A source comment; `content` excludes the comment delimiters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub content: String,
    pub range: TextRange,
    pub content_range: TextRange,
}

impl Comment {
    pub fn new(
        text: impl Into<String>,
        content: impl Into<String>,
        range: TextRange,
        content_range: TextRange,
    ) -> Self {
        Self {
            text: text.into(),
            content: content.into(),
            range,
            content_range,
        }
    }
}
