//! Per-node metadata backed by a shared, sorted token and comment index.

use crate::errors::{SlangError, SlangResult};
use crate::text::{Comment, TextRange, Token};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Tokens and comments of one source unit, sorted by start position
#[derive(Debug, Default)]
struct SourceIndex {
    comments: Vec<Comment>,
    tokens: Vec<Token>,
}

/// Location, tokens and comments of one node.
///
/// Cloning is cheap: every metadata built by the same provider shares one index.
#[derive(Clone)]
pub struct TreeMetaData {
    range: TextRange,
    index: Arc<SourceIndex>,
}

impl TreeMetaData {
    pub fn text_range(&self) -> TextRange {
        self.range
    }

    /// Tokens lying entirely inside the node's range, in source order
    pub fn tokens(&self) -> &[Token] {
        elements_inside(&self.index.tokens, &self.range, |t| &t.range)
    }

    /// Comments lying entirely inside the node's range, in source order
    pub fn comments_inside(&self) -> &[Comment] {
        elements_inside(&self.index.comments, &self.range, |c| &c.range)
    }

    /// Lines holding at least one token of the node
    pub fn lines_of_code(&self) -> BTreeSet<usize> {
        self.tokens().iter().flat_map(|t| t.range.lines()).collect()
    }
}

impl fmt::Debug for TreeMetaData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeMetaData")
            .field("range", &self.range)
            .finish()
    }
}

/// Builds [`TreeMetaData`] for arbitrary ranges of one source unit
#[derive(Debug, Clone, Default)]
pub struct TreeMetaDataProvider {
    index: Arc<SourceIndex>,
}

impl TreeMetaDataProvider {
    pub fn new(mut comments: Vec<Comment>, mut tokens: Vec<Token>) -> Self {
        comments.sort_by_key(|c| c.range.start);
        tokens.sort_by_key(|t| t.range.start);
        Self {
            index: Arc::new(SourceIndex { comments, tokens }),
        }
    }

    pub fn metadata(&self, range: TextRange) -> TreeMetaData {
        TreeMetaData {
            range,
            index: Arc::clone(&self.index),
        }
    }

    pub fn all_comments(&self) -> &[Comment] {
        &self.index.comments
    }

    pub fn all_tokens(&self) -> &[Token] {
        &self.index.tokens
    }

    /// The single keyword token inside `range`
    pub fn keyword(&self, range: TextRange) -> SlangResult<Token> {
        let mut keywords = elements_inside(&self.index.tokens, &range, |t| &t.range)
            .iter()
            .filter(|t| t.is_keyword());
        match (keywords.next(), keywords.next()) {
            (Some(keyword), None) => Ok(keyword.clone()),
            (None, _) => Err(SlangError::KeywordNotFound { range }),
            (Some(_), Some(_)) => Err(SlangError::AmbiguousKeyword { range }),
        }
    }

    /// First token starting at or after `range`'s start, if it lies inside `range`
    pub fn first_token(&self, range: TextRange) -> Option<&Token> {
        elements_inside(&self.index.tokens, &range, |t| &t.range).first()
    }
}

/// Elements sorted by start never overlap, so the ones inside a range are contiguous.
fn elements_inside<'a, T>(
    elements: &'a [T],
    range: &TextRange,
    range_of: impl Fn(&T) -> &TextRange,
) -> &'a [T] {
    let first = elements.partition_point(|e| range_of(e).start < range.start);
    let count = elements[first..]
        .iter()
        .take_while(|e| range_of(e).is_inside(range))
        .count();
    &elements[first..first + count]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TokenType;

    fn token(line: usize, start: usize, text: &str, token_type: TokenType) -> Token {
        Token::new(
            TextRange::from_positions(line, start, line, start + text.len()),
            text,
            token_type,
        )
    }

    fn provider() -> TreeMetaDataProvider {
        let tokens = vec![
            token(1, 7, "x", TokenType::Other),
            token(1, 0, "if", TokenType::Keyword),
            token(1, 3, "(", TokenType::Other),
            token(2, 2, "else", TokenType::Keyword),
            token(3, 0, "y", TokenType::Other),
        ];
        let comments = vec![Comment::new(
            "// c",
            " c",
            TextRange::from_positions(1, 10, 1, 14),
            TextRange::from_positions(1, 12, 1, 14),
        )];
        TreeMetaDataProvider::new(comments, tokens)
    }

    #[test]
    fn test_tokens_inside_range() {
        let provider = provider();
        let meta = provider.metadata(TextRange::from_positions(1, 2, 2, 6));
        let texts: Vec<&str> = meta.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["(", "x", "else"]);
        assert_eq!(meta.comments_inside().len(), 1);
        assert_eq!(meta.lines_of_code(), BTreeSet::from([1, 2]));
    }

    #[test]
    fn test_empty_range() {
        let provider = provider();
        let meta = provider.metadata(TextRange::from_positions(5, 0, 5, 0));
        assert!(meta.tokens().is_empty());
        assert!(meta.comments_inside().is_empty());
        assert!(meta.lines_of_code().is_empty());
    }

    #[test]
    fn test_keyword_lookup() {
        let provider = provider();
        let keyword = provider
            .keyword(TextRange::from_positions(1, 0, 1, 9))
            .unwrap();
        assert_eq!(keyword.text, "if");

        let none = provider.keyword(TextRange::from_positions(3, 0, 3, 1));
        assert!(matches!(none, Err(SlangError::KeywordNotFound { .. })));

        let many = provider.keyword(TextRange::from_positions(1, 0, 2, 6));
        assert!(matches!(many, Err(SlangError::AmbiguousKeyword { .. })));
    }

    #[test]
    fn test_all_elements_sorted() {
        let provider = provider();
        let starts: Vec<_> = provider.all_tokens().iter().map(|t| t.range.start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
        assert_eq!(provider.all_comments().len(), 1);
    }
}
