use slang_api::{SlangError, TextPointer};
use thiserror::Error;

/// Result type alias for front end operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors raised while lexing or parsing SLang sources
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Malformed input at a known position
    #[error("{message} at position {line}:{column}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// Source exceeds the configured size limit
    #[error("Source exceeds maximum size limit of {max_size} bytes (actual: {actual_size} bytes)")]
    SourceTooLarge { max_size: usize, actual_size: usize },

    /// Parsed constructs violate a tree invariant
    #[error(transparent)]
    Tree(#[from] SlangError),
}

impl ParseError {
    /// Create a syntax error at a source position
    pub fn syntax(message: impl Into<String>, at: TextPointer) -> Self {
        ParseError::Syntax {
            message: message.into(),
            line: at.line,
            column: at.line_offset,
        }
    }

    /// A required token is absent before `found`
    pub fn missing(expected: &str, found: &str, at: TextPointer) -> Self {
        Self::syntax(format!("missing '{expected}' before '{found}'"), at)
    }

    /// `found` cannot start or continue the construct being parsed
    pub fn unexpected(found: &str, at: TextPointer) -> Self {
        Self::syntax(format!("unexpected token '{found}'"), at)
    }

    /// Create a SourceTooLarge error
    pub fn source_too_large(max_size: usize, actual_size: usize) -> Self {
        ParseError::SourceTooLarge {
            max_size,
            actual_size,
        }
    }
}

impl From<ParseError> for SlangError {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::Syntax {
                message,
                line,
                column,
            } => SlangError::parse(message, line, column),
            too_large @ ParseError::SourceTooLarge { .. } => {
                SlangError::parse(too_large.to_string(), 1, 0)
            }
            ParseError::Tree(error) => error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message() {
        let error = ParseError::missing(";", "<EOF>", TextPointer::new(1, 5));
        assert_eq!(error.to_string(), "missing ';' before '<EOF>' at position 1:5");

        let converted = SlangError::from(error);
        assert_eq!(converted.position(), Some((1, 5)));
        assert_eq!(
            converted.to_string(),
            "missing ';' before '<EOF>' at position 1:5"
        );
    }

    #[test]
    fn test_tree_errors_pass_through() {
        let error = ParseError::from(SlangError::invalid_tree("bad"));
        assert_eq!(SlangError::from(error), SlangError::invalid_tree("bad"));
    }

    #[test]
    fn test_source_too_large() {
        let error = ParseError::source_too_large(10, 20);
        assert!(error.to_string().contains("10 bytes"));
        assert_eq!(SlangError::from(error).position(), Some((1, 0)));
    }
}
