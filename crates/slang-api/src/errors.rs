use crate::text::TextRange;
use thiserror::Error;

/// Errors raised while building, converting or inspecting syntax trees
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlangError {
    /// Source text could not be converted into a tree
    #[error("{message} at position {line}:{column}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    /// A node was built with data violating its contract
    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    /// No mapping exists for a tree or native kind
    #[error("Unsupported kind: {kind}")]
    UnsupportedKind { kind: String },

    /// No keyword token inside the given range
    #[error("Cannot find any keyword in {range}")]
    KeywordNotFound { range: TextRange },

    /// More than one keyword token inside the given range
    #[error("Cannot determine the keyword in {range}, several keywords found")]
    AmbiguousKeyword { range: TextRange },
}

impl SlangError {
    /// Create a parse error at a 1-based line and 0-based column
    pub fn parse(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create an invariant violation error
    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Self::InvalidTree(message.into())
    }

    /// Create an unsupported kind error
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedKind { kind: kind.into() }
    }

    /// Position of a parse error, if this is one
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::Parse { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

/// Result type for tree operations
pub type SlangResult<T> = Result<T, SlangError>;
