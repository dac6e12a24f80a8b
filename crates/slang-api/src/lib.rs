//! SLang API
//!
//! Language-agnostic syntax trees and the analyses built on them.
//!
//! Front ends for individual languages convert source text into one shared
//! tree model; every algorithm in this crate then works the same way for
//! all of them. The crate provides:
//!
//! - **Tree model**: the [`Tree`] sum type, node structs and [`NativeKind`]
//!   escape hatch for constructs without a dedicated variant
//! - **Metadata**: text ranges, tokens and comments of every node
//! - **Visitors**: ancestor-tracking, type-filtered depth-first traversal
//! - **Equivalence**: structural comparison and duplicate grouping
//! - **Cognitive complexity**: nesting-aware complexity score
//! - **Printer**: canonical text rendering of trees
//! - **Check API**: the context checks use to report issues
//!
//! # Example
//!
//! ```rust
//! use slang_api::{are_equivalent, IdentifierTree, Tree};
//!
//! let a: Tree = IdentifierTree::new(None, "x").into();
//! let b: Tree = IdentifierTree::new(None, "x").into();
//! assert!(are_equivalent(&a, &b));
//! ```

pub mod check;
pub mod complexity;
pub mod converter;
pub mod equivalence;
pub mod errors;
pub mod metadata;
pub mod text;
pub mod tree;
pub mod visitors;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use check::{CheckContext, IssueLocation, SecondaryLocation};
pub use complexity::{CognitiveComplexity, Increment};
pub use converter::AstConverter;
pub use equivalence::{
    are_all_equivalent, are_equivalent, are_equivalent_with, are_optional_equivalent,
    are_optional_lists_equivalent, find_duplicated_groups, tree_hash,
};
pub use errors::{SlangError, SlangResult};
pub use metadata::{TreeMetaData, TreeMetaDataProvider};
pub use text::{Comment, TextPointer, TextRange, Token, TokenType};
pub use tree::*;
pub use visitors::{tree_to_string, trees_to_string, HasTreeContext, TreeContext, TreeVisitor};
