//! SLang test-language front end
//!
//! Converts sources of the small SLang language into the language-agnostic
//! trees of `slang-api`. It is the reference converter used to exercise the
//! tree algorithms and checks against real source text.
//!
//! # Features
//!
//! - **Lexer**: `logos`-based tokenizer keeping comments with their positions
//! - **Parser**: recursive descent covering functions, classes, variables,
//!   conditionals, loops, matches, exception handling and native constructs
//! - **Metadata**: every node carries its range, tokens and comments
//! - **Metrics**: conversions attempted, failed and time spent
//!
//! # Example
//!
//! ```rust
//! use slang_api::{AstConverter, CognitiveComplexity};
//! use slang_parser::SlangConverter;
//!
//! let converter = SlangConverter::new();
//! let tree = converter.parse("if (x) { a; } else { b; }").unwrap();
//! assert_eq!(CognitiveComplexity::new(&tree).value(), 2);
//! ```

pub mod config;
pub mod errors;
pub mod lexer;
pub mod metrics;
pub mod native_kind;
mod parser;
mod parser_impl;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use config::ParserConfig;
pub use errors::{ParseError, Result};
pub use lexer::{tokenize, LexedSource, Lexeme, TokenKind};
pub use metrics::ParserMetrics;
pub use native_kind::SlangNativeKind;
pub use parser_impl::SlangConverter;
