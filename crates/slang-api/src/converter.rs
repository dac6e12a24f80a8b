use crate::errors::SlangResult;
use crate::tree::Tree;

/// Front end turning source text into a [`Tree`].
///
/// Implementations must be `Send + Sync` so one converter can serve
/// several analysis threads.
///
/// # Example
/// ```rust,ignore
/// use slang_api::{AstConverter, SlangResult, Tree};
///
/// struct MyConverter;
///
/// impl AstConverter for MyConverter {
///     fn parse(&self, content: &str) -> SlangResult<Tree> {
///         // Build the tree here
///         todo!()
///     }
/// }
/// ```
pub trait AstConverter: Send + Sync {
    /// Convert a whole source unit; fails with [`crate::SlangError::Parse`]
    fn parse(&self, content: &str) -> SlangResult<Tree>;

    /// Convert a source unit whose file name is known; the name is ignored by default
    fn parse_with_file(&self, content: &str, _file_name: &str) -> SlangResult<Tree> {
        self.parse(content)
    }
}
