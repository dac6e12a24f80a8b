//! Tree traversal: ancestor-tracking context, handler dispatch and printing.

mod context;
pub mod printer;
mod visitor;

pub use context::{HasTreeContext, TreeContext};
pub use printer::{tree_to_string, trees_to_string};
pub use visitor::TreeVisitor;
