use super::context::HasTreeContext;
use crate::tree::{Tree, TreeNode};
use log::trace;

type Handler<'a, C> = Box<dyn Fn(&mut C, &'a Tree) + Send + Sync + 'a>;

/// Depth-first, pre-order dispatcher of type-filtered handlers.
///
/// Handlers fire in registration order when a node is entered, after the
/// ancestor stack was updated and before its children are visited. Once
/// configured, a visitor is read-only and can be shared by scans running
/// on different threads, each with its own context.
pub struct TreeVisitor<'a, C> {
    consumers: Vec<Handler<'a, C>>,
}

impl<'a, C> Default for TreeVisitor<'a, C> {
    fn default() -> Self {
        Self {
            consumers: Vec::new(),
        }
    }
}

impl<'a, C: HasTreeContext<'a> + 'a> TreeVisitor<'a, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every node viewable as `T`.
    ///
    /// `register::<Tree, _>` matches all nodes and `register::<dyn Literal, _>`
    /// matches every literal variant.
    pub fn register<T, F>(&mut self, handler: F) -> &mut Self
    where
        T: TreeNode + ?Sized + 'a,
        F: Fn(&mut C, &'a T) + Send + Sync + 'a,
    {
        self.consumers.push(Box::new(move |ctx: &mut C, tree: &'a Tree| {
            if let Some(node) = T::cast(tree) {
                handler(ctx, node);
            }
        }));
        self
    }

    pub fn handler_count(&self) -> usize {
        self.consumers.len()
    }

    pub fn scan(&self, ctx: &mut C, root: &'a Tree) {
        trace!(
            "scanning {} with {} handler(s)",
            root.kind(),
            self.consumers.len()
        );
        ctx.before(root);
        self.visit(ctx, root);
        ctx.after(root);
    }

    fn visit(&self, ctx: &mut C, node: &'a Tree) {
        ctx.enter(node);
        for consumer in &self.consumers {
            consumer(ctx, node);
        }
        for child in node.children() {
            self.visit(ctx, child);
        }
        ctx.leave(node);
    }
}
