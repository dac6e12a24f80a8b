use crate::tree::Tree;

/// Ancestor tracking for one scan.
///
/// Holds the node being visited plus its strict ancestors. A context is
/// owned by exactly one scan at a time.
#[derive(Debug, Default)]
pub struct TreeContext<'a> {
    /// Outermost first
    ancestors: Vec<&'a Tree>,
    current: Option<&'a Tree>,
}

impl<'a> TreeContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset before scanning a new root
    pub fn before(&mut self, _root: &'a Tree) {
        self.ancestors.clear();
        self.current = None;
    }

    pub fn enter(&mut self, node: &'a Tree) {
        if let Some(previous) = self.current.take() {
            self.ancestors.push(previous);
        }
        self.current = Some(node);
    }

    pub fn leave(&mut self, _node: &'a Tree) {
        self.current = self.ancestors.pop();
    }

    pub fn after(&mut self, _root: &'a Tree) {}

    /// Strict ancestors of the current node, nearest first
    pub fn ancestors(&self) -> impl DoubleEndedIterator<Item = &'a Tree> + ExactSizeIterator + '_ {
        self.ancestors.iter().rev().copied()
    }

    /// Nearest ancestor of the current node
    pub fn parent(&self) -> Option<&'a Tree> {
        self.ancestors.last().copied()
    }

    pub fn current(&self) -> Option<&'a Tree> {
        self.current
    }

    /// Number of strict ancestors of the current node
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }
}

/// Scan state carrying a [`TreeContext`].
///
/// The lifecycle hooks default to the tree context's own; implementors
/// may extend them to reset their own state between scans.
pub trait HasTreeContext<'a> {
    fn tree_context(&self) -> &TreeContext<'a>;

    fn tree_context_mut(&mut self) -> &mut TreeContext<'a>;

    fn before(&mut self, root: &'a Tree) {
        self.tree_context_mut().before(root);
    }

    fn enter(&mut self, node: &'a Tree) {
        self.tree_context_mut().enter(node);
    }

    fn leave(&mut self, node: &'a Tree) {
        self.tree_context_mut().leave(node);
    }

    fn after(&mut self, root: &'a Tree) {
        self.tree_context_mut().after(root);
    }
}

impl<'a> HasTreeContext<'a> for TreeContext<'a> {
    fn tree_context(&self) -> &TreeContext<'a> {
        self
    }

    fn tree_context_mut(&mut self) -> &mut TreeContext<'a> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::IdentifierTree;

    #[test]
    fn test_enter_leave_balance() {
        let outer: Tree = IdentifierTree::new(None, "outer").into();
        let inner: Tree = IdentifierTree::new(None, "inner").into();
        let mut ctx = TreeContext::new();
        ctx.before(&outer);
        ctx.enter(&outer);
        assert_eq!(ctx.depth(), 0);
        assert!(ctx.parent().is_none());

        ctx.enter(&inner);
        assert_eq!(ctx.depth(), 1);
        assert!(std::ptr::eq(ctx.parent().unwrap(), &outer));
        assert!(std::ptr::eq(ctx.current().unwrap(), &inner));

        ctx.leave(&inner);
        assert!(std::ptr::eq(ctx.current().unwrap(), &outer));
        ctx.leave(&outer);
        assert!(ctx.current().is_none());
        assert_eq!(ctx.ancestors().len(), 0);
    }

    #[test]
    fn test_before_resets_state() {
        let tree: Tree = IdentifierTree::new(None, "x").into();
        let mut ctx = TreeContext::new();
        ctx.enter(&tree);
        ctx.enter(&tree);
        ctx.before(&tree);
        assert!(ctx.current().is_none());
        assert_eq!(ctx.depth(), 0);
    }
}
