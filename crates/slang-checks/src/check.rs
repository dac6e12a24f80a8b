use crate::context::CheckScanContext;
use slang_api::{TreeNode, TreeVisitor};

/// A rule run over syntax trees.
///
/// Checks register handlers for the node types they inspect; handlers
/// report issues through the [`CheckScanContext`] they receive.
pub trait SlangCheck: Send + Sync {
    /// Rule key, e.g. "S3776"
    fn key(&self) -> &'static str;

    /// Register the handlers of this check
    fn initialize<'a>(&self, init: &mut InitContext<'a>);
}

/// Registration surface handed to [`SlangCheck::initialize`]
pub struct InitContext<'a> {
    visitor: TreeVisitor<'a, CheckScanContext<'a>>,
    rule_key: &'static str,
}

impl<'a> InitContext<'a> {
    pub fn new() -> Self {
        Self {
            visitor: TreeVisitor::new(),
            rule_key: "",
        }
    }

    /// Register every handler of `check`
    pub fn add_check(&mut self, check: &dyn SlangCheck) -> &mut Self {
        self.rule_key = check.key();
        check.initialize(self);
        self
    }

    /// Register `handler` for nodes viewable as `T`, attributed to the
    /// check being initialized
    pub fn register<T, F>(&mut self, handler: F) -> &mut Self
    where
        T: TreeNode + ?Sized + 'a,
        F: Fn(&mut CheckScanContext<'a>, &'a T) + Send + Sync + 'a,
    {
        let rule_key = self.rule_key;
        self.visitor
            .register::<T, _>(move |ctx: &mut CheckScanContext<'a>, node: &'a T| {
                ctx.set_rule_key(rule_key);
                handler(ctx, node);
            });
        self
    }

    pub fn into_visitor(self) -> TreeVisitor<'a, CheckScanContext<'a>> {
        self.visitor
    }
}

impl<'a> Default for InitContext<'a> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slang_api::{CheckContext, IdentifierTree, IssueLocation, Tree};

    struct NamedIdentifierCheck;

    impl SlangCheck for NamedIdentifierCheck {
        fn key(&self) -> &'static str {
            "TEST"
        }

        fn initialize<'a>(&self, init: &mut InitContext<'a>) {
            init.register::<IdentifierTree, _>(|ctx, identifier| {
                ctx.report_simple(IssueLocation::File, identifier.name().to_string());
            });
        }
    }

    #[test]
    fn test_handlers_report_under_check_key() {
        let tree: Tree = IdentifierTree::new(None, "x").into();
        let mut init = InitContext::new();
        init.add_check(&NamedIdentifierCheck);
        let visitor = init.into_visitor();
        assert_eq!(visitor.handler_count(), 1);

        let mut ctx = CheckScanContext::new(None);
        visitor.scan(&mut ctx, &tree);
        let issues = ctx.into_issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule_key, "TEST");
        assert_eq!(issues[0].message, "x");
    }
}
