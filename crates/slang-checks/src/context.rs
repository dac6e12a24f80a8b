//! Scan state shared by the handlers of all checks.

use crate::issue::Issue;
use log::trace;
use slang_api::{
    CheckContext, HasTreeContext, IssueLocation, SecondaryLocation, Tree, TreeContext,
};

/// Context of one scan over one file.
///
/// Tracks ancestors through its [`TreeContext`] and collects the issues
/// reported by handlers, each attributed to the rule whose handler is
/// running.
#[derive(Debug, Default)]
pub struct CheckScanContext<'a> {
    tree_context: TreeContext<'a>,
    filename: Option<String>,
    rule_key: &'static str,
    issues: Vec<Issue>,
}

impl<'a> CheckScanContext<'a> {
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(str::to_string),
            ..Default::default()
        }
    }

    /// Attribute subsequent reports to `rule_key`
    pub(crate) fn set_rule_key(&mut self, rule_key: &'static str) {
        self.rule_key = rule_key;
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

impl<'a> HasTreeContext<'a> for CheckScanContext<'a> {
    fn tree_context(&self) -> &TreeContext<'a> {
        &self.tree_context
    }

    fn tree_context_mut(&mut self) -> &mut TreeContext<'a> {
        &mut self.tree_context
    }
}

impl<'a> CheckContext<'a> for CheckScanContext<'a> {
    fn ancestors(&self) -> Vec<&'a Tree> {
        self.tree_context.ancestors().collect()
    }

    fn parent(&self) -> Option<&'a Tree> {
        self.tree_context.parent()
    }

    fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    fn report_issue(
        &mut self,
        location: IssueLocation,
        message: String,
        secondaries: Vec<SecondaryLocation>,
        gap: Option<f64>,
    ) {
        trace!("{} reported at {:?}: {}", self.rule_key, location, message);
        self.issues.push(Issue {
            rule_key: self.rule_key.to_string(),
            location,
            message,
            secondaries,
            gap,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slang_api::{IdentifierTree, TextRange};

    #[test]
    fn test_reports_carry_rule_key() {
        let mut ctx = CheckScanContext::new(Some("file.slang"));
        ctx.set_rule_key("S1764");
        let range = TextRange::from_positions(1, 0, 1, 1);
        ctx.report_simple(range.into(), "first".to_string());
        ctx.set_rule_key("S1862");
        ctx.report_with_secondary(
            IssueLocation::File,
            "second".to_string(),
            Some(SecondaryLocation::with_message(range, "Original")),
        );

        assert_eq!(ctx.filename(), Some("file.slang"));
        let issues = ctx.into_issues();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].rule_key, "S1764");
        assert!(issues[0].secondaries.is_empty());
        assert_eq!(issues[1].rule_key, "S1862");
        assert_eq!(issues[1].secondaries.len(), 1);
    }

    #[test]
    fn test_parent_and_ancestors() {
        let outer: Tree = IdentifierTree::new(None, "outer").into();
        let inner: Tree = IdentifierTree::new(None, "inner").into();
        let mut ctx = CheckScanContext::new(None);
        ctx.enter(&outer);
        ctx.enter(&inner);
        assert!(std::ptr::eq(ctx.parent().unwrap(), &outer));
        assert_eq!(ctx.ancestors().len(), 1);
        assert!(ctx.filename().is_none());
    }
}
