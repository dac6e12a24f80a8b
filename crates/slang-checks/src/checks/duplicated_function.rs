use crate::check::{InitContext, SlangCheck};
use crate::context::CheckScanContext;
use slang_api::{
    are_all_equivalent, are_optional_equivalent, CheckContext, FunctionDeclarationTree,
    IssueLocation, SecondaryLocation, Tree, TreeNode,
};
use std::collections::HashSet;

const MINIMUM_STATEMENTS_COUNT: usize = 2;

/// Flags functions whose implementation repeats an earlier function's
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicatedFunctionImplementationCheck;

impl SlangCheck for DuplicatedFunctionImplementationCheck {
    fn key(&self) -> &'static str {
        "S4144"
    }

    fn initialize<'a>(&self, init: &mut InitContext<'a>) {
        init.register::<Tree, _>(|ctx, tree| {
            if !matches!(tree, Tree::TopLevel(_)) {
                return;
            }
            let functions: Vec<&FunctionDeclarationTree> = tree
                .descendants()
                .filter_map(FunctionDeclarationTree::cast)
                .collect();
            check(ctx, &functions);
        });
    }
}

fn check(ctx: &mut CheckScanContext<'_>, functions: &[&FunctionDeclarationTree]) {
    let mut reported: HashSet<usize> = HashSet::new();
    for (i, original) in functions.iter().enumerate() {
        for (j, candidate) in functions.iter().enumerate().skip(i + 1) {
            if reported.contains(&j)
                || !has_minimum_statements(candidate)
                || !are_duplicated_implementations(original, candidate)
            {
                continue;
            }
            report_duplicate(ctx, original, candidate);
            reported.insert(j);
        }
    }
}

fn has_minimum_statements(function: &FunctionDeclarationTree) -> bool {
    function
        .body()
        .is_some_and(|body| body.statement_or_expressions().len() >= MINIMUM_STATEMENTS_COUNT)
}

fn are_duplicated_implementations(
    original: &FunctionDeclarationTree,
    candidate: &FunctionDeclarationTree,
) -> bool {
    are_all_equivalent(
        original.formal_parameters(),
        candidate.formal_parameters(),
        false,
    ) && are_optional_equivalent(original.body_tree(), candidate.body_tree(), true)
}

fn report_duplicate(
    ctx: &mut CheckScanContext<'_>,
    original: &FunctionDeclarationTree,
    duplicate: &FunctionDeclarationTree,
) {
    let Some(original_range) = original.text_range() else {
        return;
    };
    let line = original_range.start.line;
    let (message, secondary_range) = match original.name() {
        Some(name) => (
            format!(
                "Update this function so that its implementation is not identical to \"{}\" on line {}.",
                name.name(),
                line
            ),
            name.text_range(),
        ),
        None => (
            format!(
                "Update this function so that its implementation is not identical to the one on line {}.",
                line
            ),
            Some(original_range),
        ),
    };
    let secondary = secondary_range
        .map(|range| SecondaryLocation::with_message(range, "original implementation"));
    let location = match duplicate.name() {
        Some(name) => IssueLocation::from(name),
        None => duplicate.text_range().into(),
    };
    ctx.report_with_secondary(location, message, secondary);
}
