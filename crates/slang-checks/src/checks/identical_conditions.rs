use crate::check::{InitContext, SlangCheck};
use crate::context::CheckScanContext;
use slang_api::{find_duplicated_groups, CheckContext, IfTree, MatchTree, SecondaryLocation, Tree};

/// Flags conditions repeated within one if-else-if chain or match
#[derive(Debug, Clone, Copy, Default)]
pub struct IdenticalConditionsCheck;

impl SlangCheck for IdenticalConditionsCheck {
    fn key(&self) -> &'static str {
        "S1862"
    }

    fn initialize<'a>(&self, init: &mut InitContext<'a>) {
        init.register::<MatchTree, _>(|ctx, tree| {
            let conditions: Vec<&Tree> = tree
                .cases()
                .filter_map(|case| case.expression())
                .map(Tree::skip_parentheses)
                .collect();
            check_conditions(ctx, &conditions);
        })
        .register::<IfTree, _>(|ctx, tree| {
            if !matches!(ctx.parent(), Some(Tree::If(_))) {
                check_conditions(ctx, &chain_conditions(tree));
            }
        });
    }
}

fn chain_conditions(tree: &IfTree) -> Vec<&Tree> {
    let mut conditions = vec![tree.condition().skip_parentheses()];
    let mut else_branch = tree.else_branch();
    while let Some(Tree::If(else_if)) = else_branch {
        conditions.push(else_if.condition().skip_parentheses());
        else_branch = else_if.else_branch();
    }
    conditions
}

fn check_conditions(ctx: &mut CheckScanContext<'_>, conditions: &[&Tree]) {
    for group in find_duplicated_groups(conditions) {
        let Some(original_range) = group[0].text_range() else {
            continue;
        };
        for duplicated in group.iter().skip(1) {
            ctx.report_with_secondary(
                (*duplicated).into(),
                format!(
                    "This condition duplicates the one on line {}.",
                    original_range.start.line
                ),
                Some(SecondaryLocation::with_message(original_range, "Original")),
            );
        }
    }
}
