use super::conditional::{starts_chain, ConditionalStructure};
use crate::check::{InitContext, SlangCheck};
use crate::context::CheckScanContext;
use slang_api::{find_duplicated_groups, CheckContext, IfTree, MatchTree, SecondaryLocation, Tree};

/// Flags branches of a conditional that repeat an earlier branch's code
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateBranchCheck;

impl SlangCheck for DuplicateBranchCheck {
    fn key(&self) -> &'static str {
        "S1871"
    }

    fn initialize<'a>(&self, init: &mut InitContext<'a>) {
        init.register::<IfTree, _>(|ctx, tree| {
            if starts_chain(ctx.parent(), tree) {
                check_structure(ctx, ConditionalStructure::of_if(tree));
            }
        })
        .register::<MatchTree, _>(|ctx, tree| {
            check_structure(ctx, ConditionalStructure::of_match(tree));
        });
    }
}

fn check_structure(ctx: &mut CheckScanContext<'_>, conditional: ConditionalStructure<'_>) {
    // fully identical structures are reported by S3923
    if conditional.all_branches_present && conditional.all_branches_identical() {
        return;
    }
    for group in find_duplicated_groups(&conditional.present_branches()) {
        let Some(original_range) = group[0].text_range() else {
            continue;
        };
        for duplicated in group.iter().skip(1).filter(|b| spans_multiple_lines(b)) {
            ctx.report_with_secondary(
                (*duplicated).into(),
                format!(
                    "This branch's code block is the same as the block for the branch on line {}.",
                    original_range.start.line
                ),
                Some(SecondaryLocation::with_message(original_range, "Original")),
            );
        }
    }
}

/// Blocks count from their first statement to their last one
fn spans_multiple_lines(tree: &Tree) -> bool {
    if let Tree::Block(block) = tree {
        let statements = block.statement_or_expressions();
        let (Some(first), Some(last)) = (statements.first(), statements.last()) else {
            return false;
        };
        return match (first.text_range(), last.text_range()) {
            (Some(first), Some(last)) => first.start.line != last.end.line,
            _ => false,
        };
    }
    tree.text_range()
        .is_some_and(|range| range.start.line < range.end.line)
}
