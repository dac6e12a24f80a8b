use super::conditional::ConditionalStructure;
use crate::check::{InitContext, SlangCheck};
use slang_api::{CheckContext, IfTree, MatchTree, Tree};

const MESSAGE: &str =
    "Remove this conditional structure or edit its code blocks so that they're not all the same.";

/// Flags complete conditionals whose branches all do the same thing
#[derive(Debug, Clone, Copy, Default)]
pub struct AllBranchesIdenticalCheck;

impl SlangCheck for AllBranchesIdenticalCheck {
    fn key(&self) -> &'static str {
        "S3923"
    }

    fn initialize<'a>(&self, init: &mut InitContext<'a>) {
        init.register::<IfTree, _>(|ctx, tree| {
            if matches!(ctx.parent(), Some(Tree::If(_))) {
                return;
            }
            let conditional = ConditionalStructure::of_if(tree);
            if conditional.all_branches_present && conditional.all_branches_identical() {
                ctx.report_simple(tree.text_range().into(), MESSAGE.to_string());
            }
        })
        .register::<MatchTree, _>(|ctx, tree| {
            let conditional = ConditionalStructure::of_match(tree);
            if conditional.all_branches_present && conditional.all_branches_identical() {
                ctx.report_simple(tree.text_range().into(), MESSAGE.to_string());
            }
        });
    }
}
