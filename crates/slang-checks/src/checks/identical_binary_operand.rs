use crate::check::{InitContext, SlangCheck};
use slang_api::{are_equivalent, BinaryExpressionTree, BinaryOperator, CheckContext, SecondaryLocation};

/// Flags binary expressions with the same operand on both sides
#[derive(Debug, Clone, Copy, Default)]
pub struct IdenticalBinaryOperandCheck;

impl SlangCheck for IdenticalBinaryOperandCheck {
    fn key(&self) -> &'static str {
        "S1764"
    }

    fn initialize<'a>(&self, init: &mut InitContext<'a>) {
        init.register::<BinaryExpressionTree, _>(|ctx, tree| {
            if matches!(tree.operator(), BinaryOperator::Plus | BinaryOperator::Times) {
                return;
            }
            let left = tree.left_operand();
            let right = tree.right_operand();
            if are_equivalent(left.skip_parentheses(), right.skip_parentheses()) {
                ctx.report_with_secondary(
                    right.into(),
                    "Correct one of the identical sub-expressions on both sides this operator"
                        .to_string(),
                    SecondaryLocation::of_tree(left, None),
                );
            }
        });
    }
}
