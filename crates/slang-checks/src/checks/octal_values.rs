use crate::check::{InitContext, SlangCheck};
use slang_api::{CheckContext, IntegerLiteralTree};

const MESSAGE: &str = "Use decimal values instead of octal ones.";

/// Digit count of the file permission masks written in octal, like `0755`
const FILE_PERMISSION_MASK_LENGTH: usize = 3;

/// Flags octal integer literals
#[derive(Debug, Clone, Copy, Default)]
pub struct OctalValuesCheck;

impl SlangCheck for OctalValuesCheck {
    fn key(&self) -> &'static str {
        "S1314"
    }

    fn initialize<'a>(&self, init: &mut InitContext<'a>) {
        init.register::<IntegerLiteralTree, _>(|ctx, literal| {
            if literal.is_octal() && !is_exception(literal) {
                ctx.report_simple(literal.text_range().into(), MESSAGE.to_string());
            }
        });
    }
}

/// Single octal digits and permission masks are allowed
fn is_exception(literal: &IntegerLiteralTree) -> bool {
    literal.integer_value().is_some_and(|value| value < 8)
        || literal.numeric_part().len() == FILE_PERMISSION_MASK_LENGTH
}
