use serde::{Deserialize, Serialize};
use std::fmt;

/// Grammar rule a native node was built from
pub const NATIVE_EXPRESSION: &str = "NativeExpression";
pub const CLASS_DECLARATION: &str = "ClassDeclaration";

/// Native kind of the SLang front end: the rule plus the values that
/// tell apart two constructs of the same rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlangNativeKind {
    pub rule: String,
    pub differentiators: Vec<String>,
}

impl SlangNativeKind {
    pub fn new(rule: impl Into<String>, differentiators: Vec<String>) -> Self {
        Self {
            rule: rule.into(),
            differentiators,
        }
    }

    pub fn of_rule(rule: impl Into<String>) -> Self {
        Self::new(rule, Vec::new())
    }
}

impl fmt::Display for SlangNativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.rule, self.differentiators.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slang_api::NativeKind;
    use std::sync::Arc;

    #[test]
    fn test_display() {
        let kind = SlangNativeKind::new(NATIVE_EXPRESSION, vec!["a".into(), "b".into()]);
        assert_eq!(kind.to_string(), "NativeExpression[a, b]");
        assert_eq!(
            SlangNativeKind::of_rule(CLASS_DECLARATION).to_string(),
            "ClassDeclaration[]"
        );
    }

    #[test]
    fn test_differentiators_take_part_in_equality() {
        let a: Arc<dyn NativeKind> = Arc::new(SlangNativeKind::new("R", vec!["x".into()]));
        let b: Arc<dyn NativeKind> = Arc::new(SlangNativeKind::new("R", vec!["x".into()]));
        let c: Arc<dyn NativeKind> = Arc::new(SlangNativeKind::new("R", vec!["y".into()]));
        assert!(*a == *b);
        assert!(*a != *c);
    }
}
