use crate::errors::SlangError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable tag of every node variant.
///
/// The tag is what the printer writes at the start of each line and what
/// external serializers use as a type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TreeKind {
    Identifier,
    Literal,
    IntegerLiteral,
    StringLiteral,
    BinaryExpression,
    UnaryExpression,
    AssignmentExpression,
    ParenthesizedExpression,
    If,
    Loop,
    Match,
    MatchCase,
    ExceptionHandling,
    Catch,
    FunctionDeclaration,
    ClassDeclaration,
    Block,
    VariableDeclaration,
    Parameter,
    Modifier,
    MemberSelect,
    FunctionInvocation,
    Return,
    Jump,
    Throw,
    TopLevel,
    Native,
}

impl TreeKind {
    pub const ALL: [TreeKind; 27] = [
        Self::Identifier,
        Self::Literal,
        Self::IntegerLiteral,
        Self::StringLiteral,
        Self::BinaryExpression,
        Self::UnaryExpression,
        Self::AssignmentExpression,
        Self::ParenthesizedExpression,
        Self::If,
        Self::Loop,
        Self::Match,
        Self::MatchCase,
        Self::ExceptionHandling,
        Self::Catch,
        Self::FunctionDeclaration,
        Self::ClassDeclaration,
        Self::Block,
        Self::VariableDeclaration,
        Self::Parameter,
        Self::Modifier,
        Self::MemberSelect,
        Self::FunctionInvocation,
        Self::Return,
        Self::Jump,
        Self::Throw,
        Self::TopLevel,
        Self::Native,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identifier => "Identifier",
            Self::Literal => "Literal",
            Self::IntegerLiteral => "IntegerLiteral",
            Self::StringLiteral => "StringLiteral",
            Self::BinaryExpression => "BinaryExpression",
            Self::UnaryExpression => "UnaryExpression",
            Self::AssignmentExpression => "AssignmentExpression",
            Self::ParenthesizedExpression => "ParenthesizedExpression",
            Self::If => "If",
            Self::Loop => "Loop",
            Self::Match => "Match",
            Self::MatchCase => "MatchCase",
            Self::ExceptionHandling => "ExceptionHandling",
            Self::Catch => "Catch",
            Self::FunctionDeclaration => "FunctionDeclaration",
            Self::ClassDeclaration => "ClassDeclaration",
            Self::Block => "Block",
            Self::VariableDeclaration => "VariableDeclaration",
            Self::Parameter => "Parameter",
            Self::Modifier => "Modifier",
            Self::MemberSelect => "MemberSelect",
            Self::FunctionInvocation => "FunctionInvocation",
            Self::Return => "Return",
            Self::Jump => "Jump",
            Self::Throw => "Throw",
            Self::TopLevel => "TopLevel",
            Self::Native => "Native",
        }
    }

    /// Literal-like kinds, all matched by a literal handler
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::Literal | Self::IntegerLiteral | Self::StringLiteral
        )
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TreeKind {
    type Err = SlangError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SlangError::unsupported_kind(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for kind in TreeKind::ALL {
            assert_eq!(kind.as_str().parse::<TreeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_tag() {
        let err = "Lambda".parse::<TreeKind>().unwrap_err();
        assert_eq!(err, SlangError::unsupported_kind("Lambda"));
    }

    #[test]
    fn test_serde_uses_tag() {
        let json = serde_json::to_string(&TreeKind::FunctionDeclaration).unwrap();
        assert_eq!(json, "\"FunctionDeclaration\"");
        let kind: TreeKind = serde_json::from_str("\"MatchCase\"").unwrap();
        assert_eq!(kind, TreeKind::MatchCase);
    }
}
