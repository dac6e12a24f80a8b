//! Operator and keyword-kind enumerations carried by tree nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operators of binary expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    ConditionalAnd,
    ConditionalOr,
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    Plus,
    Minus,
    Times,
    Divided,
    Remainder,
}

impl BinaryOperator {
    /// Canonical upper-case name, used by the printer
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConditionalAnd => "CONDITIONAL_AND",
            Self::ConditionalOr => "CONDITIONAL_OR",
            Self::EqualTo => "EQUAL_TO",
            Self::NotEqualTo => "NOT_EQUAL_TO",
            Self::GreaterThan => "GREATER_THAN",
            Self::GreaterThanOrEqualTo => "GREATER_THAN_OR_EQUAL_TO",
            Self::LessThan => "LESS_THAN",
            Self::LessThanOrEqualTo => "LESS_THAN_OR_EQUAL_TO",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Times => "TIMES",
            Self::Divided => "DIVIDED_BY",
            Self::Remainder => "REMAINDER",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::ConditionalAnd => "&&",
            Self::ConditionalOr => "||",
            Self::EqualTo => "==",
            Self::NotEqualTo => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqualTo => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqualTo => "<=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Divided => "/",
            Self::Remainder => "%",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "&&" => Self::ConditionalAnd,
            "||" => Self::ConditionalOr,
            "==" => Self::EqualTo,
            "!=" => Self::NotEqualTo,
            ">" => Self::GreaterThan,
            ">=" => Self::GreaterThanOrEqualTo,
            "<" => Self::LessThan,
            "<=" => Self::LessThanOrEqualTo,
            "+" => Self::Plus,
            "-" => Self::Minus,
            "*" => Self::Times,
            "/" => Self::Divided,
            "%" => Self::Remainder,
            _ => return None,
        };
        Some(op)
    }

    /// Short-circuit AND / OR
    pub fn is_logical(&self) -> bool {
        matches!(self, Self::ConditionalAnd | Self::ConditionalOr)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    Negate,
    Minus,
    Plus,
    Increment,
    Decrement,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negate => "NEGATE",
            Self::Minus => "MINUS",
            Self::Plus => "PLUS",
            Self::Increment => "INCREMENT",
            Self::Decrement => "DECREMENT",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentOperator {
    Equal,
    PlusEqual,
    MinusEqual,
    TimesEqual,
    RemainderEqual,
}

impl AssignmentOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::PlusEqual => "PLUS_EQUAL",
            Self::MinusEqual => "MINUS_EQUAL",
            Self::TimesEqual => "TIMES_EQUAL",
            Self::RemainderEqual => "REMAINDER_EQUAL",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "=" => Self::Equal,
            "+=" => Self::PlusEqual,
            "-=" => Self::MinusEqual,
            "*=" => Self::TimesEqual,
            "%=" => Self::RemainderEqual,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for AssignmentOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    Public,
    Private,
    Override,
}

impl ModifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Override => "OVERRIDE",
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoopKind {
    For,
    While,
    DoWhile,
}

impl LoopKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::For => "FOR",
            Self::While => "WHILE",
            Self::DoWhile => "DOWHILE",
        }
    }
}

impl fmt::Display for LoopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JumpKind {
    Break,
    Continue,
}

impl JumpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Break => "BREAK",
            Self::Continue => "CONTINUE",
        }
    }
}

impl fmt::Display for JumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
