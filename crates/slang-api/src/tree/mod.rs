//! The unified syntax tree.
//!
//! [`Tree`] is a closed sum type over the well-known node roles plus a
//! [`Tree::Native`] escape hatch for constructs a language has that the
//! common model does not represent.

mod kind;
pub mod native;
mod nodes;
pub mod operators;

pub use kind::TreeKind;
pub use native::{NativeKind, StringNativeKind};
pub use nodes::*;
pub use operators::{
    AssignmentOperator, BinaryOperator, JumpKind, LoopKind, ModifierKind, UnaryOperator,
};

use crate::metadata::TreeMetaData;
use crate::text::TextRange;

/// A node of the syntax tree
#[derive(Debug, Clone)]
pub enum Tree {
    Identifier(IdentifierTree),
    Literal(LiteralTree),
    IntegerLiteral(IntegerLiteralTree),
    StringLiteral(StringLiteralTree),
    Binary(BinaryExpressionTree),
    Unary(UnaryExpressionTree),
    Assignment(AssignmentExpressionTree),
    Parenthesized(ParenthesizedExpressionTree),
    If(IfTree),
    Loop(LoopTree),
    Match(MatchTree),
    MatchCase(MatchCaseTree),
    ExceptionHandling(ExceptionHandlingTree),
    Catch(CatchTree),
    FunctionDeclaration(FunctionDeclarationTree),
    ClassDeclaration(ClassDeclarationTree),
    Block(BlockTree),
    VariableDeclaration(VariableDeclarationTree),
    Parameter(ParameterTree),
    Modifier(ModifierTree),
    MemberSelect(MemberSelectTree),
    FunctionInvocation(FunctionInvocationTree),
    Return(ReturnTree),
    Jump(JumpTree),
    Throw(ThrowTree),
    TopLevel(TopLevelTree),
    Native(NativeTree),
}

/// Dispatch a method call to the node struct of every variant.
macro_rules! each_node {
    ($tree:expr, $node:ident => $body:expr) => {
        match $tree {
            Tree::Identifier($node) => $body,
            Tree::Literal($node) => $body,
            Tree::IntegerLiteral($node) => $body,
            Tree::StringLiteral($node) => $body,
            Tree::Binary($node) => $body,
            Tree::Unary($node) => $body,
            Tree::Assignment($node) => $body,
            Tree::Parenthesized($node) => $body,
            Tree::If($node) => $body,
            Tree::Loop($node) => $body,
            Tree::Match($node) => $body,
            Tree::MatchCase($node) => $body,
            Tree::ExceptionHandling($node) => $body,
            Tree::Catch($node) => $body,
            Tree::FunctionDeclaration($node) => $body,
            Tree::ClassDeclaration($node) => $body,
            Tree::Block($node) => $body,
            Tree::VariableDeclaration($node) => $body,
            Tree::Parameter($node) => $body,
            Tree::Modifier($node) => $body,
            Tree::MemberSelect($node) => $body,
            Tree::FunctionInvocation($node) => $body,
            Tree::Return($node) => $body,
            Tree::Jump($node) => $body,
            Tree::Throw($node) => $body,
            Tree::TopLevel($node) => $body,
            Tree::Native($node) => $body,
        }
    };
}

impl Tree {
    pub fn kind(&self) -> TreeKind {
        match self {
            Tree::Identifier(_) => TreeKind::Identifier,
            Tree::Literal(_) => TreeKind::Literal,
            Tree::IntegerLiteral(_) => TreeKind::IntegerLiteral,
            Tree::StringLiteral(_) => TreeKind::StringLiteral,
            Tree::Binary(_) => TreeKind::BinaryExpression,
            Tree::Unary(_) => TreeKind::UnaryExpression,
            Tree::Assignment(_) => TreeKind::AssignmentExpression,
            Tree::Parenthesized(_) => TreeKind::ParenthesizedExpression,
            Tree::If(_) => TreeKind::If,
            Tree::Loop(_) => TreeKind::Loop,
            Tree::Match(_) => TreeKind::Match,
            Tree::MatchCase(_) => TreeKind::MatchCase,
            Tree::ExceptionHandling(_) => TreeKind::ExceptionHandling,
            Tree::Catch(_) => TreeKind::Catch,
            Tree::FunctionDeclaration(_) => TreeKind::FunctionDeclaration,
            Tree::ClassDeclaration(_) => TreeKind::ClassDeclaration,
            Tree::Block(_) => TreeKind::Block,
            Tree::VariableDeclaration(_) => TreeKind::VariableDeclaration,
            Tree::Parameter(_) => TreeKind::Parameter,
            Tree::Modifier(_) => TreeKind::Modifier,
            Tree::MemberSelect(_) => TreeKind::MemberSelect,
            Tree::FunctionInvocation(_) => TreeKind::FunctionInvocation,
            Tree::Return(_) => TreeKind::Return,
            Tree::Jump(_) => TreeKind::Jump,
            Tree::Throw(_) => TreeKind::Throw,
            Tree::TopLevel(_) => TreeKind::TopLevel,
            Tree::Native(_) => TreeKind::Native,
        }
    }

    /// Direct children in significant order; absent optional children are omitted
    pub fn children(&self) -> Vec<&Tree> {
        each_node!(self, node => node.children())
    }

    /// `None` for synthetic nodes built without source information
    pub fn metadata(&self) -> Option<&TreeMetaData> {
        each_node!(self, node => node.metadata())
    }

    pub fn text_range(&self) -> Option<TextRange> {
        self.metadata().map(TreeMetaData::text_range)
    }

    /// Every node below this one, in pre-order
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack = self.children();
        stack.reverse();
        Descendants { stack }
    }

    /// Any of the three literal variants
    pub fn as_literal(&self) -> Option<&(dyn Literal + 'static)> {
        match self {
            Tree::Literal(literal) => Some(literal),
            Tree::IntegerLiteral(literal) => Some(literal),
            Tree::StringLiteral(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&IdentifierTree> {
        IdentifierTree::cast(self)
    }

    /// Binary expression with a short-circuit operator
    pub fn is_logical_binary(&self) -> bool {
        matches!(self, Tree::Binary(binary) if binary.operator().is_logical())
    }

    /// Strip any number of enclosing parentheses
    pub fn skip_parentheses(&self) -> &Tree {
        let mut tree = self;
        while let Tree::Parenthesized(parenthesized) = tree {
            tree = parenthesized.expression();
        }
        tree
    }
}

/// Pre-order iterator over the descendants of a node
pub struct Descendants<'a> {
    stack: Vec<&'a Tree>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Tree;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.stack.pop()?;
        self.stack.extend(tree.children().into_iter().rev());
        Some(tree)
    }
}

/// Types a [`Tree`] can be viewed as.
///
/// Implemented by `Tree` itself (every node), by each node struct (its own
/// variant) and by `dyn Literal` (all literal variants). Visitor handlers
/// are registered against these types.
pub trait TreeNode {
    fn cast(tree: &Tree) -> Option<&Self>;
}

impl TreeNode for Tree {
    fn cast(tree: &Tree) -> Option<&Self> {
        Some(tree)
    }
}

impl TreeNode for dyn Literal {
    fn cast(tree: &Tree) -> Option<&Self> {
        tree.as_literal()
    }
}

macro_rules! node_variants {
    ($($variant:ident => $node:ty),+ $(,)?) => {
        $(
            impl TreeNode for $node {
                fn cast(tree: &Tree) -> Option<&Self> {
                    match tree {
                        Tree::$variant(node) => Some(node),
                        _ => None,
                    }
                }
            }

            impl From<$node> for Tree {
                fn from(node: $node) -> Self {
                    Tree::$variant(node)
                }
            }
        )+
    };
}

node_variants!(
    Identifier => IdentifierTree,
    Literal => LiteralTree,
    IntegerLiteral => IntegerLiteralTree,
    StringLiteral => StringLiteralTree,
    Binary => BinaryExpressionTree,
    Unary => UnaryExpressionTree,
    Assignment => AssignmentExpressionTree,
    Parenthesized => ParenthesizedExpressionTree,
    If => IfTree,
    Loop => LoopTree,
    Match => MatchTree,
    MatchCase => MatchCaseTree,
    ExceptionHandling => ExceptionHandlingTree,
    Catch => CatchTree,
    FunctionDeclaration => FunctionDeclarationTree,
    ClassDeclaration => ClassDeclarationTree,
    Block => BlockTree,
    VariableDeclaration => VariableDeclarationTree,
    Parameter => ParameterTree,
    Modifier => ModifierTree,
    MemberSelect => MemberSelectTree,
    FunctionInvocation => FunctionInvocationTree,
    Return => ReturnTree,
    Jump => JumpTree,
    Throw => ThrowTree,
    TopLevel => TopLevelTree,
    Native => NativeTree,
);
