//! Cognitive complexity of a tree.
//!
//! Every control-flow construct adds `1 + nesting` to the score, where the
//! nesting counts the enclosing conditionals, loops, matches, catches and
//! nested functions. Sequences of the same short-circuit operator count once.

use crate::text::Token;
use crate::tree::{BinaryExpressionTree, CatchTree, IfTree, LoopTree, MatchTree, Tree};
use crate::visitors::{HasTreeContext, TreeContext, TreeVisitor};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One contribution to the score, located at a keyword or operator token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Increment {
    token: Token,
    nesting_level: u32,
}

impl Increment {
    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn nesting_level(&self) -> u32 {
        self.nesting_level
    }

    /// What this increment adds to the score
    pub fn weight(&self) -> u32 {
        self.nesting_level + 1
    }
}

/// Score and justifying increments for one root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CognitiveComplexity {
    increments: Vec<Increment>,
}

struct ComplexityContext<'a> {
    tree_context: TreeContext<'a>,
    increments: Vec<Increment>,
    /// Logical operators already counted as part of an enclosing chain
    consumed: HashSet<*const Token>,
}

impl<'a> HasTreeContext<'a> for ComplexityContext<'a> {
    fn tree_context(&self) -> &TreeContext<'a> {
        &self.tree_context
    }

    fn tree_context_mut(&mut self) -> &mut TreeContext<'a> {
        &mut self.tree_context
    }
}

impl<'a> ComplexityContext<'a> {
    fn increment_with_nesting(&mut self, token: &Token) {
        let nesting_level = self.nesting_level();
        self.increment(token, nesting_level);
    }

    fn increment_without_nesting(&mut self, token: &Token) {
        self.increment(token, 0);
    }

    fn increment(&mut self, token: &Token, nesting_level: u32) {
        self.increments.push(Increment {
            token: token.clone(),
            nesting_level,
        });
    }

    /// Nesting of the current node, computed from the outermost ancestor inward
    fn nesting_level(&self) -> u32 {
        let mut nesting = 0;
        let mut inside_function = false;
        for ancestor in self.tree_context.ancestors().rev() {
            match ancestor {
                Tree::FunctionDeclaration(_) => {
                    if inside_function || nesting > 0 {
                        nesting += 1;
                    }
                    inside_function = true;
                }
                Tree::If(_) | Tree::Match(_) | Tree::Loop(_) | Tree::Catch(_) => nesting += 1,
                Tree::ClassDeclaration(_) => {
                    nesting = 0;
                    inside_function = false;
                }
                _ => {}
            }
        }
        nesting
    }

    fn on_if(&mut self, tree: &'a IfTree) {
        let is_else_if = matches!(
            self.tree_context.parent(),
            Some(Tree::If(parent))
                if matches!(parent.else_branch(), Some(Tree::If(else_if)) if std::ptr::eq(else_if, tree))
        );
        if !is_else_if {
            self.increment_with_nesting(tree.if_keyword());
        }
        if let Some(else_keyword) = tree.else_keyword() {
            self.increment_without_nesting(else_keyword);
        }
    }

    fn on_binary(&mut self, tree: &'a BinaryExpressionTree) {
        if !tree.operator().is_logical() || self.consumed.contains(&ptr_of(tree.operator_token())) {
            return;
        }
        let mut operators = Vec::new();
        flatten_operators(tree, &mut operators);

        let mut previous: Option<&Token> = None;
        for token in operators {
            if previous.map_or(true, |previous| previous.text != token.text) {
                self.increment_without_nesting(token);
            }
            previous = Some(token);
            self.consumed.insert(ptr_of(token));
        }
    }
}

fn ptr_of(token: &Token) -> *const Token {
    token
}

/// Operator tokens of a logical chain, left to right
fn flatten_operators<'t>(tree: &'t BinaryExpressionTree, operators: &mut Vec<&'t Token>) {
    if let Tree::Binary(left) = tree.left_operand() {
        if left.operator().is_logical() {
            flatten_operators(left, operators);
        }
    }
    operators.push(tree.operator_token());
    if let Tree::Binary(right) = tree.right_operand() {
        if right.operator().is_logical() {
            flatten_operators(right, operators);
        }
    }
}

impl CognitiveComplexity {
    pub fn new(root: &Tree) -> Self {
        let mut visitor: TreeVisitor<ComplexityContext> = TreeVisitor::new();
        visitor
            .register::<LoopTree, _>(|ctx, tree| ctx.increment_with_nesting(tree.keyword()))
            .register::<MatchTree, _>(|ctx, tree| ctx.increment_with_nesting(tree.keyword()))
            .register::<CatchTree, _>(|ctx, tree| ctx.increment_with_nesting(tree.keyword()))
            .register::<IfTree, _>(|ctx, tree| ctx.on_if(tree))
            .register::<BinaryExpressionTree, _>(|ctx, tree| ctx.on_binary(tree));

        let mut ctx = ComplexityContext {
            tree_context: TreeContext::new(),
            increments: Vec::new(),
            consumed: HashSet::new(),
        };
        visitor.scan(&mut ctx, root);

        let complexity = Self {
            increments: ctx.increments,
        };
        debug!(
            "cognitive complexity of {}: {} from {} increment(s)",
            root.kind(),
            complexity.value(),
            complexity.increments.len()
        );
        complexity
    }

    pub fn value(&self) -> u32 {
        self.increments.iter().map(Increment::weight).sum()
    }

    pub fn increments(&self) -> &[Increment] {
        &self.increments
    }

    pub fn exceeds_threshold(&self, threshold: u32) -> bool {
        self.value() > threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{TextRange, TokenType};
    use crate::tree::{
        BinaryOperator, BlockTree, ClassDeclarationTree, FunctionDeclarationTree, IdentifierTree,
        LoopKind, NativeTree, StringNativeKind,
    };
    use std::sync::Arc;

    fn keyword(text: &str, column: usize) -> Token {
        Token::new(
            TextRange::from_positions(1, column, 1, column + text.len()),
            text,
            TokenType::Keyword,
        )
    }

    fn operator(op: BinaryOperator, column: usize) -> Token {
        Token::new(
            TextRange::from_positions(1, column, 1, column + 2),
            op.symbol(),
            TokenType::Other,
        )
    }

    fn id(name: &str) -> Tree {
        IdentifierTree::new(None, name).into()
    }

    fn logical(op: BinaryOperator, column: usize, left: Tree, right: Tree) -> Tree {
        BinaryExpressionTree::new(None, op, operator(op, column), left, right).into()
    }

    fn if_tree(condition: Tree, then: Tree, else_branch: Option<Tree>) -> Tree {
        let else_keyword = else_branch.as_ref().map(|_| keyword("else", 20));
        IfTree::new(None, condition, then, else_branch, keyword("if", 0), else_keyword).into()
    }

    fn block(statements: Vec<Tree>) -> Tree {
        BlockTree::new(None, statements).into()
    }

    fn function(statements: Vec<Tree>) -> Tree {
        FunctionDeclarationTree::builder(None)
            .with_name(IdentifierTree::new(None, "foo"))
            .with_body(BlockTree::new(None, statements))
            .build()
            .into()
    }

    #[test]
    fn test_no_increment() {
        let complexity = CognitiveComplexity::new(&id("x"));
        assert_eq!(complexity.value(), 0);
        assert!(complexity.increments().is_empty());
    }

    #[test]
    fn test_if_else_chain() {
        let single = if_tree(id("x"), block(vec![]), None);
        assert_eq!(CognitiveComplexity::new(&single).value(), 1);

        let with_else = if_tree(id("x"), block(vec![]), Some(block(vec![])));
        assert_eq!(CognitiveComplexity::new(&with_else).value(), 2);

        let else_if = if_tree(
            id("x"),
            block(vec![]),
            Some(if_tree(id("y"), block(vec![]), None)),
        );
        assert_eq!(CognitiveComplexity::new(&else_if).value(), 2);

        let else_if_else = if_tree(
            id("x"),
            block(vec![]),
            Some(if_tree(id("y"), block(vec![]), Some(block(vec![])))),
        );
        let complexity = CognitiveComplexity::new(&else_if_else);
        assert_eq!(complexity.value(), 3);
        let texts: Vec<&str> = complexity
            .increments()
            .iter()
            .map(|i| i.token().text.as_str())
            .collect();
        assert_eq!(texts, vec!["if", "else", "else"]);
    }

    #[test]
    fn test_logical_operator_sequences() {
        use BinaryOperator::{ConditionalAnd as And, ConditionalOr as Or};

        let a_and_b = logical(And, 2, id("a"), id("b"));
        assert_eq!(CognitiveComplexity::new(&a_and_b).value(), 1);

        let a_and_b_and_c = logical(And, 7, logical(And, 2, id("a"), id("b")), id("c"));
        assert_eq!(CognitiveComplexity::new(&a_and_b_and_c).value(), 1);

        // a || (b && c), as the && binds tighter
        let a_or_b_and_c = logical(Or, 2, id("a"), logical(And, 7, id("b"), id("c")));
        assert_eq!(CognitiveComplexity::new(&a_or_b_and_c).value(), 2);

        // (a || (b && c)) || d
        let mixed = logical(
            Or,
            12,
            logical(Or, 2, id("a"), logical(And, 7, id("b"), id("c"))),
            id("d"),
        );
        assert_eq!(CognitiveComplexity::new(&mixed).value(), 3);

        let not_logical: Tree = BinaryExpressionTree::new(
            None,
            BinaryOperator::EqualTo,
            operator(BinaryOperator::EqualTo, 2),
            id("a"),
            id("b"),
        )
        .into();
        assert_eq!(CognitiveComplexity::new(&not_logical).value(), 0);
    }

    #[test]
    fn test_nesting_increments() {
        let inner_if = if_tree(id("y"), id("z"), None);
        let loop_tree: Tree = LoopTree::new(
            None,
            Some(id("x")),
            inner_if,
            LoopKind::While,
            keyword("while", 0),
        )
        .into();
        let complexity = CognitiveComplexity::new(&loop_tree);
        assert_eq!(complexity.value(), 3);
        let nesting: Vec<u32> = complexity
            .increments()
            .iter()
            .map(Increment::nesting_level)
            .collect();
        assert_eq!(nesting, vec![0, 1]);
    }

    #[test]
    fn test_nested_functions() {
        let top_level_function = function(vec![if_tree(id("x"), id("a"), None)]);
        assert_eq!(CognitiveComplexity::new(&top_level_function).value(), 1);

        let nested = function(vec![function(vec![if_tree(id("x"), id("a"), None)])]);
        assert_eq!(CognitiveComplexity::new(&nested).value(), 2);

        let both = function(vec![
            if_tree(id("x"), id("a"), None),
            function(vec![if_tree(id("y"), id("b"), None)]),
        ]);
        assert_eq!(CognitiveComplexity::new(&both).value(), 3);
    }

    #[test]
    fn test_class_resets_nesting() {
        let class_body: Tree = NativeTree::new(
            None,
            Arc::new(StringNativeKind::new("class")),
            vec![function(vec![if_tree(id("x"), id("a"), None)])],
        )
        .into();
        let class: Tree = ClassDeclarationTree::new(None, None, class_body)
            .unwrap()
            .into();
        let outer = if_tree(id("c"), class, None);
        // outer if counts 1, the if in the class method restarts at nesting 0
        assert_eq!(CognitiveComplexity::new(&outer).value(), 2);
    }

    #[test]
    fn test_threshold() {
        let tree = if_tree(id("x"), block(vec![]), Some(block(vec![])));
        let complexity = CognitiveComplexity::new(&tree);
        assert!(complexity.exceeds_threshold(1));
        assert!(!complexity.exceeds_threshold(2));
    }
}
