//! Canonical text rendering of trees.
//!
//! One line per node: two spaces per ancestor, the node's kind tag and the
//! value that discriminates it from other nodes of the same kind. The
//! output is deterministic and is used as the hashing key of duplicate
//! detection, so every property compared by syntactic equivalence shows up
//! in it.

use super::context::{HasTreeContext, TreeContext};
use super::visitor::TreeVisitor;
use crate::tree::Tree;
use std::fmt::Write;

const INDENT: &str = "  ";

struct PrinterContext<'a> {
    tree_context: TreeContext<'a>,
    output: String,
}

impl<'a> HasTreeContext<'a> for PrinterContext<'a> {
    fn tree_context(&self) -> &TreeContext<'a> {
        &self.tree_context
    }

    fn tree_context_mut(&mut self) -> &mut TreeContext<'a> {
        &mut self.tree_context
    }
}

/// Render one tree, each line terminated by `\n`
pub fn tree_to_string(tree: &Tree) -> String {
    let mut visitor: TreeVisitor<PrinterContext> = TreeVisitor::new();
    visitor.register::<Tree, _>(|ctx, node| {
        let depth = ctx.tree_context.depth();
        ctx.output.push_str(&INDENT.repeat(depth));
        ctx.output.push_str(node.kind().as_str());
        if let Some(discriminator) = discriminator(node) {
            // Writing to a String cannot fail
            let _ = write!(ctx.output, " {}", escape(&discriminator));
        }
        ctx.output.push('\n');
    });

    let mut ctx = PrinterContext {
        tree_context: TreeContext::new(),
        output: String::new(),
    };
    visitor.scan(&mut ctx, tree);
    ctx.output
}

/// Render several trees separated by an empty line
pub fn trees_to_string<'t, I>(trees: I) -> String
where
    I: IntoIterator<Item = &'t Tree>,
{
    trees
        .into_iter()
        .map(tree_to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keep one node per line: literal values may span several source lines
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn discriminator(tree: &Tree) -> Option<String> {
    let value = match tree {
        Tree::Binary(binary) => binary.operator().to_string(),
        Tree::Unary(unary) => unary.operator().to_string(),
        Tree::Assignment(assignment) => assignment.operator().to_string(),
        Tree::Literal(literal) => literal.value().to_string(),
        Tree::IntegerLiteral(literal) => literal.value().to_string(),
        Tree::StringLiteral(literal) => literal.value().to_string(),
        Tree::Identifier(identifier) => identifier.name().to_string(),
        Tree::Native(native) => native.native_kind().to_string(),
        Tree::VariableDeclaration(declaration) => declaration.identifier().name().to_string(),
        Tree::Modifier(modifier) => modifier.kind().to_string(),
        Tree::Loop(loop_tree) => loop_tree.kind().to_string(),
        Tree::Jump(jump) => jump.kind().to_string(),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{TextRange, Token, TokenType};
    use crate::tree::{
        AssignmentExpressionTree, AssignmentOperator, BinaryExpressionTree, BinaryOperator,
        BlockTree, FunctionDeclarationTree, IdentifierTree, IntegerLiteralTree, ModifierKind,
        ModifierTree, NativeTree, StringLiteralTree, StringNativeKind,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn assignment() -> Tree {
        let plus = Token::new(TextRange::from_positions(1, 10, 1, 11), "+", TokenType::Other);
        AssignmentExpressionTree::new(
            None,
            AssignmentOperator::Equal,
            IdentifierTree::new(None, "x1"),
            BinaryExpressionTree::new(
                None,
                BinaryOperator::Plus,
                plus,
                IdentifierTree::new(None, "var1"),
                IntegerLiteralTree::new(None, "42"),
            ),
        )
        .into()
    }

    fn private_function() -> Tree {
        FunctionDeclarationTree::builder(None)
            .with_modifiers(vec![ModifierTree::new(None, ModifierKind::Private).into()])
            .build()
            .into()
    }

    #[test]
    fn test_single_tree() {
        assert_eq!(
            tree_to_string(&assignment()),
            "AssignmentExpression EQUAL\n\
             \x20 Identifier x1\n\
             \x20 BinaryExpression PLUS\n\
             \x20   Identifier var1\n\
             \x20   IntegerLiteral 42\n"
        );
    }

    #[test]
    fn test_several_trees() {
        let trees = [assignment(), private_function()];
        let expected = "AssignmentExpression EQUAL\n  Identifier x1\n  BinaryExpression PLUS\n    Identifier var1\n    IntegerLiteral 42\n\nFunctionDeclaration\n  Modifier PRIVATE\n";
        assert_eq!(trees_to_string(&trees), expected);
    }

    #[test]
    fn test_native_kind_and_block() {
        let native: Tree = NativeTree::new(
            None,
            Arc::new(StringNativeKind::new("Rule[a]")),
            vec![BlockTree::new(None, Vec::new()).into()],
        )
        .into();
        assert_eq!(tree_to_string(&native), "Native Rule[a]\n  Block\n");
    }

    #[test]
    fn test_multiline_literal_stays_on_one_line() {
        let raw_newline: Tree = StringLiteralTree::new(None, "\"a\n  Identifier b\"")
            .unwrap()
            .into();
        assert_eq!(
            tree_to_string(&raw_newline),
            "StringLiteral \"a\\n  Identifier b\"\n"
        );

        let escaped_newline: Tree = StringLiteralTree::new(None, r#""a\n  Identifier b""#)
            .unwrap()
            .into();
        assert_eq!(
            tree_to_string(&escaped_newline),
            r#"StringLiteral "a\\n  Identifier b""#.to_string() + "\n"
        );
        assert_ne!(tree_to_string(&raw_newline), tree_to_string(&escaped_newline));
    }

    #[test]
    fn test_rendering_is_stable() {
        let tree = assignment();
        assert_eq!(tree_to_string(&tree), tree_to_string(&tree));
        assert_eq!(trees_to_string(std::iter::empty::<&Tree>()), "");
    }
}
