//! Conversion tests over whole sources

use crate::*;
use pretty_assertions::assert_eq;
use slang_api::{tree_to_string, AstConverter, TextRange, Tree, TreeKind};

fn parse(source: &str) -> Tree {
    SlangConverter::new().parse(source).unwrap()
}

#[test]
fn test_top_level_structure() {
    let tree = parse("fun foo() {}\nclass A {}\nvar x = 1;");
    let kinds: Vec<TreeKind> = tree.children().iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            TreeKind::FunctionDeclaration,
            TreeKind::ClassDeclaration,
            TreeKind::VariableDeclaration
        ]
    );
}

#[test]
fn test_printed_function() {
    let tree = parse("fun foo(p1) {\n  x = p1 + 1;\n}");
    assert_eq!(
        tree_to_string(&tree),
        "TopLevel\n\
         \x20 FunctionDeclaration\n\
         \x20   Identifier foo\n\
         \x20   Parameter\n\
         \x20     Identifier p1\n\
         \x20   Block\n\
         \x20     AssignmentExpression EQUAL\n\
         \x20       Identifier x\n\
         \x20       BinaryExpression PLUS\n\
         \x20         Identifier p1\n\
         \x20         IntegerLiteral 1\n"
    );
}

#[test]
fn test_comments_in_top_level_and_metadata() {
    let tree = parse("// header\nfun foo() {\n  /* inner */ x;\n}");
    let Tree::TopLevel(top_level) = &tree else {
        panic!("expected a top-level tree");
    };
    assert_eq!(top_level.all_comments().len(), 2);
    assert_eq!(
        tree.text_range(),
        Some(TextRange::from_positions(1, 0, 4, 1))
    );

    let function = &top_level.declarations()[0];
    let comments = function.metadata().unwrap().comments_inside();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, " inner ");
}

#[test]
fn test_leading_block_comment() {
    let tree = parse("/* c */ x;");
    let Tree::TopLevel(top_level) = &tree else {
        panic!("expected a top-level tree");
    };
    assert_eq!(top_level.all_comments().len(), 1);
    assert_eq!(top_level.all_comments()[0].text, "/* c */");
    assert_eq!(top_level.declarations().len(), 1);
}

#[test]
fn test_keyword_tokens_in_metadata() {
    let tree = parse("if (x) { y; } else { z; }");
    let keywords: Vec<String> = tree
        .metadata()
        .unwrap()
        .tokens()
        .iter()
        .filter(|t| t.is_keyword())
        .map(|t| t.text.clone())
        .collect();
    assert_eq!(keywords, vec!["if", "else"]);
}

#[test]
fn test_lines_of_code() {
    let tree = parse("x;\n\n// comment\ny;\n");
    let lines: Vec<usize> = tree
        .metadata()
        .unwrap()
        .lines_of_code()
        .into_iter()
        .collect();
    assert_eq!(lines, vec![1, 4]);
}

#[test]
fn test_anonymous_function_highlight() {
    let tree = parse("f = fun(a) { a; };");
    let function = tree
        .descendants()
        .find_map(|t| match t {
            Tree::FunctionDeclaration(function) => Some(function),
            _ => None,
        })
        .unwrap();
    assert!(function.name().is_none());
    assert_eq!(
        function.range_to_highlight(),
        Some(TextRange::from_positions(1, 4, 1, 10))
    );
}

#[test]
fn test_string_literal_content() {
    let tree = parse("s = \"abc\";");
    let literal = tree
        .descendants()
        .find_map(|t| match t {
            Tree::StringLiteral(literal) => Some(literal),
            _ => None,
        })
        .unwrap();
    assert_eq!(literal.value(), "\"abc\"");
    assert_eq!(literal.content(), "abc");
}
