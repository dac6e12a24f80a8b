//! Tests across the tree model, metadata and algorithms

use crate::*;

/// Tokens of `fun(x) { if (x) 1; }`, laid out on one line
fn provider() -> TreeMetaDataProvider {
    let spans = [
        (0, "fun", TokenType::Keyword),
        (3, "(", TokenType::Other),
        (4, "x", TokenType::Other),
        (5, ")", TokenType::Other),
        (7, "{", TokenType::Other),
        (9, "if", TokenType::Keyword),
        (12, "(", TokenType::Other),
        (13, "x", TokenType::Other),
        (14, ")", TokenType::Other),
        (16, "1", TokenType::Other),
        (17, ";", TokenType::Other),
        (19, "}", TokenType::Other),
    ];
    let tokens = spans
        .iter()
        .map(|(start, text, token_type)| {
            Token::new(
                TextRange::from_positions(1, *start, 1, start + text.len()),
                *text,
                *token_type,
            )
        })
        .collect();
    TreeMetaDataProvider::new(Vec::new(), tokens)
}

fn range(start: usize, end: usize) -> TextRange {
    TextRange::from_positions(1, start, 1, end)
}

fn anonymous_function(provider: &TreeMetaDataProvider) -> Tree {
    let if_keyword = provider.keyword(range(9, 18)).unwrap();
    let condition = IdentifierTree::new(Some(provider.metadata(range(13, 14))), "x");
    let if_tree = IfTree::new(
        Some(provider.metadata(range(9, 18))),
        condition,
        IntegerLiteralTree::new(Some(provider.metadata(range(16, 17))), "1"),
        None,
        if_keyword,
        None,
    );
    let body = BlockTree::new(Some(provider.metadata(range(7, 20))), vec![if_tree.into()]);
    let parameter = ParameterTree::new(
        Some(provider.metadata(range(4, 5))),
        IdentifierTree::new(Some(provider.metadata(range(4, 5))), "x"),
        None,
        None,
    );
    FunctionDeclarationTree::builder(Some(provider.metadata(range(0, 20))))
        .with_parameters(vec![parameter.into()])
        .with_body(body)
        .build()
        .into()
}

#[test]
fn test_metadata_of_nodes() {
    let provider = provider();
    let function = anonymous_function(&provider);

    let meta = function.metadata().unwrap();
    assert_eq!(meta.tokens().len(), 12);
    assert_eq!(meta.lines_of_code().len(), 1);

    let body = function.children().last().copied().unwrap();
    assert_eq!(body.kind(), TreeKind::Block);
    let texts: Vec<&str> = body
        .metadata()
        .unwrap()
        .tokens()
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(texts, vec!["{", "if", "(", "x", ")", "1", ";", "}"]);
}

#[test]
fn test_range_to_highlight_of_anonymous_function() {
    let provider = provider();
    let Tree::FunctionDeclaration(function) = anonymous_function(&provider) else {
        panic!("expected a function");
    };
    assert!(function.name().is_none());
    // everything before the body: `fun(x)`
    assert_eq!(function.range_to_highlight(), Some(range(0, 6)));
}

#[test]
fn test_complexity_increments_point_at_keywords() {
    let provider = provider();
    let function = anonymous_function(&provider);
    let complexity = CognitiveComplexity::new(&function);

    assert_eq!(complexity.value(), 1);
    let increment = &complexity.increments()[0];
    assert_eq!(increment.token().text, "if");
    assert_eq!(increment.token().range, range(9, 11));
    assert_eq!(increment.nesting_level(), 0);
}

#[test]
fn test_duplicate_groups_on_real_children() {
    let provider = provider();
    let function = anonymous_function(&provider);
    let identifiers: Vec<&Tree> = function
        .descendants()
        .filter(|t| t.kind() == TreeKind::Identifier)
        .collect();
    assert_eq!(identifiers.len(), 2);

    let groups = find_duplicated_groups(&identifiers);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn test_printer_output_of_function() {
    let provider = provider();
    let function = anonymous_function(&provider);
    assert_eq!(
        tree_to_string(&function),
        "FunctionDeclaration\n  Parameter\n    Identifier x\n  Block\n    If\n      Identifier x\n      IntegerLiteral 1\n"
    );
}
