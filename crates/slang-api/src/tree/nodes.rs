//! Node structs wrapped by the [`Tree`] variants.
//!
//! Children are stored as boxed [`Tree`] values so that traversal can hand
//! out plain `&Tree` references. Constructors take typed arguments where a
//! child must be a specific variant (an identifier, a block, a match case)
//! and the typed accessors below rely on that.

use super::native::NativeKind;
use super::operators::{
    AssignmentOperator, BinaryOperator, JumpKind, LoopKind, ModifierKind, UnaryOperator,
};
use super::{Tree, TreeNode};
use crate::errors::{SlangError, SlangResult};
use crate::metadata::TreeMetaData;
use crate::text::{Comment, TextRange, Token};
use std::sync::Arc;

macro_rules! impl_metadata {
    ($($node:ty),+ $(,)?) => {
        $(
            impl $node {
                pub fn metadata(&self) -> Option<&TreeMetaData> {
                    self.meta.as_ref()
                }

                pub fn text_range(&self) -> Option<TextRange> {
                    self.meta.as_ref().map(TreeMetaData::text_range)
                }
            }
        )+
    };
}

impl_metadata!(
    IdentifierTree,
    LiteralTree,
    IntegerLiteralTree,
    StringLiteralTree,
    BinaryExpressionTree,
    UnaryExpressionTree,
    AssignmentExpressionTree,
    ParenthesizedExpressionTree,
    IfTree,
    LoopTree,
    MatchTree,
    MatchCaseTree,
    ExceptionHandlingTree,
    CatchTree,
    FunctionDeclarationTree,
    ClassDeclarationTree,
    BlockTree,
    VariableDeclarationTree,
    ParameterTree,
    ModifierTree,
    MemberSelectTree,
    FunctionInvocationTree,
    ReturnTree,
    JumpTree,
    ThrowTree,
    TopLevelTree,
    NativeTree,
);

/// Downcast a child whose variant was fixed by a typed constructor.
fn typed<T: TreeNode>(tree: &Tree) -> &T {
    match T::cast(tree) {
        Some(node) => node,
        None => unreachable!("child of kind {} stored under a typed slot", tree.kind()),
    }
}

fn boxed(tree: impl Into<Tree>) -> Box<Tree> {
    Box::new(tree.into())
}

#[derive(Debug, Clone)]
pub struct IdentifierTree {
    meta: Option<TreeMetaData>,
    name: String,
}

impl IdentifierTree {
    pub fn new(meta: Option<TreeMetaData>, name: impl Into<String>) -> Self {
        Self {
            meta,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> Vec<&Tree> {
        Vec::new()
    }
}

/// Textual value of any literal node
pub trait Literal: std::fmt::Debug {
    fn value(&self) -> &str;

    fn metadata(&self) -> Option<&TreeMetaData>;
}

#[derive(Debug, Clone)]
pub struct LiteralTree {
    meta: Option<TreeMetaData>,
    value: String,
}

impl LiteralTree {
    pub fn new(meta: Option<TreeMetaData>, value: impl Into<String>) -> Self {
        Self {
            meta,
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn children(&self) -> Vec<&Tree> {
        Vec::new()
    }
}

/// Numeric base of an integer literal, detected from its prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerRadix {
    Decimal,
    Hexadecimal,
    Octal,
    Binary,
}

impl IntegerRadix {
    pub fn value(&self) -> u32 {
        match self {
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
            Self::Octal => 8,
            Self::Binary => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntegerLiteralTree {
    meta: Option<TreeMetaData>,
    value: String,
}

impl IntegerLiteralTree {
    pub fn new(meta: Option<TreeMetaData>, value: impl Into<String>) -> Self {
        Self {
            meta,
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn radix(&self) -> IntegerRadix {
        self.split_prefix().0
    }

    /// `0o17` and `017` are octal, `0`, `0x..`, `0b..` and `0d..` are not
    pub fn is_octal(&self) -> bool {
        self.radix() == IntegerRadix::Octal
    }

    /// Digits after the radix prefix: `777` for `0777`, `1F` for `0x1F`
    pub fn numeric_part(&self) -> &str {
        self.split_prefix().1
    }

    /// Numeric value, `None` when the digits do not fit or are malformed
    pub fn integer_value(&self) -> Option<u128> {
        let (radix, digits) = self.split_prefix();
        let digits: String = digits.chars().filter(|c| *c != '_').collect();
        u128::from_str_radix(&digits, radix.value()).ok()
    }

    fn split_prefix(&self) -> (IntegerRadix, &str) {
        let value = self.value.as_str();
        let prefixed = |lower: &str, upper: &str| {
            value
                .strip_prefix(lower)
                .or_else(|| value.strip_prefix(upper))
        };
        if let Some(rest) = prefixed("0x", "0X") {
            (IntegerRadix::Hexadecimal, rest)
        } else if let Some(rest) = prefixed("0b", "0B") {
            (IntegerRadix::Binary, rest)
        } else if let Some(rest) = prefixed("0o", "0O") {
            (IntegerRadix::Octal, rest)
        } else if let Some(rest) = prefixed("0d", "0D") {
            (IntegerRadix::Decimal, rest)
        } else if value.len() > 1 && value.starts_with('0') {
            (IntegerRadix::Octal, &value[1..])
        } else {
            (IntegerRadix::Decimal, value)
        }
    }

    pub fn children(&self) -> Vec<&Tree> {
        Vec::new()
    }
}

#[derive(Debug, Clone)]
pub struct StringLiteralTree {
    meta: Option<TreeMetaData>,
    value: String,
    content: String,
}

impl StringLiteralTree {
    /// Build from a double-quoted raw value; the content is the text between quotes
    pub fn new(meta: Option<TreeMetaData>, value: impl Into<String>) -> SlangResult<Self> {
        let value = value.into();
        if value.len() < 2 || !value.starts_with('"') || !value.ends_with('"') {
            return Err(SlangError::invalid_tree(format!(
                "Invalid string format: {value}"
            )));
        }
        let content = value[1..value.len() - 1].to_string();
        Ok(Self {
            meta,
            value,
            content,
        })
    }

    /// Build with a content decoded by the front end
    pub fn with_content(
        meta: Option<TreeMetaData>,
        value: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            meta,
            value: value.into(),
            content: content.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn children(&self) -> Vec<&Tree> {
        Vec::new()
    }
}

impl Literal for LiteralTree {
    fn value(&self) -> &str {
        &self.value
    }

    fn metadata(&self) -> Option<&TreeMetaData> {
        self.meta.as_ref()
    }
}

impl Literal for IntegerLiteralTree {
    fn value(&self) -> &str {
        &self.value
    }

    fn metadata(&self) -> Option<&TreeMetaData> {
        self.meta.as_ref()
    }
}

impl Literal for StringLiteralTree {
    fn value(&self) -> &str {
        &self.value
    }

    fn metadata(&self) -> Option<&TreeMetaData> {
        self.meta.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct BinaryExpressionTree {
    meta: Option<TreeMetaData>,
    operator: BinaryOperator,
    operator_token: Token,
    left: Box<Tree>,
    right: Box<Tree>,
}

impl BinaryExpressionTree {
    pub fn new(
        meta: Option<TreeMetaData>,
        operator: BinaryOperator,
        operator_token: Token,
        left: impl Into<Tree>,
        right: impl Into<Tree>,
    ) -> Self {
        Self {
            meta,
            operator,
            operator_token,
            left: boxed(left),
            right: boxed(right),
        }
    }

    pub fn operator(&self) -> BinaryOperator {
        self.operator
    }

    pub fn operator_token(&self) -> &Token {
        &self.operator_token
    }

    pub fn left_operand(&self) -> &Tree {
        &self.left
    }

    pub fn right_operand(&self) -> &Tree {
        &self.right
    }

    pub fn children(&self) -> Vec<&Tree> {
        vec![self.left.as_ref(), self.right.as_ref()]
    }
}

#[derive(Debug, Clone)]
pub struct UnaryExpressionTree {
    meta: Option<TreeMetaData>,
    operator: UnaryOperator,
    operand: Box<Tree>,
}

impl UnaryExpressionTree {
    pub fn new(meta: Option<TreeMetaData>, operator: UnaryOperator, operand: impl Into<Tree>) -> Self {
        Self {
            meta,
            operator,
            operand: boxed(operand),
        }
    }

    pub fn operator(&self) -> UnaryOperator {
        self.operator
    }

    pub fn operand(&self) -> &Tree {
        &self.operand
    }

    pub fn children(&self) -> Vec<&Tree> {
        vec![self.operand.as_ref()]
    }
}

#[derive(Debug, Clone)]
pub struct AssignmentExpressionTree {
    meta: Option<TreeMetaData>,
    operator: AssignmentOperator,
    left: Box<Tree>,
    value: Box<Tree>,
}

impl AssignmentExpressionTree {
    pub fn new(
        meta: Option<TreeMetaData>,
        operator: AssignmentOperator,
        left: impl Into<Tree>,
        value: impl Into<Tree>,
    ) -> Self {
        Self {
            meta,
            operator,
            left: boxed(left),
            value: boxed(value),
        }
    }

    pub fn operator(&self) -> AssignmentOperator {
        self.operator
    }

    pub fn left_hand_side(&self) -> &Tree {
        &self.left
    }

    pub fn value(&self) -> &Tree {
        &self.value
    }

    pub fn children(&self) -> Vec<&Tree> {
        vec![self.left.as_ref(), self.value.as_ref()]
    }
}

#[derive(Debug, Clone)]
pub struct ParenthesizedExpressionTree {
    meta: Option<TreeMetaData>,
    expression: Box<Tree>,
}

impl ParenthesizedExpressionTree {
    pub fn new(meta: Option<TreeMetaData>, expression: impl Into<Tree>) -> Self {
        Self {
            meta,
            expression: boxed(expression),
        }
    }

    pub fn expression(&self) -> &Tree {
        &self.expression
    }

    pub fn children(&self) -> Vec<&Tree> {
        vec![self.expression.as_ref()]
    }
}

#[derive(Debug, Clone)]
pub struct IfTree {
    meta: Option<TreeMetaData>,
    condition: Box<Tree>,
    then_branch: Box<Tree>,
    else_branch: Option<Box<Tree>>,
    if_keyword: Token,
    else_keyword: Option<Token>,
}

impl IfTree {
    pub fn new(
        meta: Option<TreeMetaData>,
        condition: impl Into<Tree>,
        then_branch: impl Into<Tree>,
        else_branch: Option<Tree>,
        if_keyword: Token,
        else_keyword: Option<Token>,
    ) -> Self {
        Self {
            meta,
            condition: boxed(condition),
            then_branch: boxed(then_branch),
            else_branch: else_branch.map(Box::new),
            if_keyword,
            else_keyword,
        }
    }

    pub fn condition(&self) -> &Tree {
        &self.condition
    }

    pub fn then_branch(&self) -> &Tree {
        &self.then_branch
    }

    pub fn else_branch(&self) -> Option<&Tree> {
        self.else_branch.as_deref()
    }

    pub fn if_keyword(&self) -> &Token {
        &self.if_keyword
    }

    pub fn else_keyword(&self) -> Option<&Token> {
        self.else_keyword.as_ref()
    }

    pub fn children(&self) -> Vec<&Tree> {
        let mut children = vec![self.condition.as_ref(), self.then_branch.as_ref()];
        children.extend(self.else_branch.as_deref());
        children
    }
}

#[derive(Debug, Clone)]
pub struct LoopTree {
    meta: Option<TreeMetaData>,
    condition: Option<Box<Tree>>,
    body: Box<Tree>,
    kind: LoopKind,
    keyword: Token,
}

impl LoopTree {
    pub fn new(
        meta: Option<TreeMetaData>,
        condition: Option<Tree>,
        body: impl Into<Tree>,
        kind: LoopKind,
        keyword: Token,
    ) -> Self {
        Self {
            meta,
            condition: condition.map(Box::new),
            body: boxed(body),
            kind,
            keyword,
        }
    }

    pub fn condition(&self) -> Option<&Tree> {
        self.condition.as_deref()
    }

    pub fn body(&self) -> &Tree {
        &self.body
    }

    pub fn kind(&self) -> LoopKind {
        self.kind
    }

    pub fn keyword(&self) -> &Token {
        &self.keyword
    }

    pub fn children(&self) -> Vec<&Tree> {
        let mut children: Vec<&Tree> = self.condition.as_deref().into_iter().collect();
        children.push(&self.body);
        children
    }
}

#[derive(Debug, Clone)]
pub struct MatchTree {
    meta: Option<TreeMetaData>,
    expression: Option<Box<Tree>>,
    cases: Vec<Tree>,
    keyword: Token,
}

impl MatchTree {
    pub fn new(
        meta: Option<TreeMetaData>,
        expression: Option<Tree>,
        cases: Vec<MatchCaseTree>,
        keyword: Token,
    ) -> Self {
        Self {
            meta,
            expression: expression.map(Box::new),
            cases: cases.into_iter().map(Tree::MatchCase).collect(),
            keyword,
        }
    }

    pub fn expression(&self) -> Option<&Tree> {
        self.expression.as_deref()
    }

    pub fn cases(&self) -> impl Iterator<Item = &MatchCaseTree> + '_ {
        self.cases.iter().map(typed::<MatchCaseTree>)
    }

    /// Cases as generic trees, in source order
    pub fn case_trees(&self) -> &[Tree] {
        &self.cases
    }

    pub fn keyword(&self) -> &Token {
        &self.keyword
    }

    pub fn children(&self) -> Vec<&Tree> {
        let mut children: Vec<&Tree> = self.expression.as_deref().into_iter().collect();
        children.extend(self.cases.iter());
        children
    }
}

/// One arm of a match; a case without expression is the default arm
#[derive(Debug, Clone)]
pub struct MatchCaseTree {
    meta: Option<TreeMetaData>,
    expression: Option<Box<Tree>>,
    body: Option<Box<Tree>>,
}

impl MatchCaseTree {
    pub fn new(meta: Option<TreeMetaData>, expression: Option<Tree>, body: Option<Tree>) -> Self {
        Self {
            meta,
            expression: expression.map(Box::new),
            body: body.map(Box::new),
        }
    }

    pub fn expression(&self) -> Option<&Tree> {
        self.expression.as_deref()
    }

    pub fn body(&self) -> Option<&Tree> {
        self.body.as_deref()
    }

    pub fn children(&self) -> Vec<&Tree> {
        self.expression
            .as_deref()
            .into_iter()
            .chain(self.body.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ExceptionHandlingTree {
    meta: Option<TreeMetaData>,
    try_block: Box<Tree>,
    catches: Vec<Tree>,
    finally_block: Option<Box<Tree>>,
}

impl ExceptionHandlingTree {
    pub fn new(
        meta: Option<TreeMetaData>,
        try_block: impl Into<Tree>,
        catches: Vec<CatchTree>,
        finally_block: Option<Tree>,
    ) -> Self {
        Self {
            meta,
            try_block: boxed(try_block),
            catches: catches.into_iter().map(Tree::Catch).collect(),
            finally_block: finally_block.map(Box::new),
        }
    }

    /// Attach the `finally` block; allowed once, before the tree is traversed
    pub fn set_finally_block(&mut self, block: impl Into<Tree>) -> SlangResult<()> {
        if self.finally_block.is_some() {
            return Err(SlangError::invalid_tree("finally block is already set"));
        }
        self.finally_block = Some(boxed(block));
        Ok(())
    }

    pub fn try_block(&self) -> &Tree {
        &self.try_block
    }

    pub fn catch_blocks(&self) -> impl Iterator<Item = &CatchTree> + '_ {
        self.catches.iter().map(typed::<CatchTree>)
    }

    pub fn finally_block(&self) -> Option<&Tree> {
        self.finally_block.as_deref()
    }

    pub fn children(&self) -> Vec<&Tree> {
        let mut children = vec![self.try_block.as_ref()];
        children.extend(self.catches.iter());
        children.extend(self.finally_block.as_deref());
        children
    }
}

#[derive(Debug, Clone)]
pub struct CatchTree {
    meta: Option<TreeMetaData>,
    parameter: Option<Box<Tree>>,
    block: Box<Tree>,
    keyword: Token,
}

impl CatchTree {
    pub fn new(
        meta: Option<TreeMetaData>,
        parameter: Option<Tree>,
        block: impl Into<Tree>,
        keyword: Token,
    ) -> Self {
        Self {
            meta,
            parameter: parameter.map(Box::new),
            block: boxed(block),
            keyword,
        }
    }

    pub fn catch_parameter(&self) -> Option<&Tree> {
        self.parameter.as_deref()
    }

    pub fn catch_block(&self) -> &Tree {
        &self.block
    }

    pub fn keyword(&self) -> &Token {
        &self.keyword
    }

    pub fn children(&self) -> Vec<&Tree> {
        let mut children: Vec<&Tree> = self.parameter.as_deref().into_iter().collect();
        children.push(&self.block);
        children
    }
}

#[derive(Debug, Clone)]
pub struct FunctionDeclarationTree {
    meta: Option<TreeMetaData>,
    modifiers: Vec<Tree>,
    is_constructor: bool,
    return_type: Option<Box<Tree>>,
    name: Option<Box<Tree>>,
    parameters: Vec<Tree>,
    body: Option<Box<Tree>>,
    native_children: Vec<Tree>,
}

impl FunctionDeclarationTree {
    pub fn builder(meta: Option<TreeMetaData>) -> FunctionDeclarationBuilder {
        FunctionDeclarationBuilder {
            tree: Self {
                meta,
                modifiers: Vec::new(),
                is_constructor: false,
                return_type: None,
                name: None,
                parameters: Vec::new(),
                body: None,
                native_children: Vec::new(),
            },
        }
    }

    pub fn modifiers(&self) -> &[Tree] {
        &self.modifiers
    }

    pub fn has_modifier(&self, kind: ModifierKind) -> bool {
        self.modifiers
            .iter()
            .any(|m| matches!(m, Tree::Modifier(modifier) if modifier.kind() == kind))
    }

    pub fn is_constructor(&self) -> bool {
        self.is_constructor
    }

    pub fn return_type(&self) -> Option<&Tree> {
        self.return_type.as_deref()
    }

    pub fn name(&self) -> Option<&IdentifierTree> {
        self.name.as_deref().map(typed::<IdentifierTree>)
    }

    pub fn formal_parameters(&self) -> &[Tree] {
        &self.parameters
    }

    pub fn body(&self) -> Option<&BlockTree> {
        self.body.as_deref().map(typed::<BlockTree>)
    }

    pub fn body_tree(&self) -> Option<&Tree> {
        self.body.as_deref()
    }

    pub fn native_children(&self) -> &[Tree] {
        &self.native_children
    }

    /// Range an issue on this function should point at: the name, or the
    /// tokens preceding the body for anonymous functions
    pub fn range_to_highlight(&self) -> Option<TextRange> {
        if let Some(name) = self.name() {
            return name.text_range();
        }
        let meta = self.meta.as_ref()?;
        let Some(body_range) = self.body().and_then(BlockTree::text_range) else {
            return Some(meta.text_range());
        };
        let before_body: Vec<TextRange> = meta
            .tokens()
            .iter()
            .map(|t| t.range)
            .filter(|r| r.start < body_range.start)
            .collect();
        TextRange::merge(&before_body).or(Some(body_range))
    }

    pub fn children(&self) -> Vec<&Tree> {
        let mut children: Vec<&Tree> = self.modifiers.iter().collect();
        children.extend(self.return_type.as_deref());
        children.extend(self.name.as_deref());
        children.extend(self.parameters.iter());
        children.extend(self.body.as_deref());
        children.extend(self.native_children.iter());
        children
    }
}

/// Assembles a [`FunctionDeclarationTree`], whose optional parts are many
pub struct FunctionDeclarationBuilder {
    tree: FunctionDeclarationTree,
}

impl FunctionDeclarationBuilder {
    pub fn with_modifiers(mut self, modifiers: Vec<Tree>) -> Self {
        self.tree.modifiers = modifiers;
        self
    }

    pub fn constructor(mut self) -> Self {
        self.tree.is_constructor = true;
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<Tree>) -> Self {
        self.tree.return_type = Some(boxed(return_type));
        self
    }

    pub fn with_name(mut self, name: IdentifierTree) -> Self {
        self.tree.name = Some(boxed(name));
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Tree>) -> Self {
        self.tree.parameters = parameters;
        self
    }

    pub fn with_body(mut self, body: BlockTree) -> Self {
        self.tree.body = Some(boxed(body));
        self
    }

    pub fn with_native_children(mut self, children: Vec<Tree>) -> Self {
        self.tree.native_children = children;
        self
    }

    pub fn build(self) -> FunctionDeclarationTree {
        self.tree
    }
}

#[derive(Debug, Clone)]
pub struct ClassDeclarationTree {
    meta: Option<TreeMetaData>,
    identifier: Option<IdentifierTree>,
    class_tree: Box<Tree>,
}

impl ClassDeclarationTree {
    /// The identifier, when present, must be one of the class tree's own identifiers
    pub fn new(
        meta: Option<TreeMetaData>,
        identifier: Option<IdentifierTree>,
        class_tree: impl Into<Tree>,
    ) -> SlangResult<Self> {
        let class_tree = class_tree.into();
        if let Some(identifier) = &identifier {
            let found = class_tree.descendants().any(|node| {
                matches!(node, Tree::Identifier(id)
                    if id.name() == identifier.name() && id.text_range() == identifier.text_range())
            });
            if !found {
                return Err(SlangError::invalid_tree(format!(
                    "class identifier '{}' is not part of the class tree",
                    identifier.name()
                )));
            }
        }
        Ok(Self {
            meta,
            identifier,
            class_tree: Box::new(class_tree),
        })
    }

    pub fn identifier(&self) -> Option<&IdentifierTree> {
        self.identifier.as_ref()
    }

    pub fn class_tree(&self) -> &Tree {
        &self.class_tree
    }

    /// The identifier is not a child: it already sits inside the class tree
    pub fn children(&self) -> Vec<&Tree> {
        vec![self.class_tree.as_ref()]
    }
}

#[derive(Debug, Clone)]
pub struct BlockTree {
    meta: Option<TreeMetaData>,
    statements: Vec<Tree>,
}

impl BlockTree {
    pub fn new(meta: Option<TreeMetaData>, statements: Vec<Tree>) -> Self {
        Self { meta, statements }
    }

    pub fn statement_or_expressions(&self) -> &[Tree] {
        &self.statements
    }

    pub fn children(&self) -> Vec<&Tree> {
        self.statements.iter().collect()
    }
}

#[derive(Debug, Clone)]
pub struct VariableDeclarationTree {
    meta: Option<TreeMetaData>,
    identifier: Box<Tree>,
    var_type: Option<Box<Tree>>,
    initializer: Option<Box<Tree>>,
    is_val: bool,
}

impl VariableDeclarationTree {
    pub fn new(
        meta: Option<TreeMetaData>,
        identifier: IdentifierTree,
        var_type: Option<Tree>,
        initializer: Option<Tree>,
        is_val: bool,
    ) -> Self {
        Self {
            meta,
            identifier: boxed(identifier),
            var_type: var_type.map(Box::new),
            initializer: initializer.map(Box::new),
            is_val,
        }
    }

    pub fn identifier(&self) -> &IdentifierTree {
        typed(&self.identifier)
    }

    pub fn var_type(&self) -> Option<&Tree> {
        self.var_type.as_deref()
    }

    pub fn initializer(&self) -> Option<&Tree> {
        self.initializer.as_deref()
    }

    /// `val` declarations cannot be reassigned
    pub fn is_val(&self) -> bool {
        self.is_val
    }

    pub fn children(&self) -> Vec<&Tree> {
        let mut children = vec![self.identifier.as_ref()];
        children.extend(self.var_type.as_deref());
        children.extend(self.initializer.as_deref());
        children
    }
}

#[derive(Debug, Clone)]
pub struct ParameterTree {
    meta: Option<TreeMetaData>,
    identifier: Box<Tree>,
    param_type: Option<Box<Tree>>,
    default_value: Option<Box<Tree>>,
}

impl ParameterTree {
    pub fn new(
        meta: Option<TreeMetaData>,
        identifier: IdentifierTree,
        param_type: Option<Tree>,
        default_value: Option<Tree>,
    ) -> Self {
        Self {
            meta,
            identifier: boxed(identifier),
            param_type: param_type.map(Box::new),
            default_value: default_value.map(Box::new),
        }
    }

    pub fn identifier(&self) -> &IdentifierTree {
        typed(&self.identifier)
    }

    pub fn param_type(&self) -> Option<&Tree> {
        self.param_type.as_deref()
    }

    pub fn default_value(&self) -> Option<&Tree> {
        self.default_value.as_deref()
    }

    pub fn children(&self) -> Vec<&Tree> {
        let mut children = vec![self.identifier.as_ref()];
        children.extend(self.param_type.as_deref());
        children.extend(self.default_value.as_deref());
        children
    }
}

#[derive(Debug, Clone)]
pub struct ModifierTree {
    meta: Option<TreeMetaData>,
    kind: ModifierKind,
}

impl ModifierTree {
    pub fn new(meta: Option<TreeMetaData>, kind: ModifierKind) -> Self {
        Self { meta, kind }
    }

    pub fn kind(&self) -> ModifierKind {
        self.kind
    }

    pub fn children(&self) -> Vec<&Tree> {
        Vec::new()
    }
}

/// `expression.identifier`
#[derive(Debug, Clone)]
pub struct MemberSelectTree {
    meta: Option<TreeMetaData>,
    expression: Box<Tree>,
    identifier: Box<Tree>,
}

impl MemberSelectTree {
    pub fn new(
        meta: Option<TreeMetaData>,
        expression: impl Into<Tree>,
        identifier: IdentifierTree,
    ) -> Self {
        Self {
            meta,
            expression: boxed(expression),
            identifier: boxed(identifier),
        }
    }

    pub fn expression(&self) -> &Tree {
        &self.expression
    }

    pub fn identifier(&self) -> &IdentifierTree {
        typed(&self.identifier)
    }

    pub fn children(&self) -> Vec<&Tree> {
        vec![self.expression.as_ref(), self.identifier.as_ref()]
    }
}

#[derive(Debug, Clone)]
pub struct FunctionInvocationTree {
    meta: Option<TreeMetaData>,
    member_select: Box<Tree>,
    arguments: Vec<Tree>,
}

impl FunctionInvocationTree {
    pub fn new(
        meta: Option<TreeMetaData>,
        member_select: impl Into<Tree>,
        arguments: Vec<Tree>,
    ) -> Self {
        Self {
            meta,
            member_select: boxed(member_select),
            arguments,
        }
    }

    /// The callee: an identifier, a member select, or any other expression
    pub fn member_select(&self) -> &Tree {
        &self.member_select
    }

    pub fn arguments(&self) -> &[Tree] {
        &self.arguments
    }

    pub fn children(&self) -> Vec<&Tree> {
        let mut children = vec![self.member_select.as_ref()];
        children.extend(self.arguments.iter());
        children
    }
}

#[derive(Debug, Clone)]
pub struct ReturnTree {
    meta: Option<TreeMetaData>,
    keyword: Token,
    body: Option<Box<Tree>>,
}

impl ReturnTree {
    pub fn new(meta: Option<TreeMetaData>, keyword: Token, body: Option<Tree>) -> Self {
        Self {
            meta,
            keyword,
            body: body.map(Box::new),
        }
    }

    pub fn keyword(&self) -> &Token {
        &self.keyword
    }

    pub fn body(&self) -> Option<&Tree> {
        self.body.as_deref()
    }

    pub fn children(&self) -> Vec<&Tree> {
        self.body.as_deref().into_iter().collect()
    }
}

/// `break` or `continue`, with an optional label
#[derive(Debug, Clone)]
pub struct JumpTree {
    meta: Option<TreeMetaData>,
    keyword: Token,
    kind: JumpKind,
    label: Option<Box<Tree>>,
}

impl JumpTree {
    pub fn new(
        meta: Option<TreeMetaData>,
        keyword: Token,
        kind: JumpKind,
        label: Option<IdentifierTree>,
    ) -> Self {
        Self {
            meta,
            keyword,
            kind,
            label: label.map(|label| Box::new(Tree::Identifier(label))),
        }
    }

    pub fn keyword(&self) -> &Token {
        &self.keyword
    }

    pub fn kind(&self) -> JumpKind {
        self.kind
    }

    pub fn label(&self) -> Option<&IdentifierTree> {
        self.label.as_deref().map(typed::<IdentifierTree>)
    }

    pub fn children(&self) -> Vec<&Tree> {
        self.label.as_deref().into_iter().collect()
    }
}

#[derive(Debug, Clone)]
pub struct ThrowTree {
    meta: Option<TreeMetaData>,
    keyword: Token,
    body: Option<Box<Tree>>,
}

impl ThrowTree {
    pub fn new(meta: Option<TreeMetaData>, keyword: Token, body: Option<Tree>) -> Self {
        Self {
            meta,
            keyword,
            body: body.map(Box::new),
        }
    }

    pub fn keyword(&self) -> &Token {
        &self.keyword
    }

    pub fn body(&self) -> Option<&Tree> {
        self.body.as_deref()
    }

    pub fn children(&self) -> Vec<&Tree> {
        self.body.as_deref().into_iter().collect()
    }
}

/// Root of one source unit
#[derive(Debug, Clone)]
pub struct TopLevelTree {
    meta: Option<TreeMetaData>,
    declarations: Vec<Tree>,
    all_comments: Vec<Comment>,
}

impl TopLevelTree {
    pub fn new(
        meta: Option<TreeMetaData>,
        declarations: Vec<Tree>,
        all_comments: Vec<Comment>,
    ) -> Self {
        Self {
            meta,
            declarations,
            all_comments,
        }
    }

    pub fn declarations(&self) -> &[Tree] {
        &self.declarations
    }

    pub fn all_comments(&self) -> &[Comment] {
        &self.all_comments
    }

    pub fn children(&self) -> Vec<&Tree> {
        self.declarations.iter().collect()
    }
}

#[derive(Debug, Clone)]
pub struct NativeTree {
    meta: Option<TreeMetaData>,
    native_kind: Arc<dyn NativeKind>,
    children: Vec<Tree>,
}

impl NativeTree {
    pub fn new(
        meta: Option<TreeMetaData>,
        native_kind: Arc<dyn NativeKind>,
        children: Vec<Tree>,
    ) -> Self {
        Self {
            meta,
            native_kind,
            children,
        }
    }

    pub fn native_kind(&self) -> &dyn NativeKind {
        self.native_kind.as_ref()
    }

    pub fn children(&self) -> Vec<&Tree> {
        self.children.iter().collect()
    }
}
