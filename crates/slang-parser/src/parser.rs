//! Recursive-descent parser building SLang trees from lexemes.
//!
//! Every node gets the metadata of the range between its first and last
//! token. Statements are separated by `;`, which may be omitted after a
//! construct ending with `}` and before the `}` closing a block.

use crate::errors::{ParseError, Result};
use crate::lexer::{Lexeme, TokenKind};
use crate::native_kind::{SlangNativeKind, CLASS_DECLARATION, NATIVE_EXPRESSION};
use slang_api::{
    AssignmentExpressionTree, AssignmentOperator, BinaryExpressionTree, BinaryOperator, BlockTree,
    CatchTree, ClassDeclarationTree, ExceptionHandlingTree, FunctionDeclarationTree,
    FunctionInvocationTree, IdentifierTree, IfTree, IntegerLiteralTree, JumpKind, JumpTree,
    LiteralTree, LoopKind, LoopTree, MatchCaseTree, MatchTree, MemberSelectTree, ModifierKind,
    ModifierTree, NativeTree, ParameterTree, ParenthesizedExpressionTree, ReturnTree,
    StringLiteralTree, TextPointer, TextRange, ThrowTree, TopLevelTree, Tree, TreeMetaData,
    TreeMetaDataProvider, UnaryExpressionTree, UnaryOperator, VariableDeclarationTree,
};
use std::sync::Arc;

/// Binary operators by increasing precedence
const PRECEDENCE: [&[TokenKind]; 6] = [
    &[TokenKind::OrOr],
    &[TokenKind::AndAnd],
    &[TokenKind::EqEq, TokenKind::NotEq],
    &[TokenKind::Lt, TokenKind::LtEq, TokenKind::Gt, TokenKind::GtEq],
    &[TokenKind::Plus, TokenKind::Minus],
    &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent],
];

pub(crate) struct Parser<'s> {
    lexemes: &'s [Lexeme],
    provider: &'s TreeMetaDataProvider,
    pos: usize,
}

impl<'s> Parser<'s> {
    pub(crate) fn new(lexemes: &'s [Lexeme], provider: &'s TreeMetaDataProvider) -> Self {
        Self {
            lexemes,
            provider,
            pos: 0,
        }
    }

    pub(crate) fn parse_top_level(&mut self) -> Result<Tree> {
        let declarations = self.statement_list(None)?;

        let comments = self.provider.all_comments();
        let bounds = [
            self.lexemes.first().map(|l| l.range),
            self.lexemes.last().map(|l| l.range),
            comments.first().map(|c| c.range),
            comments.last().map(|c| c.range),
        ];
        let range = TextRange::merge(bounds.iter().flatten()).unwrap_or_else(|| {
            TextRange::new(TextPointer::new(1, 0), TextPointer::new(1, 0))
        });

        Ok(TopLevelTree::new(
            Some(self.provider.metadata(range)),
            declarations,
            comments.to_vec(),
        )
        .into())
    }

    // Cursor

    fn peek(&self) -> Option<TokenKind> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<TokenKind> {
        self.lexemes.get(self.pos + offset).map(|l| l.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    /// Consume the current lexeme; callers check it exists with `peek` first
    fn bump(&mut self) -> &'s Lexeme {
        let lexeme = &self.lexemes[self.pos];
        self.pos += 1;
        lexeme
    }

    fn eat(&mut self, kind: TokenKind) -> Option<&'s Lexeme> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind, text: &str) -> Result<&'s Lexeme> {
        match self.eat(kind) {
            Some(lexeme) => Ok(lexeme),
            None => Err(self.missing(text)),
        }
    }

    fn found_text(&self) -> &str {
        self.lexemes
            .get(self.pos)
            .map_or("<EOF>", |l| l.text.as_str())
    }

    /// Start of the current lexeme, or the end of input
    fn position(&self) -> TextPointer {
        match self.lexemes.get(self.pos) {
            Some(lexeme) => lexeme.range.start,
            None => self
                .lexemes
                .last()
                .map_or(TextPointer::new(1, 0), |l| l.range.end),
        }
    }

    fn missing(&self, expected: &str) -> ParseError {
        ParseError::missing(expected, self.found_text(), self.position())
    }

    fn unexpected(&self) -> ParseError {
        ParseError::unexpected(self.found_text(), self.position())
    }

    /// Metadata from the lexeme at `start` to the last consumed one
    fn meta_from(&self, start: usize) -> Option<TreeMetaData> {
        let first = &self.lexemes[start];
        let last = &self.lexemes[self.pos.saturating_sub(1).max(start)];
        let range = TextRange::new(first.range.start, last.range.end);
        Some(self.provider.metadata(range))
    }

    fn ends_statement(&self) -> bool {
        matches!(
            self.peek(),
            None | Some(TokenKind::Semicolon | TokenKind::RBrace)
        )
    }

    // Statements

    /// Statements up to `closing`, or to the end of input when `None`
    fn statement_list(&mut self, closing: Option<TokenKind>) -> Result<Vec<Tree>> {
        let mut statements = Vec::new();
        loop {
            while self.eat(TokenKind::Semicolon).is_some() {}
            if self.peek().is_none() || self.peek() == closing {
                return Ok(statements);
            }
            statements.push(self.statement()?);
            self.terminator(closing)?;
        }
    }

    fn terminator(&mut self, closing: Option<TokenKind>) -> Result<()> {
        if self.eat(TokenKind::Semicolon).is_some() {
            return Ok(());
        }
        let after_brace = self.pos > 0 && self.lexemes[self.pos - 1].kind == TokenKind::RBrace;
        let before_closing = closing.is_some() && self.peek() == closing;
        if after_brace || before_closing {
            Ok(())
        } else {
            Err(self.missing(";"))
        }
    }

    fn statement(&mut self) -> Result<Tree> {
        let Some(kind) = self.peek() else {
            return Err(self.unexpected());
        };
        let tree: Tree = match kind {
            TokenKind::LBrace => self.block()?.into(),
            TokenKind::Private | TokenKind::Public | TokenKind::Override => {
                self.function_declaration()?.into()
            }
            TokenKind::Fun if self.peek_at(1) == Some(TokenKind::Identifier) => {
                self.function_declaration()?.into()
            }
            TokenKind::Identifier => match self.peek_at(1) {
                Some(TokenKind::Fun) => self.function_declaration()?.into(),
                Some(TokenKind::Var | TokenKind::Val) => self.variable_declaration()?.into(),
                _ => self.expression()?,
            },
            TokenKind::Var | TokenKind::Val => self.variable_declaration()?.into(),
            TokenKind::Class => self.class_declaration()?.into(),
            TokenKind::For => self.for_loop()?.into(),
            TokenKind::While => self.while_loop()?.into(),
            TokenKind::Do => self.do_while_loop()?.into(),
            TokenKind::Try => self.try_statement()?.into(),
            TokenKind::Return => self.return_statement()?.into(),
            TokenKind::Break => self.jump(JumpKind::Break)?.into(),
            TokenKind::Continue => self.jump(JumpKind::Continue)?.into(),
            TokenKind::Throw => self.throw_statement()?.into(),
            _ => self.expression()?,
        };
        Ok(tree)
    }

    fn block(&mut self) -> Result<BlockTree> {
        let start = self.pos;
        self.expect(TokenKind::LBrace, "{")?;
        let statements = self.statement_list(Some(TokenKind::RBrace))?;
        self.expect(TokenKind::RBrace, "}")?;
        Ok(BlockTree::new(self.meta_from(start), statements))
    }

    fn identifier(&mut self) -> Result<IdentifierTree> {
        let start = self.pos;
        match self.eat(TokenKind::Identifier) {
            Some(lexeme) => Ok(IdentifierTree::new(
                self.meta_from(start),
                lexeme.text.clone(),
            )),
            None => Err(self.unexpected()),
        }
    }

    /// `[modifiers] [type] fun [name](params) [block]`, also used for lambdas
    fn function_declaration(&mut self) -> Result<FunctionDeclarationTree> {
        let start = self.pos;
        let mut modifiers = Vec::new();
        while let Some(kind) = self.peek().and_then(modifier_kind) {
            let modifier_start = self.pos;
            self.bump();
            modifiers.push(ModifierTree::new(self.meta_from(modifier_start), kind).into());
        }
        let return_type = if self.at(TokenKind::Identifier) {
            Some(self.identifier()?)
        } else {
            None
        };
        self.expect(TokenKind::Fun, "fun")?;
        let name = if self.at(TokenKind::Identifier) {
            Some(self.identifier()?)
        } else {
            None
        };
        let parameters = self.formal_parameters()?;
        let body = if self.at(TokenKind::LBrace) {
            Some(self.block()?)
        } else {
            None
        };

        let mut builder = FunctionDeclarationTree::builder(self.meta_from(start))
            .with_modifiers(modifiers)
            .with_parameters(parameters);
        if let Some(return_type) = return_type {
            builder = builder.with_return_type(return_type);
        }
        if let Some(name) = name {
            builder = builder.with_name(name);
        }
        if let Some(body) = body {
            builder = builder.with_body(body);
        }
        Ok(builder.build())
    }

    fn formal_parameters(&mut self) -> Result<Vec<Tree>> {
        self.expect(TokenKind::LParen, "(")?;
        let mut parameters = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                parameters.push(self.formal_parameter()?.into());
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, ")")?;
        Ok(parameters)
    }

    /// `[type] name [= default]`
    fn formal_parameter(&mut self) -> Result<ParameterTree> {
        let start = self.pos;
        let first = self.identifier()?;
        let (param_type, name) = if self.at(TokenKind::Identifier) {
            (Some(Tree::from(first)), self.identifier()?)
        } else {
            (None, first)
        };
        let default_value = if self.eat(TokenKind::Assign).is_some() {
            Some(self.expression()?)
        } else {
            None
        };
        Ok(ParameterTree::new(
            self.meta_from(start),
            name,
            param_type,
            default_value,
        ))
    }

    /// `[type] var|val name [= value]`
    fn variable_declaration(&mut self) -> Result<VariableDeclarationTree> {
        let start = self.pos;
        let var_type = if self.at(TokenKind::Identifier) {
            Some(Tree::from(self.identifier()?))
        } else {
            None
        };
        let is_val = match self.peek() {
            Some(TokenKind::Val) => true,
            Some(TokenKind::Var) => false,
            _ => return Err(self.missing("var")),
        };
        self.bump();
        let name = self.identifier()?;
        let initializer = if self.eat(TokenKind::Assign).is_some() {
            Some(self.expression()?)
        } else {
            None
        };
        Ok(VariableDeclarationTree::new(
            self.meta_from(start),
            name,
            var_type,
            initializer,
            is_val,
        ))
    }

    /// The class tree is a native node holding the name and the members
    fn class_declaration(&mut self) -> Result<ClassDeclarationTree> {
        let start = self.pos;
        self.expect(TokenKind::Class, "class")?;
        let identifier = if self.at(TokenKind::Identifier) {
            Some(self.identifier()?)
        } else {
            None
        };
        self.expect(TokenKind::LBrace, "{")?;
        let members = self.statement_list(Some(TokenKind::RBrace))?;
        self.expect(TokenKind::RBrace, "}")?;

        let mut children: Vec<Tree> = identifier.iter().cloned().map(Tree::from).collect();
        children.extend(members);
        let class_tree = NativeTree::new(
            self.meta_from(start),
            Arc::new(SlangNativeKind::of_rule(CLASS_DECLARATION)),
            children,
        );
        Ok(ClassDeclarationTree::new(
            self.meta_from(start),
            identifier,
            class_tree,
        )?)
    }

    /// Branch or loop body: any single statement
    fn control_block(&mut self) -> Result<Tree> {
        self.statement()
    }

    fn for_loop(&mut self) -> Result<LoopTree> {
        let start = self.pos;
        let keyword = self.expect(TokenKind::For, "for")?.to_token();
        self.expect(TokenKind::LParen, "(")?;
        let declaration = self.variable_declaration()?;
        self.expect(TokenKind::RParen, ")")?;
        let body = self.control_block()?;
        Ok(LoopTree::new(
            self.meta_from(start),
            Some(declaration.into()),
            body,
            LoopKind::For,
            keyword,
        ))
    }

    fn while_loop(&mut self) -> Result<LoopTree> {
        let start = self.pos;
        let keyword = self.expect(TokenKind::While, "while")?.to_token();
        let condition = self.parenthesized_condition()?;
        let body = self.control_block()?;
        Ok(LoopTree::new(
            self.meta_from(start),
            Some(condition),
            body,
            LoopKind::While,
            keyword,
        ))
    }

    fn do_while_loop(&mut self) -> Result<LoopTree> {
        let start = self.pos;
        let keyword = self.expect(TokenKind::Do, "do")?.to_token();
        let body = self.control_block()?;
        if self.at(TokenKind::Semicolon) && self.peek_at(1) == Some(TokenKind::While) {
            self.bump();
        }
        self.expect(TokenKind::While, "while")?;
        let condition = self.parenthesized_condition()?;
        Ok(LoopTree::new(
            self.meta_from(start),
            Some(condition),
            body,
            LoopKind::DoWhile,
            keyword,
        ))
    }

    fn parenthesized_condition(&mut self) -> Result<Tree> {
        self.expect(TokenKind::LParen, "(")?;
        let condition = self.expression()?;
        self.expect(TokenKind::RParen, ")")?;
        Ok(condition)
    }

    fn try_statement(&mut self) -> Result<ExceptionHandlingTree> {
        let start = self.pos;
        self.expect(TokenKind::Try, "try")?;
        let try_block = self.block()?;

        let mut catches = Vec::new();
        while self.at(TokenKind::Catch) {
            let catch_start = self.pos;
            let keyword = self.bump().to_token();
            self.expect(TokenKind::LParen, "(")?;
            let parameter = if self.at(TokenKind::RParen) {
                None
            } else {
                Some(Tree::from(self.formal_parameter()?))
            };
            self.expect(TokenKind::RParen, ")")?;
            let block = self.block()?;
            catches.push(CatchTree::new(
                self.meta_from(catch_start),
                parameter,
                block,
                keyword,
            ));
        }

        let finally_block = if self.eat(TokenKind::Finally).is_some() {
            Some(Tree::from(self.block()?))
        } else {
            None
        };
        Ok(ExceptionHandlingTree::new(
            self.meta_from(start),
            try_block,
            catches,
            finally_block,
        ))
    }

    fn return_statement(&mut self) -> Result<ReturnTree> {
        let start = self.pos;
        let keyword = self.expect(TokenKind::Return, "return")?.to_token();
        let body = if self.ends_statement() {
            None
        } else {
            Some(self.expression()?)
        };
        Ok(ReturnTree::new(self.meta_from(start), keyword, body))
    }

    fn throw_statement(&mut self) -> Result<ThrowTree> {
        let start = self.pos;
        let keyword = self.expect(TokenKind::Throw, "throw")?.to_token();
        let body = if self.ends_statement() {
            None
        } else {
            Some(self.expression()?)
        };
        Ok(ThrowTree::new(self.meta_from(start), keyword, body))
    }

    fn jump(&mut self, kind: JumpKind) -> Result<JumpTree> {
        let start = self.pos;
        let keyword = self.bump().to_token();
        let label = if self.at(TokenKind::Identifier) {
            Some(self.identifier()?)
        } else {
            None
        };
        Ok(JumpTree::new(self.meta_from(start), keyword, kind, label))
    }

    // Expressions

    fn expression(&mut self) -> Result<Tree> {
        self.assignment()
    }

    /// Right associative: `a = b = c` is `a = (b = c)`
    fn assignment(&mut self) -> Result<Tree> {
        let start = self.pos;
        let target = self.binary(0)?;
        let Some(operator) = self.peek().and_then(assignment_operator) else {
            return Ok(target);
        };
        self.bump();
        let value = self.assignment()?;
        Ok(AssignmentExpressionTree::new(self.meta_from(start), operator, target, value).into())
    }

    /// Left associative binary operators of one precedence level and above
    fn binary(&mut self, level: usize) -> Result<Tree> {
        if level == PRECEDENCE.len() {
            return self.unary();
        }
        let start = self.pos;
        let mut left = self.binary(level + 1)?;
        while self.peek().is_some_and(|kind| PRECEDENCE[level].contains(&kind)) {
            let lexeme = self.bump();
            let operator = BinaryOperator::from_symbol(&lexeme.text)
                .ok_or_else(|| ParseError::unexpected(&lexeme.text, lexeme.range.start))?;
            let right = self.binary(level + 1)?;
            left = BinaryExpressionTree::new(
                self.meta_from(start),
                operator,
                lexeme.to_token(),
                left,
                right,
            )
            .into();
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Tree> {
        let start = self.pos;
        let operator = match self.peek() {
            Some(TokenKind::Bang) => UnaryOperator::Negate,
            Some(TokenKind::Minus) => UnaryOperator::Minus,
            Some(TokenKind::Plus) => UnaryOperator::Plus,
            Some(TokenKind::PlusPlus) => UnaryOperator::Increment,
            Some(TokenKind::MinusMinus) => UnaryOperator::Decrement,
            _ => return self.postfix(),
        };
        self.bump();
        let operand = self.unary()?;
        Ok(UnaryExpressionTree::new(self.meta_from(start), operator, operand).into())
    }

    /// Member selects and invocations chained after a primary expression
    fn postfix(&mut self) -> Result<Tree> {
        let start = self.pos;
        let mut tree = self.primary()?;
        loop {
            match self.peek() {
                Some(TokenKind::Dot) => {
                    self.bump();
                    let identifier = self.identifier()?;
                    tree = MemberSelectTree::new(self.meta_from(start), tree, identifier).into();
                }
                Some(TokenKind::LParen) => {
                    let arguments = self.arguments()?;
                    tree = FunctionInvocationTree::new(self.meta_from(start), tree, arguments)
                        .into();
                }
                _ => return Ok(tree),
            }
        }
    }

    fn arguments(&mut self) -> Result<Vec<Tree>> {
        self.expect(TokenKind::LParen, "(")?;
        let mut arguments = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                arguments.push(self.expression()?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, ")")?;
        Ok(arguments)
    }

    fn primary(&mut self) -> Result<Tree> {
        let start = self.pos;
        let Some(kind) = self.peek() else {
            return Err(self.unexpected());
        };
        let tree: Tree = match kind {
            TokenKind::Identifier => self.identifier()?.into(),
            TokenKind::This => {
                self.bump();
                IdentifierTree::new(self.meta_from(start), "this").into()
            }
            TokenKind::IntegerLiteral => {
                let lexeme = self.bump();
                IntegerLiteralTree::new(self.meta_from(start), lexeme.text.clone()).into()
            }
            TokenKind::StringLiteral => {
                let lexeme = self.bump();
                StringLiteralTree::new(self.meta_from(start), lexeme.text.clone())?.into()
            }
            TokenKind::True | TokenKind::False => {
                let lexeme = self.bump();
                LiteralTree::new(self.meta_from(start), lexeme.text.clone()).into()
            }
            TokenKind::LParen => {
                self.bump();
                let expression = self.expression()?;
                self.expect(TokenKind::RParen, ")")?;
                ParenthesizedExpressionTree::new(self.meta_from(start), expression).into()
            }
            TokenKind::If => self.if_expression()?.into(),
            TokenKind::Match => self.match_expression()?.into(),
            TokenKind::Fun => self.function_declaration()?.into(),
            TokenKind::Native => self.native_expression()?.into(),
            _ => return Err(self.unexpected()),
        };
        Ok(tree)
    }

    fn if_expression(&mut self) -> Result<IfTree> {
        let start = self.pos;
        let if_keyword = self.expect(TokenKind::If, "if")?.to_token();
        let condition = self.parenthesized_condition()?;
        let then_branch = self.control_block()?;
        if self.at(TokenKind::Semicolon) && self.peek_at(1) == Some(TokenKind::Else) {
            self.bump();
        }
        let (else_keyword, else_branch) = match self.eat(TokenKind::Else) {
            Some(lexeme) => (Some(lexeme.to_token()), Some(self.control_block()?)),
            None => (None, None),
        };
        Ok(IfTree::new(
            self.meta_from(start),
            condition,
            then_branch,
            else_branch,
            if_keyword,
            else_keyword,
        ))
    }

    /// `match [(expression)] { pattern -> statement; else -> statement }`
    fn match_expression(&mut self) -> Result<MatchTree> {
        let start = self.pos;
        let keyword = self.expect(TokenKind::Match, "match")?.to_token();
        let expression = if self.at(TokenKind::LParen) {
            Some(self.parenthesized_condition()?)
        } else {
            None
        };
        self.expect(TokenKind::LBrace, "{")?;
        let mut cases = Vec::new();
        loop {
            while self.eat(TokenKind::Semicolon).is_some() {}
            if self.peek().is_none() || self.at(TokenKind::RBrace) {
                break;
            }
            cases.push(self.match_case()?);
            self.terminator(Some(TokenKind::RBrace))?;
        }
        self.expect(TokenKind::RBrace, "}")?;
        Ok(MatchTree::new(self.meta_from(start), expression, cases, keyword))
    }

    fn match_case(&mut self) -> Result<MatchCaseTree> {
        let start = self.pos;
        let expression = if self.eat(TokenKind::Else).is_some() {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(TokenKind::Arrow, "->")?;
        let body = if self.ends_statement() {
            None
        } else {
            Some(self.statement()?)
        };
        Ok(MatchCaseTree::new(self.meta_from(start), expression, body))
    }

    /// `native [d1, d2] { children }`
    fn native_expression(&mut self) -> Result<NativeTree> {
        let start = self.pos;
        self.expect(TokenKind::Native, "native")?;
        self.expect(TokenKind::LBracket, "[")?;
        let mut differentiators = Vec::new();
        while matches!(
            self.peek(),
            Some(TokenKind::Identifier | TokenKind::StringLiteral | TokenKind::IntegerLiteral)
        ) {
            differentiators.push(self.bump().text.clone());
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RBracket, "]")?;
        self.expect(TokenKind::LBrace, "{")?;
        let children = self.statement_list(Some(TokenKind::RBrace))?;
        self.expect(TokenKind::RBrace, "}")?;
        Ok(NativeTree::new(
            self.meta_from(start),
            Arc::new(SlangNativeKind::new(NATIVE_EXPRESSION, differentiators)),
            children,
        ))
    }
}

fn modifier_kind(kind: TokenKind) -> Option<ModifierKind> {
    match kind {
        TokenKind::Private => Some(ModifierKind::Private),
        TokenKind::Public => Some(ModifierKind::Public),
        TokenKind::Override => Some(ModifierKind::Override),
        _ => None,
    }
}

fn assignment_operator(kind: TokenKind) -> Option<AssignmentOperator> {
    match kind {
        TokenKind::Assign => Some(AssignmentOperator::Equal),
        TokenKind::PlusAssign => Some(AssignmentOperator::PlusEqual),
        TokenKind::MinusAssign => Some(AssignmentOperator::MinusEqual),
        TokenKind::StarAssign => Some(AssignmentOperator::TimesEqual),
        TokenKind::PercentAssign => Some(AssignmentOperator::RemainderEqual),
        _ => None,
    }
}
