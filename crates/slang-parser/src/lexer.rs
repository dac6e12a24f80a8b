//! Lexical analysis of SLang sources.
//!
//! Comments are produced as tokens so that they can be collected with
//! their positions, then split from the code tokens handed to the parser.

use crate::errors::{ParseError, Result};
use logos::Logos;
use serde::{Deserialize, Serialize};
use slang_api::{Comment, TextPointer, TextRange, Token, TokenType};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    // Keywords
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("fun")]
    Fun,
    #[token("match")]
    Match,
    #[token("native")]
    Native,
    #[token("private")]
    Private,
    #[token("public")]
    Public,
    #[token("override")]
    Override,
    #[token("return")]
    Return,
    #[token("this")]
    This,
    #[token("class")]
    Class,
    #[token("var")]
    Var,
    #[token("val")]
    Val,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("finally")]
    Finally,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("throw")]
    Throw,

    // Boolean literals
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("->")]
    Arrow,

    // Operators
    #[token("||")]
    OrOr,
    #[token("&&")]
    AndAnd,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("%=")]
    PercentAssign,

    // Literals
    #[regex(r"0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+|0[dD][0-9_]+|[0-9][0-9_]*")]
    IntegerLiteral,
    #[regex(r#""([^"\\]|\\.)*""#)]
    StringLiteral,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    // Comments
    #[regex(r"//[^\r\n]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,
}

/// Consume up to and including the closing `*/`; unterminated is an error
fn block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::If
                | Self::Else
                | Self::Fun
                | Self::Match
                | Self::Native
                | Self::Private
                | Self::Public
                | Self::Override
                | Self::Return
                | Self::This
                | Self::Class
                | Self::Var
                | Self::Val
                | Self::For
                | Self::While
                | Self::Do
                | Self::Try
                | Self::Catch
                | Self::Finally
                | Self::Break
                | Self::Continue
                | Self::Throw
        )
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    /// Category recorded in the tree metadata
    pub fn token_type(&self) -> TokenType {
        if self.is_keyword() {
            TokenType::Keyword
        } else if *self == Self::StringLiteral {
            TokenType::StringLiteral
        } else {
            TokenType::Other
        }
    }
}

/// A code token with its kind, as consumed by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: TokenKind,
    pub text: String,
    pub range: TextRange,
}

impl Lexeme {
    /// The token stored in tree metadata
    pub fn to_token(&self) -> Token {
        Token::new(self.range, self.text.clone(), self.kind.token_type())
    }
}

/// Code tokens and comments of one source, both in source order
#[derive(Debug, Clone, Default)]
pub struct LexedSource {
    pub lexemes: Vec<Lexeme>,
    pub comments: Vec<Comment>,
}

impl LexedSource {
    pub fn tokens(&self) -> Vec<Token> {
        self.lexemes.iter().map(Lexeme::to_token).collect()
    }
}

/// Byte offsets of line starts, for offset to position conversion
struct LineIndex<'s> {
    source: &'s str,
    starts: Vec<usize>,
}

impl<'s> LineIndex<'s> {
    fn new(source: &'s str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { source, starts }
    }

    /// Position of a byte offset; columns count characters
    fn pointer(&self, offset: usize) -> TextPointer {
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts[line - 1];
        let column = self.source[line_start..offset].chars().count();
        TextPointer::new(line, column)
    }

    fn range(&self, span: std::ops::Range<usize>) -> TextRange {
        TextRange::new(self.pointer(span.start), self.pointer(span.end))
    }
}

/// Split a source into code tokens and comments
pub fn tokenize(source: &str) -> Result<LexedSource> {
    let index = LineIndex::new(source);
    let mut lexed = LexedSource::default();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let span = lexer.span();
        let kind = match result {
            Ok(kind) => kind,
            Err(()) => {
                return Err(ParseError::syntax(
                    format!("token recognition error at: '{text}'"),
                    index.pointer(span.start),
                ))
            }
        };

        if kind.is_comment() {
            lexed.comments.push(comment(&index, kind, text, span));
        } else {
            lexed.lexemes.push(Lexeme {
                kind,
                text: text.to_string(),
                range: index.range(span),
            });
        }
    }

    Ok(lexed)
}

fn comment(
    index: &LineIndex<'_>,
    kind: TokenKind,
    text: &str,
    span: std::ops::Range<usize>,
) -> Comment {
    let suffix_len = if kind == TokenKind::BlockComment { 2 } else { 0 };
    let content_span = span.start + 2..span.end - suffix_len;
    Comment::new(
        text,
        &text[2..text.len() - suffix_len],
        index.range(span),
        index.range(content_span),
    )
}
