//! トリビア（空白・コメント）の除去
//!
//! `Lexer`を包むデコレーター。構文規則は空白とコメントを見ないが、
//! ドキュメントコメントなどを使うツールのためにスパン付きで保持しておく。

use serde::{Deserialize, Serialize};

use super::lexer::{Lexer, Position, TokenWithPosition};
use super::token::Token;
use crate::ast::Span;

/// トリビアの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriviaKind {
    Whitespace,
    Comment,
}

/// 取り除かれたトリビア
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: String,
    pub span: Span,
    pub line: usize,
    pub column: usize,
}

impl Trivia {
    pub fn is_comment(&self) -> bool {
        self.kind == TriviaKind::Comment
    }
}

/// 意味を持つトークンだけを返すイテレーター
pub struct TriviaFilter<'a> {
    lexer: Lexer<'a>,
    trivia: Vec<Trivia>,
}

impl<'a> TriviaFilter<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            trivia: Vec::new(),
        }
    }

    /// これまでに取り除いたトリビア
    pub fn trivia(&self) -> &[Trivia] {
        &self.trivia
    }

    /// 取り除いたトリビアを取り出す
    pub fn take_trivia(&mut self) -> Vec<Trivia> {
        std::mem::take(&mut self.trivia)
    }

    fn keep(&mut self, kind: TriviaKind, span: std::ops::Range<usize>, position: Position) {
        let text = self.lexer.source()[span.clone()].to_owned();
        self.trivia.push(Trivia {
            kind,
            text,
            span: span.into(),
            line: position.line,
            column: position.column,
        });
    }
}

impl<'a> Iterator for TriviaFilter<'a> {
    type Item = TokenWithPosition;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token = self.lexer.next()?;
            match token.token {
                Token::Whitespace => self.keep(TriviaKind::Whitespace, token.span, token.position),
                Token::Comment(_) => self.keep(TriviaKind::Comment, token.span, token.position),
                _ => return Some(token),
            }
        }
    }
}
