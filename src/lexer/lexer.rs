//! レキサーのメイン実装

use logos::{Lexer as LogosLexer, Logos, Span};

use super::token::Token;
use crate::dialect::{Dialect, DialectFeatures};

/// エラー報告用の位置情報（1始まりの行・列）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new() -> Self {
        Position { line: 1, column: 1 }
    }

    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// 位置情報付きトークン
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPosition {
    pub token: Token,
    pub position: Position,
    pub span: Span,
}

impl TokenWithPosition {
    /// ソース上の生のテキスト
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.clone()]
    }
}

/// Barq/Ceriumのレキサー
///
/// 入力全体を覆うトークン列を遅延生成し、最後に`Token::Eof`を1つだけ返す。
/// 再開は先頭からのみ可能（新しい`Lexer`を作る）。
pub struct Lexer<'a> {
    inner: LogosLexer<'a, Token>,
    position: Position,
    input: &'a str,
    last_end: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// 既定の方言で新しいレキサーを作成
    pub fn new(input: &'a str) -> Self {
        Self::with_features(input, Dialect::default().features())
    }

    /// 方言の機能を指定してレキサーを作成
    pub fn with_features(input: &'a str, features: DialectFeatures) -> Self {
        Self {
            inner: Token::lexer_with_extras(input, features),
            position: Position::new(),
            input,
            last_end: 0,
            finished: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.input
    }

    /// すべてのトークンを収集
    pub fn collect_tokens(self) -> Vec<TokenWithPosition> {
        self.collect()
    }

    fn advance_position(&mut self, end: usize) {
        if end > self.last_end {
            for ch in self.input[self.last_end..end].chars() {
                self.position.advance(ch);
            }
            self.last_end = end;
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = TokenWithPosition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let Some(result) = self.inner.next() else {
            // 終端トークン
            self.finished = true;
            self.advance_position(self.input.len());
            let end = self.input.len();
            return Some(TokenWithPosition {
                token: Token::Eof,
                position: self.position,
                span: end..end,
            });
        };

        let span = self.inner.span();
        self.advance_position(span.start);
        let position = self.position;
        self.advance_position(span.end);

        let token = match result {
            Ok(token) => token,
            Err(kind) => Token::Error(kind),
        };

        Some(TokenWithPosition {
            token,
            position,
            span,
        })
    }
}

/// デバッグ用：トークンストリームを文字列として出力
pub fn format_tokens(tokens: &[TokenWithPosition]) -> String {
    tokens
        .iter()
        .map(|t| {
            format!(
                "{:>4}:{:<3} {:?} @ {:?}",
                t.position.line, t.position.column, t.token, t.span
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
