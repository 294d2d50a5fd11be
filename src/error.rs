//! 統一的なエラーハンドリングモジュール
//!
//! このモジュールは、パーサー全体で使用されるエラー型と
//! エラー報告システムを提供します。

use std::fmt;

use crate::ast::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

/// Barqフロントエンドの統一エラー型
#[derive(Error, Debug, Clone)]
pub enum BarqError {
    /// パーサーエラー
    #[error("syntax error: {0}")]
    Parser(#[from] ParserError),

    /// ファイルI/Oエラー
    #[error("I/O error: {0}")]
    Io(String),
}

/// 字句エラーの種類
///
/// logosのエラー型としても使うため`Default`を実装する。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexicalErrorKind {
    #[default]
    #[error("unrecognized character")]
    UnrecognizedCharacter,

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated character literal")]
    UnterminatedCharacter,

    #[error("special identifiers are not enabled in this dialect")]
    DisabledSpecialIdentifier,
}

/// 期待していたトークンの集合
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expected(pub Vec<String>);

impl Expected {
    pub fn one(what: impl Into<String>) -> Self {
        Self(vec![what.into()])
    }

    pub fn contains(&self, what: &str) -> bool {
        self.0.iter().any(|e| e == what)
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "nothing"),
            [only] => write!(f, "{}", only),
            [init @ .., last] => write!(f, "one of {}, or {}", init.join(", "), last),
        }
    }
}

/// パーサーエラーの詳細
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParserError {
    #[error("{kind}: `{text}`")]
    Lexical {
        kind: LexicalErrorKind,
        text: String,
        span: Span,
    },

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: Expected,
        found: String,
        span: Span,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: Expected, span: Span },

    #[error("nesting is deeper than the limit of {limit}")]
    NestingTooDeep { limit: usize, span: Span },
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            ParserError::Lexical { span, .. }
            | ParserError::UnexpectedToken { span, .. }
            | ParserError::UnexpectedEndOfInput { span, .. }
            | ParserError::NestingTooDeep { span, .. } => *span,
        }
    }

    /// ラベルに添える短い説明
    fn label(&self) -> &'static str {
        match self {
            ParserError::Lexical { .. } => "not valid here",
            ParserError::UnexpectedToken { .. } => "unexpected token",
            ParserError::UnexpectedEndOfInput { .. } => "input ends here",
            ParserError::NestingTooDeep { .. } => "nesting limit reached here",
        }
    }
}

/// エラー情報とソースコードの位置情報を含むエラー
#[derive(Debug, Clone)]
pub struct DiagnosticError {
    pub error: BarqError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: BarqError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let labels = match &self.error {
            BarqError::Parser(e) => {
                let span = e.span();
                vec![Label::primary(self.file_id, span.start..span.end).with_message(e.label())]
            }
            BarqError::Io(_) => vec![],
        };

        Diagnostic::error()
            .with_message(self.error.to_string())
            .with_labels(labels)
    }
}

/// 複数のエラーを蓄積するためのコレクター
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<DiagnosticError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// エラーを追加
    pub fn add_error(&mut self, error: BarqError, file_id: usize) {
        self.errors.push(DiagnosticError::new(error, file_id));
    }

    /// エラーがあるかどうか
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// エラーの数
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// すべてのエラーを取得
    pub fn errors(&self) -> &[DiagnosticError] {
        &self.errors
    }
}

/// Result型のエイリアス
pub type BarqResult<T> = Result<T, BarqError>;

impl From<std::io::Error> for BarqError {
    fn from(e: std::io::Error) -> Self {
        BarqError::Io(e.to_string())
    }
}
