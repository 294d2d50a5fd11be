//! パーサーモジュール
//!
//! トークン列を抽象構文木（AST）に解析する。
//! 手書きの再帰下降構文解析で、式は優先順位上昇法（precedence climbing）で解析する。
//!
//! ## 解析の単位
//!
//! ```barq
//! module hello;
//! import "std/io";
//!
//! const GREETING = "hello";
//!
//! pub fn main(argc i32, argv **u8) i32 {
//!     defer cleanup();
//!     if argc > 1 {
//!         return 1;
//!     }
//!     return 0;
//! }
//! ```
//!
//! トップレベル要素の解析に失敗した場合はエラーを記録し、
//! 次のトップレベル要素の先頭までトークンを読み飛ばして解析を続ける。
//! 要素内部（文・式・型）では最初のエラーで打ち切る。

mod decl_parser;
mod expr;
mod parser_impl;
mod stmt_parser;
mod type_parser;

// 公開API
pub use parser_impl::Parser;

use std::panic;
use std::thread;

use log::debug;

use crate::ast::{Expression, Module, Statement, Type};
use crate::dialect::ParserConfig;
use crate::error::ParserError;
use crate::lexer::Trivia;

/// 解析スレッドのスタックサイズ
///
/// 既定の入れ子の上限まで再帰しても溢れない大きさにする。
pub const PARSER_STACK_SIZE: usize = 64 * 1024 * 1024;

pub type ParseError = ParserError;
pub type ParseResult<T> = Result<T, ParseError>;

/// モジュール解析の結果
///
/// 構文エラーがあっても、回復できたトップレベル要素は`module`に残る。
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub module: Module,
    /// ソース上の位置順に並んだ診断
    pub diagnostics: Vec<ParserError>,
    pub trivia: Vec<Trivia>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// 診断がなければモジュールを返す
    pub fn into_result(self) -> Result<Module, Vec<ParserError>> {
        if self.diagnostics.is_empty() {
            Ok(self.module)
        } else {
            Err(self.diagnostics)
        }
    }
}

/// 既定の方言でモジュールを解析
pub fn parse_module(source: &str) -> ParseOutput {
    parse_module_with(source, &ParserConfig::default())
}

/// 設定を指定してモジュールを解析
///
/// 解析は`PARSER_STACK_SIZE`のスタックを持つスレッドで行う。
pub fn parse_module_with(source: &str, config: &ParserConfig) -> ParseOutput {
    on_parser_stack(|| parse_module_here(source, config))
}

/// 呼び出し元のスレッドでモジュールを解析
///
/// 十分なスタックを用意済みのスレッドから呼ぶ。
pub(crate) fn parse_module_here(source: &str, config: &ParserConfig) -> ParseOutput {
    let mut parser = Parser::with_config(source, config);
    let module = parser.parse();
    let (diagnostics, trivia) = parser.finish();
    debug!(
        "parsed {} items with {} diagnostics ({} dialect)",
        module.items.len(),
        diagnostics.len(),
        config.dialect
    );
    ParseOutput {
        module,
        diagnostics,
        trivia,
    }
}

/// 入力全体を1つの式として解析
pub fn parse_expression(source: &str, config: &ParserConfig) -> ParseResult<Expression> {
    on_parser_stack(|| {
        Parser::with_config(source, config).parse_complete(|p| p.parse_expression())
    })
}

/// 入力全体を1つの文として解析
pub fn parse_statement(source: &str, config: &ParserConfig) -> ParseResult<Statement> {
    on_parser_stack(|| {
        Parser::with_config(source, config).parse_complete(|p| p.parse_statement())
    })
}

/// 入力全体を1つの型として解析
pub fn parse_type(source: &str, config: &ParserConfig) -> ParseResult<Type> {
    on_parser_stack(|| {
        Parser::with_config(source, config).parse_complete(|p| p.parse_type())
    })
}

/// `f`を解析用のスタックを持つスレッドで実行する
///
/// スレッドを作れなければ呼び出し元のスレッドで実行する。
fn on_parser_stack<T: Send>(f: impl Fn() -> T + Sync) -> T {
    let spawned = thread::scope(|scope| {
        thread::Builder::new()
            .name("barq-parser".to_string())
            .stack_size(PARSER_STACK_SIZE)
            .spawn_scoped(scope, &f)
            .map(|handle| handle.join())
    });

    match spawned {
        Ok(Ok(value)) => value,
        Ok(Err(payload)) => panic::resume_unwind(payload),
        Err(e) => {
            debug!("could not spawn parser thread: {}", e);
            f()
        }
    }
}
