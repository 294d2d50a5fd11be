//! メインパーサー構造とユーティリティ

use std::collections::VecDeque;

use log::{debug, trace};

use crate::ast::*;
use crate::dialect::{DialectFeatures, ParserConfig};
use crate::error::{Expected, ParserError};
use crate::lexer::{Lexer, Position, Token, TokenWithPosition, Trivia, TriviaFilter};

use super::{ParseError, ParseResult};

/// 先読みするトークン数
const LOOKAHEAD: usize = 3;

/// Barq/Ceriumパーサー
///
/// トークンは必要になった分だけレキサーから取り出す。
/// 字句エラーのトークンは診断として記録し、構文規則からは見えないようにする。
pub struct Parser<'a> {
    source: &'a str,
    tokens: TriviaFilter<'a>,
    lookahead: VecDeque<TokenWithPosition>,
    end_of_input: TokenWithPosition,
    pub(super) config: ParserConfig,
    diagnostics: Vec<ParserError>,
    /// 直前に消費したトークンの終了位置
    previous_end: usize,
    /// 消費したトークンの数
    consumed: usize,
    /// 現在開いている`{`の数（エラー回復用）
    open_braces: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// 既定の設定でパーサーを作成
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, &ParserConfig::default())
    }

    pub fn with_config(source: &'a str, config: &ParserConfig) -> Self {
        let lexer = Lexer::with_features(source, config.features);
        let mut parser = Self {
            source,
            tokens: TriviaFilter::new(lexer),
            lookahead: VecDeque::with_capacity(LOOKAHEAD),
            end_of_input: TokenWithPosition {
                token: Token::Eof,
                position: Position::new(),
                span: source.len()..source.len(),
            },
            config: config.clone(),
            diagnostics: Vec::new(),
            previous_end: 0,
            consumed: 0,
            open_braces: 0,
            depth: 0,
        };
        parser.fill();
        parser
    }

    /// モジュール全体を解析
    ///
    /// 構文エラーは診断として蓄積し、次のトップレベル要素から解析を再開する。
    pub fn parse(&mut self) -> Module {
        debug!("parsing module ({} bytes)", self.source.len());

        let mut items = Vec::new();
        while !self.is_at_end() {
            let consumed_before = self.consumed;
            match self.parse_item() {
                Ok(item) => {
                    trace!("parsed item {:?} at {:?}", item.name(), item.span());
                    items.push(item);
                }
                Err(error) => {
                    debug!("syntax error: {}", error);
                    self.diagnostics.push(error);
                    self.synchronize(consumed_before);
                }
            }
        }

        Module {
            items,
            span: Span::new(0, self.source.len()),
        }
    }

    /// 単一の式を解析
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_expr_bp(Precedence::Lowest)
    }

    /// 解析を終え、診断とトリビアを取り出す
    pub fn finish(mut self) -> (Vec<ParserError>, Vec<Trivia>) {
        // 残りのトークンも読んでトリビアと字句エラーを揃える
        while !self.is_at_end() {
            self.advance();
        }
        let mut diagnostics = self.diagnostics;
        diagnostics.sort_by_key(|d| d.span().start);
        (diagnostics, self.tokens.take_trivia())
    }

    /// これまでに記録した診断
    pub fn diagnostics(&self) -> &[ParserError] {
        &self.diagnostics
    }

    /// 入力全体が1つの構文要素であることを要求して解析
    ///
    /// 字句エラーがあれば最初のものを返す。
    pub fn parse_complete<T>(
        mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let result = f(&mut self).and_then(|value| {
            if self.is_at_end() {
                Ok(value)
            } else {
                Err(self.unexpected(&["end of input"]))
            }
        });
        let (mut diagnostics, _) = self.finish();
        match result {
            Ok(value) if diagnostics.is_empty() => Ok(value),
            Ok(_) => Err(diagnostics.remove(0)),
            Err(error) => {
                // 字句エラーの方が前にあればそちらを優先する
                match diagnostics.into_iter().next() {
                    Some(lexical) if lexical.span().start <= error.span().start => Err(lexical),
                    _ => Err(error),
                }
            }
        }
    }

    // ==================== ユーティリティメソッド ====================

    pub(super) fn features(&self) -> DialectFeatures {
        self.config.features
    }

    fn fill(&mut self) {
        while self.lookahead.len() < LOOKAHEAD {
            let Some(token) = self.tokens.next() else {
                break;
            };
            if let Token::Error(kind) = token.token {
                self.diagnostics.push(ParserError::Lexical {
                    kind,
                    text: token.text(self.source).to_string(),
                    span: token.span.clone().into(),
                });
                continue;
            }
            self.lookahead.push_back(token);
        }
    }

    /// 現在のトークンを位置情報付きで取得
    pub(super) fn current(&self) -> &TokenWithPosition {
        self.lookahead.front().unwrap_or(&self.end_of_input)
    }

    /// 現在のトークンを取得
    pub(super) fn current_token(&self) -> &Token {
        &self.current().token
    }

    /// 特定のオフセット先のトークンを取得（終端を越えたら`Eof`）
    pub(super) fn peek(&self, offset: usize) -> &Token {
        &self
            .lookahead
            .get(offset)
            .or(self.lookahead.back())
            .unwrap_or(&self.end_of_input)
            .token
    }

    /// 現在のスパンを取得
    pub(super) fn current_span(&self) -> Span {
        self.current().span.clone().into()
    }

    /// 開始位置から直前のトークンの終わりまでのスパンを作成
    pub(super) fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.previous_end.max(start))
    }

    /// 次のトークンに進む
    pub(super) fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        if let Some(token) = self.lookahead.pop_front() {
            match token.token {
                Token::LeftBrace => self.open_braces += 1,
                Token::RightBrace => self.open_braces = self.open_braces.saturating_sub(1),
                _ => {}
            }
            self.previous_end = token.span.end;
            self.consumed += 1;
        }
        self.fill();
    }

    /// 現在の`::`を2つの`:`に分け、前半だけを消費する
    ///
    /// `asm { "x" :: "r"(a) }`のように区切りが続く場所で使う。
    pub(super) fn split_double_colon(&mut self) {
        let Some(token) = self.lookahead.pop_front() else {
            return;
        };
        let middle = token.span.start + 1;
        self.previous_end = middle;
        self.consumed += 1;
        self.lookahead.push_front(TokenWithPosition {
            token: Token::Colon,
            position: Position {
                line: token.position.line,
                column: token.position.column + 1,
            },
            span: middle..token.span.end,
        });
    }

    /// 終端に到達したかチェック
    pub(super) fn is_at_end(&self) -> bool {
        matches!(self.current_token(), Token::Eof)
    }

    /// 特定のトークンをチェック（進まない）
    pub(super) fn check(&self, token_type: &Token) -> bool {
        std::mem::discriminant(self.current_token()) == std::mem::discriminant(token_type)
    }

    /// 要素のないリストに置かれたカンマ1つを読み飛ばす
    ///
    /// `(,)`や`struct {,}`のように、カンマの直後が`closers`のどれかのときだけ読む。
    pub(super) fn skip_lone_separator(&mut self, closers: &[Token]) {
        let next = std::mem::discriminant(self.peek(1));
        if self.check(&Token::Comma)
            && closers
                .iter()
                .any(|closer| std::mem::discriminant(closer) == next)
        {
            self.advance();
        }
    }

    /// 特定のトークンにマッチしたら進む
    pub(super) fn match_token(&mut self, token_type: &Token) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// 特定のトークンを期待し、そのスパンを返す
    pub(super) fn expect(&mut self, token_type: Token) -> ParseResult<Span> {
        if self.check(&token_type) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected(&[&token_type.describe()]))
        }
    }

    /// 識別子を期待
    pub(super) fn expect_identifier(&mut self) -> ParseResult<String> {
        match self.current_token() {
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(&["identifier"])),
        }
    }

    /// 文字列リテラルを期待
    pub(super) fn expect_string(&mut self) -> ParseResult<StringLit> {
        match self.current_token() {
            Token::String(raw) => {
                let lit = StringLit {
                    raw: raw.clone(),
                    span: self.current_span(),
                };
                self.advance();
                Ok(lit)
            }
            _ => Err(self.unexpected(&["string literal"])),
        }
    }

    /// 現在のトークンが期待と異なる場合のエラーを作成
    pub(super) fn unexpected(&self, expected: &[&str]) -> ParseError {
        let expected = Expected(expected.iter().map(|e| e.to_string()).collect());
        let span = self.current_span();
        match self.current_token() {
            Token::Eof => ParserError::UnexpectedEndOfInput { expected, span },
            found => ParserError::UnexpectedToken {
                expected,
                found: found.describe(),
                span,
            },
        }
    }

    /// 入れ子の深さを数えながら解析する
    ///
    /// `f`の中で`fold`した分も、戻るときに元の深さへ戻す。
    pub(super) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let depth = self.depth;
        self.deepen()?;
        let result = f(self);
        self.depth = depth;
        result
    }

    /// 左に畳み込んだ式を1段深くする
    ///
    /// `a + b + c`や`f()()`の連鎖は木の左側に積み上がるので、
    /// 1段ごとに入れ子と同じ上限で数える。
    pub(super) fn fold(&mut self) -> ParseResult<()> {
        self.deepen()
    }

    fn deepen(&mut self) -> ParseResult<()> {
        if self.depth >= self.config.max_depth {
            return Err(ParserError::NestingTooDeep {
                limit: self.config.max_depth,
                span: self.current_span(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// `@foreign`属性かどうか
    pub(super) fn at_foreign_attribute(&self) -> bool {
        self.features().foreign_attributes
            && matches!(self.current_token(), Token::SpecialIdentifier(name) if name == "foreign")
    }

    /// `NAME :: expr`または`name := expr`の先頭かどうか
    pub(super) fn at_short_declaration(&self) -> bool {
        if !matches!(self.current_token(), Token::Identifier(_)) {
            return false;
        }
        let features = self.features();
        match self.peek(1) {
            Token::DoubleColon => features.constant_colons,
            Token::ColonAssign => features.inferred_variables,
            _ => false,
        }
    }

    /// トップレベル要素の先頭になりうるか
    fn at_item_start(&self) -> bool {
        match self.current_token() {
            Token::Module
            | Token::Import
            | Token::Asm
            | Token::Pub
            | Token::Const
            | Token::Var
            | Token::Export
            | Token::Extern
            | Token::Fn
            | Token::Type => true,
            _ => self.at_foreign_attribute() || self.at_short_declaration(),
        }
    }

    /// エラー後、次のトップレベル要素の先頭まで読み飛ばす
    ///
    /// ブロックの内側にあるキーワードでは止まらない。
    /// 要素の解析で1トークンも進んでいなければ最低1つは読み飛ばす。
    fn synchronize(&mut self, consumed_before: usize) {
        let start = self.consumed;
        if self.consumed == consumed_before {
            self.advance();
        }
        while !self.is_at_end() {
            if self.open_braces == 0 && self.at_item_start() {
                break;
            }
            self.advance();
        }
        debug!(
            "recovered after skipping {} tokens, resuming at offset {}",
            self.consumed - start,
            self.current_span().start
        );
    }
}
