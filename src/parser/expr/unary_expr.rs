//! 前置単項演算式の解析

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 単項演算式を解析
    ///
    /// 前置演算子は後置式（呼び出し・添字・メンバー）より弱く、`as`より強い。
    pub(crate) fn parse_unary_expression(&mut self) -> ParseResult<Expression> {
        let op = match self.current_token() {
            Token::Minus => UnaryOp::Negate,
            Token::Bang => UnaryOp::Not,
            Token::Tilde => UnaryOp::BitNot,
            Token::Ampersand => UnaryOp::AddressOf,
            _ => return self.parse_postfix_expression(),
        };

        let start = self.current_span().start;
        self.advance();
        let operand = self.nested(|p| p.parse_unary_expression())?;
        Ok(Expression::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            span: self.span_from(start),
        }))
    }
}
