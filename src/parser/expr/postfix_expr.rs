//! 後置式（関数呼び出し、添字、メンバーアクセス）の解析

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 後置式を解析
    ///
    /// 呼び出し・添字・メンバーは同じ優先順位で左から順に結合する。
    /// 1つ結合するごとに深さを1つ数える。
    pub(crate) fn parse_postfix_expression(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        let mut expr = self.parse_primary_expression()?;

        loop {
            if matches!(
                self.current_token(),
                Token::LeftParen | Token::LeftBracket | Token::Dot
            ) {
                self.fold()?;
            }

            match self.current_token() {
                Token::LeftParen => {
                    self.advance();
                    let args = self.parse_arguments()?;
                    expr = Expression::Call(CallExpr {
                        callee: Box::new(expr),
                        args,
                        span: self.span_from(start),
                    });
                }
                Token::LeftBracket => {
                    self.advance();
                    let index = self.parse_expression()?;
                    self.expect(Token::RightBracket)?;
                    expr = Expression::Subscript(SubscriptExpr {
                        target: Box::new(expr),
                        index: Box::new(index),
                        span: self.span_from(start),
                    });
                }
                Token::Dot => {
                    self.advance();
                    let key = match self.current_token() {
                        Token::Identifier(name) => MemberKey::Identifier(name.clone()),
                        // `p.*`は参照外し
                        Token::Star => MemberKey::Wildcard,
                        _ => return Err(self.unexpected(&["identifier", "`*`"])),
                    };
                    self.advance();
                    expr = Expression::Member(MemberExpr {
                        target: Box::new(expr),
                        key,
                        span: self.span_from(start),
                    });
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// 呼び出しの引数リストを解析（`(`は消費済み）
    fn parse_arguments(&mut self) -> ParseResult<Vec<Expression>> {
        let mut args = Vec::new();
        while !self.check(&Token::RightParen) {
            args.push(self.parse_expression()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RightParen)?;
        Ok(args)
    }
}
