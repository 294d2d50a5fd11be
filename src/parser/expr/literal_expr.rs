//! 一次式（識別子、リテラル、括弧式）の解析

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 一次式を解析
    pub(crate) fn parse_primary_expression(&mut self) -> ParseResult<Expression> {
        let span = self.current_span();

        let expr = match self.current_token() {
            Token::Identifier(name) => Expression::Identifier(Identifier {
                name: name.clone(),
                span,
            }),
            Token::SpecialIdentifier(name) => Expression::SpecialIdentifier(Identifier {
                name: name.clone(),
                span,
            }),
            Token::String(raw) => Expression::String(StringLit {
                raw: raw.clone(),
                span,
            }),
            Token::Character(raw) => Expression::Character(CharLit {
                raw: raw.clone(),
                span,
            }),
            Token::Integer(text) => Expression::Integer(IntegerLit {
                text: text.clone(),
                span,
            }),
            Token::Float(text) => Expression::Float(FloatLit {
                text: text.clone(),
                span,
            }),
            Token::LeftParen => return self.parse_parentheses_expression(),
            Token::Asm => return self.parse_inline_assembly(),
            _ => return Err(self.unexpected(&["expression"])),
        };

        self.advance();
        Ok(expr)
    }

    /// 括弧式を解析
    fn parse_parentheses_expression(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        self.expect(Token::LeftParen)?;
        let inner = self.parse_expression()?;
        self.expect(Token::RightParen)?;
        Ok(Expression::Parentheses(ParenthesesExpr {
            inner: Box::new(inner),
            span: self.span_from(start),
        }))
    }

    /// 整数リテラルを期待
    pub(crate) fn expect_integer(&mut self) -> ParseResult<IntegerLit> {
        match self.current_token() {
            Token::Integer(text) => {
                let lit = IntegerLit {
                    text: text.clone(),
                    span: self.current_span(),
                };
                self.advance();
                Ok(lit)
            }
            _ => Err(self.unexpected(&["integer literal"])),
        }
    }
}
