//! 文の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 文を解析
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        self.nested(|p| p.parse_statement_internal())
    }

    fn parse_statement_internal(&mut self) -> ParseResult<Statement> {
        let start = self.current_span().start;

        if self.at_short_declaration() {
            return self
                .parse_short_declaration(start, false)
                .map(|binding| binding.into_statement());
        }

        match self.current_token() {
            Token::Const => Ok(Statement::Constant(self.parse_constant_decl(start, false)?)),
            Token::Var | Token::Export => {
                let is_exported = self.match_token(&Token::Export);
                Ok(Statement::Variable(self.parse_variable_decl(
                    start,
                    false,
                    is_exported,
                )?))
            }
            Token::Switch => Ok(Statement::Switch(self.parse_switch_statement()?)),
            Token::If => Ok(Statement::If(self.parse_if_statement()?)),
            Token::While => Ok(Statement::While(self.parse_while_statement()?)),
            Token::Break => {
                self.advance();
                self.expect(Token::Semicolon)?;
                Ok(Statement::Break(self.span_from(start)))
            }
            Token::Continue => {
                self.advance();
                self.expect(Token::Semicolon)?;
                Ok(Statement::Continue(self.span_from(start)))
            }
            Token::Defer => Ok(Statement::Defer(self.parse_defer_statement()?)),
            Token::Return => Ok(Statement::Return(self.parse_return_statement()?)),
            _ => {
                let expr = self.parse_expression()?;
                self.expect(Token::Semicolon)?;
                Ok(Statement::Expression(expr))
            }
        }
    }

    /// ブロックを解析
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        self.nested(|p| {
            let start = p.current_span().start;
            p.expect(Token::LeftBrace)?;

            let mut statements = Vec::new();
            while !p.check(&Token::RightBrace) && !p.is_at_end() {
                statements.push(p.parse_statement()?);
            }

            p.expect(Token::RightBrace)?;
            Ok(Block {
                statements,
                span: p.span_from(start),
            })
        })
    }

    /// if文を解析
    ///
    /// `else if`は右に入れ子にする。
    fn parse_if_statement(&mut self) -> ParseResult<IfStatement> {
        let start = self.current_span().start;
        self.expect(Token::If)?;

        let condition = self.parse_expression()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.match_token(&Token::Else) {
            if self.check(&Token::If) {
                let nested = self.nested(|p| p.parse_if_statement())?;
                Some(ElseBranch::If(Box::new(nested)))
            } else {
                Some(ElseBranch::Block(self.parse_block()?))
            }
        } else {
            None
        };

        Ok(IfStatement {
            condition,
            then_branch,
            else_branch,
            span: self.span_from(start),
        })
    }

    fn parse_while_statement(&mut self) -> ParseResult<WhileStatement> {
        let start = self.current_span().start;
        self.expect(Token::While)?;

        let condition = self.parse_expression()?;
        let body = self.parse_block()?;

        Ok(WhileStatement {
            condition,
            body,
            span: self.span_from(start),
        })
    }

    /// `defer stmt`または`defer { ... }`
    fn parse_defer_statement(&mut self) -> ParseResult<DeferStatement> {
        let start = self.current_span().start;
        self.expect(Token::Defer)?;

        let body = if self.check(&Token::LeftBrace) {
            Statement::Block(self.parse_block()?)
        } else {
            self.parse_statement()?
        };

        Ok(DeferStatement {
            body: Box::new(body),
            span: self.span_from(start),
        })
    }

    /// return文を解析
    ///
    /// 直後がブロックの`}`なら`;`を省略できる。
    fn parse_return_statement(&mut self) -> ParseResult<ReturnStatement> {
        let start = self.current_span().start;
        self.expect(Token::Return)?;

        let value = if self.check(&Token::Semicolon) || self.check(&Token::RightBrace) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        if !self.check(&Token::RightBrace) {
            self.expect(Token::Semicolon)?;
        }

        Ok(ReturnStatement {
            value,
            span: self.span_from(start),
        })
    }

    /// `switch (expr) { cases }`
    fn parse_switch_statement(&mut self) -> ParseResult<SwitchStatement> {
        let start = self.current_span().start;
        self.expect(Token::Switch)?;
        self.expect(Token::LeftParen)?;
        let scrutinee = self.parse_expression()?;
        self.expect(Token::RightParen)?;
        self.expect(Token::LeftBrace)?;

        let mut cases = vec![self.parse_switch_case()?];
        loop {
            // ケース間のカンマは省略できる
            self.match_token(&Token::Comma);
            if self.check(&Token::RightBrace) || self.is_at_end() {
                break;
            }
            cases.push(self.parse_switch_case()?);
        }
        self.expect(Token::RightBrace)?;

        Ok(SwitchStatement {
            scrutinee,
            cases,
            span: self.span_from(start),
        })
    }

    /// `else => body`または`a, b => body`
    fn parse_switch_case(&mut self) -> ParseResult<SwitchCase> {
        let start = self.current_span().start;

        let matcher = if self.match_token(&Token::Else) {
            CaseMatcher::Else
        } else if self.check(&Token::RightBrace) {
            return Err(self.unexpected(&["`else`", "expression"]));
        } else {
            let mut values = vec![self.parse_expression()?];
            while self.match_token(&Token::Comma) && !self.check(&Token::FatArrow) {
                values.push(self.parse_expression()?);
            }
            CaseMatcher::Values(values)
        };

        self.expect(Token::FatArrow)?;

        // 単一の文は自身の`;`まで含む
        let body = if self.check(&Token::LeftBrace) {
            Statement::Block(self.parse_block()?)
        } else {
            self.parse_statement()?
        };

        Ok(SwitchCase {
            matcher,
            body: Box::new(body),
            span: self.span_from(start),
        })
    }
}
