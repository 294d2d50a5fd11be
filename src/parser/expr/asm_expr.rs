//! インラインアセンブリ式の解析
//!
//! ```barq
//! asm { "mov %1, %0" : "=r"(u64) : "r"(x) : "memory" }
//! ```
//!
//! `:`で区切られた出力・入力・破壊レジスタの各セクションは位置で決まる。
//! `:`があればセクションは`Some`（空でもよい）、なければ`None`になる。
//! `::`は空のセクションが1つ挟まったものとして読む。

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// インラインアセンブリを解析
    pub(crate) fn parse_inline_assembly(&mut self) -> ParseResult<Expression> {
        let start = self.current_span().start;
        self.expect(Token::Asm)?;
        self.expect(Token::LeftBrace)?;

        let mut templates = vec![self.expect_string()?];
        while self.check(&Token::String(String::new())) {
            templates.push(self.expect_string()?);
        }

        let output = self.parse_asm_section(|p| {
            // 出力は高々1つ
            if p.check(&Token::String(String::new())) {
                Ok(vec![p.parse_asm_output()?])
            } else {
                Ok(Vec::new())
            }
        })?;

        let inputs = match output {
            Some(_) => self.parse_asm_section(|p| p.parse_asm_list(Self::parse_asm_input))?,
            None => None,
        };

        let clobbers = match inputs {
            Some(_) => self.parse_asm_section(|p| p.parse_asm_list(Self::expect_string))?,
            None => None,
        };

        self.expect(Token::RightBrace)?;

        Ok(Expression::InlineAssembly(InlineAssembly {
            templates,
            output,
            inputs,
            clobbers,
            span: self.span_from(start),
        }))
    }

    /// `:`があればセクションを解析
    fn parse_asm_section<T>(
        &mut self,
        operands: impl FnOnce(&mut Self) -> ParseResult<Vec<T>>,
    ) -> ParseResult<Option<AsmSection<T>>> {
        let start = self.current_span().start;
        if self.check(&Token::DoubleColon) {
            // `::`は空のセクションとその次の`:`
            self.split_double_colon();
            return Ok(Some(AsmSection {
                operands: Vec::new(),
                span: self.span_from(start),
            }));
        }
        if !self.match_token(&Token::Colon) {
            return Ok(None);
        }
        let operands = operands(self)?;
        Ok(Some(AsmSection {
            operands,
            span: self.span_from(start),
        }))
    }

    /// カンマ区切りのオペランド列（末尾のカンマを許す）
    fn parse_asm_list<T>(
        &mut self,
        mut operand: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut operands = Vec::new();
        while self.check(&Token::String(String::new())) {
            operands.push(operand(self)?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        Ok(operands)
    }

    /// `"=r"(T)`
    fn parse_asm_output(&mut self) -> ParseResult<AsmOutput> {
        let start = self.current_span().start;
        let constraint = self.expect_string()?;
        self.expect(Token::LeftParen)?;
        let ty = self.parse_type()?;
        self.expect(Token::RightParen)?;
        Ok(AsmOutput {
            constraint,
            ty,
            span: self.span_from(start),
        })
    }

    /// `"r"(expr)`
    fn parse_asm_input(&mut self) -> ParseResult<AsmInput> {
        let start = self.current_span().start;
        let constraint = self.expect_string()?;
        self.expect(Token::LeftParen)?;
        let value = self.parse_expression()?;
        self.expect(Token::RightParen)?;
        Ok(AsmInput {
            constraint,
            value,
            span: self.span_from(start),
        })
    }
}
