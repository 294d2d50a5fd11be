//! 型の解析
//!
//! 型は式とは別の規則で解析する。`a < b`のような比較と型構文が混ざらないよう、
//! 共有するのは識別子と整数リテラルだけにしている。

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// 型を解析
    pub fn parse_type(&mut self) -> ParseResult<Type> {
        self.nested(|p| p.parse_type_internal())
    }

    fn parse_type_internal(&mut self) -> ParseResult<Type> {
        let start = self.current_span().start;

        match self.current_token() {
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(Type::Named(NamedType {
                    name,
                    span: self.span_from(start),
                }))
            }
            Token::Struct => self.parse_struct_type(start),
            Token::Enum => self.parse_enum_type(start),
            Token::LeftBracket => self.parse_bracketed_type(start),
            Token::Star | Token::ManyPointer => {
                let is_many = self.check(&Token::ManyPointer);
                self.advance();
                let is_const = self.match_token(&Token::Const);
                let pointee = self.parse_type()?;
                Ok(Type::Pointer(PointerType {
                    is_const,
                    is_many,
                    pointee: Box::new(pointee),
                    span: self.span_from(start),
                }))
            }
            Token::Fn if self.features().function_types => self.parse_function_type(start),
            _ => Err(self.unexpected(&["type"])),
        }
    }

    /// `struct { name T, ... }`
    fn parse_struct_type(&mut self, start: usize) -> ParseResult<Type> {
        self.expect(Token::Struct)?;
        self.expect(Token::LeftBrace)?;

        let mut fields = Vec::new();
        self.skip_lone_separator(&[Token::RightBrace]);
        while !self.check(&Token::RightBrace) {
            let field_start = self.current_span().start;
            let name = self.expect_identifier()?;
            if self.features().colon_annotations {
                self.match_token(&Token::Colon);
            }
            let ty = self.parse_type()?;
            fields.push(StructField {
                name,
                ty,
                span: self.span_from(field_start),
            });

            if !self.match_token(&Token::Comma) {
                break;
            }
        }

        self.expect(Token::RightBrace)?;
        Ok(Type::Struct(StructType {
            fields,
            span: self.span_from(start),
        }))
    }

    /// `enum [T] { A, B = 1, ... }`
    fn parse_enum_type(&mut self, start: usize) -> ParseResult<Type> {
        self.expect(Token::Enum)?;

        let backing = if self.check(&Token::LeftBrace) {
            None
        } else {
            Some(Box::new(self.parse_type()?))
        };

        self.expect(Token::LeftBrace)?;
        let mut members = Vec::new();
        self.skip_lone_separator(&[Token::RightBrace]);
        while !self.check(&Token::RightBrace) {
            let member_start = self.current_span().start;
            let name = self.expect_identifier()?;
            let value = if self.match_token(&Token::Assign) {
                Some(self.expect_integer()?)
            } else {
                None
            };
            members.push(EnumMember {
                name,
                value,
                span: self.span_from(member_start),
            });

            if !self.match_token(&Token::Comma) {
                break;
            }
        }

        self.expect(Token::RightBrace)?;
        Ok(Type::Enum(EnumType {
            backing,
            members,
            span: self.span_from(start),
        }))
    }

    /// `[N]T`、`[]T`、`[]const T`
    fn parse_bracketed_type(&mut self, start: usize) -> ParseResult<Type> {
        self.expect(Token::LeftBracket)?;

        if self.features().slices && self.match_token(&Token::RightBracket) {
            let is_const = self.match_token(&Token::Const);
            let element = self.parse_type()?;
            return Ok(Type::Slice(SliceType {
                is_const,
                element: Box::new(element),
                span: self.span_from(start),
            }));
        }

        let size = match self.current_token() {
            Token::Integer(_) => ArraySize::Integer(self.expect_integer()?),
            Token::Identifier(name) => {
                let size = ArraySize::Named {
                    name: name.clone(),
                    span: self.current_span(),
                };
                self.advance();
                size
            }
            _ => return Err(self.unexpected(&["array length"])),
        };
        self.expect(Token::RightBracket)?;

        let element = self.parse_type()?;
        Ok(Type::Array(ArrayType {
            size,
            element: Box::new(element),
            span: self.span_from(start),
        }))
    }

    /// `fn(T, U, ...) R`
    fn parse_function_type(&mut self, start: usize) -> ParseResult<Type> {
        self.expect(Token::Fn)?;
        self.expect(Token::LeftParen)?;

        let mut params = Vec::new();
        let mut is_variadic = false;
        while !self.check(&Token::RightParen) {
            if self.match_token(&Token::Ellipsis) {
                is_variadic = true;
                break;
            }
            params.push(self.parse_type()?);
            if !self.match_token(&Token::Comma) {
                is_variadic = self.match_token(&Token::Ellipsis);
                break;
            }
        }
        self.expect(Token::RightParen)?;

        let return_type = if self.at_type_start() {
            Some(Box::new(self.parse_type()?))
        } else {
            None
        };

        Ok(Type::Function(FunctionType {
            params,
            is_variadic,
            return_type,
            span: self.span_from(start),
        }))
    }

    /// 型の先頭になりうるトークンか
    fn at_type_start(&self) -> bool {
        match self.current_token() {
            Token::Identifier(_)
            | Token::Struct
            | Token::Enum
            | Token::LeftBracket
            | Token::Star
            | Token::ManyPointer => true,
            Token::Fn => self.features().function_types,
            _ => false,
        }
    }
}
