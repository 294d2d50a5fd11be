//! トップレベル要素と宣言の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

/// 文としても使える束縛宣言
pub(super) enum Binding {
    Constant(ConstantDecl),
    Variable(VariableDecl),
}

impl Binding {
    fn into_item(self) -> Item {
        match self {
            Binding::Constant(decl) => Item::Constant(decl),
            Binding::Variable(decl) => Item::Variable(decl),
        }
    }

    pub(super) fn into_statement(self) -> Statement {
        match self {
            Binding::Constant(decl) => Statement::Constant(decl),
            Binding::Variable(decl) => Statement::Variable(decl),
        }
    }
}

/// 引数リスト
struct Parameters {
    params: Vec<Parameter>,
    is_variadic: bool,
}

impl<'a> Parser<'a> {
    /// トップレベル要素を解析
    pub(super) fn parse_item(&mut self) -> ParseResult<Item> {
        let start = self.current_span().start;
        match self.current_token() {
            Token::Module => self.parse_module_specifier(start).map(Item::ModuleSpecifier),
            Token::Import => self.parse_import(start).map(Item::Import),
            Token::Asm => self.parse_global_assembly(start).map(Item::GlobalAssembly),
            _ => {
                let is_public = self.match_token(&Token::Pub);
                self.parse_declaration(start, is_public)
            }
        }
    }

    /// `pub`を付けられる宣言を解析
    fn parse_declaration(&mut self, start: usize, is_public: bool) -> ParseResult<Item> {
        if self.at_foreign_attribute() {
            return self.parse_foreign(start, is_public);
        }
        if self.at_short_declaration() {
            return self
                .parse_short_declaration(start, is_public)
                .map(Binding::into_item);
        }

        match self.current_token() {
            Token::Const => self
                .parse_constant_decl(start, is_public)
                .map(Item::Constant),
            Token::Var | Token::Export | Token::Fn => {
                let is_exported = self.match_token(&Token::Export);
                match self.current_token() {
                    Token::Var => self
                        .parse_variable_decl(start, is_public, is_exported)
                        .map(Item::Variable),
                    Token::Fn => self
                        .parse_function(start, is_public, is_exported)
                        .map(Item::Function),
                    _ => Err(self.unexpected(&["`var`", "`fn`"])),
                }
            }
            Token::Extern => {
                self.advance();
                if self.check(&Token::Fn) {
                    self.parse_extern_function(start, is_public)
                        .map(Item::ExternFunction)
                } else {
                    self.parse_extern_variable(start, is_public)
                        .map(Item::ExternVariable)
                }
            }
            Token::Type => self.parse_type_alias(start, is_public).map(Item::TypeAlias),
            _ if is_public => Err(self.unexpected(&[
                "`const`",
                "`var`",
                "`export`",
                "`fn`",
                "`extern`",
                "`type`",
            ])),
            _ => Err(self.unexpected(&["declaration"])),
        }
    }

    /// `module name;`
    fn parse_module_specifier(&mut self, start: usize) -> ParseResult<ModuleSpecifier> {
        self.expect(Token::Module)?;
        let name = self.expect_identifier()?;
        self.expect(Token::Semicolon)?;
        Ok(ModuleSpecifier {
            name,
            span: self.span_from(start),
        })
    }

    /// `import "path";`
    fn parse_import(&mut self, start: usize) -> ParseResult<Import> {
        self.expect(Token::Import)?;
        let path = self.expect_string()?;
        self.expect(Token::Semicolon)?;
        Ok(Import {
            path,
            span: self.span_from(start),
        })
    }

    /// `asm { "..." "..." }`
    fn parse_global_assembly(&mut self, start: usize) -> ParseResult<GlobalAssembly> {
        self.expect(Token::Asm)?;
        self.expect(Token::LeftBrace)?;
        let mut templates = Vec::new();
        while self.check(&Token::String(String::new())) {
            templates.push(self.expect_string()?);
        }
        self.expect(Token::RightBrace)?;
        Ok(GlobalAssembly {
            templates,
            span: self.span_from(start),
        })
    }

    /// `const NAME = expr;`
    pub(super) fn parse_constant_decl(
        &mut self,
        start: usize,
        is_public: bool,
    ) -> ParseResult<ConstantDecl> {
        self.expect(Token::Const)?;
        let name = self.expect_identifier()?;
        self.expect(Token::Assign)?;
        let value = self.parse_expression()?;
        self.expect(Token::Semicolon)?;
        Ok(ConstantDecl {
            name,
            value,
            is_public,
            span: self.span_from(start),
        })
    }

    /// `var name [T] [= expr];`
    ///
    /// 呼び出し側で`export`を消費済みの場合がある。
    pub(super) fn parse_variable_decl(
        &mut self,
        start: usize,
        is_public: bool,
        is_exported: bool,
    ) -> ParseResult<VariableDecl> {
        self.expect(Token::Var)?;
        let name = self.expect_identifier()?;

        let ty = if self.features().colon_annotations && self.match_token(&Token::Colon) {
            Some(self.parse_type()?)
        } else if self.check(&Token::Assign) || self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_type()?)
        };

        let init = if self.match_token(&Token::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect(Token::Semicolon)?;

        Ok(VariableDecl {
            name,
            ty,
            init,
            is_exported,
            is_public,
            span: self.span_from(start),
        })
    }

    /// `NAME :: expr;`または`name := expr;`
    pub(super) fn parse_short_declaration(
        &mut self,
        start: usize,
        is_public: bool,
    ) -> ParseResult<Binding> {
        let name = self.expect_identifier()?;
        if self.match_token(&Token::DoubleColon) {
            let value = self.parse_expression()?;
            self.expect(Token::Semicolon)?;
            return Ok(Binding::Constant(ConstantDecl {
                name,
                value,
                is_public,
                span: self.span_from(start),
            }));
        }

        self.expect(Token::ColonAssign)?;
        let init = self.parse_expression()?;
        self.expect(Token::Semicolon)?;
        Ok(Binding::Variable(VariableDecl {
            name,
            ty: None,
            init: Some(init),
            is_exported: false,
            is_public,
            span: self.span_from(start),
        }))
    }

    /// `[export] fn name(params) [T] { ... }`
    fn parse_function(
        &mut self,
        start: usize,
        is_public: bool,
        is_exported: bool,
    ) -> ParseResult<FunctionDecl> {
        self.expect(Token::Fn)?;
        let name = self.expect_identifier()?;
        let Parameters {
            params,
            is_variadic,
        } = self.parse_parameters()?;

        let return_type = if self.check(&Token::LeftBrace) {
            None
        } else {
            Some(self.parse_type()?)
        };

        let body = self.parse_block()?;

        Ok(FunctionDecl {
            name,
            params,
            is_variadic,
            return_type,
            body,
            is_exported,
            is_public,
            span: self.span_from(start),
        })
    }

    /// `extern fn name(params) [T];`（`extern`は消費済み）
    fn parse_extern_function(
        &mut self,
        start: usize,
        is_public: bool,
    ) -> ParseResult<ExternFunctionDecl> {
        self.expect(Token::Fn)?;
        let name = self.expect_identifier()?;
        let Parameters {
            params,
            is_variadic,
        } = self.parse_parameters()?;

        let return_type = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_type()?)
        };
        self.expect(Token::Semicolon)?;

        Ok(ExternFunctionDecl {
            name,
            params,
            is_variadic,
            return_type,
            is_public,
            span: self.span_from(start),
        })
    }

    /// `extern name T;`（`extern`は消費済み）
    fn parse_extern_variable(
        &mut self,
        start: usize,
        is_public: bool,
    ) -> ParseResult<ExternVariableDecl> {
        let name = self.expect_identifier()?;
        if self.features().colon_annotations {
            self.match_token(&Token::Colon);
        }
        let ty = self.parse_type()?;
        self.expect(Token::Semicolon)?;
        Ok(ExternVariableDecl {
            name,
            ty,
            is_public,
            span: self.span_from(start),
        })
    }

    /// `@foreign fn ...;`または`@foreign name: T;`
    fn parse_foreign(&mut self, start: usize, is_public: bool) -> ParseResult<Item> {
        // `@foreign`
        self.advance();
        if self.check(&Token::Fn) {
            self.parse_extern_function(start, is_public)
                .map(Item::ExternFunction)
        } else {
            self.parse_extern_variable(start, is_public)
                .map(Item::ExternVariable)
        }
    }

    /// `type Name = T;`
    fn parse_type_alias(&mut self, start: usize, is_public: bool) -> ParseResult<TypeAlias> {
        self.expect(Token::Type)?;
        let name = self.expect_identifier()?;
        self.expect(Token::Assign)?;
        let ty = self.parse_type()?;
        self.expect(Token::Semicolon)?;
        Ok(TypeAlias {
            name,
            ty,
            is_public,
            span: self.span_from(start),
        })
    }

    /// `(a T, b U, ...)`
    ///
    /// 末尾のカンマと最後の`...`（可変長引数）を許す。
    fn parse_parameters(&mut self) -> ParseResult<Parameters> {
        self.expect(Token::LeftParen)?;
        let mut params = Vec::new();
        let mut is_variadic = false;
        self.skip_lone_separator(&[Token::RightParen, Token::Ellipsis]);

        while !self.check(&Token::RightParen) {
            if self.match_token(&Token::Ellipsis) {
                is_variadic = true;
                break;
            }

            let start = self.current_span().start;
            let name = self.expect_identifier()?;
            if self.features().colon_annotations {
                self.match_token(&Token::Colon);
            }
            let ty = self.parse_type()?;
            params.push(Parameter {
                name,
                ty,
                span: self.span_from(start),
            });

            if !self.match_token(&Token::Comma) {
                is_variadic = self.match_token(&Token::Ellipsis);
                break;
            }
        }

        self.expect(Token::RightParen)?;
        Ok(Parameters {
            params,
            is_variadic,
        })
    }
}
