//! パーサーテストの共通モジュール
//!
//! パーサーテストで使用する共通のヘルパー関数を定義する。

use barq::ast::*;
use barq::dialect::{Dialect, ParserConfig};
use barq::error::ParserError;
use barq::parser::{self, ParseOutput};

/// 既定の方言（Barq）でソースコードを解析するヘルパー関数
pub fn parse_source(source: &str) -> ParseOutput {
    parser::parse_module(source)
}

/// 方言を指定してソースコードを解析するヘルパー関数
pub fn parse_in(source: &str, dialect: Dialect) -> ParseOutput {
    parser::parse_module_with(source, &ParserConfig::for_dialect(dialect))
}

/// 解析に成功することを確認するヘルパー関数
pub fn assert_parse_success(source: &str) -> Module {
    assert_parse_success_in(source, Dialect::Barq)
}

pub fn assert_parse_success_in(source: &str, dialect: Dialect) -> Module {
    let output = parse_in(source, dialect);
    assert!(
        output.diagnostics.is_empty(),
        "Parsing should succeed, got {:?}",
        output.diagnostics
    );
    output.module
}

/// 解析に失敗することを確認し、診断を返すヘルパー関数
pub fn assert_parse_error(source: &str) -> Vec<ParserError> {
    assert_parse_error_in(source, Dialect::Barq)
}

pub fn assert_parse_error_in(source: &str, dialect: Dialect) -> Vec<ParserError> {
    let output = parse_in(source, dialect);
    assert!(!output.diagnostics.is_empty(), "Parsing should fail");
    output.diagnostics
}

/// 単一の式を解析
pub fn expr(source: &str) -> Expression {
    expr_in(source, Dialect::Barq)
}

pub fn expr_in(source: &str, dialect: Dialect) -> Expression {
    parser::parse_expression(source, &ParserConfig::for_dialect(dialect))
        .expect("Expression should parse")
}

/// 単一の文を解析
pub fn stmt(source: &str) -> Statement {
    parser::parse_statement(source, &ParserConfig::default()).expect("Statement should parse")
}

/// 単一の型を解析
pub fn ty_in(source: &str, dialect: Dialect) -> Type {
    parser::parse_type(source, &ParserConfig::for_dialect(dialect)).expect("Type should parse")
}

/// 関数本体の文を取り出す
pub fn body(module: &Module, index: usize) -> &[Statement] {
    match &module.items[index] {
        Item::Function(func) => &func.body.statements,
        other => panic!("expected function, got {:?}", other),
    }
}

/// 式の構造をS式で表す（比較用）
pub fn sexpr(expr: &Expression) -> String {
    match expr {
        Expression::Identifier(id) => id.name.clone(),
        Expression::SpecialIdentifier(id) => format!("@{}", id.name),
        Expression::String(lit) => format!("\"{}\"", lit.raw),
        Expression::Character(lit) => format!("'{}'", lit.raw),
        Expression::Integer(lit) => lit.text.clone(),
        Expression::Float(lit) => lit.text.clone(),
        Expression::Parentheses(p) => format!("(paren {})", sexpr(&p.inner)),
        Expression::Unary(u) => format!("({} {})", u.op, sexpr(&u.operand)),
        Expression::Binary(b) => format!("({} {} {})", b.op, sexpr(&b.left), sexpr(&b.right)),
        Expression::Call(c) => {
            let mut parts = vec!["call".to_string(), sexpr(&c.callee)];
            parts.extend(c.args.iter().map(sexpr));
            format!("({})", parts.join(" "))
        }
        Expression::Assign(a) => format!("({} {} {})", a.op, sexpr(&a.target), sexpr(&a.value)),
        Expression::Subscript(s) => format!("(index {} {})", sexpr(&s.target), sexpr(&s.index)),
        Expression::Member(m) => match &m.key {
            MemberKey::Identifier(name) => format!("(. {} {})", sexpr(&m.target), name),
            MemberKey::Wildcard => format!("(. {} *)", sexpr(&m.target)),
        },
        Expression::Cast(c) => format!(
            "(as {} {})",
            sexpr(&c.expr),
            barq::printer::print_type(&c.ty)
        ),
        Expression::InlineAssembly(_) => "(asm)".to_string(),
    }
}

// サブモジュールの宣言
mod asm_test;
mod dialect_test;
mod error_test;
mod expression_test;
mod type_test;
