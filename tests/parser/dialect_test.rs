//! 方言ごとの構文のパーサーテスト

use super::*;
use barq::error::LexicalErrorKind;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test]
fn test_barq_namespaced_identifiers() {
    assert_eq!(sexpr(&expr("std:io:print(x)")), "(call std:io:print x)");
    assert_eq!(sexpr(&expr("mem::copy(a, b)")), "(call mem::copy a b)");
}

#[test]
fn test_cerium_has_no_namespaced_identifiers() {
    let config = ParserConfig::for_dialect(Dialect::Cerium);
    assert!(parser::parse_expression("std:io", &config).is_err());
}

#[test_case(Dialect::Barq2 ; "barq2")]
#[test_case(Dialect::Cerium ; "cerium")]
fn test_special_identifiers(dialect: Dialect) {
    assert_eq!(sexpr(&expr_in("@sizeOf(T) + 1", dialect)), "(+ (call @sizeOf T) 1)");
}

#[test]
fn test_special_identifiers_are_a_lexical_error_in_barq() {
    let errors = assert_parse_error("const X = @sizeOf(T);");
    assert!(errors.iter().any(|e| matches!(
        e,
        ParserError::Lexical {
            kind: LexicalErrorKind::DisabledSpecialIdentifier,
            text,
            ..
        } if text == "@sizeOf"
    )));
}

#[test]
fn test_cerium_short_declarations() {
    let module = assert_parse_success_in(
        r#"
        MAX :: 64;
        pub VERSION :: "1.0";
        counter := 0;
        fn main() {
            LIMIT :: MAX * 2;
            i := 0;
            i = i + 1;
        }
        "#,
        Dialect::Cerium,
    );

    assert!(matches!(&module.items[0], Item::Constant(c) if c.name == "MAX" && !c.is_public));
    assert!(matches!(&module.items[1], Item::Constant(c) if c.name == "VERSION" && c.is_public));
    assert!(matches!(&module.items[2], Item::Variable(v) if v.ty.is_none() && v.init.is_some()));

    let stmts = body(&module, 3);
    assert!(matches!(&stmts[0], Statement::Constant(c) if sexpr(&c.value) == "(* MAX 2)"));
    assert!(matches!(&stmts[1], Statement::Variable(v) if v.name == "i"));
    assert!(matches!(&stmts[2], Statement::Expression(Expression::Assign(_))));
}

#[test]
fn test_short_declarations_need_cerium() {
    assert_parse_error_in("MAX :: 64;", Dialect::Barq2);
    assert_parse_error_in("x := 1;", Dialect::Barq2);
}

#[test]
fn test_cerium_foreign_declarations() {
    let module = assert_parse_success_in(
        r#"
        @foreign fn puts(s: *const u8) i32;
        @foreign errno: i32;
        pub @foreign environ: **u8;
        "#,
        Dialect::Cerium,
    );

    let Item::ExternFunction(puts) = &module.items[0] else {
        panic!("expected extern function");
    };
    assert_eq!(puts.name, "puts");
    assert_eq!(puts.params[0].name, "s");
    assert!(matches!(&puts.params[0].ty, Type::Pointer(p) if p.is_const));

    assert!(matches!(&module.items[1], Item::ExternVariable(v) if v.name == "errno"));
    assert!(matches!(&module.items[2], Item::ExternVariable(v) if v.is_public));
}

#[test]
fn test_cerium_colon_annotations() {
    let module = assert_parse_success_in(
        r#"
        type Point = struct { x: i32, y: i32 };
        var origin: Point;
        fn dist(a: Point, b: Point) u32 {
            var dx: i32 = a.x - b.x;
            return dx as u32;
        }
        "#,
        Dialect::Cerium,
    );

    let Item::TypeAlias(point) = &module.items[0] else {
        panic!("expected type alias");
    };
    let Type::Struct(st) = &point.ty else {
        panic!("expected struct type");
    };
    assert_eq!(st.fields.len(), 2);
    assert!(matches!(&module.items[1], Item::Variable(v) if v.ty.is_some()));
    assert!(matches!(&module.items[2], Item::Function(f) if f.params.len() == 2));
}

#[test]
fn test_colon_annotations_need_cerium() {
    assert_parse_error_in("var origin : Point;", Dialect::Barq2);
    assert_parse_error_in("fn f(a : i32) {}", Dialect::Barq2);
}

#[test]
fn test_barq_colon_joins_the_identifier() {
    // Barqでは`origin:`までが1つの名前空間付き識別子になる
    let module = assert_parse_success("var origin: Point;");
    assert!(matches!(&module.items[0], Item::Variable(v) if v.name == "origin:"));
}

#[test]
fn test_barq2_slices_and_function_types() {
    let module = assert_parse_success_in(
        r#"
        type Handler = fn([]const u8) i32;
        fn each(items []u8, f fn(u8)) {}
        "#,
        Dialect::Barq2,
    );
    assert!(matches!(&module.items[0], Item::TypeAlias(t) if matches!(t.ty, Type::Function(_))));
    let Item::Function(each) = &module.items[1] else {
        panic!("expected function");
    };
    assert!(matches!(&each.params[0].ty, Type::Slice(s) if !s.is_const));
    assert!(matches!(&each.params[1].ty, Type::Function(f) if f.return_type.is_none()));
}
