//! 型のパーサーテスト

use super::*;
use barq::printer::print_type;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case("u8" ; "named")]
#[test_case("*u8" ; "pointer")]
#[test_case("*const u8" ; "const pointer")]
#[test_case("**const u8" ; "pointer to const pointer")]
#[test_case("[*]u8" ; "many pointer")]
#[test_case("[*]const u8" ; "const many pointer")]
#[test_case("[16]u8" ; "array")]
#[test_case("[N][4]*T" ; "nested array with named length")]
#[test_case("struct { x i32, y *u8 }" ; "struct")]
#[test_case("struct {}" ; "empty struct")]
#[test_case("enum { A, B }" ; "enum")]
#[test_case("enum u16 { A = 1, B, C = 0x10 }" ; "enum with backing type")]
fn test_barq_types_round_trip(source: &str) {
    assert_eq!(print_type(&ty_in(source, Dialect::Barq)), source);
}

#[test_case("[]u8" ; "slice")]
#[test_case("[]const u8" ; "const slice")]
#[test_case("fn(i32, *u8) i32" ; "function type")]
#[test_case("fn()" ; "function type without return")]
#[test_case("fn(*const u8, ...) i32" ; "variadic function type")]
#[test_case("*fn([]u8) void" ; "pointer to function type")]
fn test_barq2_types_round_trip(source: &str) {
    assert_eq!(print_type(&ty_in(source, Dialect::Barq2)), source);
}

#[test]
fn test_pointer_flags() {
    let Type::Pointer(ptr) = ty_in("[*]const u8", Dialect::Barq) else {
        panic!("expected pointer type");
    };
    assert!(ptr.is_many);
    assert!(ptr.is_const);
    assert!(matches!(ptr.pointee.as_ref(), Type::Named(n) if n.name == "u8"));

    let Type::Pointer(ptr) = ty_in("*T", Dialect::Barq) else {
        panic!("expected pointer type");
    };
    assert!(!ptr.is_many);
    assert!(!ptr.is_const);
}

#[test]
fn test_array_sizes() {
    let Type::Array(array) = ty_in("[0x10]u8", Dialect::Barq) else {
        panic!("expected array type");
    };
    match &array.size {
        ArraySize::Integer(lit) => assert_eq!(lit.value(), Some((16, None))),
        other => panic!("expected integer size, got {:?}", other),
    }

    let Type::Array(array) = ty_in("[LEN]u8", Dialect::Barq) else {
        panic!("expected array type");
    };
    assert!(matches!(&array.size, ArraySize::Named { name, .. } if name == "LEN"));
}

#[test]
fn test_enum_members() {
    let Type::Enum(en) = ty_in("enum u8 { Red, Green = 4, Blue, }", Dialect::Barq) else {
        panic!("expected enum type");
    };
    assert!(matches!(en.backing.as_deref(), Some(Type::Named(n)) if n.name == "u8"));
    let members: Vec<_> = en
        .members
        .iter()
        .map(|m| (m.name.as_str(), m.value.as_ref().map(|v| v.text.as_str())))
        .collect();
    assert_eq!(
        members,
        vec![("Red", None), ("Green", Some("4")), ("Blue", None)]
    );
}

#[test]
fn test_struct_field_order_and_spans() {
    let source = "struct { b u8, a u16, }";
    let Type::Struct(st) = ty_in(source, Dialect::Barq) else {
        panic!("expected struct type");
    };
    let names: Vec<_> = st.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(st.fields[0].span, Span::new(9, 13));
    assert_eq!(st.span, Span::new(0, source.len()));
}

#[test]
fn test_slices_need_dialect_support() {
    let err = parser::parse_type("[]u8", &ParserConfig::for_dialect(Dialect::Barq)).unwrap_err();
    match err {
        ParserError::UnexpectedToken { expected, .. } => {
            assert!(expected.contains("array length"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_function_types_need_dialect_support() {
    assert!(parser::parse_type("fn(i32) i32", &ParserConfig::for_dialect(Dialect::Barq)).is_err());
}

#[test]
fn test_empty_struct_and_enum_may_hold_a_lone_comma() {
    let Type::Struct(st) = ty_in("struct {,}", Dialect::Barq) else {
        panic!("expected struct type");
    };
    assert!(st.fields.is_empty());
    assert_eq!(print_type(&Type::Struct(st)), "struct {}");

    let Type::Enum(en) = ty_in("enum u8 { , }", Dialect::Barq) else {
        panic!("expected enum type");
    };
    assert!(en.members.is_empty());

    assert!(parser::parse_type("struct {, x i32}", &ParserConfig::default()).is_err());
    assert!(parser::parse_type("enum {,,}", &ParserConfig::default()).is_err());
}

#[test]
fn test_enum_value_must_be_integer() {
    assert!(parser::parse_type("enum { A = B }", &ParserConfig::default()).is_err());
}

#[test]
fn test_array_has_no_const_qualifier() {
    assert!(parser::parse_type("[4]const u8", &ParserConfig::default()).is_err());
}
