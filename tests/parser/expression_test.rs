//! 式のパーサーテスト

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case("a + b * c", "(+ a (* b c))" ; "product binds tighter than sum")]
#[test_case("a * b + c", "(+ (* a b) c)" ; "product on the left")]
#[test_case("a - b - c", "(- (- a b) c)" ; "sum is left associative")]
#[test_case("a / b % c", "(% (/ a b) c)" ; "product is left associative")]
#[test_case("-a as T + b", "(+ (as (- a) T) b)" ; "cast between unary and sum")]
#[test_case("a * b as u8", "(* a (as b u8))" ; "cast binds tighter than product")]
#[test_case("a.b as T", "(as (. a b) T)" ; "member binds tighter than cast")]
#[test_case("a as *const u8 as usize", "(as (as a *const u8) usize)" ; "casts chain left")]
#[test_case("p.*.x", "(. (. p *) x)" ; "member wildcard dereference")]
#[test_case("a < b < c", "(< (< a b) c)" ; "comparisons chain left")]
#[test_case("a == b | c", "(== a (| b c))" ; "bit or binds tighter than comparison")]
#[test_case("a | b ^ c & d", "(| a (^ b (& c d)))" ; "bitwise ladder")]
#[test_case("a << 1 + 2", "(<< a (+ 1 2))" ; "sum binds tighter than shift")]
#[test_case("a & b << c", "(& a (<< b c))" ; "shift binds tighter than bit and")]
#[test_case("a = b = c", "(= (= a b) c)" ; "assignment is left associative")]
#[test_case("x += y * 2", "(+= x (* y 2))" ; "compound assignment")]
#[test_case("x <<= a < b", "(<<= x (< a b))" ; "assignment is lowest")]
#[test_case("-a.b(c)[d]", "(- (index (call (. a b) c) d))" ; "postfix binds tighter than prefix")]
#[test_case("&x.y", "(& (. x y))" ; "address of member")]
#[test_case("!~x", "(! (~ x))" ; "nested prefix operators")]
#[test_case("- -x", "(- (- x))" ; "double negation")]
#[test_case("f(a, b,)", "(call f a b)" ; "trailing comma in arguments")]
#[test_case("f()(1)", "(call (call f) 1)" ; "calls chain")]
#[test_case("(a + b) * c", "(* (paren (+ a b)) c)" ; "parentheses group")]
#[test_case("a[i][j]", "(index (index a i) j)" ; "subscripts chain")]
fn test_expression_structure(source: &str, expected: &str) {
    assert_eq!(sexpr(&expr(source)), expected);
}

#[test]
fn test_binary_expression_tree() {
    let expected = Expression::Binary(BinaryExpr {
        left: Box::new(Expression::Identifier(Identifier {
            name: "a".to_string(),
            span: Span::new(0, 1),
        })),
        op: BinaryOp::Add,
        right: Box::new(Expression::Binary(BinaryExpr {
            left: Box::new(Expression::Identifier(Identifier {
                name: "b".to_string(),
                span: Span::new(4, 5),
            })),
            op: BinaryOp::Multiply,
            right: Box::new(Expression::Identifier(Identifier {
                name: "c".to_string(),
                span: Span::new(8, 9),
            })),
            span: Span::new(4, 9),
        })),
        span: Span::new(0, 9),
    });

    assert_eq!(expr("a + b * c"), expected);
}

#[test]
fn test_member_wildcard_is_a_member_key() {
    let Expression::Member(outer) = expr("p.*.x") else {
        panic!("expected member access");
    };
    assert_eq!(outer.key, MemberKey::Identifier("x".to_string()));

    let Expression::Member(inner) = outer.target.as_ref() else {
        panic!("expected member access");
    };
    assert_eq!(inner.key, MemberKey::Wildcard);
    assert!(inner.key.is_deref());
    assert_eq!(inner.span, Span::new(0, 3));
}

#[test]
fn test_literals_keep_raw_text() {
    let Expression::String(s) = expr(r#""a\"b\n""#) else {
        panic!("expected string literal");
    };
    assert_eq!(s.raw, r#"a\"b\n"#);
    assert_eq!(s.value(), "a\"b\n");

    let Expression::Character(c) = expr(r"'\n'") else {
        panic!("expected character literal");
    };
    assert_eq!(c.raw, r"\n");

    let Expression::Integer(i) = expr("0x1F_u8") else {
        panic!("expected integer literal");
    };
    assert_eq!(i.text, "0x1F_u8");
    assert_eq!(i.value(), Some((31, Some("u8"))));

    let Expression::Float(f) = expr("3.25") else {
        panic!("expected float literal");
    };
    assert_eq!(f.text, "3.25");
}

#[test]
fn test_cast_to_compound_types() {
    let Expression::Cast(cast) = expr("x as [4]u8") else {
        panic!("expected cast");
    };
    assert!(matches!(cast.ty, Type::Array(_)));

    let Expression::Cast(cast) = expr("x as struct { a i32 }") else {
        panic!("expected cast");
    };
    assert!(matches!(cast.ty, Type::Struct(_)));
}

#[test]
fn test_call_spans() {
    let Expression::Call(call) = expr("print(a, 1)") else {
        panic!("expected call");
    };
    assert_eq!(call.span, Span::new(0, 11));
    assert_eq!(call.args.len(), 2);
    assert_eq!(call.args[1].span(), Span::new(9, 10));
}

#[test]
fn test_invalid_member_key() {
    let err = parser::parse_expression("a.1", &ParserConfig::default()).unwrap_err();
    match err {
        ParserError::UnexpectedToken { expected, found, .. } => {
            assert!(expected.contains("identifier"));
            assert!(expected.contains("`*`"));
            assert_eq!(found, "integer literal `1`");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_incomplete_expressions() {
    let config = ParserConfig::default();
    assert!(matches!(
        parser::parse_expression("a +", &config),
        Err(ParserError::UnexpectedEndOfInput { .. })
    ));
    assert!(matches!(
        parser::parse_expression("f(a", &config),
        Err(ParserError::UnexpectedEndOfInput { .. })
    ));
    assert!(matches!(
        parser::parse_expression("a b", &config),
        Err(ParserError::UnexpectedToken { .. })
    ));
    assert!(matches!(
        parser::parse_expression("f(,)", &config),
        Err(ParserError::UnexpectedToken { .. })
    ));
}
