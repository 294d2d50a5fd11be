//! エラー報告と回復のテスト

use super::*;
use barq::error::LexicalErrorKind;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn shallow(limit: usize) -> ParserConfig {
    ParserConfig::default().with_max_depth(limit)
}

#[test]
fn test_unexpected_end_of_input() {
    let errors = assert_parse_error("fn f() { ");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ParserError::UnexpectedEndOfInput { expected, span } => {
            assert!(expected.contains("`}`"), "expected list: {}", expected);
            assert_eq!(span.start, 9);
        }
        other => panic!("expected end-of-input error, got {:?}", other),
    }
}

#[test]
fn test_missing_semicolon_message() {
    let output = parse_source("const A = 1\nfn main() {}");
    assert_eq!(output.diagnostics.len(), 1);
    let error = &output.diagnostics[0];
    assert_eq!(error.to_string(), "expected `;`, found `fn`");
    assert_eq!(error.span(), Span::new(12, 14));
    // 次の関数から解析を再開する
    assert_eq!(output.module.items.len(), 1);
    assert_eq!(output.module.items[0].name(), Some("main"));
}

#[test]
fn test_recovery_resumes_at_next_item() {
    let output = parse_source("const A = ; fn main() {} var x i32;");
    assert_eq!(output.diagnostics.len(), 1);
    assert!(matches!(
        &output.diagnostics[0],
        ParserError::UnexpectedToken { expected, found, .. }
            if expected.contains("expression") && found == "`;`"
    ));
    assert_eq!(output.module.items.len(), 2);
    assert!(matches!(output.module.items[0], Item::Function(_)));
    assert!(matches!(output.module.items[1], Item::Variable(_)));
}

#[test]
fn test_recovery_skips_keywords_inside_braces() {
    let output = parse_source("fn f() { x = ; var y = 1; } fn g() {}");
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.module.items.len(), 1);
    assert_eq!(output.module.items[0].name(), Some("g"));
}

#[test]
fn test_every_broken_item_is_reported() {
    let output = parse_source("const = 1;\nvar x i32\nfn ok() {}\ntype T;\n");
    assert_eq!(output.diagnostics.len(), 3);
    assert_eq!(output.module.items.len(), 1);

    let starts: Vec<_> = output.diagnostics.iter().map(|d| d.span().start).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
}

#[test]
fn test_lexical_errors_are_sorted_with_syntax_errors() {
    // `$`はレキサーの先読みで構文エラーより先に記録されるが、位置順に並ぶ
    let output = parse_source("const A = ; $ fn main() {}");
    assert_eq!(output.diagnostics.len(), 2);
    assert!(matches!(
        &output.diagnostics[0],
        ParserError::UnexpectedToken { span, .. } if *span == Span::new(10, 11)
    ));
    assert!(matches!(
        &output.diagnostics[1],
        ParserError::Lexical { kind: LexicalErrorKind::UnrecognizedCharacter, text, .. } if text == "$"
    ));
    assert_eq!(output.module.items.len(), 1);
}

#[test]
fn test_lexical_error_alone_keeps_the_tree() {
    let output = parse_source("fn main() { x = 1 $; }");
    assert_eq!(output.diagnostics.len(), 1);
    assert!(matches!(output.diagnostics[0], ParserError::Lexical { .. }));
    assert_eq!(body(&output.module, 0).len(), 1);
}

#[test]
fn test_unterminated_string() {
    let errors = assert_parse_error("const S = \"abc;");
    assert!(errors.iter().any(|e| matches!(
        e,
        ParserError::Lexical { kind: LexicalErrorKind::UnterminatedString, .. }
    )));
}

#[test]
fn test_unterminated_character() {
    let result = parser::parse_expression("'a", &ParserConfig::default());
    assert!(matches!(
        result,
        Err(ParserError::Lexical { kind: LexicalErrorKind::UnterminatedCharacter, .. })
    ));
}

#[test]
fn test_nesting_limit_for_parentheses() {
    let source = format!("{}x{}", "(".repeat(100), ")".repeat(100));
    let result = parser::parse_expression(&source, &shallow(16));
    assert!(matches!(result, Err(ParserError::NestingTooDeep { limit: 16, .. })));
}

#[test_case("-" ; "negate")]
#[test_case("!" ; "not")]
#[test_case("~" ; "bit not")]
#[test_case("&" ; "address of")]
fn test_nesting_limit_for_unary(op: &str) {
    let source = format!("{}x", op.repeat(100));
    let result = parser::parse_expression(&source, &shallow(16));
    assert!(matches!(result, Err(ParserError::NestingTooDeep { .. })));
}

#[test]
fn test_nesting_limit_for_types() {
    let source = format!("{}u8", "*".repeat(100));
    let result = parser::parse_type(&source, &shallow(16));
    assert!(matches!(result, Err(ParserError::NestingTooDeep { .. })));
}

#[test]
fn test_nesting_limit_for_statements() {
    let source = format!(
        "fn f() {{ {} }} fn g() {{}}",
        "if x { ".repeat(20) + &"}".repeat(20)
    );
    let output = parser::parse_module_with(&source, &shallow(16));
    assert_eq!(output.diagnostics.len(), 1);
    assert!(matches!(
        output.diagnostics[0],
        ParserError::NestingTooDeep { limit: 16, .. }
    ));
    assert_eq!(output.module.items.len(), 1);
    assert_eq!(output.module.items[0].name(), Some("g"));
}

#[test]
fn test_default_depth_accepts_reasonable_nesting() {
    let source = format!("{}x{}", "(".repeat(200), ")".repeat(200));
    assert!(parser::parse_expression(&source, &ParserConfig::default()).is_ok());
}

#[test]
fn test_default_depth_rejects_pathological_nesting() {
    let source = format!("{}x{}", "(".repeat(1000), ")".repeat(1000));
    let result = parser::parse_expression(&source, &ParserConfig::default());
    assert!(matches!(result, Err(ParserError::NestingTooDeep { .. })));
}

#[test]
fn test_default_depth_is_safe_on_the_calling_thread() {
    let source = format!("{}x{}", "(".repeat(300), ")".repeat(300));
    let result = parser::parse_expression(&source, &ParserConfig::default());
    assert!(matches!(
        result,
        Err(ParserError::NestingTooDeep {
            limit: barq::DEFAULT_MAX_DEPTH,
            ..
        })
    ));

    let source = format!("const X = {}1{};", "(".repeat(200), ")".repeat(200));
    let output = parse_source(&source);
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
}

#[test]
fn test_deep_types_and_statements_under_default_depth() {
    let ty = format!("{}i32", "*".repeat(300));
    assert!(matches!(
        parser::parse_type(&ty, &ParserConfig::default()),
        Err(ParserError::NestingTooDeep { .. })
    ));

    let stmt = "if x { ".repeat(300) + &"}".repeat(300);
    assert!(matches!(
        parser::parse_statement(&stmt, &ParserConfig::default()),
        Err(ParserError::NestingTooDeep { .. })
    ));
}

#[test]
fn test_million_term_sum_is_rejected_and_dropped() {
    let source = format!("const X = a{}; fn g() {{}}", "+a".repeat(1_000_000));
    let output = parse_source(&source);
    assert_eq!(output.diagnostics.len(), 1);
    assert!(matches!(
        output.diagnostics[0],
        ParserError::NestingTooDeep { .. }
    ));
    assert_eq!(output.module.items.len(), 1);
    assert_eq!(output.module.items[0].name(), Some("g"));
    drop(output);
}

#[test_case("f", "()" ; "calls")]
#[test_case("a", ".b" ; "members")]
#[test_case("a", "[0]" ; "subscripts")]
#[test_case("a", " as u8" ; "casts")]
#[test_case("a", " = b" ; "assignments")]
#[test_case("a", " * b" ; "products")]
fn test_long_left_chains_count_against_the_limit(head: &str, link: &str) {
    let long = format!("{}{}", head, link.repeat(1000));
    let result = parser::parse_expression(&long, &ParserConfig::default());
    assert!(matches!(result, Err(ParserError::NestingTooDeep { .. })));

    let short = format!("{}{}", head, link.repeat(100));
    assert!(matches!(
        parser::parse_expression(&short, &shallow(16)),
        Err(ParserError::NestingTooDeep { limit: 16, .. })
    ));
    assert!(parser::parse_expression(&short, &ParserConfig::default()).is_ok());
}

#[test_case("}}}{{{" ; "unbalanced braces")]
#[test_case("fn (((" ; "open parens")]
#[test_case("@@@ $$ \"" ; "lexical noise")]
#[test_case("pub pub pub" ; "repeated pub")]
#[test_case(")))" ; "closing parens")]
#[test_case("asm { \"x\" : : : : }" ; "too many asm sections")]
#[test_case("switch (x) { 1 => ; }" ; "statement at top level")]
fn test_garbage_is_reported_without_panicking(source: &str) {
    let output = parse_source(source);
    assert!(!output.diagnostics.is_empty());
    assert!(output.diagnostics.iter().all(|d| d.span().end <= source.len()));
}

#[test]
fn test_into_result() {
    assert!(parse_source("fn main() {}").into_result().is_ok());
    let errors = parse_source("fn main() {").into_result().unwrap_err();
    assert_eq!(errors.len(), 1);
}
