//! インラインアセンブリのパーサーテスト

use super::*;
use pretty_assertions::assert_eq;

fn inline_asm(source: &str) -> InlineAssembly {
    match expr(source) {
        Expression::InlineAssembly(asm) => asm,
        other => panic!("expected inline assembly, got {:?}", other),
    }
}

#[test]
fn test_templates_only() {
    let asm = inline_asm(r#"asm { "nop" }"#);
    assert_eq!(asm.templates.len(), 1);
    assert_eq!(asm.templates[0].raw, "nop");
    assert!(asm.output.is_none());
    assert!(asm.inputs.is_none());
    assert!(asm.clobbers.is_none());
}

#[test]
fn test_empty_sections_differ_from_omitted_sections() {
    let asm = inline_asm(r#"asm { "nop" : : : "eax" }"#);

    let output = asm.output.expect("output section present");
    assert!(output.is_empty());
    let inputs = asm.inputs.expect("input section present");
    assert!(inputs.is_empty());
    let clobbers = asm.clobbers.expect("clobber section present");
    let names: Vec<_> = clobbers.operands.iter().map(|c| c.raw.as_str()).collect();
    assert_eq!(names, vec!["eax"]);
}

#[test]
fn test_full_operand_lists() {
    let asm = inline_asm(
        r#"asm {
            "add %1, %0"
            "inc %0"
            : "=r"(u64)
            : "r"(a + 1), "0"(b),
            : "cc", "memory",
        }"#,
    );

    assert_eq!(asm.templates.len(), 2);

    let output = asm.output.expect("output section present");
    assert_eq!(output.operands.len(), 1);
    assert_eq!(output.operands[0].constraint.raw, "=r");
    assert!(matches!(&output.operands[0].ty, Type::Named(n) if n.name == "u64"));

    let inputs = asm.inputs.expect("input section present");
    let operands: Vec<_> = inputs
        .operands
        .iter()
        .map(|i| (i.constraint.raw.as_str(), sexpr(&i.value)))
        .collect();
    assert_eq!(
        operands,
        vec![("r", "(+ a 1)".to_string()), ("0", "b".to_string())]
    );

    let clobbers = asm.clobbers.expect("clobber section present");
    assert_eq!(clobbers.operands.len(), 2);
}

#[test]
fn test_partial_sections() {
    let asm = inline_asm(r#"asm { "rdtsc" : "=A"(u64) }"#);
    assert_eq!(asm.output.map(|o| o.operands.len()), Some(1));
    assert!(asm.inputs.is_none());
    assert!(asm.clobbers.is_none());

    let asm = inline_asm(r#"asm { "hlt" : : "r"(x) }"#);
    assert_eq!(asm.output.map(|o| o.operands.len()), Some(0));
    assert_eq!(asm.inputs.map(|i| i.operands.len()), Some(1));
    assert!(asm.clobbers.is_none());
}

#[test]
fn test_inline_assembly_in_statements() {
    let module = assert_parse_success(
        r#"
        fn rdtsc() u64 {
            var t = asm { "rdtsc" : "=A"(u64) };
            asm { "pause" };
            return t;
        }
        "#,
    );
    let stmts = body(&module, 0);
    assert!(matches!(&stmts[0], Statement::Variable(v) if matches!(v.init, Some(Expression::InlineAssembly(_)))));
    assert!(matches!(&stmts[1], Statement::Expression(Expression::InlineAssembly(_))));
}

#[test]
fn test_inline_assembly_needs_a_template() {
    let err = parser::parse_expression("asm { : : }", &ParserConfig::default()).unwrap_err();
    match err {
        ParserError::UnexpectedToken { expected, .. } => {
            assert!(expected.contains("string literal"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_at_most_one_output() {
    assert!(parser::parse_expression(
        r#"asm { "x" : "=r"(u8), "=r"(u8) }"#,
        &ParserConfig::default()
    )
    .is_err());
}

#[test]
fn test_too_many_sections() {
    assert!(parser::parse_expression(r#"asm { "x" : : : : }"#, &ParserConfig::default()).is_err());
}

#[test]
fn test_double_colon_skips_a_section() {
    let asm = inline_asm(r#"asm { "out %0" :: "r"(x) : "memory" }"#);
    let output = asm.output.expect("output section present");
    assert!(output.is_empty());
    assert_eq!(asm.inputs.map(|i| i.operands.len()), Some(1));
    assert_eq!(asm.clobbers.map(|c| c.operands.len()), Some(1));

    let asm = inline_asm(r#"asm { "nop" ::: "eax" }"#);
    assert_eq!(asm.output.map(|o| o.is_empty()), Some(true));
    assert_eq!(asm.inputs.map(|i| i.is_empty()), Some(true));
    assert_eq!(asm.clobbers.map(|c| c.operands.len()), Some(1));
}
