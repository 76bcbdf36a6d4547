//! Integration tests for pattern parsing and printing

use glot::parser::{Expression, ParseError, Part, ParameterSpec, parse_pattern};

fn single_part(pattern: &str) -> Part {
    let expression = parse_pattern(pattern).unwrap();
    assert_eq!(expression.parts.len(), 1, "expected one part in {pattern:?}");
    expression.parts.into_iter().next().unwrap()
}

#[test]
fn test_text_and_parameters() {
    let expression = parse_pattern("Hello {Name}!").unwrap();
    assert_eq!(
        expression.parts,
        vec![
            Part::text("Hello "),
            Part::Parameter(ParameterSpec::named("Name")),
            Part::text("!"),
        ]
    );
}

#[test]
fn test_parameter_with_format() {
    let Part::Parameter(spec) = single_part("{Price:N2}") else {
        panic!("expected parameter");
    };
    assert_eq!(spec.name, "Price");
    assert_eq!(spec.format, "N2");
    assert_eq!(spec.arguments, None);
}

#[test]
fn test_parameter_with_arguments_and_format() {
    let Part::Parameter(spec) = single_part("{@Key(Arg1, 'x'):uc}") else {
        panic!("expected parameter");
    };
    assert_eq!(spec.name, "@Key");
    assert_eq!(spec.arguments.as_deref(), Some("Arg1, 'x'"));
    assert_eq!(spec.format, "uc");
}

#[test]
fn test_parameter_names_are_trimmed() {
    let Part::Parameter(spec) = single_part("{ Name : N0 }") else {
        panic!("expected parameter");
    };
    assert_eq!(spec.name, "Name");
    assert_eq!(spec.format, "N0");
}

#[test]
fn test_switch_cases() {
    let Part::Switch(switch) = single_part("#Count{0: none | 1: one | other}") else {
        panic!("expected switch");
    };
    assert_eq!(switch.parameter.name, "Count");
    assert_eq!(switch.template, None);
    assert_eq!(switch.cases.len(), 3);
    assert_eq!(switch.cases[0].condition, Some(Expression::text("0")));
    assert_eq!(switch.cases[0].expression, Expression::text("none"));
    assert_eq!(switch.cases[1].condition, Some(Expression::text("1")));
    assert_eq!(switch.cases[2].condition, None);
    assert_eq!(switch.cases[2].expression, Expression::text("other"));
    assert!(switch.null_case.is_none());
}

#[test]
fn test_switch_with_format() {
    let Part::Switch(switch) = single_part("#Total:N2{>100: {#} (large) | {#}}") else {
        panic!("expected switch");
    };
    assert_eq!(switch.parameter.format, "N2");
    assert_eq!(switch.cases[0].condition, Some(Expression::text(">100")));
}

#[test]
fn test_null_case_keeps_its_position() {
    let Part::Switch(switch) = single_part("#Name{1: one | ? nobody | {#}}") else {
        panic!("expected switch");
    };
    let null_case = switch.null_case.unwrap();
    assert_eq!(null_case.position, 1);
    assert_eq!(null_case.expression, Expression::text("nobody"));
    assert_eq!(switch.cases.len(), 2);
}

#[test]
fn test_templated_switch() {
    let Part::Switch(switch) = single_part("#Plural(Count:N0){item | items}") else {
        panic!("expected switch");
    };
    assert_eq!(switch.template.as_deref(), Some("Plural"));
    assert_eq!(switch.parameter.name, "Count");
    assert_eq!(switch.parameter.format, "N0");
    assert!(switch.cases.iter().all(|case| case.condition.is_none()));
}

#[test]
fn test_quoted_case_keeps_edge_whitespace() {
    let Part::Switch(switch) = single_part(r#"#Items{"{#Index}: {#} "}"#) else {
        panic!("expected switch");
    };
    let parts = &switch.cases[0].expression.parts;
    assert_eq!(parts.first(), Some(&Part::text("")));
    assert_eq!(parts.last(), Some(&Part::text(" ")));
}

#[test]
fn test_format_group() {
    let Part::FormatGroup(group) = single_part("<Bold: text {X}>") else {
        panic!("expected format group");
    };
    assert_eq!(group.name, "Bold");
    assert_eq!(
        group.expression,
        Some(Expression::new(vec![
            Part::text("text "),
            Part::Parameter(ParameterSpec::named("X")),
        ]))
    );

    let Part::FormatGroup(group) = single_part("<Link>") else {
        panic!("expected format group");
    };
    assert_eq!(group.name, "Link");
    assert_eq!(group.expression, None);
}

#[test]
fn test_nested_switch_in_format_group() {
    let Part::FormatGroup(group) = single_part("<Em: #N{1: one | many}>") else {
        panic!("expected format group");
    };
    let inner = group.expression.unwrap();
    assert!(
        inner
            .parts
            .iter()
            .any(|part| matches!(part, Part::Switch(switch) if switch.cases.len() == 2))
    );
}

#[test]
fn test_escaped_stoppers_are_text() {
    assert_eq!(
        parse_pattern(r"a\{b\} \| \#c \<d\>").unwrap(),
        Expression::text("a{b} | #c <d>")
    );
}

#[test]
fn test_empty_pattern_is_empty_text() {
    assert_eq!(parse_pattern("").unwrap(), Expression::text(""));
}

#[test]
fn test_unclosed_parameter() {
    let error = parse_pattern("{Name").unwrap_err();
    let ParseError::Syntax {
        construct,
        offset,
        line,
        column,
        ..
    } = &error;
    assert_eq!(construct, "parameter");
    assert_eq!(*offset, 5);
    assert_eq!((*line, *column), (1, 6));
}

#[test]
fn test_unclosed_switch() {
    let error = parse_pattern("#N{1: a").unwrap_err();
    assert_eq!(error.construct(), "switch");
    assert_eq!(error.offset(), 7);
}

#[test]
fn test_stray_closing_brace() {
    let error = parse_pattern("a } b").unwrap_err();
    assert_eq!(error.construct(), "expression");
    assert_eq!(error.offset(), 2);
    assert!(error.to_string().contains("unexpected '}'"));
}

#[test]
fn test_error_position_on_later_line() {
    let error = parse_pattern("line one\n<Group: x").unwrap_err();
    let ParseError::Syntax { line, column, .. } = &error;
    assert_eq!(*line, 2);
    assert_eq!(*column, 10);
}

// =========================================================================
// Printing
// =========================================================================

#[test]
fn test_print_round_trip() {
    let patterns = [
        "Hello {Name}!",
        "{Name:Format}",
        "{Name(Arg1,Arg2):Format}",
        "#Name{0: zero | 1: one | other}",
        "#Name{? fallback | case}",
        "<Group: inner {X}>",
        "<Link>",
        r"a\{b\}\|\#\<\>\\",
        "#N{1: \" one \" | other}",
        "#Plural(Count:N0){item | items}",
        "#A{1: #B{x: <G: {C}> | y} | z}",
        r"#N{a\:b | c}",
        r"#N{\?x}",
    ];
    for pattern in patterns {
        let parsed = parse_pattern(pattern).unwrap();
        let printed = parsed.to_string();
        assert_eq!(parse_pattern(&printed).unwrap(), parsed, "{pattern} printed as {printed}");
    }
}

#[test]
fn test_print_is_canonical() {
    let parsed = parse_pattern("#Name{0:zero|1:one|  other }").unwrap();
    assert_eq!(parsed.to_string(), "#Name{0: zero | 1: one | other}");

    let parsed = parse_pattern("{ Name : N2 }").unwrap();
    assert_eq!(parsed.to_string(), "{Name:N2}");
}

#[test]
fn test_print_quotes_edge_whitespace() {
    let parsed = parse_pattern("#N{1: \" one \" | other}").unwrap();
    assert_eq!(parsed.to_string(), "#N{1: \" one \" | other}");
}

#[test]
fn test_print_escapes_text() {
    let parsed = parse_pattern(r"50\% \{off\}").unwrap();
    assert_eq!(parsed.to_string(), r"50% \{off\}");
}

#[test]
fn test_print_canonical_forms() {
    let patterns = [
        "#Name{0:zero|1:one|  other }",
        "{ Name : N2 }",
        "#N{1: \" one \" | other}",
        r"50\% \{off\}",
    ];
    let printed: Vec<String> = patterns
        .iter()
        .map(|pattern| format!("{pattern} => {}", parse_pattern(pattern).unwrap()))
        .collect();
    insta::assert_snapshot!(printed.join("\n"), @r#"
    #Name{0:zero|1:one|  other } => #Name{0: zero | 1: one | other}
    { Name : N2 } => {Name:N2}
    #N{1: " one " | other} => #N{1: " one " | other}
    50\% \{off\} => 50% \{off\}
    "#);
}
