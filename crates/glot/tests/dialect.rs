//! Integration tests for dialect resolution, binding and case rewriting

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use glot::dialect::{
    BindError, BoundPart, BoundSwitch, CompileError, Dialect, HtmlTagTransformer, StrategyRole,
};
use glot::interpreter::{EvalContext, EvalError, FormatError};
use glot::parser::{CustomNode, DefaultParser, Expression, ParameterSpec, Part, PatternParser, ParseError};
use glot::strategy::evaluators::DirectEvaluator;
use glot::strategy::formatters::RomanFormatter;
use glot::strategy::{CustomPart, ParameterEvaluator, SwitchCondition, ValueFormatter};
use glot::types::{Language, ParameterSet, ParameterValue, Value};

fn first_part(dialect: &Dialect, pattern: &str) -> BoundPart {
    let compiled = dialect.compile(pattern).unwrap();
    compiled.bound().parts[0].clone()
}

fn bound_switch(dialect: &Dialect, pattern: &str) -> BoundSwitch {
    match first_part(dialect, pattern) {
        BoundPart::Switch(switch) => switch,
        other => panic!("expected switch, got {other:?}"),
    }
}

fn render(dialect: &Dialect, pattern: &str, parameters: ParameterSet) -> String {
    let compiled = dialect.compile(pattern).unwrap();
    let mut ctx = EvalContext::new(parameters);
    compiled.evaluate(&mut ctx).unwrap()
}

/// Appends `!` to the upper-cased text.
struct Shout;

impl ValueFormatter for Shout {
    fn format(&self, value: &ParameterValue, _ctx: &EvalContext<'_>) -> Result<String, FormatError> {
        Ok(format!("{}!", value.value().to_string().to_uppercase()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =========================================================================
// Factory precedence
// =========================================================================

#[test]
fn test_evaluator_precedence() {
    let dialect = Dialect::standard();
    let kind = |pattern: &str| match first_part(&dialect, pattern) {
        BoundPart::Parameter(parameter) => parameter.evaluator.kind(),
        other => panic!("expected parameter, got {other:?}"),
    };
    assert_eq!(kind("{@Greeting}"), "LookupEvaluator");
    assert_eq!(kind("{@Order.Total}"), "LookupEvaluator");
    assert_eq!(kind("{Order.Total}"), "PropertyEvaluator");
    assert_eq!(kind("{Name}"), "DirectEvaluator");
}

#[test]
fn test_formatter_precedence() {
    let dialect = Dialect::standard();
    let kind = |format: &str| dialect.resolve_formatter(format).unwrap().kind();
    assert_eq!(kind("roman"), "RomanFormatter");
    assert_eq!(kind("Roman"), "FormatStringFormatter");
    assert_eq!(kind("uc"), "CaseFormatter");
    assert_eq!(kind("capitalize-first"), "CaseFormatter");
    assert_eq!(kind("N2"), "FormatStringFormatter");
    assert_eq!(kind(""), "DefaultFormatter");
}

#[test]
fn test_condition_precedence() {
    let dialect = Dialect::standard();
    let kind = |spelling: &str| dialect.resolve_condition_spelling(spelling).unwrap().kind();
    assert_eq!(kind(""), "TakeAllCondition");
    assert_eq!(kind("Other"), "TakeAllCondition");
    assert_eq!(kind("true"), "TakeAllCondition");
    assert_eq!(kind("1 or 2"), "BooleanCondition");
    assert_eq!(kind("(>5 and <10)"), "BooleanCondition");
    assert_eq!(kind("@Rules__Plural"), "LookupCondition");
    assert_eq!(kind("%10=1"), "ArithmeticCondition");
    assert_eq!(kind("+5*2 >= 20"), "ArithmeticCondition");
    assert_eq!(kind("[1,5)"), "IntervalCondition");
    assert_eq!(kind(">= PT1H"), "IntervalCondition");
    assert_eq!(kind(">100"), "IntervalCondition");
    assert_eq!(kind("few"), "PluralCondition");
    assert_eq!(kind("1,2,3"), "ValueListCondition");
    assert_eq!(kind("!= red, green"), "ValueListCondition");
}

#[test]
fn test_plural_keywords_precede_value_lists() {
    let render_en = |dialect: &Dialect| {
        let compiled = dialect.compile("#N{one: x | y}").unwrap();
        let mut ctx = EvalContext::builder()
            .language(Language::parse("en").unwrap())
            .parameters(ParameterSet::new().with("N", 1))
            .build();
        compiled.evaluate(&mut ctx).unwrap()
    };
    assert_eq!(render_en(&Dialect::standard()), "x");

    let exact = Dialect::standard_without_plurals();
    assert_eq!(exact.resolve_condition_spelling("one").unwrap().kind(), "ValueListCondition");
    assert_eq!(render_en(&exact), "y");
    assert_eq!(render(&exact, "#N{one: x | y}", ParameterSet::new().with("N", "one")), "x");
}

#[test]
fn test_resolve_condition_from_expression() {
    let dialect = Dialect::standard();
    let condition = dialect.resolve_condition(&Expression::text("0")).unwrap();
    assert_eq!(condition.kind(), "ValueListCondition");
}

#[test]
fn test_inserted_closure_factory_wins() {
    let mut dialect = Dialect::standard();
    dialect.insert_formatter(0, |format: &str| -> Option<Arc<dyn ValueFormatter>> {
        (format == "roman" || format == "shout").then(|| Arc::new(Shout) as Arc<dyn ValueFormatter>)
    });
    let params = ParameterSet::new().with("N", 4).with("Name", "bob");
    assert_eq!(render(&dialect, "{N:roman}", params.clone()), "4!");
    assert_eq!(render(&dialect, "{Name:shout}", params), "BOB!");
}

#[test]
fn test_appended_factory_is_consulted_last() {
    let dialect = Dialect::standard().with_formatter(|_: &str| -> Option<Arc<dyn ValueFormatter>> {
        Some(Arc::new(Shout))
    });
    let params = ParameterSet::new().with("N", 4);
    assert_eq!(render(&dialect, "{N:roman}", params), "IV");
}

/// Matches even integers.
struct Even;

impl SwitchCondition for Even {
    fn matches(&self, value: &ParameterValue, _ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        Ok(matches!(value.value(), Value::Number(n) if n % 2 == 0))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn test_inserted_closure_condition() {
    let mut dialect = Dialect::standard();
    dialect.insert_condition(0, |spelling: &str| -> Option<Arc<dyn SwitchCondition>> {
        (spelling == "even").then(|| Arc::new(Even) as Arc<dyn SwitchCondition>)
    });
    let pattern = "#N{even: even | odd}";
    assert_eq!(render(&dialect, pattern, ParameterSet::new().with("N", 4)), "even");
    assert_eq!(render(&dialect, pattern, ParameterSet::new().with("N", 3)), "odd");

    // Without the factory "even" is read as a one-entry value list.
    let standard = Dialect::standard();
    assert_eq!(render(&standard, pattern, ParameterSet::new().with("N", 4)), "odd");
    assert_eq!(render(&standard, pattern, ParameterSet::new().with("N", "even")), "even");
}

// =========================================================================
// Binding
// =========================================================================

#[test]
fn test_switch_drops_default_formatter() {
    let dialect = Dialect::standard();
    assert!(bound_switch(&dialect, "#N{1: a | b}").formatter.is_none());

    let formatted = bound_switch(&dialect, "#N:roman{4: four {#} | {#}}");
    assert_eq!(
        formatted.formatter.as_deref().map(ValueFormatter::kind),
        Some("RomanFormatter")
    );
    assert_eq!(
        render(&dialect, "#N:roman{4: four {#} | {#}}", ParameterSet::new().with("N", 4)),
        "four IV"
    );
}

#[test]
fn test_condition_less_cases_move_last() {
    let dialect = Dialect::standard();
    let switch = bound_switch(&dialect, "#N{fallback | 1: one | 2: two}");
    let spellings: Vec<&str> = switch.cases.iter().map(|case| case.spelling.as_str()).collect();
    assert_eq!(spellings, vec!["1", "2", ""]);
    assert_eq!(
        render(&dialect, "#N{fallback | 1: one | 2: two}", ParameterSet::new().with("N", 2)),
        "two"
    );
}

#[test]
fn test_templated_switch_gets_lookup_conditions() {
    let dialect = Dialect::standard();
    let switch = bound_switch(&dialect, "#Plural(Count){item | 0: none | items | lots}");
    let spellings: Vec<&str> = switch.cases.iter().map(|case| case.spelling.as_str()).collect();
    assert_eq!(spellings, vec!["0", "@Plural1", "@Plural2", ""]);
    let kinds: Vec<&str> = switch.cases.iter().map(|case| case.condition.kind()).collect();
    assert_eq!(
        kinds,
        vec!["ValueListCondition", "LookupCondition", "LookupCondition", "TakeAllCondition"]
    );
}

#[test]
fn test_binding_is_idempotent() {
    let dialect = Dialect::standard();
    let expression = dialect
        .parser()
        .parse("Hi {Name:uc}, #Count{0: none | one: {#} item | {#:N0} items} <Bold: {@Sig}>")
        .unwrap();
    let first = dialect.bind(&expression).unwrap();
    let second = dialect.bind(&expression).unwrap();
    assert_eq!(format!("{first:?}"), format!("{second:?}"));
}

#[test]
fn test_unresolved_strategy_names_construct() {
    let dialect = Dialect::empty(DefaultParser);
    let error = dialect.compile("Hello {Name}").unwrap_err();
    assert_eq!(
        error,
        CompileError::Bind(BindError::UnresolvedStrategy {
            role: StrategyRole::Evaluator,
            construct: "parameter".to_string(),
            representation: "Name".to_string(),
        })
    );
    assert_eq!(error.to_string(), "no evaluator accepts 'Name' in parameter");
}

#[test]
fn test_unresolved_condition_reports_spelling() {
    let dialect = Dialect::empty(DefaultParser)
        .with_evaluator(|spec: &ParameterSpec| -> Option<Arc<dyn ParameterEvaluator>> {
            Some(Arc::new(DirectEvaluator::new(spec.name.clone())))
        })
        .with_formatter(|_: &str| -> Option<Arc<dyn ValueFormatter>> {
            Some(Arc::new(RomanFormatter))
        });
    let Err(CompileError::Bind(error)) = dialect.compile("#N{1: one | other}") else {
        panic!("expected bind error");
    };
    assert_eq!(error.representation(), "1");
    assert!(error.to_string().contains("in switch case"));
}

#[test]
fn test_parse_errors_surface_through_compile() {
    let error = Dialect::standard().compile("{Name").unwrap_err();
    assert!(matches!(error, CompileError::Parse(ParseError::Syntax { .. })));
}

#[test]
fn test_text_dialect_does_not_parse() {
    let dialect = Dialect::text();
    assert_eq!(render(&dialect, "{Name} & #N{x}", ParameterSet::new()), "{Name} & #N{x}");
}

// =========================================================================
// Custom parts
// =========================================================================

/// Reads `[[name]]` as a custom node and everything else with the
/// standard grammar.
#[derive(Debug)]
struct BracketParser;

impl PatternParser for BracketParser {
    fn parse(&self, pattern: &str) -> Result<Expression, ParseError> {
        let mut parts = Vec::new();
        let mut rest = pattern;
        while let Some(start) = rest.find("[[") {
            let Some(end) = rest[start..].find("]]") else {
                break;
            };
            if start > 0 {
                parts.extend(DefaultParser.parse(&rest[..start])?.parts);
            }
            parts.push(Part::Custom(CustomNode {
                kind: "bracket".to_string(),
                content: rest[start..start + end + 2].to_string(),
            }));
            rest = &rest[start + end + 2..];
        }
        if !rest.is_empty() {
            parts.extend(DefaultParser.parse(rest)?.parts);
        }
        Ok(Expression::new(parts))
    }
}

/// Writes the bracketed name reversed.
struct Reverse(String);

impl CustomPart for Reverse {
    fn render(&self, _ctx: &mut EvalContext<'_>, out: &mut dyn fmt::Write) -> Result<(), EvalError> {
        out.write_str(&self.0.chars().rev().collect::<String>())?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn test_custom_part_from_host_parser() {
    let dialect = Dialect::standard()
        .with_parser(BracketParser)
        .with_custom_part(|node: &CustomNode| -> Option<Arc<dyn CustomPart>> {
            let name = node.content.trim_start_matches("[[").trim_end_matches("]]");
            (node.kind == "bracket").then(|| Arc::new(Reverse(name.to_string())) as Arc<dyn CustomPart>)
        });
    let params = ParameterSet::new().with("Name", "Ada");
    assert_eq!(render(&dialect, "Hi {Name}, [[olleh]]!", params), "Hi Ada, hello!");
}

#[test]
fn test_unclaimed_custom_part_fails_to_bind() {
    let dialect = Dialect::standard().with_parser(BracketParser);
    let error = dialect.compile("[[x]]").unwrap_err();
    let CompileError::Bind(BindError::UnresolvedStrategy { role, construct, .. }) = error else {
        panic!("expected bind error");
    };
    assert_eq!(role, StrategyRole::CustomPart);
    assert_eq!(construct, "bracket");
}

// =========================================================================
// Transformers
// =========================================================================

#[test]
fn test_html_tags_survive_compilation() {
    let dialect = Dialect::standard().with_transformer(HtmlTagTransformer);
    let params = ParameterSet::new().with("Name", "Ada").with("Bold", "**{#}**");
    assert_eq!(
        render(&dialect, "<b>{Name}</b> <Bold: hi>", params),
        "<b>Ada</b> **hi**"
    );
}

#[test]
fn test_compiled_pattern_keeps_source() {
    let dialect = Dialect::standard().with_transformer(HtmlTagTransformer);
    let compiled = dialect.compile("<i>x</i>").unwrap();
    assert_eq!(compiled.source(), "<i>x</i>");
    assert!(compiled.expression().is_text_only());
}
