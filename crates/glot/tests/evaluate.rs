//! Integration tests for evaluating compiled patterns

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{FixedOffset, TimeZone, Utc};
use glot::strategy::formatters::RomanFormatter;
use glot::types::Wrapping;
use glot::{
    Dialect, Encoder, EvalContext, EvalError, Language, ParameterSet, ParameterValue, Value,
    params,
};

fn eval(pattern: &str, parameters: ParameterSet) -> String {
    let compiled = Dialect::standard().compile(pattern).unwrap();
    let mut ctx = EvalContext::new(parameters);
    compiled.evaluate(&mut ctx).unwrap()
}

fn eval_in(tag: &str, pattern: &str, parameters: ParameterSet) -> String {
    let compiled = Dialect::standard().compile(pattern).unwrap();
    let mut ctx = EvalContext::builder()
        .language(Language::parse(tag).unwrap())
        .parameters(parameters)
        .build();
    compiled.evaluate(&mut ctx).unwrap()
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn test_hello_world() {
    assert_eq!(eval("Hello {Name}!", params! { "Name" => "World" }), "Hello World!");
}

#[test]
fn test_counted_switch() {
    let pattern = "#Count{0: none | 1: one | other: many}";
    assert_eq!(eval(pattern, params! { "Count" => 0 }), "none");
    assert_eq!(eval(pattern, params! { "Count" => 1 }), "one");
    assert_eq!(eval(pattern, params! { "Count" => 5 }), "many");
}

#[test]
fn test_roman_numerals_fall_back_to_raw_value() {
    assert_eq!(eval("{N:roman}", params! { "N" => 14 }), "XIV");
    assert_eq!(eval("{N:roman}", params! { "N" => 4000 }), "4000");
}

#[test]
fn test_format_group_wraps_inner_text() {
    let params = params! { "Bold" => "**{#}**" };
    assert_eq!(eval("<Bold: text>", params), "**text**");
}

#[test]
fn test_list_switch_exposes_index() {
    let params = params! { "Items" => vec!["a", "b"] };
    assert_eq!(eval(r#"#Items{"{#Index}: {#} "}"#, params), "1: a 2: b ");
}

#[test]
fn test_list_switch_reads_leading_hash_word_as_case_condition() {
    // `#Index:` before the first `:` is a condition spelling, a one-entry
    // string list that no item matches.
    let params = params! { "Items" => vec!["a", "b"] };
    assert_eq!(eval("#Items{#Index: {#} }", params), "");
}

#[test]
fn test_null_value_without_matching_case_is_empty() {
    assert_eq!(eval("#Missing{1: one | 2: two}", ParameterSet::new()), "");
    assert_eq!(eval("[{Missing}]", ParameterSet::new()), "[]");
}

// =========================================================================
// Switches
// =========================================================================

#[test]
fn test_null_case() {
    let pattern = "#Name{? nobody | {#}}";
    assert_eq!(eval(pattern, ParameterSet::new()), "nobody");
    assert_eq!(eval(pattern, params! { "Name" => "Ada" }), "Ada");
}

#[test]
fn test_first_matching_case_wins() {
    let pattern = "#N{>1: big | >5: huge | small}";
    assert_eq!(eval(pattern, params! { "N" => 10 }), "big");
    assert_eq!(eval(pattern, params! { "N" => 0 }), "small");
}

#[test]
fn test_list_matches_backward_index() {
    let pattern = r#"#Items{-1: "and {#}" | "{#}, "}"#;
    let params = params! { "Items" => vec!["a", "b", "c"] };
    assert_eq!(eval(pattern, params), "a, b, and c");
}

#[test]
fn test_list_matches_forward_index() {
    let pattern = "#Items{0: {#} | \", {#}\"}";
    let params = params! { "Items" => vec![1, 2, 3] };
    assert_eq!(eval(pattern, params), "1, 2, 3");
}

#[test]
fn test_list_elements_are_formatted_by_switch_format() {
    let pattern = "#Items:roman{\"{#} \"}";
    let params = params! { "Items" => vec![1, 4, 9] };
    assert_eq!(eval(pattern, params), "I IV IX ");
}

#[test]
fn test_list_elements_inherit_default_format() {
    let list = ParameterValue::new(vec![2, 3])
        .with_default_format(Arc::new(RomanFormatter));
    let mut params = ParameterSet::new();
    params.set_value("Items", list);
    assert_eq!(eval("#Items{\"{#}.\"}", params), "II.III.");
}

#[test]
fn test_nested_switches_shadow_hash() {
    let pattern = "#Outer{#Inner{{#}-{Outer}}}";
    let params = params! { "Outer" => "o", "Inner" => "i" };
    assert_eq!(eval(pattern, params), "i-o");
}

#[test]
fn test_switch_on_string_values() {
    let pattern = "#Color{red, crimson: warm | blue: cold | neutral}";
    assert_eq!(eval(pattern, params! { "Color" => "crimson" }), "warm");
    assert_eq!(eval(pattern, params! { "Color" => "blue" }), "cold");
    assert_eq!(eval(pattern, params! { "Color" => "Blue" }), "neutral");
}

// =========================================================================
// Format groups
// =========================================================================

#[test]
fn test_format_group_with_empty_wrapper_renders_inner() {
    assert_eq!(eval("<Missing: inner {X}>", params! { "X" => 1 }), "inner 1");
}

#[test]
fn test_format_group_without_inner() {
    assert_eq!(eval("<Rule>", params! { "Rule" => "--{#}--" }), "----");
}

#[test]
fn test_format_group_wrapper_is_not_encoded() {
    let compiled = Dialect::standard().compile("<Em: a & b>").unwrap();
    let mut ctx = EvalContext::builder()
        .parameters(params! { "Em" => "<em>{#}</em>" })
        .encoder(Encoder::Html)
        .build();
    assert_eq!(compiled.evaluate(&mut ctx).unwrap(), "<em>a &amp; b</em>");
}

// =========================================================================
// Parameters
// =========================================================================

#[test]
fn test_parameter_names_ignore_case() {
    assert_eq!(eval("{name} {NAME}", params! { "Name" => "x" }), "x x");
}

#[test]
fn test_property_paths() {
    let mut order = BTreeMap::new();
    order.insert("Total".to_string(), Value::from(12.5));
    order.insert("Items".to_string(), Value::from(vec!["a", "b", "c"]));
    let params = params! { "Order" => order };
    assert_eq!(eval("{Order.Total:F2} for {Order.Items.Count}", params), "12.50 for 3");
}

#[test]
fn test_unknown_property_is_an_error() {
    let compiled = Dialect::standard().compile("{N.Size}").unwrap();
    let mut ctx = EvalContext::new(params! { "N" => 3 });
    let error = compiled.evaluate(&mut ctx).unwrap_err();
    assert!(matches!(
        error,
        EvalError::UnknownProperty { ref property, kind: "number" } if property == "Size"
    ));
}

#[test]
fn test_layers_are_balanced_after_errors() {
    let compiled = Dialect::standard().compile("#Items{{#.Size}}").unwrap();
    let mut ctx = EvalContext::new(params! { "Items" => vec![1, 2] });
    let before = ctx.parameters().depth();
    assert!(compiled.evaluate(&mut ctx).is_err());
    assert_eq!(ctx.parameters().depth(), before);

    let compiled = Dialect::standard().compile("#N{1: {X.Size} | other}").unwrap();
    let mut ctx = EvalContext::new(params! { "N" => 1, "X" => 5 });
    assert!(compiled.evaluate(&mut ctx).is_err());
    assert_eq!(ctx.parameters().depth(), before);
}

#[test]
fn test_caller_parameters_are_untouched() {
    let compiled = Dialect::standard().compile("#N{{#}}").unwrap();
    let mut ctx = EvalContext::new(params! { "N" => 7 });
    assert_eq!(compiled.evaluate(&mut ctx).unwrap(), "7");
    assert!(ctx.get("#").is_none());
}

// =========================================================================
// Encoding and wrapping
// =========================================================================

#[test]
fn test_html_encoder() {
    let compiled = Dialect::standard().compile(r"a \< {Name} {Raw}").unwrap();
    let mut params = params! { "Name" => "<b>" };
    params.set_value("Raw", ParameterValue::unencoded("<i>"));
    let mut ctx = EvalContext::builder()
        .parameters(params)
        .encoder(Encoder::Html)
        .build();
    assert_eq!(compiled.evaluate(&mut ctx).unwrap(), "a &lt; &lt;b&gt; <i>");
}

#[test]
fn test_text_dialect_ignores_encoder() {
    let compiled = Dialect::text().compile("a < b").unwrap();
    let mut ctx = EvalContext::builder().encoder(Encoder::Html).build();
    assert_eq!(compiled.evaluate(&mut ctx).unwrap(), "a < b");
    assert!(matches!(ctx.encoder(), Encoder::Html));
}

#[test]
fn test_wrapping_hooks() {
    let mut params = ParameterSet::new();
    params.set_value("Price", ParameterValue::wrapped(5, "<b>{#}</b>"));
    params.set_value(
        "Tag",
        ParameterValue::new("x").with_wrapping(Wrapping::Custom(Arc::new(
            |value: &Value, formatted: &str, _: &Encoder| -> String {
                format!("[{}:{formatted}]", value.kind())
            },
        ))),
    );
    let compiled = Dialect::standard().compile("{Price:N1} {Tag:uc}").unwrap();
    let mut ctx = EvalContext::builder()
        .parameters(params)
        .encoder(Encoder::Html)
        .build();
    assert_eq!(compiled.evaluate(&mut ctx).unwrap(), "<b>5.0</b> [string:X]");
}

#[test]
fn test_custom_encoder() {
    let compiled = Dialect::standard().compile("a{X}").unwrap();
    let mut ctx = EvalContext::builder()
        .parameters(params! { "X" => "b" })
        .encoder(Encoder::Custom(Arc::new(str::to_uppercase)))
        .build();
    assert_eq!(compiled.evaluate(&mut ctx).unwrap(), "AB");
}

#[test]
fn test_evaluate_to_writer() {
    let compiled = Dialect::standard().compile("{A}+{B}").unwrap();
    let mut ctx = EvalContext::new(params! { "A" => 1, "B" => 2 });
    let mut out = String::from("= ");
    compiled.evaluate_to(&mut ctx, &mut out).unwrap();
    assert_eq!(out, "= 1+2");
}

// =========================================================================
// Language and time zone
// =========================================================================

#[test]
fn test_dates_move_to_context_time_zone() {
    let moment = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap().fixed_offset();
    let compiled = Dialect::standard().compile("{When:HH:mm}").unwrap();
    let mut ctx = EvalContext::builder()
        .parameters(params! { "When" => moment })
        .time_zone(FixedOffset::east_opt(2 * 3600).unwrap())
        .build();
    assert_eq!(compiled.evaluate(&mut ctx).unwrap(), "14:00");
}

#[test]
fn test_culture_aware_numbers() {
    let params = params! { "Price" => 1234.5 };
    assert_eq!(eval_in("en", "{Price:N2}", params.clone()), "1,234.50");
    assert_eq!(eval_in("de", "{Price:N2}", params.clone()), "1.234,50");
    assert_eq!(eval_in("de", "{Price}", params), "1234,5");
}

#[test]
fn test_plural_keywords_follow_language() {
    let pattern = "#N{one: {#} file | few: {#} files (few) | {#} files}";
    assert_eq!(eval_in("en", pattern, params! { "N" => 1 }), "1 file");
    assert_eq!(eval_in("en", pattern, params! { "N" => 3 }), "3 files");
    assert_eq!(eval_in("ru", pattern, params! { "N" => 21 }), "21 file");
    assert_eq!(eval_in("ru", pattern, params! { "N" => 3 }), "3 files (few)");
}
