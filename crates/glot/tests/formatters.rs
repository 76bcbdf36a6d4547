//! Integration tests for the built-in value formatters

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};
use glot::{Dialect, EvalContext, Language, ParameterSet, Value, params};

fn render(tag: &str, pattern: &str, value: impl Into<Value>) -> String {
    let compiled = Dialect::standard().compile(pattern).unwrap();
    let mut ctx = EvalContext::builder()
        .language(Language::parse(tag).unwrap())
        .parameters(params! { "X" => value })
        .build();
    compiled.evaluate(&mut ctx).unwrap()
}

fn moment() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap().fixed_offset()
}

#[test]
fn test_roman() {
    assert_eq!(render("en", "{X:roman}", 1994), "MCMXCIV");
    assert_eq!(render("en", "{X:roman}", 0), "N");
    assert_eq!(render("en", "{X:roman}", -1), "-1");
    assert_eq!(render("en", "{X:roman}", "many"), "many");
}

#[test]
fn test_case_tokens() {
    assert_eq!(render("en", "{X:uc}", "hello"), "HELLO");
    assert_eq!(render("en", "{X:LC}", "HeLLo"), "hello");
    assert_eq!(render("en", "{X:capitalize-first}", "hello WORLD"), "Hello world");
    assert_eq!(render("en", "{X:ca}", "hello big  world"), "Hello Big  World");
    assert_eq!(render("en", "{X:uc}", 42), "42");
}

#[test]
fn test_case_follows_language() {
    assert_eq!(render("tr", "{X:uc}", "istanbul"), "İSTANBUL");
    assert_eq!(render("en", "{X:uc}", "istanbul"), "ISTANBUL");
}

#[test]
fn test_standard_number_formats() {
    assert_eq!(render("en", "{X:N2}", 1234.567), "1,234.57");
    assert_eq!(render("en", "{X:D4}", 42), "0042");
    assert_eq!(render("en", "{X:P1}", 0.256), "25.6%");
    assert_eq!(render("de", "{X:P1}", 0.256), "25,6 %");
    assert_eq!(render("fr", "{X:N1}", 1234.56), "1\u{202f}234,6");
}

#[test]
fn test_custom_number_formats() {
    assert_eq!(render("en", "{X:#,##0.00}", 1234.5), "1,234.50");
    assert_eq!(render("en", "{X:0;(0)}", -2), "(2)");
}

#[test]
fn test_date_formats() {
    assert_eq!(render("en", "{X:d}", moment()), "3/5/2024");
    assert_eq!(render("de", "{X:d}", moment()), "05.03.2024");
    assert_eq!(render("en", "{X:yyyy-MM-dd HH:mm}", moment()), "2024-03-05 14:07");
    assert_eq!(render("en", "{X:dddd}", moment()), "Tuesday");
}

#[test]
fn test_default_date_format_uses_culture() {
    assert_eq!(render("de", "{X}", moment()), "05.03.2024 14:07:09");
    assert_eq!(render("en", "{X}", moment()), "3/5/2024 2:07:09 PM");
}

#[test]
fn test_duration_formats() {
    let span = TimeDelta::seconds(93_784);
    assert_eq!(render("en", "{X:c}", span), "1.02:03:04");
    assert_eq!(render("en", r"{X:hh\\:mm}", span), "02:03");
    assert_eq!(render("en", "{X}", span), "1.02:03:04");
}

#[test]
fn test_format_is_ignored_for_strings_and_booleans() {
    assert_eq!(render("en", "{X:N2}", "text"), "text");
    assert_eq!(render("en", "{X:N2}", true), "true");
}

#[test]
fn test_unsupported_formats_fall_back_to_raw_value() {
    assert_eq!(render("en", "{X:C}", 5), "5");
    assert_eq!(render("en", "{X:N2}", vec![1, 2]), "1, 2");
    assert_eq!(render("en", "{X:Q}", moment()), "2024-03-05 14:07:09");
}

#[test]
fn test_lists_without_format() {
    assert_eq!(render("de", "{X}", vec![1.5, 2.5]), "1,5, 2,5");
}

#[test]
fn test_null_formats_to_nothing() {
    let compiled = Dialect::standard().compile("[{X:N2}]").unwrap();
    let mut ctx = EvalContext::new(ParameterSet::new());
    assert_eq!(compiled.evaluate(&mut ctx).unwrap(), "[]");
}
