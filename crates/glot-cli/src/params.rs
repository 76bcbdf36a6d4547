//! Typed parsing of `-p name=value` parameters.
//!
//! | text                          | value        |
//! |-------------------------------|--------------|
//! | `null`                        | null         |
//! | `true`, `false`               | boolean      |
//! | `42`                          | integer      |
//! | `2.5`, `1e3`                  | float        |
//! | `2024-03-01T10:00:00+01:00`   | date-time    |
//! | `2024-03-01`                  | midnight in the time zone |
//! | `PT1H30M`                     | duration     |
//! | `[a, 2, PT1M]`                | list         |
//! | `"42"`                        | string       |
//!
//! Anything else is a string.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use glot::strategy::parse_duration;
use glot::{ParameterValue, Value};

/// Parse a parameter value, reading dates without an offset in `time_zone`.
pub fn parse_value(text: &str, time_zone: FixedOffset) -> Value {
    if let Some(inner) = text.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        if inner.trim().is_empty() {
            return Value::List(Vec::new());
        }
        return Value::List(
            inner
                .split(',')
                .map(|item| ParameterValue::new(parse_value(item.trim(), time_zone)))
                .collect(),
        );
    }
    if let Some(quoted) = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return Value::from(quoted);
    }
    match text {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(number) = text.parse::<i64>() {
        return Value::Number(number);
    }
    if text.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(number) = text.parse::<f64>() {
            return Value::Float(number);
        }
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        return Value::DateTime(date_time);
    }
    if let Some(date_time) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| time_zone.from_local_datetime(&date.and_time(NaiveTime::MIN)).single())
    {
        return Value::DateTime(date_time);
    }
    if let Some(duration) = parse_duration(text) {
        return Value::Duration(duration);
    }
    Value::from(text)
}

#[cfg(test)]
mod tests {
    use chrono::{Offset, TimeDelta, Utc};

    use super::*;

    fn parse(text: &str) -> Value {
        parse_value(text, Utc.fix())
    }

    #[test]
    fn scalars() {
        assert!(matches!(parse("null"), Value::Null));
        assert!(matches!(parse("true"), Value::Bool(true)));
        assert!(matches!(parse("42"), Value::Number(42)));
        assert!(matches!(parse("-7"), Value::Number(-7)));
        assert!(matches!(parse("2.5"), Value::Float(f) if f == 2.5));
        assert!(matches!(parse("inf"), Value::String(ref s) if s == "inf"));
        assert!(matches!(parse("Alice"), Value::String(ref s) if s == "Alice"));
        assert!(matches!(parse("\"42\""), Value::String(ref s) if s == "42"));
    }

    #[test]
    fn dates_and_durations() {
        let Value::DateTime(date_time) = parse("2024-03-01T10:00:00+01:00") else {
            panic!("expected a date-time");
        };
        assert_eq!(date_time.offset().local_minus_utc(), 3600);

        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let Value::DateTime(midnight) = parse_value("2024-03-01", offset) else {
            panic!("expected a date-time");
        };
        assert_eq!(midnight.to_rfc3339(), "2024-03-01T00:00:00+02:00");

        assert!(matches!(parse("PT1M"), Value::Duration(d) if d == TimeDelta::minutes(1)));
    }

    #[test]
    fn lists() {
        let Value::List(items) = parse("[a, 2, [] ]") else {
            panic!("expected a list");
        };
        assert_eq!(items.len(), 3);
        assert!(matches!(items[1].value(), Value::Number(2)));
        assert!(matches!(parse("[]"), Value::List(ref items) if items.is_empty()));
    }
}
