//! Format strings for numbers, dates and durations.
//!
//! Numbers accept standard formats (`N2`, `F0`, `D4`, `P1`, `E3`, `X`, `G5`)
//! and custom formats built from `0`, `#`, `.`, `,`, `%` and literal text,
//! with up to three `;`-separated sections for positive, negative and zero
//! values. Dates accept the standard letters (`d`, `D`, `t`, `T`, `f`, `F`,
//! `g`, `G`, `M`, `Y`, `s`, `o`, `u`) and custom patterns such as
//! `yyyy-MM-dd HH:mm`. Durations accept `c`, `g`, `G` and custom patterns
//! such as `hh\:mm`.

use std::mem;

use chrono::{DateTime, Datelike, FixedOffset, TimeDelta, Timelike, Utc};

use crate::interpreter::FormatError;
use crate::types::{Culture, Value, format_duration};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Format a value with a format string.
///
/// Strings and booleans ignore the format. Lists and records are not
/// supported.
pub(crate) fn format_with(value: &Value, format: &str, culture: &Culture) -> Result<String, FormatError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text.clone()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Number(_) | Value::Float(_) => format_number(value, format, culture),
        Value::DateTime(moment) => format_date(moment, format, culture),
        Value::Duration(duration) => format_time_span(*duration, format, culture),
        Value::List(_) | Value::Record(_) => Err(FormatError::Unsupported {
            kind: value.kind(),
            expected: "number, date or duration",
        }),
    }
}

/// Culture-aware conversion used when no format is given.
pub(crate) fn format_plain(value: &Value, culture: &Culture) -> String {
    match value {
        Value::Float(number) => {
            let text = number.to_string();
            text.replacen('.', culture.decimal_separator, 1)
        }
        Value::DateTime(moment) => {
            let pattern = format!("{} {}", culture.short_date, culture.long_time);
            custom_date(moment, &pattern)
        }
        Value::List(items) => items
            .iter()
            .map(|item| format_plain(item.value(), culture))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

// =========================================================================
// Numbers
// =========================================================================

/// Sign, integer digits and fraction digits of a rounded number.
struct Digits {
    negative: bool,
    integer: String,
    fraction: String,
}

impl Digits {
    fn new(value: &Value, decimals: usize, scale: f64) -> Option<Self> {
        match value {
            Value::Number(number) if scale == 1.0 => Some(Self {
                negative: *number < 0,
                integer: number.unsigned_abs().to_string(),
                fraction: "0".repeat(decimals),
            }),
            _ => {
                let number = value.as_f64()? * scale;
                let text = format!("{:.*}", decimals, number.abs());
                let (integer, fraction) = text.split_once('.').unwrap_or((&text, ""));
                Some(Self {
                    negative: number < 0.0,
                    integer: integer.to_string(),
                    fraction: fraction.to_string(),
                })
            }
        }
    }

    fn is_zero(&self) -> bool {
        self.integer.chars().chain(self.fraction.chars()).all(|c| c == '0')
    }

    fn sign(&self) -> &'static str {
        if self.negative && !self.is_zero() { "-" } else { "" }
    }
}

fn format_number(value: &Value, format: &str, culture: &Culture) -> Result<String, FormatError> {
    let mut chars = format.chars();
    match chars.next() {
        Some(letter)
            if letter.is_ascii_alphabetic()
                && format.len() <= 3
                && chars.clone().all(|c| c.is_ascii_digit()) =>
        {
            let precision = chars.as_str().parse::<usize>().ok();
            standard_number(value, letter, precision, format, culture)
        }
        _ => custom_number(value, format, culture),
    }
}

fn standard_number(
    value: &Value,
    letter: char,
    precision: Option<usize>,
    format: &str,
    culture: &Culture,
) -> Result<String, FormatError> {
    let invalid = || FormatError::InvalidFormat {
        format: format.to_string(),
    };
    let not_numeric = || FormatError::Unsupported {
        kind: value.kind(),
        expected: "number",
    };
    match letter.to_ascii_uppercase() {
        'N' | 'F' => {
            let digits = Digits::new(value, precision.unwrap_or(2), 1.0).ok_or_else(not_numeric)?;
            let grouped = letter.eq_ignore_ascii_case(&'N');
            Ok(join_number(&digits, grouped, culture))
        }
        'P' => {
            let digits = Digits::new(value, precision.unwrap_or(2), 100.0).ok_or_else(not_numeric)?;
            Ok(format!(
                "{}{}%",
                join_number(&digits, true, culture),
                culture.percent_spacing
            ))
        }
        'D' => {
            let Value::Number(number) = value else {
                return Err(FormatError::Unsupported {
                    kind: value.kind(),
                    expected: "integer",
                });
            };
            let width = precision.unwrap_or(0);
            let sign = if *number < 0 { "-" } else { "" };
            Ok(format!("{sign}{:0width$}", number.unsigned_abs()))
        }
        'X' => {
            let Value::Number(number) = value else {
                return Err(FormatError::Unsupported {
                    kind: value.kind(),
                    expected: "integer",
                });
            };
            let width = precision.unwrap_or(0);
            Ok(if letter == 'X' {
                format!("{number:0width$X}")
            } else {
                format!("{number:0width$x}")
            })
        }
        'E' => {
            let number = value.as_f64().ok_or_else(not_numeric)?;
            Ok(scientific(number, precision.unwrap_or(6), letter, 3, culture))
        }
        'G' | 'R' => {
            let number = value.as_f64().ok_or_else(not_numeric)?;
            match (value, precision) {
                (Value::Number(_), None) => Ok(value.to_string()),
                (_, None | Some(0)) => Ok(format_plain(&Value::Float(number), culture)),
                (_, Some(significant)) => Ok(general(number, significant, letter, culture)),
            }
        }
        _ => Err(invalid()),
    }
}

fn join_number(digits: &Digits, grouped: bool, culture: &Culture) -> String {
    let integer = if grouped {
        group_digits(&digits.integer, culture.group_separator)
    } else {
        digits.integer.clone()
    };
    if digits.fraction.is_empty() {
        format!("{}{integer}", digits.sign())
    } else {
        format!(
            "{}{integer}{}{}",
            digits.sign(),
            culture.decimal_separator,
            digits.fraction
        )
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    let length = digits.len();
    let mut out = String::with_capacity(length + length.div_euclid(3) * separator.len());
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (length - index) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(digit);
    }
    out
}

/// `d.dddE+ddd` with `decimals` mantissa digits.
fn scientific(number: f64, decimals: usize, letter: char, exponent_digits: usize, culture: &Culture) -> String {
    let text = format!("{:.*e}", decimals, number);
    let (mantissa, exponent) = text.split_once('e').unwrap_or((&text, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!(
        "{}{letter}{sign}{:0exponent_digits$}",
        mantissa.replacen('.', culture.decimal_separator, 1),
        exponent.unsigned_abs()
    )
}

/// Fixed or scientific notation with `significant` digits, whichever is
/// shorter for the exponent.
fn general(number: f64, significant: usize, letter: char, culture: &Culture) -> String {
    let text = format!("{:.*e}", significant.saturating_sub(1), number);
    let exponent: i32 = text
        .split_once('e')
        .and_then(|(_, exponent)| exponent.parse().ok())
        .unwrap_or(0);
    if exponent >= -5 && exponent < significant as i32 {
        let decimals = (significant as i32 - 1 - exponent).max(0) as usize;
        let fixed = format!("{:.*}", decimals, number);
        let trimmed = if fixed.contains('.') {
            fixed.trim_end_matches('0').trim_end_matches('.')
        } else {
            &fixed
        };
        trimmed.replacen('.', culture.decimal_separator, 1)
    } else {
        let exponent_letter = if letter == 'g' { 'e' } else { 'E' };
        let formatted = scientific(number, significant.saturating_sub(1), exponent_letter, 2, culture);
        match formatted.split_once(exponent_letter) {
            Some((mantissa, exponent)) if mantissa.contains(culture.decimal_separator) => {
                let mantissa = mantissa
                    .trim_end_matches('0')
                    .trim_end_matches(culture.decimal_separator);
                format!("{mantissa}{exponent_letter}{exponent}")
            }
            _ => formatted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NumberToken {
    Zero,
    Hash,
    Point,
    Comma,
    Percent,
    Literal(String),
}

fn custom_number(value: &Value, format: &str, culture: &Culture) -> Result<String, FormatError> {
    let number = value.as_f64().ok_or(FormatError::Unsupported {
        kind: value.kind(),
        expected: "number",
    })?;
    let sections = split_sections(format);
    let (section, explicit_sign) = match sections.as_slice() {
        [_, negative, ..] if number < 0.0 => (negative.as_str(), true),
        [_, _, zero, ..] if number == 0.0 => (zero.as_str(), true),
        [first, ..] => (first.as_str(), false),
        [] => ("", false),
    };
    let tokens = tokenize_number(section);

    let point = tokens.iter().position(|token| *token == NumberToken::Point);
    let (integer_tokens, fraction_tokens) = tokens.split_at(point.unwrap_or(tokens.len()));
    let is_placeholder = |token: &&NumberToken| matches!(token, NumberToken::Zero | NumberToken::Hash);

    let integer_placeholders: Vec<&NumberToken> = integer_tokens.iter().filter(is_placeholder).collect();
    let min_integer = integer_placeholders
        .iter()
        .position(|token| **token == NumberToken::Zero)
        .map_or(0, |first_zero| integer_placeholders.len() - first_zero);
    let fraction_placeholders: Vec<&NumberToken> = fraction_tokens.iter().filter(is_placeholder).collect();
    let min_fraction = fraction_placeholders
        .iter()
        .rposition(|token| **token == NumberToken::Zero)
        .map_or(0, |last_zero| last_zero + 1);
    let grouped = integer_tokens
        .iter()
        .skip_while(|token| !is_placeholder(token))
        .any(|token| *token == NumberToken::Comma);
    let percent = tokens.contains(&NumberToken::Percent);

    let scale = if percent { 100.0 } else { 1.0 };
    let digits = Digits::new(&Value::Float(number), fraction_placeholders.len(), scale).ok_or(
        FormatError::Unsupported {
            kind: value.kind(),
            expected: "number",
        },
    )?;
    let mut integer = digits.integer.trim_start_matches('0').to_string();
    while integer.len() < min_integer {
        integer.insert(0, '0');
    }
    let mut fraction = digits.fraction.clone();
    while fraction.len() > min_fraction && fraction.ends_with('0') {
        fraction.pop();
    }

    let mut out = String::new();
    if !explicit_sign && digits.negative && !digits.is_zero() {
        out.push('-');
    }

    // Integer digits fill placeholders from the right; the first placeholder
    // takes any excess.
    let integer_text = if grouped {
        group_digits(&integer, culture.group_separator)
    } else {
        integer.clone()
    };
    let digit_chars: Vec<char> = integer.chars().collect();
    let excess = digit_chars.len() as i64 - integer_placeholders.len() as i64;
    let mut placeholder = 0_i64;
    for token in integer_tokens {
        match token {
            NumberToken::Zero | NumberToken::Hash => {
                if grouped {
                    if placeholder == 0 {
                        out.push_str(&integer_text);
                    }
                } else if placeholder == 0 && excess > 0 {
                    out.extend(&digit_chars[..=excess as usize]);
                } else if let Some(digit) = usize::try_from(placeholder + excess)
                    .ok()
                    .and_then(|index| digit_chars.get(index))
                {
                    out.push(*digit);
                }
                placeholder += 1;
            }
            NumberToken::Percent => out.push('%'),
            NumberToken::Literal(text) => out.push_str(text),
            NumberToken::Point | NumberToken::Comma => {}
        }
    }

    let mut fraction_digits = fraction.chars();
    for token in fraction_tokens {
        match token {
            NumberToken::Point if !fraction.is_empty() => out.push_str(culture.decimal_separator),
            NumberToken::Zero | NumberToken::Hash => out.extend(fraction_digits.next()),
            NumberToken::Percent => out.push('%'),
            NumberToken::Literal(text) => out.push_str(text),
            NumberToken::Point | NumberToken::Comma => {}
        }
    }
    Ok(out)
}

/// Split on unquoted, unescaped `;`.
fn split_sections(format: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut section = String::new();
    let mut quote = None;
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(open), _) => {
                if c == open {
                    quote = None;
                }
                section.push(c);
            }
            (None, ';') => sections.push(mem::take(&mut section)),
            (None, '\\') => {
                section.push(c);
                section.extend(chars.next());
            }
            (None, '\'' | '"') => {
                quote = Some(c);
                section.push(c);
            }
            (None, _) => section.push(c),
        }
    }
    sections.push(section);
    sections
}

fn tokenize_number(section: &str) -> Vec<NumberToken> {
    let mut tokens = Vec::new();
    let mut chars = section.chars();
    while let Some(c) = chars.next() {
        let token = match c {
            '0' => NumberToken::Zero,
            '#' => NumberToken::Hash,
            '.' => NumberToken::Point,
            ',' => NumberToken::Comma,
            '%' => NumberToken::Percent,
            '\\' => NumberToken::Literal(chars.next().map(String::from).unwrap_or_default()),
            '\'' | '"' => NumberToken::Literal(chars.by_ref().take_while(|&next| next != c).collect()),
            other => NumberToken::Literal(other.to_string()),
        };
        tokens.push(token);
    }
    tokens
}

// =========================================================================
// Dates
// =========================================================================

fn format_date(
    moment: &DateTime<FixedOffset>,
    format: &str,
    culture: &Culture,
) -> Result<String, FormatError> {
    let mut chars = format.chars();
    let (Some(letter), None) = (chars.next(), chars.next()) else {
        return Ok(custom_date(moment, format));
    };
    let pattern = match letter {
        'd' => culture.short_date.to_string(),
        'D' => culture.long_date.to_string(),
        't' => culture.short_time.to_string(),
        'T' => culture.long_time.to_string(),
        'f' => format!("{} {}", culture.long_date, culture.short_time),
        'F' => format!("{} {}", culture.long_date, culture.long_time),
        'g' => format!("{} {}", culture.short_date, culture.short_time),
        'G' => format!("{} {}", culture.short_date, culture.long_time),
        'M' | 'm' => "MMMM d".to_string(),
        'Y' | 'y' => "MMMM yyyy".to_string(),
        's' => "yyyy-MM-dd'T'HH:mm:ss".to_string(),
        'o' | 'O' => "yyyy-MM-dd'T'HH:mm:ss.fffffffK".to_string(),
        'u' => {
            let utc = moment.with_timezone(&Utc).fixed_offset();
            return Ok(custom_date(&utc, "yyyy-MM-dd HH:mm:ss'Z'"));
        }
        _ => {
            return Err(FormatError::InvalidFormat {
                format: format.to_string(),
            });
        }
    };
    Ok(custom_date(moment, &pattern))
}

/// Expand a custom date pattern.
fn custom_date(moment: &DateTime<FixedOffset>, pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::new();
    let mut index = 0;
    while let Some(&c) = chars.get(index) {
        let run = chars[index..].iter().take_while(|&&next| next == c).count();
        let consumed = match c {
            '\'' | '"' => {
                let literal: String = chars[index + 1..].iter().take_while(|&&next| next != c).collect();
                let length = literal.chars().count();
                out.push_str(&literal);
                length + 2
            }
            '\\' => {
                out.extend(chars.get(index + 1));
                2
            }
            '%' => 1,
            'd' | 'M' | 'y' | 'h' | 'H' | 'm' | 's' | 'f' | 'F' | 't' | 'z' | 'K' => {
                date_token(moment, c, run, &mut out);
                run
            }
            other => {
                out.push(other);
                1
            }
        };
        index += consumed;
    }
    out
}

fn date_token(moment: &DateTime<FixedOffset>, token: char, run: usize, out: &mut String) {
    let pad = |value: u32, width: usize| format!("{value:0width$}");
    let (pm, hour12) = moment.hour12();
    let text = match (token, run) {
        ('d', 1 | 2) => pad(moment.day(), run),
        ('d', 3) => WEEKDAYS[moment.weekday().num_days_from_sunday() as usize][..3].to_string(),
        ('d', _) => WEEKDAYS[moment.weekday().num_days_from_sunday() as usize].to_string(),
        ('M', 1 | 2) => pad(moment.month(), run),
        ('M', 3) => MONTHS[moment.month0() as usize][..3].to_string(),
        ('M', _) => MONTHS[moment.month0() as usize].to_string(),
        ('y', 1) => moment.year().rem_euclid(100).to_string(),
        ('y', 2) => format!("{:02}", moment.year().rem_euclid(100)),
        ('y', _) => format!("{:0run$}", moment.year()),
        ('h', _) => pad(hour12, run.min(2)),
        ('H', _) => pad(moment.hour(), run.min(2)),
        ('m', _) => pad(moment.minute(), run.min(2)),
        ('s', _) => pad(moment.second(), run.min(2)),
        ('f', _) => fraction(moment.nanosecond(), run.min(7)),
        ('F', _) => {
            let digits = fraction(moment.nanosecond(), run.min(7));
            let trimmed = digits.trim_end_matches('0');
            if trimmed.is_empty() && out.ends_with('.') {
                out.pop();
            }
            trimmed.to_string()
        }
        ('t', 1) => String::from(if pm { "P" } else { "A" }),
        ('t', _) => String::from(if pm { "PM" } else { "AM" }),
        ('z' | 'K', _) => offset(moment.offset(), if token == 'K' { 3 } else { run }),
        _ => String::new(),
    };
    out.push_str(&text);
}

/// The first `digits` digits of the sub-second part.
fn fraction(nanoseconds: u32, digits: usize) -> String {
    let divisor = 10_u32.pow(9 - digits as u32);
    format!("{:0digits$}", nanoseconds.min(999_999_999).div_euclid(divisor))
}

fn offset(offset: &FixedOffset, run: usize) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs().div_euclid(60);
    let (hours, minutes) = (minutes.div_euclid(60), minutes % 60);
    match run {
        1 => format!("{sign}{hours}"),
        2 => format!("{sign}{hours:02}"),
        _ => format!("{sign}{hours:02}:{minutes:02}"),
    }
}

// =========================================================================
// Durations
// =========================================================================

fn format_time_span(duration: TimeDelta, format: &str, culture: &Culture) -> Result<String, FormatError> {
    let sign = if duration < TimeDelta::zero() { "-" } else { "" };
    let span = duration.abs();
    let days = span.num_days();
    let hours = span.num_hours() % 24;
    let minutes = span.num_minutes() % 60;
    let seconds = span.num_seconds() % 60;
    let nanoseconds = span.subsec_nanos().unsigned_abs();

    match format {
        "c" | "t" | "T" => Ok(format_duration(duration)),
        "g" => {
            let days = if days > 0 { format!("{days}:") } else { String::new() };
            let ticks = fraction(nanoseconds, 7);
            let ticks = ticks.trim_end_matches('0');
            let ticks = if ticks.is_empty() {
                String::new()
            } else {
                format!("{}{ticks}", culture.decimal_separator)
            };
            Ok(format!("{sign}{days}{hours}:{minutes:02}:{seconds:02}{ticks}"))
        }
        "G" => Ok(format!(
            "{sign}{days}:{hours:02}:{minutes:02}:{seconds:02}{}{}",
            culture.decimal_separator,
            fraction(nanoseconds, 7)
        )),
        _ => custom_time_span(days, hours, minutes, seconds, nanoseconds, format),
    }
}

fn custom_time_span(
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    nanoseconds: u32,
    format: &str,
) -> Result<String, FormatError> {
    let chars: Vec<char> = format.chars().collect();
    let mut out = String::new();
    let mut index = 0;
    while let Some(&c) = chars.get(index) {
        let run = chars[index..].iter().take_while(|&&next| next == c).count();
        let consumed = match c {
            '\'' | '"' => {
                let literal: String = chars[index + 1..].iter().take_while(|&&next| next != c).collect();
                let length = literal.chars().count();
                out.push_str(&literal);
                length + 2
            }
            '\\' => {
                out.extend(chars.get(index + 1));
                2
            }
            'd' => {
                out.push_str(&format!("{days:0run$}"));
                run
            }
            'h' => {
                out.push_str(&format!("{hours:0width$}", width = run.min(2)));
                run
            }
            'm' => {
                out.push_str(&format!("{minutes:0width$}", width = run.min(2)));
                run
            }
            's' => {
                out.push_str(&format!("{seconds:0width$}", width = run.min(2)));
                run
            }
            'f' => {
                out.push_str(&fraction(nanoseconds, run.min(7)));
                run
            }
            'F' => {
                let digits = fraction(nanoseconds, run.min(7));
                out.push_str(digits.trim_end_matches('0'));
                run
            }
            _ => {
                return Err(FormatError::InvalidFormat {
                    format: format.to_string(),
                });
            }
        };
        index += consumed;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const PLAIN: Culture = Culture {
        decimal_separator: ".",
        group_separator: ",",
        short_date: "MM/dd/yyyy",
        long_date: "dddd, dd MMMM yyyy",
        short_time: "HH:mm",
        long_time: "HH:mm:ss",
        percent_spacing: " ",
    };

    fn number(value: impl Into<Value>, format: &str) -> String {
        format_with(&value.into(), format, &PLAIN).unwrap()
    }

    #[test]
    fn standard_numeric_formats() {
        assert_eq!(number(1234.567, "N2"), "1,234.57");
        assert_eq!(number(1234567, "N0"), "1,234,567");
        assert_eq!(number(-3.5, "F1"), "-3.5");
        assert_eq!(number(42, "D5"), "00042");
        assert_eq!(number(0.256, "P1"), "25.6 %");
        assert_eq!(number(255, "X4"), "00FF");
        assert_eq!(number(1234.5678, "E2"), "1.23E+003");
        assert_eq!(number(12345.678, "G3"), "1.23E+04");
        assert_eq!(number(0.5, "G"), "0.5");
    }

    #[test]
    fn custom_numeric_formats() {
        assert_eq!(number(1234.5, "#,##0.00"), "1,234.50");
        assert_eq!(number(7, "000"), "007");
        assert_eq!(number(0.5, "0%"), "50%");
        assert_eq!(number(5551234567_i64, "(###) ###-####"), "(555) 123-4567");
        assert_eq!(number(-2, "0;(0)"), "(2)");
        assert_eq!(number(0, "0;(0);'none'"), "none");
        assert_eq!(number(3.14159, "0.##"), "3.14");
    }

    #[test]
    fn integer_only_formats_reject_floats() {
        let error = format_with(&Value::Float(1.5), "D2", &PLAIN).unwrap_err();
        assert!(matches!(error, FormatError::Unsupported { .. }));
        let error = format_with(&Value::Number(1), "Q", &PLAIN).unwrap_err();
        assert!(matches!(error, FormatError::InvalidFormat { .. }));
    }

    #[test]
    fn date_formats() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let moment = offset.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let date = Value::DateTime(moment);
        let format = |f: &str| format_with(&date, f, &PLAIN).unwrap();
        assert_eq!(format("yyyy-MM-dd HH:mm"), "2024-03-05 14:07");
        assert_eq!(format("ddd d MMM yy"), "Tue 5 Mar 24");
        assert_eq!(format("h:mm tt"), "2:07 PM");
        assert_eq!(format("d"), "03/05/2024");
        assert_eq!(format("D"), "Tuesday, 05 March 2024");
        assert_eq!(format("s"), "2024-03-05T14:07:09");
        assert_eq!(format("u"), "2024-03-05 12:07:09Z");
        assert_eq!(format("zzz"), "+02:00");
        assert_eq!(format("'Day' d"), "Day 5");
    }

    #[test]
    fn duration_formats() {
        let duration = Value::Duration(TimeDelta::seconds(93_784));
        let format = |f: &str| format_with(&duration, f, &PLAIN).unwrap();
        assert_eq!(format("c"), "1.02:03:04");
        assert_eq!(format("g"), "1:2:03:04");
        assert_eq!(format(r"hh\:mm"), "02:03");
        assert_eq!(format("d'd 'h'h'"), "1d 2h");
        assert!(format_with(&duration, "hh:mm", &PLAIN).is_err());
    }

    #[test]
    fn plain_conversion_uses_culture_separator() {
        let comma = Culture {
            decimal_separator: ",",
            ..PLAIN
        };
        assert_eq!(format_plain(&Value::Float(2.5), &comma), "2,5");
        assert_eq!(format_plain(&Value::Number(2), &comma), "2");
    }
}
