use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, TimeDelta};

use super::ParameterValue;

/// A runtime value that can be passed as a pattern parameter.
///
/// Values are dynamically typed so that the same pattern can switch over
/// numbers, strings, dates, and sequences alike.
///
/// # Example
///
/// ```
/// use glot::Value;
///
/// let count: Value = 42.into();
/// assert_eq!(count.as_f64(), Some(42.0));
///
/// let name: Value = "Alice".into();
/// assert_eq!(name.as_str(), Some("Alice"));
///
/// let items: Value = vec!["a", "b"].into();
/// assert_eq!(items.to_string(), "a, b");
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value. Switches render their null case for it.
    #[default]
    Null,

    /// A boolean.
    Bool(bool),

    /// An integer number.
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A string value.
    String(String),

    /// A point in time with its UTC offset.
    DateTime(DateTime<FixedOffset>),

    /// A signed time span.
    Duration(TimeDelta),

    /// An ordered sequence. Switches fan out over its elements.
    List(Vec<ParameterValue>),

    /// Named fields reachable through property paths like `{Order.Total}`.
    Record(BTreeMap<String, Value>),
}

impl Value {
    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get this value as an integer, if it is one or is a float without a
    /// fractional part.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Convert this value to a float for numeric comparisons.
    ///
    /// Numeric strings and booleans convert; everything else returns `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Get this value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a duration, if it is one.
    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            Value::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// Get the elements of a list value.
    pub fn as_list(&self) -> Option<&[ParameterValue]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// A short name for the value's type, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Duration(_) => "duration",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }
}

/// Culture-invariant string conversion. This is the fallback output when a
/// formatter fails.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::DateTime(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
            Value::Duration(d) => f.write_str(&format_duration(*d)),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item.value())?;
                }
                Ok(())
            }
            Value::Record(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Render a duration as `[-][d.]hh:mm:ss[.fffffff]`.
pub fn format_duration(duration: TimeDelta) -> String {
    let negative = duration < TimeDelta::zero();
    let duration = duration.abs();
    let days = duration.num_days();
    let hours = duration.num_hours() % 24;
    let minutes = duration.num_minutes() % 60;
    let seconds = duration.num_seconds() % 60;
    let ticks = duration.subsec_nanos().unsigned_abs().div_euclid(100);

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if ticks > 0 {
        out.push_str(&format!(".{ticks:07}"));
    }
    out
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(d: DateTime<FixedOffset>) -> Self {
        Value::DateTime(d)
    }
}

impl From<TimeDelta> for Value {
    fn from(d: TimeDelta) -> Self {
        Value::Duration(d)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Value::Record(fields)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(
            items
                .into_iter()
                .map(|item| ParameterValue::new(item.into()))
                .collect(),
        )
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_display() {
        assert_eq!(format_duration(TimeDelta::minutes(90)), "01:30:00");
        assert_eq!(format_duration(TimeDelta::hours(49)), "2.01:00:00");
        assert_eq!(format_duration(TimeDelta::seconds(-5)), "-00:00:05");
        assert_eq!(format_duration(TimeDelta::milliseconds(1500)), "00:00:01.5000000");
    }

    #[test]
    fn integral_floats_convert_to_integers() {
        assert_eq!(Value::Float(14.0).as_integer(), Some(14));
        assert_eq!(Value::Float(14.5).as_integer(), None);
        assert_eq!(Value::from(" 7 ").as_integer(), Some(7));
    }
}
