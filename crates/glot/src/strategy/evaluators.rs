//! Built-in parameter evaluators.
//!
//! - [`DirectEvaluator`]: `{Name}` reads a parameter
//! - [`PropertyEvaluator`]: `{Order.Total}` walks record fields and value properties
//! - [`LookupEvaluator`]: `{@Key(Arg)}` renders another pattern

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Datelike, FixedOffset, TimeDelta, Timelike};

use super::{ParameterEvaluator, ValueFormatter};
use crate::dialect::{BindError, Dialect, EvaluatorFactory};
use crate::interpreter::{EvalContext, EvalError, compute_suggestions};
use crate::parser::ParameterSpec;
use crate::types::{ParameterSet, ParameterValue, Value};

/// Separates namespace and key in `@Namespace__Key`.
pub const NAMESPACE_SEPARATOR: &str = "__";

// =========================================================================
// Direct
// =========================================================================

/// Reads a parameter by name. Missing parameters are null.
#[derive(Debug, Clone)]
pub struct DirectEvaluator {
    name: String,
}

impl DirectEvaluator {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ParameterEvaluator for DirectEvaluator {
    fn evaluate(&self, ctx: &EvalContext<'_>) -> Result<ParameterValue, EvalError> {
        Ok(ctx.get(&self.name).cloned().unwrap_or_default())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Accepts every parameter spec.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectEvaluatorFactory;

impl EvaluatorFactory for DirectEvaluatorFactory {
    fn try_resolve(
        &self,
        spec: &ParameterSpec,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn ParameterEvaluator>>, BindError> {
        Ok(Some(Arc::new(DirectEvaluator::new(spec.name.clone()))))
    }
}

// =========================================================================
// Property paths
// =========================================================================

/// Reads `Base.Prop1.Prop2`.
///
/// Each step looks up, case-insensitively:
/// - A field of a record
/// - `Days`, `Hours`, `Minutes`, `Seconds`, `Milliseconds` and their
///   `Total*` forms on a duration
/// - `Year`, `Month`, `Day`, `Hour`, `Minute`, `Second`, `DayOfWeek`
///   (Sunday is 0) and `DayOfYear` on a date
/// - `Length` or `Count` of a string or list
///
/// A null base or intermediate value gives null.
#[derive(Debug, Clone)]
pub struct PropertyEvaluator {
    base: String,
    path: Vec<String>,
}

impl PropertyEvaluator {
    pub fn new(base: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            base: base.into(),
            path,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }
}

impl ParameterEvaluator for PropertyEvaluator {
    fn evaluate(&self, ctx: &EvalContext<'_>) -> Result<ParameterValue, EvalError> {
        let Some(base) = ctx.get(&self.base) else {
            return Ok(ParameterValue::default());
        };
        let mut value = base.value().clone();
        for property in &self.path {
            if value.is_null() {
                break;
            }
            value = read_property(&value, property)?;
        }
        Ok(ParameterValue::new(value))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Read one property of a value.
pub fn read_property(value: &Value, property: &str) -> Result<Value, EvalError> {
    let name = property.to_ascii_lowercase();
    let found = match value {
        Value::Record(fields) => fields
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(property))
            .map(|(_, field)| field.clone()),
        Value::Duration(duration) => duration_property(*duration, &name),
        Value::DateTime(moment) => date_property(moment, &name),
        Value::String(text) if is_length(&name) => Some(Value::Number(text.chars().count() as i64)),
        Value::List(items) if is_length(&name) => Some(Value::Number(items.len() as i64)),
        _ => None,
    };
    found.ok_or_else(|| EvalError::UnknownProperty {
        property: property.to_string(),
        kind: value.kind(),
    })
}

fn is_length(name: &str) -> bool {
    name == "length" || name == "count"
}

fn duration_property(duration: TimeDelta, name: &str) -> Option<Value> {
    let milliseconds = duration.num_milliseconds() as f64;
    Some(match name {
        "days" => Value::Number(duration.num_days()),
        "hours" => Value::Number(duration.num_hours() % 24),
        "minutes" => Value::Number(duration.num_minutes() % 60),
        "seconds" => Value::Number(duration.num_seconds() % 60),
        "milliseconds" => Value::Number(duration.num_milliseconds() % 1000),
        "totaldays" => Value::Float(milliseconds / 86_400_000.0),
        "totalhours" => Value::Float(milliseconds / 3_600_000.0),
        "totalminutes" => Value::Float(milliseconds / 60_000.0),
        "totalseconds" => Value::Float(milliseconds / 1000.0),
        "totalmilliseconds" => Value::Float(milliseconds),
        _ => return None,
    })
}

fn date_property(moment: &DateTime<FixedOffset>, name: &str) -> Option<Value> {
    Some(Value::from(match name {
        "year" => moment.year(),
        "month" => moment.month() as i32,
        "day" => moment.day() as i32,
        "hour" => moment.hour() as i32,
        "minute" => moment.minute() as i32,
        "second" => moment.second() as i32,
        "dayofweek" => moment.weekday().num_days_from_sunday() as i32,
        "dayofyear" => moment.ordinal() as i32,
        _ => return None,
    }))
}

/// Accepts names containing `.`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PropertyEvaluatorFactory;

impl EvaluatorFactory for PropertyEvaluatorFactory {
    fn try_resolve(
        &self,
        spec: &ParameterSpec,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn ParameterEvaluator>>, BindError> {
        let mut steps = spec.name.split('.').map(str::trim);
        let base = steps.next().unwrap_or_default();
        let path: Vec<String> = steps.map(str::to_string).collect();
        if path.is_empty() {
            return Ok(None);
        }
        Ok(Some(Arc::new(PropertyEvaluator::new(base, path))))
    }
}

// =========================================================================
// Pattern lookups
// =========================================================================

/// Where a lookup gets the key of the pattern to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    /// `@Key` or `@Namespace__Key`.
    Fixed(String),
    /// `@@Param` or `@@Param+Suffix`: the key is the parameter's value.
    Parameter { name: String, suffix: String },
}

/// One argument of `@Key(...)`.
#[derive(Clone)]
pub enum LookupArgument {
    /// Position left empty, as in `@Key(A,,C)`.
    Skipped,
    /// `"text"` or `'text'`, passed by index only.
    Literal(String),
    /// A parameter of the calling pattern, passed by name and index.
    /// The formatter from `Name:format` becomes the passed value's default
    /// format.
    Parameter {
        name: String,
        formatter: Option<Arc<dyn ValueFormatter>>,
    },
}

/// Renders another pattern and returns its text as an unencoded value.
///
/// Arguments are passed to the called pattern both by name and by position
/// (`{0}`, `{1}`, ...), so a shared pattern can be written against
/// positions alone.
#[derive(Debug, Clone)]
pub struct LookupEvaluator {
    key: LookupKey,
    arguments: Vec<LookupArgument>,
}

impl LookupEvaluator {
    pub fn new(key: LookupKey, arguments: Vec<LookupArgument>) -> Self {
        Self { key, arguments }
    }

    pub fn key(&self) -> &LookupKey {
        &self.key
    }

    pub fn arguments(&self) -> &[LookupArgument] {
        &self.arguments
    }

    /// The namespace and key to look up, or `None` if the key comes from a
    /// null parameter.
    fn target(&self, ctx: &EvalContext<'_>) -> Option<(String, String)> {
        let key = match &self.key {
            LookupKey::Fixed(key) => key.clone(),
            LookupKey::Parameter { name, suffix } => {
                let value = ctx.get(name)?;
                format!("{}{suffix}", value.value())
            }
        };
        Some(match key.split_once(NAMESPACE_SEPARATOR) {
            Some((namespace, key)) => (namespace.to_string(), key.to_string()),
            None => (ctx.namespace().to_string(), key),
        })
    }

    fn call_parameters(&self, ctx: &EvalContext<'_>) -> ParameterSet {
        let mut parameters = ParameterSet::new();
        for (index, argument) in self.arguments.iter().enumerate() {
            let position = index.to_string();
            match argument {
                LookupArgument::Skipped => {}
                LookupArgument::Literal(text) => {
                    parameters.set_value(&position, ParameterValue::new(text.as_str()));
                }
                LookupArgument::Parameter { name, formatter } => {
                    let value = ctx.get(name).cloned().unwrap_or_default();
                    let value = match formatter {
                        Some(formatter) => value.with_default_format(Arc::clone(formatter)),
                        None => value,
                    };
                    parameters.set_value(name, value.clone());
                    parameters.set_value(&position, value);
                }
            }
        }
        parameters
    }
}

impl ParameterEvaluator for LookupEvaluator {
    fn evaluate(&self, ctx: &EvalContext<'_>) -> Result<ParameterValue, EvalError> {
        let Some((namespace, key)) = self.target(ctx) else {
            return Ok(ParameterValue::default());
        };
        let unresolved = |suggestions| EvalError::UnresolvedLookup {
            namespace: namespace.clone(),
            key: key.clone(),
            suggestions,
        };

        let Some(lookup) = ctx.lookup() else {
            return Err(unresolved(Vec::new()));
        };
        let Some(pattern) = lookup.pattern(&namespace, &key, ctx.language()) else {
            let known = lookup.known_keys(&namespace);
            return Err(unresolved(compute_suggestions(&key, known.iter().map(String::as_str))));
        };

        let name = format!("{namespace}/{key}");
        let _frame = ctx.enter(&name)?;
        let compiled = lookup
            .compile(&pattern)
            .map_err(|source| EvalError::Compile {
                key: name.clone(),
                source,
            })?;
        let mut child = ctx.child(&namespace, self.call_parameters(ctx));
        let text = compiled.evaluate(&mut child)?;
        Ok(ParameterValue::unencoded(text))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for LookupArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupArgument::Skipped => f.write_str("Skipped"),
            LookupArgument::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            LookupArgument::Parameter { name, formatter } => f
                .debug_struct("Parameter")
                .field("name", name)
                .field("formatter", &formatter.as_ref().map(|formatter| formatter.kind()))
                .finish(),
        }
    }
}

/// Accepts names starting with `@`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LookupEvaluatorFactory;

impl EvaluatorFactory for LookupEvaluatorFactory {
    fn try_resolve(
        &self,
        spec: &ParameterSpec,
        dialect: &Dialect,
    ) -> Result<Option<Arc<dyn ParameterEvaluator>>, BindError> {
        let Some(key) = spec.name.strip_prefix('@') else {
            return Ok(None);
        };
        let key = match key.strip_prefix('@') {
            Some(parameter) => {
                let (name, suffix) = parameter.split_once('+').unwrap_or((parameter, ""));
                LookupKey::Parameter {
                    name: name.trim().to_string(),
                    suffix: suffix.trim().to_string(),
                }
            }
            None => LookupKey::Fixed(key.trim().to_string()),
        };
        let arguments = match &spec.arguments {
            Some(arguments) => arguments
                .split(',')
                .map(|argument| parse_argument(argument, dialect))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        Ok(Some(Arc::new(LookupEvaluator::new(key, arguments))))
    }
}

fn parse_argument(argument: &str, dialect: &Dialect) -> Result<LookupArgument, BindError> {
    let argument = argument.trim();
    if let Some(literal) = quoted(argument) {
        return Ok(LookupArgument::Literal(literal.to_string()));
    }
    let (name, format) = match argument.split_once(':') {
        Some((name, format)) => (name.trim(), Some(format.trim())),
        None => (argument, None),
    };
    if name.is_empty() {
        return Ok(LookupArgument::Skipped);
    }
    let formatter = format
        .map(|format| dialect.formatter_for(format, "lookup argument"))
        .transpose()?;
    Ok(LookupArgument::Parameter {
        name: name.to_string(),
        formatter,
    })
}

/// The inside of `"text"` or `'text'`.
fn quoted(argument: &str) -> Option<&str> {
    let starts = argument.starts_with(['"', '\'']);
    let ends = argument.ends_with(['"', '\'']);
    (argument.len() >= 2 && starts && ends).then(|| &argument[1..argument.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_literals_strip_either_quote() {
        assert_eq!(quoted("\"a b\""), Some("a b"));
        assert_eq!(quoted("'x'"), Some("x"));
        assert_eq!(quoted("\""), None);
        assert_eq!(quoted("name"), None);
    }

    #[test]
    fn duration_components_wrap() {
        let duration = TimeDelta::minutes(135);
        assert!(matches!(duration_property(duration, "hours"), Some(Value::Number(2))));
        assert!(matches!(duration_property(duration, "minutes"), Some(Value::Number(15))));
        assert!(
            matches!(duration_property(duration, "totalhours"), Some(Value::Float(h)) if h == 2.25)
        );
    }
}
