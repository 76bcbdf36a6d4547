//! Built-in switch conditions.
//!
//! Factories are listed in the order [`Dialect::standard`] consults them:
//!
//! | spelling              | condition                |
//! |-----------------------|--------------------------|
//! | empty, `true`, `other`| [`TakeAllCondition`]     |
//! | `a and b`, `a or b`   | [`BooleanCondition`]     |
//! | `@Key`                | [`LookupCondition`]      |
//! | `%10=1`, `+5*2>=10`   | [`ArithmeticCondition`]  |
//! | `[1,5)`, `>= PT1H`    | [`IntervalCondition`]    |
//! | `one`, `few`          | [`PluralCondition`]      |
//! | `1,2,3`, `!= a, b`    | [`ValueListCondition`]   |
//!
//! A value that cannot be converted to what a condition compares against
//! does not match.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::TimeDelta;
use regex::Regex;
use serde::Serialize;

use super::SwitchCondition;
use super::evaluators::NAMESPACE_SEPARATOR;
use super::iso_duration::parse_duration;
use super::plural::plural_category;
use crate::dialect::{BindError, ConditionFactory, Dialect};
use crate::interpreter::{EvalContext, EvalError};
use crate::types::{ParameterValue, Value};

// =========================================================================
// Take all
// =========================================================================

/// Always matches.
#[derive(Debug, Default, Clone, Copy)]
pub struct TakeAllCondition;

impl SwitchCondition for TakeAllCondition {
    fn matches(&self, _value: &ParameterValue, _ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Accepts the empty spelling, `true` and `other`, ignoring case.
#[derive(Debug, Default, Clone, Copy)]
pub struct TakeAllConditionFactory;

impl ConditionFactory for TakeAllConditionFactory {
    fn try_resolve(
        &self,
        spelling: &str,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn SwitchCondition>>, BindError> {
        let spelling = spelling.trim();
        let take_all = spelling.is_empty()
            || spelling.eq_ignore_ascii_case("true")
            || spelling.eq_ignore_ascii_case("other");
        Ok(take_all.then(|| Arc::new(TakeAllCondition) as Arc<dyn SwitchCondition>))
    }
}

// =========================================================================
// Boolean composition
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanOperator {
    And,
    Or,
}

/// `left and right` or `left or right`. Both sides are always evaluated.
pub struct BooleanCondition {
    left: Arc<dyn SwitchCondition>,
    operator: BooleanOperator,
    right: Arc<dyn SwitchCondition>,
}

impl BooleanCondition {
    pub fn new(
        left: Arc<dyn SwitchCondition>,
        operator: BooleanOperator,
        right: Arc<dyn SwitchCondition>,
    ) -> Self {
        Self {
            left,
            operator,
            right,
        }
    }

    pub fn left(&self) -> &Arc<dyn SwitchCondition> {
        &self.left
    }

    pub fn operator(&self) -> BooleanOperator {
        self.operator
    }

    pub fn right(&self) -> &Arc<dyn SwitchCondition> {
        &self.right
    }
}

impl SwitchCondition for BooleanCondition {
    fn matches(&self, value: &ParameterValue, ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        let left = self.left.matches(value, ctx)?;
        let right = self.right.matches(value, ctx)?;
        Ok(match self.operator {
            BooleanOperator::And => left && right,
            BooleanOperator::Or => left || right,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for BooleanCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BooleanCondition")
            .field("left", &self.left.kind())
            .field("operator", &self.operator)
            .field("right", &self.right.kind())
            .finish()
    }
}

static BOOLEAN_OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s+(and|or)\s+").expect("boolean operator pattern should compile")
});

/// Splits at the first `and`/`or` outside parentheses and resolves each
/// side with the dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanConditionFactory;

impl ConditionFactory for BooleanConditionFactory {
    fn try_resolve(
        &self,
        spelling: &str,
        dialect: &Dialect,
    ) -> Result<Option<Arc<dyn SwitchCondition>>, BindError> {
        let Some((left, operator, right)) = split_boolean(strip_parentheses(spelling.trim())) else {
            return Ok(None);
        };
        let left = dialect.condition_for(strip_parentheses(left), "boolean condition")?;
        let right = dialect.condition_for(strip_parentheses(right), "boolean condition")?;
        Ok(Some(Arc::new(BooleanCondition::new(left, operator, right))))
    }
}

/// Removes parentheses that enclose the whole text.
fn strip_parentheses(text: &str) -> &str {
    let mut text = text.trim();
    while text.starts_with('(') && closing_parenthesis(text) == Some(text.len() - 1) {
        text = text[1..text.len() - 1].trim();
    }
    text
}

/// Byte offset of the parenthesis closing the one at offset 0.
fn closing_parenthesis(text: &str) -> Option<usize> {
    let mut depth = 0_usize;
    for (offset, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn split_boolean(text: &str) -> Option<(&str, BooleanOperator, &str)> {
    let mut depth = 0_usize;
    for (offset, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 && offset > 0 => {
                if let Some(found) = BOOLEAN_OPERATOR.captures(&text[offset..]) {
                    let operator = if found[1].eq_ignore_ascii_case("and") {
                        BooleanOperator::And
                    } else {
                        BooleanOperator::Or
                    };
                    let right = &text[offset + found[0].len()..];
                    return (!right.trim().is_empty()).then_some((&text[..offset], operator, right));
                }
            }
            _ => {}
        }
    }
    None
}

// =========================================================================
// Lookup
// =========================================================================

/// `@Key`: the text of another pattern is itself a condition.
///
/// The pattern is fetched through the context's lookup at evaluation time,
/// so one stored rule (say, a plural rule) can serve many switches.
#[derive(Debug, Clone)]
pub struct LookupCondition {
    namespace: Option<String>,
    key: String,
}

impl LookupCondition {
    pub fn new(namespace: Option<String>, key: impl Into<String>) -> Self {
        Self {
            namespace,
            key: key.into(),
        }
    }

    /// The explicit namespace from `@Namespace__Key`, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn spelling(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("@{namespace}{NAMESPACE_SEPARATOR}{}", self.key),
            None => format!("@{}", self.key),
        }
    }
}

impl SwitchCondition for LookupCondition {
    fn matches(&self, value: &ParameterValue, ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        let unresolved = || EvalError::UnresolvedCondition {
            spelling: self.spelling(),
        };
        let lookup = ctx.lookup().ok_or_else(unresolved)?;
        let namespace = self.namespace.as_deref().unwrap_or(ctx.namespace());
        let text = lookup
            .pattern(namespace, &self.key, ctx.language())
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(unresolved)?;

        let _frame = ctx.enter(&format!("{namespace}/{}", self.key))?;
        let condition = lookup.condition(&text)?;
        condition.matches(value, ctx)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Accepts `@Key` and `@Namespace__Key`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LookupConditionFactory;

impl ConditionFactory for LookupConditionFactory {
    fn try_resolve(
        &self,
        spelling: &str,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn SwitchCondition>>, BindError> {
        let Some(key) = spelling.trim().strip_prefix('@') else {
            return Ok(None);
        };
        if key.is_empty() || key.starts_with('@') {
            return Ok(None);
        }
        let condition = match key.split_once(NAMESPACE_SEPARATOR) {
            Some((namespace, key)) => LookupCondition::new(Some(namespace.to_string()), key),
            None => LookupCondition::new(None, key),
        };
        Ok(Some(Arc::new(condition)))
    }
}

// =========================================================================
// Arithmetic
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// `\`: division rounded down.
    FloorDivide,
    /// `%`: remainder of the truncated integers.
    Modulo,
}

impl ArithmeticOperator {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            "\\" => Some(Self::FloorDivide),
            "%" => Some(Self::Modulo),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::FloorDivide => "\\",
            Self::Modulo => "%",
        }
    }

    /// `None` for a remainder by zero.
    pub fn apply(self, lhs: f64, rhs: f64) -> Option<f64> {
        match self {
            Self::Add => Some(lhs + rhs),
            Self::Subtract => Some(lhs - rhs),
            Self::Multiply => Some(lhs * rhs),
            Self::Divide => Some(lhs / rhs),
            Self::FloorDivide => Some((lhs / rhs).floor()),
            Self::Modulo => (lhs as i64).checked_rem(rhs as i64).map(|n| n as f64),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOperator {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl CompareOperator {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Self::Equal),
            "!=" | "<>" => Some(Self::NotEqual),
            "<" => Some(Self::Less),
            "<=" => Some(Self::LessOrEqual),
            ">" => Some(Self::Greater),
            ">=" => Some(Self::GreaterOrEqual),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
        }
    }

    /// Incomparable values (NaN) only satisfy `!=`.
    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        match lhs.partial_cmp(&rhs) {
            Some(Ordering::Equal) => matches!(
                self,
                Self::Equal | Self::LessOrEqual | Self::GreaterOrEqual
            ),
            Some(Ordering::Less) => matches!(self, Self::Less | Self::LessOrEqual | Self::NotEqual),
            Some(Ordering::Greater) => {
                matches!(self, Self::Greater | Self::GreaterOrEqual | Self::NotEqual)
            }
            None => self == Self::NotEqual,
        }
    }
}

/// Applies a chain of operations left to right, then compares:
/// `%10=1` matches 1, 11, 21, ...
#[derive(Debug, Clone)]
pub struct ArithmeticCondition {
    operations: Vec<(ArithmeticOperator, f64)>,
    comparison: CompareOperator,
    target: f64,
}

impl ArithmeticCondition {
    pub fn new(
        operations: Vec<(ArithmeticOperator, f64)>,
        comparison: CompareOperator,
        target: f64,
    ) -> Self {
        Self {
            operations,
            comparison,
            target,
        }
    }

    pub fn operations(&self) -> &[(ArithmeticOperator, f64)] {
        &self.operations
    }

    pub fn comparison(&self) -> CompareOperator {
        self.comparison
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether `number` satisfies the condition. `None` if an operation is
    /// undefined for it.
    pub fn test(&self, number: f64) -> Option<bool> {
        let result = self
            .operations
            .iter()
            .try_fold(number, |acc, &(operator, operand)| operator.apply(acc, operand))?;
        Some(self.comparison.compare(result, self.target))
    }
}

impl SwitchCondition for ArithmeticCondition {
    fn matches(&self, value: &ParameterValue, _ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        Ok(value
            .value()
            .as_f64()
            .and_then(|number| self.test(number))
            .unwrap_or(false))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

const NUMBER: &str = r"-?\d+(?:\.\d+)?";

static ARITHMETIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*(?P<ops>(?:\s*[-+*/\\%]\s*\d+(?:\.\d+)?)+)\s*(?P<cmp>!=|<>|<=|>=|=|<|>)\s*(?P<target>{NUMBER})\s*$"
    ))
    .expect("arithmetic pattern should compile")
});

static OPERATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<op>[-+*/\\%])\s*(?P<operand>\d+(?:\.\d+)?)")
        .expect("operation pattern should compile")
});

/// Accepts one or more `<op> <number>` steps followed by a comparison.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArithmeticConditionFactory;

impl ConditionFactory for ArithmeticConditionFactory {
    fn try_resolve(
        &self,
        spelling: &str,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn SwitchCondition>>, BindError> {
        Ok(parse_arithmetic(spelling).map(|condition| Arc::new(condition) as Arc<dyn SwitchCondition>))
    }
}

fn parse_arithmetic(spelling: &str) -> Option<ArithmeticCondition> {
    let found = ARITHMETIC.captures(spelling)?;
    let operations = OPERATION
        .captures_iter(&found["ops"])
        .map(|step| {
            let operator = ArithmeticOperator::from_symbol(&step["op"])?;
            let operand = step["operand"].parse().ok()?;
            Some((operator, operand))
        })
        .collect::<Option<Vec<_>>>()?;
    let comparison = CompareOperator::from_symbol(&found["cmp"])?;
    let target = found["target"].parse().ok()?;
    Some(ArithmeticCondition::new(operations, comparison, target))
}

// =========================================================================
// Intervals
// =========================================================================

/// An interval whose ends may be open, closed or missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T> {
    pub min: Option<T>,
    pub max: Option<T>,
    pub min_inclusive: bool,
    pub max_inclusive: bool,
}

impl<T: PartialOrd> Interval<T> {
    pub fn contains(&self, value: &T) -> bool {
        let above = match &self.min {
            Some(min) => value > min || (self.min_inclusive && value == min),
            None => true,
        };
        let below = match &self.max {
            Some(max) => value < max || (self.max_inclusive && value == max),
            None => true,
        };
        above && below
    }

    fn try_map<U>(self, f: impl Fn(T) -> Option<U>) -> Option<Interval<U>> {
        Some(Interval {
            min: match self.min {
                Some(v) => Some(f(v)?),
                None => None,
            },
            max: match self.max {
                Some(v) => Some(f(v)?),
                None => None,
            },
            min_inclusive: self.min_inclusive,
            max_inclusive: self.max_inclusive,
        })
    }
}

/// Matches values inside an interval of numbers or of durations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntervalCondition {
    Number(Interval<f64>),
    /// Bounds were ISO-8601 durations. Only duration values match.
    Duration(Interval<TimeDelta>),
}

impl SwitchCondition for IntervalCondition {
    fn matches(&self, value: &ParameterValue, _ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        Ok(match self {
            IntervalCondition::Number(interval) => value
                .value()
                .as_f64()
                .is_some_and(|number| interval.contains(&number)),
            IntervalCondition::Duration(interval) => value
                .value()
                .as_duration()
                .is_some_and(|duration| interval.contains(&duration)),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

static INTERVAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<open>[\[\]()])\s*(?P<min>[^,]*?)\s*,\s*(?P<max>[^,\[\]()]*?)\s*(?P<close>[\[\]()])\s*$")
        .expect("interval pattern should compile")
});

static HALF_INTERVAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<dir>[<>])(?P<inclusive>=)?\s*(?P<limit>\S.*?)\s*$")
        .expect("half interval pattern should compile")
});

/// Accepts `[min,max]` with `[`/`]` inclusive and `(`, `)` or reversed
/// brackets exclusive, and the half-open forms `< <= > >=`.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntervalConditionFactory;

impl ConditionFactory for IntervalConditionFactory {
    fn try_resolve(
        &self,
        spelling: &str,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn SwitchCondition>>, BindError> {
        Ok(parse_interval(spelling).map(|condition| Arc::new(condition) as Arc<dyn SwitchCondition>))
    }
}

fn parse_interval(spelling: &str) -> Option<IntervalCondition> {
    let bounds = if let Some(found) = INTERVAL.captures(spelling) {
        let bound = |name: &str| Some(found[name].to_string()).filter(|text| !text.is_empty());
        Interval {
            min: bound("min"),
            max: bound("max"),
            min_inclusive: &found["open"] == "[",
            max_inclusive: &found["close"] == "]",
        }
    } else {
        let found = HALF_INTERVAL.captures(spelling)?;
        let limit = found["limit"].to_string();
        let lower = &found["dir"] == ">";
        let inclusive = found.name("inclusive").is_some();
        Interval {
            min: lower.then(|| limit.clone()),
            max: (!lower).then_some(limit),
            min_inclusive: inclusive,
            max_inclusive: inclusive,
        }
    };

    let has_bound = bounds.min.is_some() || bounds.max.is_some();
    if has_bound {
        if let Some(durations) = bounds.clone().try_map(|text| parse_duration(&text)) {
            return Some(IntervalCondition::Duration(durations));
        }
    }
    bounds
        .try_map(|text| text.parse::<f64>().ok())
        .map(IntervalCondition::Number)
}

// =========================================================================
// Plural keywords
// =========================================================================

/// A CLDR plural keyword other than `other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralKeyword {
    Zero,
    One,
    Two,
    Few,
    Many,
}

impl PluralKeyword {
    pub fn parse(spelling: &str) -> Option<Self> {
        match spelling.trim().to_ascii_lowercase().as_str() {
            "zero" => Some(Self::Zero),
            "one" => Some(Self::One),
            "two" => Some(Self::Two),
            "few" => Some(Self::Few),
            "many" => Some(Self::Many),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
        }
    }
}

/// Matches numbers whose plural category in the context language is the
/// keyword. Other values match the keyword as text, ignoring case.
#[derive(Debug, Clone, Copy)]
pub struct PluralCondition {
    keyword: PluralKeyword,
}

impl PluralCondition {
    pub fn new(keyword: PluralKeyword) -> Self {
        Self { keyword }
    }

    pub fn keyword(&self) -> PluralKeyword {
        self.keyword
    }
}

impl SwitchCondition for PluralCondition {
    fn matches(&self, value: &ParameterValue, ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        Ok(match value.value() {
            Value::Number(n) => plural_category(ctx.language().language(), *n) == self.keyword.as_str(),
            Value::Float(f) if f.fract() == 0.0 && f.is_finite() => {
                plural_category(ctx.language().language(), *f as i64) == self.keyword.as_str()
            }
            Value::Float(_) => false,
            other => other.to_string().trim().eq_ignore_ascii_case(self.keyword.as_str()),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Accepts `zero`, `one`, `two`, `few` and `many`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PluralConditionFactory;

impl ConditionFactory for PluralConditionFactory {
    fn try_resolve(
        &self,
        spelling: &str,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn SwitchCondition>>, BindError> {
        Ok(PluralKeyword::parse(spelling)
            .map(|keyword| Arc::new(PluralCondition::new(keyword)) as Arc<dyn SwitchCondition>))
    }
}

// =========================================================================
// Value lists
// =========================================================================

/// The values a [`ValueListCondition`] compares against.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSet {
    Numbers(Vec<f64>),
    Strings(Vec<String>),
}

/// Matches values in a list, or not in it when negated.
#[derive(Debug, Clone)]
pub struct ValueListCondition {
    values: ValueSet,
    negated: bool,
}

impl ValueListCondition {
    pub fn new(values: ValueSet, negated: bool) -> Self {
        Self { values, negated }
    }

    pub fn values(&self) -> &ValueSet {
        &self.values
    }

    pub fn negated(&self) -> bool {
        self.negated
    }
}

impl SwitchCondition for ValueListCondition {
    fn matches(&self, value: &ParameterValue, _ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
        let found = match &self.values {
            ValueSet::Numbers(numbers) => {
                let Some(number) = value.value().as_f64() else {
                    return Ok(false);
                };
                numbers.contains(&number)
            }
            ValueSet::Strings(strings) => {
                let text = value.value().to_string();
                strings.iter().any(|candidate| *candidate == text)
            }
        };
        Ok(found != self.negated)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Accepts comma-separated values with an optional `=` or `!=` prefix.
/// The list is numeric when every entry is a number.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValueListConditionFactory;

impl ConditionFactory for ValueListConditionFactory {
    fn try_resolve(
        &self,
        spelling: &str,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn SwitchCondition>>, BindError> {
        let spelling = spelling.trim();
        let (negated, list) = match spelling.strip_prefix("!=") {
            Some(rest) => (true, rest),
            None => (false, spelling.strip_prefix('=').unwrap_or(spelling)),
        };
        let labels: Vec<&str> = list
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .collect();
        if labels.is_empty() {
            return Ok(None);
        }
        let numbers: Option<Vec<f64>> = labels.iter().map(|label| label.parse().ok()).collect();
        let values = match numbers {
            Some(numbers) => ValueSet::Numbers(numbers),
            None => ValueSet::Strings(labels.into_iter().map(str::to_string).collect()),
        };
        Ok(Some(Arc::new(ValueListCondition::new(values, negated))))
    }
}
