//! Generators for the built-in strategies.
//!
//! Roman numerals and plural keywords depend on tables the runtime does not
//! carry, so they have no generator and are reported missing.

use std::fmt::{self, Write};
use std::sync::Arc;

use glot::strategy::conditions::{
    ArithmeticCondition, ArithmeticOperator, BooleanCondition, BooleanOperator, CompareOperator,
    Interval, IntervalCondition, LookupCondition, TakeAllCondition, ValueListCondition, ValueSet,
};
use glot::strategy::evaluators::{
    DirectEvaluator, LookupArgument, LookupEvaluator, LookupKey, NAMESPACE_SEPARATOR,
    PropertyEvaluator,
};
use glot::strategy::formatters::{CaseFormatter, CaseMode, DefaultFormatter, FormatStringFormatter};
use glot::strategy::{HashTagExpander, SwitchCondition};
use tracing::debug;

use crate::checker::Checker;
use crate::generator::{ScriptScope, StrategyGenerator};
use crate::writer::{ScriptWriter, number_literal, string_literal};

/// The argument at `index`, or `undefined` when the caller passed fewer.
fn arg<'s>(args: &[&'s str], index: usize) -> &'s str {
    args.get(index).copied().unwrap_or("undefined")
}

// =========================================================================
// Evaluators
// =========================================================================

/// `c.g("Name")`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectGenerator;

impl StrategyGenerator<DirectEvaluator> for DirectGenerator {
    fn write(&self, evaluator: &DirectEvaluator, writer: &mut ScriptWriter<'_>, _args: &[&str]) -> fmt::Result {
        writer.write_str("c.g(")?;
        writer.string(evaluator.name())?;
        writer.write_str(")")
    }
}

/// `rp(c.g("Order"),["Total"])`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PropertyGenerator;

impl StrategyGenerator<PropertyEvaluator> for PropertyGenerator {
    fn write(&self, evaluator: &PropertyEvaluator, writer: &mut ScriptWriter<'_>, _args: &[&str]) -> fmt::Result {
        writer.write_str("rp(c.g(")?;
        writer.string(evaluator.base())?;
        writer.write_str("),[")?;
        for (index, property) in evaluator.path().iter().enumerate() {
            if index > 0 {
                writer.write_str(",")?;
            }
            writer.string(property)?;
        }
        writer.write_str("])")
    }
}

/// Calls the text manager for another entry.
///
/// A fixed key is split into namespace and key here; a key read from a
/// parameter is split at runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct LookupGenerator;

impl StrategyGenerator<LookupEvaluator> for LookupGenerator {
    fn check(&self, evaluator: &LookupEvaluator, checker: &mut Checker<'_>) {
        for argument in evaluator.arguments() {
            if let LookupArgument::Parameter {
                formatter: Some(formatter),
                ..
            } = argument
            {
                checker.formatter(formatter.as_ref());
            }
        }
    }

    fn write(&self, evaluator: &LookupEvaluator, writer: &mut ScriptWriter<'_>, _args: &[&str]) -> fmt::Result {
        writer.write_str("(function(){var k=")?;
        match evaluator.key() {
            LookupKey::Fixed(key) => match key.split_once(NAMESPACE_SEPARATOR) {
                Some((namespace, key)) => {
                    writer.string(key)?;
                    writer.write_str(",ns=")?;
                    writer.string(namespace)?;
                    writer.write_str(";")?;
                }
                None => {
                    writer.string(key)?;
                    writer.write_str(",ns=c.n;")?;
                }
            },
            LookupKey::Parameter { name, suffix } => {
                writer.write_str("val(c.g(")?;
                writer.string(name)?;
                writer.write_str("));if(k==null)return null;k=\"\"+k")?;
                if !suffix.is_empty() {
                    writer.write_str("+")?;
                    writer.string(suffix)?;
                }
                write!(
                    writer,
                    ";var ns=c.n,i=k.indexOf(\"{NAMESPACE_SEPARATOR}\");\
                     if(i>=0){{ns=k.substring(0,i);k=k.substring(i+{});}}",
                    NAMESPACE_SEPARATOR.len()
                )?;
            }
        }

        writer.write_str("var vs={},v;")?;
        for (index, argument) in evaluator.arguments().iter().enumerate() {
            let position = index.to_string();
            match argument {
                LookupArgument::Skipped => {}
                LookupArgument::Literal(text) => {
                    writer.write_str("vs[")?;
                    writer.string(&position)?;
                    writer.write_str("]=")?;
                    writer.string(text)?;
                    writer.write_str(";")?;
                }
                LookupArgument::Parameter { name, formatter } => {
                    writer.write_str("v=c.g(")?;
                    writer.string(name)?;
                    writer.write_str(");")?;
                    if let Some(formatter) = formatter {
                        writer.write_str("v=m.withFormat(v,function(v){return ")?;
                        writer.formatter(formatter.as_ref(), "v")?;
                        writer.write_str(";});")?;
                    }
                    writer.write_str("vs[")?;
                    writer.string(name)?;
                    writer.write_str("]=v;vs[")?;
                    writer.string(&position)?;
                    writer.write_str("]=v;")?;
                }
            }
        }
        writer.write_str("return m.unencoded(m.get(k,vs,ns));})()")
    }
}

// =========================================================================
// Formatters
// =========================================================================

/// `dv(v)`: the value's default format, or its plain text.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatterGenerator;

impl StrategyGenerator<DefaultFormatter> for DefaultFormatterGenerator {
    fn write(&self, _formatter: &DefaultFormatter, writer: &mut ScriptWriter<'_>, args: &[&str]) -> fmt::Result {
        write!(writer, "dv({})", arg(args, 0))
    }
}

const CASE_HELPERS: &str = "\
function _lc(s){return s.toLocaleLowerCase(m.culture.name||undefined);}
function _uc(s){return s.toLocaleUpperCase(m.culture.name||undefined);}
function _cf(s){return s===\"\"?s:_uc(s.charAt(0))+_lc(s.substring(1));}
function _ca(s){return s.split(\" \").map(_cf).join(\" \");}
";

/// Case changes through the `_lc`, `_uc`, `_cf` and `_ca` helpers.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaseGenerator;

impl StrategyGenerator<CaseFormatter> for CaseGenerator {
    fn prerequisites(&self) -> &'static str {
        CASE_HELPERS
    }

    fn write(&self, formatter: &CaseFormatter, writer: &mut ScriptWriter<'_>, args: &[&str]) -> fmt::Result {
        let helper = match formatter.mode() {
            CaseMode::Lower => "_lc",
            CaseMode::Upper => "_uc",
            CaseMode::CapitalizeFirst => "_cf",
            CaseMode::CapitalizeAll => "_ca",
        };
        write!(writer, "{helper}(dv({}))", arg(args, 0))
    }
}

/// `sf("N2",val(v))`. The runtime knows the standard numeric formats; other
/// format strings write the plain value.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormatStringGenerator;

impl StrategyGenerator<FormatStringFormatter> for FormatStringGenerator {
    fn write(&self, formatter: &FormatStringFormatter, writer: &mut ScriptWriter<'_>, args: &[&str]) -> fmt::Result {
        writer.write_str("sf(")?;
        writer.string(formatter.format_string())?;
        write!(writer, ",val({}))", arg(args, 0))
    }
}

// =========================================================================
// Conditions
// =========================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct TakeAllGenerator;

impl StrategyGenerator<TakeAllCondition> for TakeAllGenerator {
    fn write(&self, _condition: &TakeAllCondition, writer: &mut ScriptWriter<'_>, _args: &[&str]) -> fmt::Result {
        writer.write_str("true")
    }
}

/// Strict comparisons against each listed value. Numeric lists compare the
/// value converted to a number; a negated numeric list never matches a
/// value that is not one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValueListGenerator;

impl StrategyGenerator<ValueListCondition> for ValueListGenerator {
    fn write(&self, condition: &ValueListCondition, writer: &mut ScriptWriter<'_>, args: &[&str]) -> fmt::Result {
        let value = arg(args, 0);
        let (equal, join) = if condition.negated() {
            ("!==", "&&")
        } else {
            ("===", "||")
        };
        let tests: Vec<String> = match condition.values() {
            ValueSet::Numbers(numbers) => {
                let mut tests: Vec<String> = numbers
                    .iter()
                    .map(|number| format!("+{value}{equal}{}", number_literal(*number)))
                    .collect();
                if condition.negated() {
                    tests.insert(0, format!("!isNaN(+{value})"));
                }
                tests
            }
            ValueSet::Strings(strings) => strings
                .iter()
                .map(|text| format!("\"\"+{value}{equal}{}", string_literal(text)))
                .collect(),
        };
        if tests.is_empty() {
            return writer.write_str(if condition.negated() { "true" } else { "false" });
        }
        write!(writer, "({})", tests.join(join))
    }
}

/// Bound comparisons. Duration bounds are compared in milliseconds, the
/// unit durations have at runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntervalGenerator;

impl StrategyGenerator<IntervalCondition> for IntervalGenerator {
    fn write(&self, condition: &IntervalCondition, writer: &mut ScriptWriter<'_>, args: &[&str]) -> fmt::Result {
        let interval = match condition {
            IntervalCondition::Number(interval) => *interval,
            IntervalCondition::Duration(interval) => Interval {
                min: interval.min.map(|bound| bound.num_milliseconds() as f64),
                max: interval.max.map(|bound| bound.num_milliseconds() as f64),
                min_inclusive: interval.min_inclusive,
                max_inclusive: interval.max_inclusive,
            },
        };
        let value = arg(args, 0);

        let mut tests = Vec::new();
        if let Some(min) = interval.min {
            let operator = if interval.min_inclusive { ">=" } else { ">" };
            tests.push(format!("+{value}{operator}{}", number_literal(min)));
        }
        if let Some(max) = interval.max {
            let operator = if interval.max_inclusive { "<=" } else { "<" };
            tests.push(format!("+{value}{operator}{}", number_literal(max)));
        }
        if tests.is_empty() {
            return write!(writer, "!isNaN(+{value})");
        }
        write!(writer, "({})", tests.join("&&"))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanGenerator;

impl StrategyGenerator<BooleanCondition> for BooleanGenerator {
    fn check(&self, condition: &BooleanCondition, checker: &mut Checker<'_>) {
        checker.condition(condition.left().as_ref());
        checker.condition(condition.right().as_ref());
    }

    fn write(&self, condition: &BooleanCondition, writer: &mut ScriptWriter<'_>, args: &[&str]) -> fmt::Result {
        let value = arg(args, 0);
        writer.write_str("(")?;
        writer.condition(condition.left().as_ref(), value)?;
        writer.write_str(match condition.operator() {
            BooleanOperator::And => "&&",
            BooleanOperator::Or => "||",
        })?;
        writer.condition(condition.right().as_ref(), value)?;
        writer.write_str(")")
    }
}

/// Operations applied left to right to the value as a number. The
/// remainder works on truncated integers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArithmeticGenerator;

impl StrategyGenerator<ArithmeticCondition> for ArithmeticGenerator {
    fn write(&self, condition: &ArithmeticCondition, writer: &mut ScriptWriter<'_>, args: &[&str]) -> fmt::Result {
        let value = arg(args, 0);
        let mut expression = format!("+{value}");
        for (operator, operand) in condition.operations() {
            let literal = operand_literal(*operand);
            expression = match operator {
                ArithmeticOperator::Add => format!("({expression}+{literal})"),
                ArithmeticOperator::Subtract => format!("({expression}-{literal})"),
                ArithmeticOperator::Multiply => format!("({expression}*{literal})"),
                ArithmeticOperator::Divide => format!("({expression}/{literal})"),
                ArithmeticOperator::FloorDivide => format!("Math.floor({expression}/{literal})"),
                ArithmeticOperator::Modulo => {
                    format!("(Math.trunc({expression})%{})", operand_literal(operand.trunc()))
                }
            };
        }

        let target = number_literal(condition.target());
        let comparison = match condition.comparison() {
            CompareOperator::Equal => "===",
            CompareOperator::NotEqual => {
                return write!(writer, "(!isNaN(+{value})&&{expression}!=={target})");
            }
            CompareOperator::Less => "<",
            CompareOperator::LessOrEqual => "<=",
            CompareOperator::Greater => ">",
            CompareOperator::GreaterOrEqual => ">=",
        };
        write!(writer, "({expression}{comparison}{target})")
    }
}

/// Inlines the condition stored under the key, resolved through the scope's
/// lookup. Unresolvable keys never match.
#[derive(Debug, Default, Clone, Copy)]
pub struct LookupConditionGenerator;

impl StrategyGenerator<LookupCondition> for LookupConditionGenerator {
    fn check(&self, condition: &LookupCondition, checker: &mut Checker<'_>) {
        if let Some(resolved) = resolve_condition(condition, checker.scope()) {
            checker.nested(|checker| checker.condition(resolved.as_ref()));
        }
    }

    fn write(&self, condition: &LookupCondition, writer: &mut ScriptWriter<'_>, args: &[&str]) -> fmt::Result {
        let Some(resolved) = resolve_condition(condition, writer.scope()) else {
            return writer.write_str("false");
        };
        let value = arg(args, 0);
        if !writer.nested(|writer| writer.condition(resolved.as_ref(), value))? {
            writer.write_str("false")?;
        }
        Ok(())
    }
}

fn resolve_condition(condition: &LookupCondition, scope: &ScriptScope<'_>) -> Option<Arc<dyn SwitchCondition>> {
    let lookup = scope.lookup?;
    let namespace = condition.namespace().unwrap_or(scope.namespace);
    let text = lookup
        .pattern(namespace, condition.key(), scope.language)
        .filter(|text| !text.trim().is_empty())?;
    match lookup.condition(&text) {
        Ok(resolved) => Some(resolved),
        Err(error) => {
            debug!(key = condition.key(), %error, "lookup condition does not resolve");
            None
        }
    }
}

// =========================================================================
// Expanders
// =========================================================================

/// `p.split("{#}").join(i)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashTagGenerator;

impl StrategyGenerator<HashTagExpander> for HashTagGenerator {
    fn write(&self, _expander: &HashTagExpander, writer: &mut ScriptWriter<'_>, args: &[&str]) -> fmt::Result {
        write!(writer, "{}.split(\"{{#}}\").join({})", arg(args, 0), arg(args, 1))
    }
}

fn operand_literal(number: f64) -> String {
    let literal = number_literal(number);
    if literal.starts_with('-') {
        format!("({literal})")
    } else {
        literal
    }
}
