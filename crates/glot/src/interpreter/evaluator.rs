//! Walks a bound expression and writes its text.
//!
//! Parameters are evaluated, adjusted to the context time zone, formatted and
//! wrapped. Switches pick the first matching case, fanning out over list
//! values. Format groups splice their rendered content into a wrapper
//! pattern.

use std::fmt;

use chrono::FixedOffset;
use tracing::debug;

use crate::dialect::{BoundExpression, BoundFormatGroup, BoundPart, BoundSwitch};
use crate::interpreter::{EvalContext, EvalError};
use crate::strategy::ValueFormatter;
use crate::types::{ParameterValue, Value};

/// Evaluate a bound expression to a string.
///
/// # Example
///
/// ```
/// use glot::{Dialect, EvalContext, ParameterSet, evaluate};
///
/// let dialect = Dialect::text();
/// let compiled = dialect.compile("plain text").unwrap();
/// let mut ctx = EvalContext::new(ParameterSet::new());
/// assert_eq!(evaluate(compiled.bound(), &mut ctx).unwrap(), "plain text");
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - A cross-pattern lookup fails or forms a cycle
/// - A property path names a property the value does not have
/// - A custom part fails
pub fn evaluate(expression: &BoundExpression, ctx: &mut EvalContext<'_>) -> Result<String, EvalError> {
    let mut output = String::new();
    evaluate_to(expression, ctx, &mut output)?;
    Ok(output)
}

/// Evaluate a bound expression into a writer.
///
/// Switch scopes are pushed above a fresh layer, so the caller's parameters
/// are never written to.
pub fn evaluate_to(
    expression: &BoundExpression,
    ctx: &mut EvalContext<'_>,
    out: &mut impl fmt::Write,
) -> Result<(), EvalError> {
    let mut scope = ctx.scope();
    write_expression(expression, &mut scope, out)
}

fn write_expression(
    expression: &BoundExpression,
    ctx: &mut EvalContext<'_>,
    out: &mut dyn fmt::Write,
) -> Result<(), EvalError> {
    for part in &expression.parts {
        match part {
            BoundPart::Text(text) => out.write_str(&ctx.encoder().encode(text))?,
            BoundPart::Parameter(parameter) => {
                let value = parameter.evaluator.evaluate(ctx)?;
                out.write_str(&format_value(value, parameter.formatter.as_ref(), ctx))?;
            }
            BoundPart::Switch(switch) => write_switch(switch, ctx, out)?,
            BoundPart::FormatGroup(group) => write_format_group(group, ctx, out)?,
            BoundPart::Custom(custom) => custom.part.render(ctx, out)?,
        }
    }
    Ok(())
}

fn write_switch(
    switch: &BoundSwitch,
    ctx: &mut EvalContext<'_>,
    out: &mut dyn fmt::Write,
) -> Result<(), EvalError> {
    let value = switch.evaluator.evaluate(ctx)?;

    if value.is_null() {
        if let Some(null_case) = &switch.null_case {
            write_expression(null_case, ctx, out)?;
        }
        return Ok(());
    }

    if let Value::List(items) = value.value() {
        let length = items.len() as i64;
        for (index, item) in (0_i64..).zip(items) {
            let mut scope = ctx.scope();
            let element = list_element(&value, item);
            let current = scoped_value(switch, element, &scope);
            scope.parameters_mut().set("#", current);
            scope
                .parameters_mut()
                .set("#Index", ParameterValue::new(index + 1));

            let forward = ParameterValue::new(index);
            let backward = ParameterValue::new(index - length);
            for case in &switch.cases {
                if case.condition.matches(&forward, &scope)?
                    || case.condition.matches(&backward, &scope)?
                {
                    write_expression(&case.expression, &mut scope, out)?;
                    break;
                }
            }
        }
        return Ok(());
    }

    let mut scope = ctx.scope();
    let current = scoped_value(switch, value.clone(), &scope);
    scope.parameters_mut().set("#", current);
    for case in &switch.cases {
        if case.condition.matches(&value, &scope)? {
            write_expression(&case.expression, &mut scope, out)?;
            break;
        }
    }
    Ok(())
}

/// A list element with the list's hooks filled in where it has none.
fn list_element(list: &ParameterValue, item: &ParameterValue) -> ParameterValue {
    let element = if item.is_plain() {
        list.with_value(item.value().clone())
    } else {
        item.clone()
    };
    match (element.default_format(), list.default_format()) {
        (None, Some(formatter)) => element.with_default_format(formatter.clone()),
        _ => element,
    }
}

/// The value exposed as `#` inside a switch case.
fn scoped_value(switch: &BoundSwitch, value: ParameterValue, ctx: &EvalContext<'_>) -> ParameterValue {
    match &switch.formatter {
        Some(formatter) => ParameterValue::unencoded(format_value(value, formatter.as_ref(), ctx)),
        None => value,
    }
}

fn write_format_group(
    group: &BoundFormatGroup,
    ctx: &mut EvalContext<'_>,
    out: &mut dyn fmt::Write,
) -> Result<(), EvalError> {
    let wrapper = group.evaluator.evaluate(ctx)?.value().to_string();

    if wrapper.is_empty() {
        if let Some(expression) = &group.expression {
            write_expression(expression, ctx, out)?;
        }
        return Ok(());
    }

    // The inner text is already encoded and the wrapper is written as-is.
    let mut inner = String::new();
    if let Some(expression) = &group.expression {
        write_expression(expression, ctx, &mut inner)?;
    }
    out.write_str(&group.expander.expand(&wrapper, &inner))?;
    Ok(())
}

/// Format a value and apply its wrapping hook.
///
/// A formatter failure is not fatal: the value's invariant string
/// conversion is written instead.
fn format_value(value: ParameterValue, formatter: &dyn ValueFormatter, ctx: &EvalContext<'_>) -> String {
    let value = adjust_time_zone(value, ctx.time_zone());
    let formatted = match formatter.format(&value, ctx) {
        Ok(text) => text,
        Err(error) => {
            debug!(formatter = formatter.kind(), %error, "format failed, writing raw value");
            value.value().to_string()
        }
    };
    value.wrap(&formatted, ctx.encoder())
}

fn adjust_time_zone(value: ParameterValue, time_zone: FixedOffset) -> ParameterValue {
    match value.value() {
        Value::DateTime(moment) => {
            let adjusted = moment.with_timezone(&time_zone);
            value.with_value(Value::DateTime(adjusted))
        }
        _ => value,
    }
}
