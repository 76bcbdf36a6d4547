//! Printing expressions back to pattern syntax.
//!
//! The printed form parses back to an equal expression: stoppers are
//! escaped where the grammar would read them, and case or group
//! expressions with significant edge whitespace are quoted.

use std::fmt;

use super::ast::{Expression, FormatGroup, ParameterSpec, Part, Switch, SwitchCase};

const TEXT_ESCAPES: &[char] = &['{', '}', '|', '#', '<', '>', '\\'];
const OPEN_CASE_ESCAPES: &[char] = &['{', '}', '|', '#', '<', '>', ':', '\\'];
const CONDITION_ESCAPES: &[char] = &['{', '}', '|', ':', '\\'];
const NAME_ESCAPES: &[char] = &['{', '}', '|', ':', '<', '>', '(', '\\'];
const ARGUMENT_ESCAPES: &[char] = &[')', '\\'];
const FORMAT_ESCAPES: &[char] = &['{', '}', '\\'];
const TEMPLATE_ESCAPES: &[char] = &['{', '}', '(', ')', ':', '\\'];

/// Where an expression is printed, which decides what must be escaped.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
    TopLevel,
    /// A case without a condition, where `:` would start one.
    OpenCase,
    Nested,
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_parts(f, self, Position::TopLevel)
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_part(f, self, Position::TopLevel, true)
    }
}

fn write_parts(f: &mut fmt::Formatter<'_>, expression: &Expression, position: Position) -> fmt::Result {
    for (index, part) in expression.parts.iter().enumerate() {
        write_part(f, part, position, index == 0)?;
    }
    Ok(())
}

fn write_part(f: &mut fmt::Formatter<'_>, part: &Part, position: Position, first: bool) -> fmt::Result {
    match part {
        Part::Text { text } => {
            let escapes = if position == Position::OpenCase {
                OPEN_CASE_ESCAPES
            } else {
                TEXT_ESCAPES
            };
            if first && position == Position::OpenCase && text.starts_with('?') {
                f.write_str("\\")?;
            }
            write_escaped(f, text, escapes)
        }
        Part::Parameter(spec) => write_parameter(f, spec),
        Part::Switch(switch) => write_switch(f, switch),
        Part::FormatGroup(group) => write_format_group(f, group),
        Part::Custom(node) => f.write_str(&node.content),
    }
}

fn write_parameter(f: &mut fmt::Formatter<'_>, spec: &ParameterSpec) -> fmt::Result {
    f.write_str("{")?;
    write_escaped(f, &spec.name, NAME_ESCAPES)?;
    if let Some(arguments) = &spec.arguments {
        f.write_str("(")?;
        write_escaped(f, arguments, ARGUMENT_ESCAPES)?;
        f.write_str(")")?;
    }
    if !spec.format.is_empty() {
        f.write_str(":")?;
        write_escaped(f, &spec.format, FORMAT_ESCAPES)?;
    }
    f.write_str("}")
}

fn write_switch(f: &mut fmt::Formatter<'_>, switch: &Switch) -> fmt::Result {
    f.write_str("#")?;
    let spec = &switch.parameter;
    match &switch.template {
        Some(template) => {
            write_escaped(f, template, TEMPLATE_ESCAPES)?;
            f.write_str("(")?;
            write_escaped(f, &spec.name, TEMPLATE_ESCAPES)?;
            if !spec.format.is_empty() {
                f.write_str(":")?;
                write_escaped(f, &spec.format, TEMPLATE_ESCAPES)?;
            }
            f.write_str(")")?;
        }
        None => {
            write_escaped(f, &spec.name, NAME_ESCAPES)?;
            if !spec.format.is_empty() {
                f.write_str(":")?;
                write_escaped(f, &spec.format, FORMAT_ESCAPES)?;
            }
        }
    }

    f.write_str("{")?;
    let mut first = true;
    for index in 0..=switch.cases.len() {
        if let Some(null_case) = switch.null_case.as_ref().filter(|n| n.position == index) {
            if !first {
                f.write_str(" | ")?;
            }
            first = false;
            f.write_str("? ")?;
            write_quoted(f, &null_case.expression, Position::Nested)?;
        }
        if let Some(case) = switch.cases.get(index) {
            if !first {
                f.write_str(" | ")?;
            }
            first = false;
            write_case(f, case)?;
        }
    }
    f.write_str("}")
}

fn write_case(f: &mut fmt::Formatter<'_>, case: &SwitchCase) -> fmt::Result {
    match &case.condition {
        Some(condition) => {
            for part in &condition.parts {
                match part {
                    Part::Text { text } => write_escaped(f, text, CONDITION_ESCAPES)?,
                    other => write_part(f, other, Position::Nested, false)?,
                }
            }
            f.write_str(": ")?;
            write_quoted(f, &case.expression, Position::Nested)
        }
        None => write_quoted(f, &case.expression, Position::OpenCase),
    }
}

fn write_format_group(f: &mut fmt::Formatter<'_>, group: &FormatGroup) -> fmt::Result {
    f.write_str("<")?;
    write_escaped(f, &group.name, NAME_ESCAPES)?;
    if let Some(expression) = &group.expression {
        f.write_str(": ")?;
        write_quoted(f, expression, Position::Nested)?;
    }
    f.write_str(">")
}

/// Write an expression, wrapping it in quotes if its edges would be trimmed.
fn write_quoted(f: &mut fmt::Formatter<'_>, expression: &Expression, position: Position) -> fmt::Result {
    if needs_quotes(expression) {
        f.write_str("\"")?;
        write_parts(f, expression, position)?;
        f.write_str("\"")
    } else {
        write_parts(f, expression, position)
    }
}

fn needs_quotes(expression: &Expression) -> bool {
    let is_edge = |c: char| c.is_whitespace() || c == '"';
    let starts = matches!(
        expression.parts.first(),
        Some(Part::Text { text }) if text.starts_with(is_edge)
    );
    let ends = matches!(
        expression.parts.last(),
        Some(Part::Text { text }) if text.ends_with(is_edge)
    );
    starts || ends
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str, escapes: &[char]) -> fmt::Result {
    for c in text.chars() {
        if escapes.contains(&c) {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    Ok(())
}
