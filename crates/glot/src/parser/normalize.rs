//! Post-parse normalization.
//!
//! The grammar keeps whitespace around names and inside cases verbatim.
//! This pass trims it, and strips one pair of `"` from case, null-case and
//! group expressions so authors can keep meaningful edge whitespace by
//! quoting.

use super::ast::{Expression, ParameterSpec, Part};

/// Normalize an expression tree in place.
///
/// # Example
///
/// ```
/// use glot::parser::{Expression, Part, normalize, parse_unnormalized};
///
/// let mut expr = parse_unnormalized("#N{1: \" one \" | other }").unwrap();
/// normalize(&mut expr);
/// let Part::Switch(switch) = &expr.parts[0] else { unreachable!() };
/// assert_eq!(switch.cases[0].expression, Expression::text(" one "));
/// assert_eq!(switch.cases[1].expression, Expression::text("other"));
/// ```
pub fn normalize(expression: &mut Expression) {
    if expression.parts.is_empty() {
        expression.parts.push(Part::text(""));
    }
    for part in &mut expression.parts {
        normalize_part(part);
    }
}

fn normalize_part(part: &mut Part) {
    match part {
        Part::Text { .. } | Part::Custom(_) => {}
        Part::Parameter(spec) => trim_spec(spec),
        Part::Switch(switch) => {
            trim_spec(&mut switch.parameter);
            if let Some(template) = &mut switch.template {
                trim_in_place(template);
            }
            for case in &mut switch.cases {
                normalize_quoted(&mut case.expression);
            }
            if let Some(null_case) = &mut switch.null_case {
                normalize_quoted(&mut null_case.expression);
            }
        }
        Part::FormatGroup(group) => {
            trim_in_place(&mut group.name);
            if let Some(expression) = &mut group.expression {
                normalize_quoted(expression);
            }
        }
    }
}

fn trim_spec(spec: &mut ParameterSpec) {
    trim_in_place(&mut spec.name);
    trim_in_place(&mut spec.format);
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

/// Trim edge whitespace and one enclosing pair of quotes, then recurse.
fn normalize_quoted(expression: &mut Expression) {
    normalize(expression);
    let last = expression.parts.len() - 1;

    if let Part::Text { text } = &mut expression.parts[0] {
        let trimmed = text.trim_start();
        if trimmed.len() != text.len() {
            *text = trimmed.to_string();
        }
    }
    if let Part::Text { text } = &mut expression.parts[last] {
        let trimmed = text.trim_end();
        if trimmed.len() != text.len() {
            *text = trimmed.to_string();
        }
    }

    let opens = matches!(&expression.parts[0], Part::Text { text } if text.starts_with('"'));
    let closes = matches!(&expression.parts[last], Part::Text { text } if text.ends_with('"'));
    let single_quote_char = last == 0 && matches!(&expression.parts[0], Part::Text { text } if text == "\"");
    if opens && closes && !single_quote_char {
        if let Part::Text { text } = &mut expression.parts[0] {
            text.remove(0);
        }
        if let Part::Text { text } = &mut expression.parts[last] {
            text.pop();
        }
    }
}
