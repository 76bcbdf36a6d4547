//! Pattern parser using winnow.
//!
//! Parses pattern strings into an AST. Handles:
//! - Literal text, with `\` escaping the next character
//! - Parameters: `{Name}`, `{Name:Format}`, `{@Key(Arg1,Arg2):Format}`
//! - Switches: `#Name{cond: case | case | ?null}` and `#Template(Name){...}`
//! - Format groups: `<Name: inner>`

use super::ast::*;
use super::error::ParseError;
use super::normalize::normalize;
use winnow::combinator::{cut_err, opt};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// Characters that end a text run.
const TEXT_STOPPERS: &[char] = &['{', '}', '|', '#', '<', '>'];
/// Characters that end a parameter or switch name.
const NAME_STOPPERS: &[char] = &['{', '}', '|', ':', '<', '>'];
/// Characters that end a parameter or switch format.
const FORMAT_STOPPERS: &[char] = &['{', '}'];
/// Characters that end the template name and format of a templated switch.
const TEMPLATE_STOPPERS: &[char] = &['{', '}', '(', ')'];
/// Characters that end the parameter name inside `#Template(...)`.
const TEMPLATED_NAME_STOPPERS: &[char] = &['{', '}', '(', ')', ':'];
/// Characters that end a parameter argument list.
const ARGUMENT_STOPPERS: &[char] = &[')'];
/// Characters that end a case condition.
const CONDITION_STOPPERS: &[char] = &[':'];

/// Look-ahead sets: the first of these found decides how to read on.
const ARGUMENT_STARTERS: &[char] = &['(', ':', '}'];
const TEMPLATE_STARTERS: &[char] = &['(', ':', '{'];
const CASE_STARTERS: &[char] = &['{', '}', '|', ':'];

/// Parse and normalize a pattern string.
///
/// # Example
///
/// ```
/// use glot::parser::{Part, parse_pattern};
///
/// let expr = parse_pattern("Hello {Name}!").unwrap();
/// assert_eq!(expr.parts.len(), 3);
/// assert!(matches!(&expr.parts[1], Part::Parameter(p) if p.name == "Name"));
/// ```
pub fn parse_pattern(input: &str) -> Result<Expression, ParseError> {
    let mut expression = parse_unnormalized(input)?;
    normalize(&mut expression);
    Ok(expression)
}

/// Parse a pattern string without running the normalizer.
pub fn parse_unnormalized(input: &str) -> Result<Expression, ParseError> {
    let mut remaining = input;
    match expression(&mut remaining) {
        Ok(expression) => match remaining.chars().next() {
            None => Ok(expression),
            Some(c) => Err(syntax_error(
                input,
                remaining,
                "expression",
                format!("unexpected '{c}'"),
            )),
        },
        Err(e) => Err(from_context(input, remaining, e)),
    }
}

fn syntax_error(original: &str, remaining: &str, construct: &str, message: String) -> ParseError {
    let offset = original.len() - remaining.len();
    let (line, column) = calculate_position(original, remaining);
    ParseError::Syntax {
        construct: construct.to_string(),
        offset,
        line,
        column,
        message,
    }
}

/// Build a syntax error from the labels and expectations winnow collected.
fn from_context(original: &str, remaining: &str, error: ErrMode<ContextError>) -> ParseError {
    let context = match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e,
        ErrMode::Incomplete(_) => ContextError::new(),
    };
    let construct = context
        .context()
        .find_map(|c| match c {
            StrContext::Label(label) => Some(*label),
            _ => None,
        })
        .unwrap_or("expression");
    let expected: Vec<String> = context
        .context()
        .filter_map(|c| match c {
            StrContext::Expected(value) => Some(value.to_string()),
            _ => None,
        })
        .collect();
    let found = match remaining.chars().next() {
        Some(c) => format!("'{c}'"),
        None => "end of input".to_string(),
    };
    let message = if expected.is_empty() {
        format!("unexpected {found}")
    } else {
        format!("expected {} but found {found}", expected.join(" or "))
    };
    syntax_error(original, remaining, construct, message)
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed_str.rfind('\n') {
        Some(pos) => consumed_str[pos + 1..].chars().count() + 1,
        None => consumed_str.chars().count() + 1,
    };
    (line, column)
}

// =========================================================================
// Expressions
// =========================================================================

/// Parse parts until a stopper that has no meaning here, or end of input.
fn expression(input: &mut &str) -> ModalResult<Expression> {
    let mut parts = Vec::new();
    while let Some(part) = part(input)? {
        parts.push(part);
    }
    // An empty expression is an empty string.
    if parts.is_empty() {
        parts.push(Part::text(""));
    }
    Ok(Expression::new(parts))
}

fn part(input: &mut &str) -> ModalResult<Option<Part>> {
    match input.chars().next() {
        None => Ok(None),
        Some('{') => parameter(input).map(|spec| Some(Part::Parameter(spec))),
        Some('#') => switch(input).map(|switch| Some(Part::Switch(switch))),
        Some('<') => format_group(input).map(|group| Some(Part::FormatGroup(group))),
        Some(c) if TEXT_STOPPERS.contains(&c) => Ok(None),
        Some(_) => Ok(Some(Part::text(read_text(input, TEXT_STOPPERS)))),
    }
}

/// Parse `{name}`, `{name:format}` or `{name(args):format}`.
fn parameter(input: &mut &str) -> ModalResult<ParameterSpec> {
    symbol(input, '{')?;
    let (name, arguments) = if look_ahead_for(input, ARGUMENT_STARTERS) == Some('(') {
        let name = read_text(input, &['(']);
        symbol(input, '(')?;
        let arguments = read_text(input, ARGUMENT_STOPPERS);
        expect(input, ')', "parameter")?;
        (name, Some(arguments))
    } else {
        (read_text(input, NAME_STOPPERS), None)
    };
    let format = if maybe(input, ':')?.is_some() {
        read_text(input, FORMAT_STOPPERS)
    } else {
        String::new()
    };
    expect(input, '}', "parameter")?;
    Ok(ParameterSpec {
        name,
        format,
        arguments,
    })
}

/// Parse `<name>` or `<name: expression>`.
fn format_group(input: &mut &str) -> ModalResult<FormatGroup> {
    symbol(input, '<')?;
    let name = read_text(input, NAME_STOPPERS);
    let expression = if maybe(input, ':')?.is_some() {
        Some(expression(input)?)
    } else {
        None
    };
    expect(input, '>', "format group")?;
    Ok(FormatGroup { name, expression })
}

// =========================================================================
// Switches
// =========================================================================

/// Parse a switch header and its cases.
fn switch(input: &mut &str) -> ModalResult<Switch> {
    symbol(input, '#')?;

    let (template, parameter) = if look_ahead_for(input, TEMPLATE_STARTERS) == Some('(') {
        let template = read_text(input, TEMPLATE_STOPPERS);
        expect(input, '(', "templated switch")?;
        let name = read_text(input, TEMPLATED_NAME_STOPPERS);
        let format = if maybe(input, ':')?.is_some() {
            read_text(input, TEMPLATE_STOPPERS)
        } else {
            String::new()
        };
        expect(input, ')', "templated switch")?;
        (
            Some(template),
            ParameterSpec {
                name,
                format,
                arguments: None,
            },
        )
    } else {
        let name = read_text(input, NAME_STOPPERS);
        let format = if maybe(input, ':')?.is_some() {
            read_text(input, FORMAT_STOPPERS)
        } else {
            String::new()
        };
        (
            None,
            ParameterSpec {
                name,
                format,
                arguments: None,
            },
        )
    };

    expect(input, '{', "switch")?;

    let mut cases = Vec::new();
    let mut null_case = None;
    while !input.starts_with('}') {
        ws(input)?;
        if maybe(input, '?')?.is_some() {
            ws(input)?;
            null_case = Some(NullCase {
                position: cases.len(),
                expression: expression(input)?,
            });
        } else {
            cases.push(switch_case(input)?);
        }
        if case_separator(input)? == '}' {
            return Ok(Switch {
                parameter,
                template,
                cases,
                null_case,
            });
        }
    }
    symbol(input, '}')?;

    Ok(Switch {
        parameter,
        template,
        cases,
        null_case,
    })
}

/// Parse `[condition:] expression`.
fn switch_case(input: &mut &str) -> ModalResult<SwitchCase> {
    let condition = if look_ahead_for(input, CASE_STARTERS) == Some(':') {
        let condition = read_text(input, CONDITION_STOPPERS);
        symbol(input, ':')?;
        Some(Expression::text(condition))
    } else {
        None
    };
    let expression = expression(input)?;
    Ok(SwitchCase {
        condition,
        expression,
    })
}

/// Consume the `|` or `}` that must follow a case.
fn case_separator(input: &mut &str) -> ModalResult<char> {
    cut_err(one_of(['|', '}']))
        .context(StrContext::Label("switch"))
        .context(StrContext::Expected(StrContextValue::CharLiteral('|')))
        .context(StrContext::Expected(StrContextValue::CharLiteral('}')))
        .parse_next(input)
}

// =========================================================================
// Tokens
// =========================================================================

/// Read text up to the first unescaped stopper, resolving escapes.
///
/// A trailing lone `\` is kept as a literal backslash.
fn read_text(input: &mut &str, stoppers: &[char]) -> String {
    let mut text = String::new();
    let mut end = input.len();
    let mut chars = input.char_indices();
    while let Some((index, c)) = chars.next() {
        if c == '\\' {
            text.push(chars.next().map_or('\\', |(_, escaped)| escaped));
        } else if stoppers.contains(&c) {
            end = index;
            break;
        } else {
            text.push(c);
        }
    }
    *input = &input[end..];
    text
}

/// Find the first unescaped character from `chars` without consuming input.
fn look_ahead_for(input: &str, chars: &[char]) -> Option<char> {
    let mut iter = input.chars();
    while let Some(c) = iter.next() {
        if c == '\\' {
            iter.next();
        } else if chars.contains(&c) {
            return Some(c);
        }
    }
    None
}

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

fn symbol(input: &mut &str, mut c: char) -> ModalResult<char> {
    c.parse_next(input)
}

fn maybe(input: &mut &str, c: char) -> ModalResult<Option<char>> {
    opt(c).parse_next(input)
}

/// Require `c`, failing the whole parse if it is missing.
fn expect(input: &mut &str, c: char, construct: &'static str) -> ModalResult<char> {
    cut_err(c)
        .context(StrContext::Label(construct))
        .context(StrContext::Expected(StrContextValue::CharLiteral(c)))
        .parse_next(input)
}
