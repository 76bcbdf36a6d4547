//! AST types for parsed patterns.
//!
//! These trees are plain data. Binding them against a dialect produces a
//! [`BoundExpression`](crate::dialect::BoundExpression) that can be evaluated.

use serde::Serialize;

/// An ordered sequence of pattern parts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Expression {
    pub parts: Vec<Part>,
}

/// A single node in an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Part {
    /// Literal text (already unescaped).
    Text { text: String },

    /// `{name}`, `{name:format}` or `{name(args):format}`.
    Parameter(ParameterSpec),

    /// `#name{case|case|?null}`.
    Switch(Switch),

    /// `<name: expression>`.
    FormatGroup(FormatGroup),

    /// A node produced by a host parser and bound by a custom part factory.
    Custom(CustomNode),
}

/// A parameter reference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    /// Empty when no format was given.
    pub format: String,
    /// Raw text between the parentheses of `name(args)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

/// A conditional branch over a parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Switch {
    pub parameter: ParameterSpec,
    /// Set for `#Template(Name){...}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    pub cases: Vec<SwitchCase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_case: Option<NullCase>,
}

/// One `condition: expression` branch of a switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchCase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Expression>,
    pub expression: Expression,
}

/// The `?expression` branch taken when the switch value is null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NullCase {
    /// Index among the switch cases where the null case appeared in source.
    pub position: usize,
    pub expression: Expression,
}

/// A wrapper pattern around an inner expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatGroup {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<Expression>,
}

/// An extension node. `content` is printed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomNode {
    pub kind: String,
    pub content: String,
}

impl Expression {
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    /// An expression holding a single text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::text(text)],
        }
    }

    /// The text of an expression made of exactly one text part.
    pub fn as_text(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [Part::Text { text }] => Some(text),
            _ => None,
        }
    }

    /// Returns true if every part is text.
    pub fn is_text_only(&self) -> bool {
        self.parts.iter().all(|part| matches!(part, Part::Text { .. }))
    }
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }
}

impl ParameterSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl SwitchCase {
    /// A case whose condition is the given spelling.
    pub fn when(condition: impl Into<String>, expression: Expression) -> Self {
        Self {
            condition: Some(Expression::text(condition)),
            expression,
        }
    }

    /// A case without a condition.
    pub fn otherwise(expression: Expression) -> Self {
        Self {
            condition: None,
            expression,
        }
    }
}
