//! Error types for binding and compilation.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::parser::ParseError;

/// The kind of strategy a factory list was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyRole {
    Evaluator,
    Formatter,
    Condition,
    CustomPart,
}

impl fmt::Display for StrategyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrategyRole::Evaluator => "evaluator",
            StrategyRole::Formatter => "formatter",
            StrategyRole::Condition => "condition",
            StrategyRole::CustomPart => "custom part",
        })
    }
}

/// An error binding an expression to runtime strategies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// No factory in the dialect accepted the representation.
    #[error("no {role} accepts '{representation}' in {construct}")]
    UnresolvedStrategy {
        role: StrategyRole,
        /// The kind of node being bound, such as `parameter` or `switch case`.
        construct: String,
        representation: String,
    },
}

impl BindError {
    pub(crate) fn unresolved(
        role: StrategyRole,
        construct: &str,
        representation: impl Into<String>,
    ) -> Self {
        BindError::UnresolvedStrategy {
            role,
            construct: construct.to_string(),
            representation: representation.into(),
        }
    }

    /// The text no factory accepted.
    pub fn representation(&self) -> &str {
        match self {
            BindError::UnresolvedStrategy { representation, .. } => representation,
        }
    }
}

/// An error turning pattern text into a bound expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Bind(#[from] BindError),
}
