//! Error types for the interpreter.

use std::fmt;

use thiserror::Error;

use crate::dialect::{BindError, CompileError};

/// An error that occurred during pattern evaluation.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A cross-pattern reference names a pattern that does not exist.
    #[error("pattern '{key}' not found in namespace '{namespace}'{}", format_suggestions(suggestions))]
    UnresolvedLookup {
        namespace: String,
        key: String,
        suggestions: Vec<String>,
    },

    /// A lookup condition resolved to empty text.
    #[error("condition '{spelling}' could not be resolved")]
    UnresolvedCondition { spelling: String },

    /// Cyclic reference detected during evaluation.
    #[error("cyclic reference detected: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// Maximum recursion depth exceeded.
    #[error("maximum recursion depth of {depth} exceeded")]
    MaxDepthExceeded { depth: usize },

    /// A property path step does not exist on the value.
    #[error("{kind} value has no property '{property}'")]
    UnknownProperty { property: String, kind: &'static str },

    /// A looked-up pattern failed to compile.
    #[error("failed to compile '{key}': {source}")]
    Compile {
        key: String,
        #[source]
        source: CompileError,
    },

    /// A condition spelling fetched at evaluation time failed to bind.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The output sink rejected a write.
    #[error("failed to write output")]
    Write(#[from] fmt::Error),
}

/// A formatter could not format a value.
///
/// The interpreter recovers from these by writing the value's raw string
/// conversion instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("{value} is outside the range {min}..={max}")]
    OutOfRange { value: String, min: i64, max: i64 },

    #[error("cannot format {kind} value as {expected}")]
    Unsupported {
        kind: &'static str,
        expected: &'static str,
    },

    #[error("invalid format string '{format}'")]
    InvalidFormat { format: String },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; did you mean: {}?", suggestions.join(", "))
    }
}

/// Keys similar to `target`, closest first.
///
/// Uses Levenshtein distance, accepting keys within a third of the
/// target's length (at least 1).
///
/// # Example
///
/// ```
/// use glot::interpreter::compute_suggestions;
///
/// let keys = ["Greeting", "Farewell", "Greetings"];
/// assert_eq!(compute_suggestions("Greting", keys), vec!["Greeting", "Greetings"]);
/// ```
pub fn compute_suggestions<'a>(target: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let threshold = (target.chars().count().div_euclid(3)).max(1);
    let target_lower = target.to_lowercase();
    let mut scored: Vec<(usize, &str)> = candidates
        .into_iter()
        .map(|candidate| (strsim::levenshtein(&target_lower, &candidate.to_lowercase()), candidate))
        .filter(|(distance, _)| *distance <= threshold)
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
