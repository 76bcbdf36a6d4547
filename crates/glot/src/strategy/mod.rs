//! Runtime strategies attached to AST nodes by binding.
//!
//! A bound node owns trait objects that decide how to fetch its value
//! ([`ParameterEvaluator`]), how to turn it into text ([`ValueFormatter`]),
//! and whether a switch case applies ([`SwitchCondition`]). Dialects
//! resolve them through ordered factory lists; see
//! [`Dialect`](crate::dialect::Dialect).

pub mod conditions;
pub mod evaluators;
pub(crate) mod format_string;
pub mod formatters;
pub(crate) mod iso_duration;
pub(crate) mod plural;

use std::any::{Any, type_name};
use std::fmt;

use crate::interpreter::{EvalContext, EvalError, FormatError};
use crate::types::ParameterValue;

pub use iso_duration::parse_duration;

/// Produces the runtime value for a parameter reference.
pub trait ParameterEvaluator: Send + Sync + 'static {
    fn evaluate(&self, ctx: &EvalContext<'_>) -> Result<ParameterValue, EvalError>;

    fn as_any(&self) -> &dyn Any;

    /// A short type name used in diagnostics.
    fn kind(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

/// Turns a runtime value into text.
pub trait ValueFormatter: Send + Sync + 'static {
    fn format(&self, value: &ParameterValue, ctx: &EvalContext<'_>) -> Result<String, FormatError>;

    /// True for formatters that apply no transformation of their own.
    /// Switches drop these so their cases see raw values.
    fn is_default(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;

    fn kind(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

/// Decides whether a switch case applies to a value.
pub trait SwitchCondition: Send + Sync + 'static {
    fn matches(&self, value: &ParameterValue, ctx: &EvalContext<'_>) -> Result<bool, EvalError>;

    fn as_any(&self) -> &dyn Any;

    fn kind(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

/// Splices rendered content into a format group's wrapper pattern.
pub trait FormatGroupExpander: Send + Sync + 'static {
    fn expand(&self, wrapper: &str, content: &str) -> String;

    fn as_any(&self) -> &dyn Any;

    fn kind(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

/// Renders a host-defined custom node.
pub trait CustomPart: Send + Sync + 'static {
    fn render(&self, ctx: &mut EvalContext<'_>, out: &mut dyn fmt::Write) -> Result<(), EvalError>;

    fn as_any(&self) -> &dyn Any;

    fn kind(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

/// Replaces `{#}` in the wrapper with the content.
///
/// # Example
///
/// ```
/// use glot::strategy::{FormatGroupExpander, HashTagExpander};
///
/// assert_eq!(HashTagExpander.expand("**{#}**", "text"), "**text**");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct HashTagExpander;

impl FormatGroupExpander for HashTagExpander {
    fn expand(&self, wrapper: &str, content: &str) -> String {
        wrapper.replace("{#}", content)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The last path segment of a type name, without generics.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let name = type_name::<T>();
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_short_type_name() {
        assert_eq!(HashTagExpander.kind(), "HashTagExpander");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec");
    }
}
