//! Pattern parsing.
//!
//! [`parse_pattern`] turns a pattern string into an [`Expression`]. The
//! [`PatternParser`] trait lets a dialect swap in a different grammar, such
//! as [`TextParser`] for patterns that are plain text.

pub mod ast;
mod error;
mod normalize;
mod pattern;
mod printer;

use std::fmt;

pub use ast::{
    CustomNode, Expression, FormatGroup, NullCase, ParameterSpec, Part, Switch, SwitchCase,
};
pub use error::ParseError;
pub use normalize::normalize;
pub use pattern::{parse_pattern, parse_unnormalized};

/// A grammar that produces normalized expressions.
pub trait PatternParser: fmt::Debug + Send + Sync {
    fn parse(&self, pattern: &str) -> Result<Expression, ParseError>;
}

/// The pattern grammar with parameters, switches and format groups.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultParser;

impl PatternParser for DefaultParser {
    fn parse(&self, pattern: &str) -> Result<Expression, ParseError> {
        parse_pattern(pattern)
    }
}

/// Reads the whole pattern as a single text part.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextParser;

impl PatternParser for TextParser {
    fn parse(&self, pattern: &str) -> Result<Expression, ParseError> {
        Ok(Expression::text(pattern))
    }
}
