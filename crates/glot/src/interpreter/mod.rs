//! Evaluation of bound expressions.
//!
//! [`evaluate`] walks a [`BoundExpression`](crate::dialect::BoundExpression)
//! against an [`EvalContext`] and produces text. Bound trees are read-only,
//! so one tree can serve many concurrent evaluations as long as each has its
//! own context.

mod context;
mod error;
mod evaluator;
mod lookup;

pub use context::{CallFrame, DEFAULT_MAX_DEPTH, EvalContext, Scope};
pub use error::{EvalError, FormatError, compute_suggestions};
pub use evaluator::{evaluate, evaluate_to};
pub use lookup::PatternLookup;
