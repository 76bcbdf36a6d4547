//! CLI command implementations.

mod check;
mod eval;
mod explain;
mod options;
mod print;
mod script;

pub use check::{CheckArgs, run_check};
pub use eval::{EvalArgs, run_eval};
pub use explain::{ExplainArgs, run_explain};
pub use print::{PrintArgs, run_print};
pub use script::{ScriptArgs, run_script};
