pub mod dialect;
pub mod engine;
pub mod interpreter;
pub mod parser;
pub mod strategy;
pub mod types;

pub use dialect::{BindError, CompileError, CompiledPattern, Dialect};
pub use engine::{Engine, MemorySource, PatternSource};
pub use interpreter::{
    EvalContext, EvalError, FormatError, PatternLookup, compute_suggestions, evaluate,
    evaluate_to,
};
pub use parser::{Expression, ParseError, parse_pattern};
pub use types::{Encoder, Language, ParameterSet, ParameterValue, Value, Wrapping};

/// Creates a [`ParameterSet`] from name-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats, strings,
/// dates and lists can be passed directly.
///
/// # Example
///
/// ```
/// use glot::params;
///
/// let p = params! { "Count" => 3, "Name" => "Alice" };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p.get("count").unwrap().value().as_integer(), Some(3));
/// assert_eq!(p.get("name").unwrap().value().as_str(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        $crate::ParameterSet::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut set = $crate::ParameterSet::new();
            $(
                set.set($key, ::std::convert::Into::<$crate::Value>::into($value));
            )+
            set
        }
    };
}
