//! Runtime data passed into pattern evaluation.

mod encoder;
mod language;
mod parameter;
mod parameters;
mod value;

pub use encoder::Encoder;
pub use language::{Culture, Language, LanguageError};
pub use parameter::{ParameterValue, WrapFn, Wrapping};
pub use parameters::{LayeredParameterSet, ParameterSet};
pub use value::{Value, format_duration};
