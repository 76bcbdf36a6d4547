//! JavaScript source generation for bound glot patterns.
//!
//! A [`ScriptGenerator`] maps strategy types to [`StrategyGenerator`]s that
//! write equivalent JavaScript. Generation runs a checker pass first: when
//! any strategy in an expression has no generator, the expression is
//! written as a placeholder that lists the missing mappings instead of as
//! partial code.
//!
//! # Example
//!
//! ```
//! use glot::{Dialect, Language};
//! use glot_script::{ScriptGenerator, ScriptScope};
//!
//! let compiled = Dialect::standard().compile("Hello {Name}").unwrap();
//! let language = Language::parse("en").unwrap();
//! let script = ScriptGenerator::standard()
//!     .generate(compiled.bound(), &ScriptScope::new(&language))
//!     .unwrap();
//! assert!(script.missing.is_empty());
//! assert!(script.source.starts_with("function(c){return "));
//! ```

mod catalog;
mod checker;
mod generator;
pub mod generators;
mod runtime;
mod writer;

use std::fmt;

use glot::CompileError;
use thiserror::Error;

pub use catalog::{Catalog, CatalogEntry};
pub use checker::{Checker, MappingRole, MissingMapping};
pub use generator::{Script, ScriptGenerator, ScriptScope, StrategyGenerator};
pub use writer::ScriptWriter;

/// Errors from writing scripts.
///
/// Missing generators are not errors; they are reported as
/// [`MissingMapping`]s next to the generated source.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to write script")]
    Write(#[from] fmt::Error),

    #[error("failed to compile pattern '{key}'")]
    Compile {
        key: String,
        #[source]
        source: CompileError,
    },
}
