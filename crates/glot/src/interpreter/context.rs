//! Evaluation context carried through one evaluation call.

use std::cell::RefCell;
use std::mem;
use std::ops::{Deref, DerefMut};

use bon::Builder;
use chrono::{FixedOffset, Offset, Utc};

use super::{EvalError, PatternLookup};
use crate::types::{Encoder, Language, LayeredParameterSet, ParameterSet, ParameterValue};

/// Default limit for nested pattern lookups.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Per-call evaluation state.
///
/// The context tracks:
/// - Language and time zone used for formatting
/// - The namespace that relative lookups resolve in
/// - Layered parameters; switches push scopes exposing `#` and `#Index`
/// - The encoder applied to literal text and formatted values
/// - The pattern lookup used by `@Key` references, if any
/// - The chain of lookups in progress, for cycle detection
///
/// Contexts are not shared between concurrent evaluations.
///
/// # Example
///
/// ```
/// use glot::{EvalContext, Language, ParameterSet};
///
/// let ctx = EvalContext::builder()
///     .parameters(ParameterSet::new().with("Name", "World"))
///     .language(Language::parse("en").unwrap())
///     .build();
/// assert!(ctx.get("name").is_some());
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct EvalContext<'a> {
    #[builder(default)]
    language: Language,

    #[builder(default = Utc.fix())]
    time_zone: FixedOffset,

    #[builder(default)]
    namespace: String,

    #[builder(default, into)]
    parameters: LayeredParameterSet,

    #[builder(default)]
    encoder: Encoder,

    lookup: Option<&'a dyn PatternLookup>,

    #[builder(default = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Lookups in progress, outermost first.
    #[builder(skip)]
    call_stack: RefCell<Vec<String>>,
}

impl<'a> EvalContext<'a> {
    /// Create a context with parameters and defaults for everything else.
    pub fn new(parameters: ParameterSet) -> Self {
        Self::builder().parameters(parameters).build()
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn time_zone(&self) -> FixedOffset {
        self.time_zone
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn lookup(&self) -> Option<&'a dyn PatternLookup> {
        self.lookup
    }

    pub fn parameters(&self) -> &LayeredParameterSet {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut LayeredParameterSet {
        &mut self.parameters
    }

    /// Get a parameter value through all layers.
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.parameters.get(name)
    }

    /// Replace the encoder, returning the previous one.
    pub(crate) fn replace_encoder(&mut self, encoder: Encoder) -> Encoder {
        mem::replace(&mut self.encoder, encoder)
    }

    /// Push a parameter layer that is popped when the returned scope drops.
    pub fn scope(&mut self) -> Scope<'_, 'a> {
        self.parameters.push();
        Scope { ctx: self }
    }

    /// Record entry into a nested lookup.
    ///
    /// Returns error if:
    /// - Maximum depth exceeded
    /// - Cycle detected (name already in the chain)
    ///
    /// The entry is removed when the returned frame drops.
    pub fn enter(&self, name: &str) -> Result<CallFrame<'_>, EvalError> {
        let mut stack = self.call_stack.borrow_mut();
        if stack.len() >= self.max_depth {
            return Err(EvalError::MaxDepthExceeded {
                depth: self.max_depth,
            });
        }
        if stack.iter().any(|entry| entry == name) {
            let mut chain = stack.clone();
            chain.push(name.to_string());
            return Err(EvalError::CyclicReference { chain });
        }
        stack.push(name.to_string());
        Ok(CallFrame {
            stack: &self.call_stack,
        })
    }

    /// Current lookup nesting depth.
    pub fn depth(&self) -> usize {
        self.call_stack.borrow().len()
    }

    /// A context for evaluating a looked-up pattern.
    ///
    /// Shares language, time zone, encoder, lookup and the call chain, with
    /// its own namespace and parameters.
    pub fn child(&self, namespace: &str, parameters: ParameterSet) -> EvalContext<'a> {
        EvalContext {
            language: self.language.clone(),
            time_zone: self.time_zone,
            namespace: namespace.to_string(),
            parameters: LayeredParameterSet::new(parameters),
            encoder: self.encoder.clone(),
            lookup: self.lookup,
            max_depth: self.max_depth,
            call_stack: RefCell::new(self.call_stack.borrow().clone()),
        }
    }
}

/// A pushed parameter layer. Pops it on drop, including on error paths.
pub struct Scope<'c, 'a> {
    ctx: &'c mut EvalContext<'a>,
}

impl<'a> Deref for Scope<'_, 'a> {
    type Target = EvalContext<'a>;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for Scope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for Scope<'_, '_> {
    fn drop(&mut self) {
        self.ctx.parameters.pop();
    }
}

/// An entry in the lookup chain. Removes itself on drop.
pub struct CallFrame<'c> {
    stack: &'c RefCell<Vec<String>>,
}

impl Drop for CallFrame<'_> {
    fn drop(&mut self) {
        self.stack.borrow_mut().pop();
    }
}
