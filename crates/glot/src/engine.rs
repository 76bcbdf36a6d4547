//! Pattern storage, compilation caching and rendering by key.
//!
//! An [`Engine`] ties a [`Dialect`] to a [`PatternSource`]. It is the
//! [`PatternLookup`] that `@Key` references and `@Key` conditions resolve
//! through, and it caches compiled patterns and condition spellings so each
//! is bound once.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use bon::Builder;
use chrono::{FixedOffset, Offset, Utc};
use tracing::{debug, trace};

use crate::dialect::{BindError, CompileError, CompiledPattern, Dialect};
use crate::interpreter::{EvalContext, EvalError, PatternLookup, compute_suggestions};
use crate::strategy::SwitchCondition;
use crate::types::{Encoder, Language, ParameterSet};

/// Where an [`Engine`] finds pattern texts.
pub trait PatternSource: Send + Sync {
    /// The pattern stored for exactly this language tag. The empty tag is
    /// the invariant language.
    fn get(&self, namespace: &str, key: &str, language: &str) -> Option<String>;

    /// All keys in a namespace, in any language.
    fn keys(&self, namespace: &str) -> Vec<String>;
}

/// Patterns held in memory, keyed by namespace, key and language tag.
///
/// # Example
///
/// ```
/// use glot::{MemorySource, PatternSource};
///
/// let source = MemorySource::new()
///     .with("", "Greeting", "en", "Hello {Name}")
///     .with("", "Greeting", "", "Hi {Name}");
/// assert_eq!(source.get("", "Greeting", "en").as_deref(), Some("Hello {Name}"));
/// assert_eq!(source.keys(""), vec!["Greeting"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    patterns: BTreeMap<(String, String, String), String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a pattern, replacing any previous one for the same slot.
    pub fn insert(&mut self, namespace: &str, key: &str, language: &str, pattern: impl Into<String>) {
        self.patterns.insert(
            (namespace.to_string(), key.to_string(), language.to_string()),
            pattern.into(),
        );
    }

    /// Chainable form of [`MemorySource::insert`].
    pub fn with(mut self, namespace: &str, key: &str, language: &str, pattern: impl Into<String>) -> Self {
        self.insert(namespace, key, language, pattern);
        self
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl PatternSource for MemorySource {
    fn get(&self, namespace: &str, key: &str, language: &str) -> Option<String> {
        self.patterns
            .get(&(namespace.to_string(), key.to_string(), language.to_string()))
            .cloned()
    }

    fn keys(&self, namespace: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .patterns
            .keys()
            .filter(|(ns, _, _)| ns == namespace)
            .map(|(_, key, _)| key.clone())
            .collect();
        keys.dedup();
        keys
    }
}

/// Renders stored patterns by key.
///
/// Compiled patterns and resolved conditions are cached behind `RwLock`s,
/// so an engine can be shared between threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use glot::{Engine, Language, MemorySource, ParameterSet};
///
/// let source = MemorySource::new()
///     .with("", "Items", "en", "#Count{1: one item | {#} items}")
///     .with("", "Cart", "en", "Your cart has {@Items(Count)}.");
/// let engine = Engine::builder()
///     .source(Arc::new(source))
///     .language(Language::parse("en").unwrap())
///     .build();
///
/// let params = ParameterSet::new().with("Count", 1);
/// assert_eq!(engine.render("Cart", params).unwrap(), "Your cart has one item.");
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct Engine {
    #[builder(default)]
    dialect: Dialect,

    source: Arc<dyn PatternSource>,

    /// Namespace used by [`Engine::render`] and unqualified `@Key` lookups.
    #[builder(default)]
    namespace: String,

    #[builder(default)]
    language: Language,

    #[builder(default = Utc.fix())]
    time_zone: FixedOffset,

    #[builder(default)]
    encoder: Encoder,

    #[builder(skip)]
    compiled: RwLock<HashMap<String, Arc<CompiledPattern>>>,

    #[builder(skip)]
    conditions: RwLock<HashMap<String, Arc<dyn SwitchCondition>>>,
}

impl Engine {
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// An evaluation context using this engine's defaults and lookups.
    pub fn context(&self, parameters: ParameterSet) -> EvalContext<'_> {
        self.context_for(&self.namespace, &self.language, parameters)
    }

    fn context_for(&self, namespace: &str, language: &Language, parameters: ParameterSet) -> EvalContext<'_> {
        EvalContext::builder()
            .language(language.clone())
            .time_zone(self.time_zone)
            .namespace(namespace)
            .parameters(parameters)
            .encoder(self.encoder.clone())
            .lookup(self)
            .build()
    }

    /// Render the pattern stored under `key` in the default namespace and
    /// language.
    pub fn render(&self, key: &str, parameters: ParameterSet) -> Result<String, EvalError> {
        self.render_in(&self.namespace, key, &self.language, parameters)
    }

    /// Render a stored pattern in a specific namespace and language.
    pub fn render_in(
        &self,
        namespace: &str,
        key: &str,
        language: &Language,
        parameters: ParameterSet,
    ) -> Result<String, EvalError> {
        let Some(text) = self.pattern(namespace, key, language) else {
            let known = self.source.keys(namespace);
            return Err(EvalError::UnresolvedLookup {
                namespace: namespace.to_string(),
                key: key.to_string(),
                suggestions: compute_suggestions(key, known.iter().map(String::as_str)),
            });
        };
        let compiled = self.compiled(&text).map_err(|source| EvalError::Compile {
            key: format!("{namespace}/{key}"),
            source,
        })?;
        let mut ctx = self.context_for(namespace, language, parameters);
        compiled.evaluate(&mut ctx)
    }

    /// Compile and render a pattern text that is not stored in the source.
    pub fn eval_str(&self, pattern: &str, parameters: ParameterSet) -> Result<String, EvalError> {
        let compiled = self.compiled(pattern).map_err(|source| EvalError::Compile {
            key: pattern.to_string(),
            source,
        })?;
        let mut ctx = self.context(parameters);
        compiled.evaluate(&mut ctx)
    }

    /// Compile a pattern text, reusing an earlier compilation of the same
    /// text.
    pub fn compiled(&self, pattern: &str) -> Result<Arc<CompiledPattern>, CompileError> {
        if let Some(compiled) = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(pattern)
        {
            trace!(pattern, "compile cache hit");
            return Ok(Arc::clone(compiled));
        }
        debug!(pattern, "compile cache miss");
        let compiled = Arc::new(self.dialect.compile(pattern)?);
        self.compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pattern.to_string(), Arc::clone(&compiled));
        Ok(compiled)
    }

    /// Number of cached compiled patterns.
    pub fn cache_len(&self) -> usize {
        self.compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drop all cached compilations and conditions.
    pub fn clear_cache(&self) {
        self.compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.conditions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl PatternLookup for Engine {
    fn pattern(&self, namespace: &str, key: &str, language: &Language) -> Option<String> {
        language
            .chain()
            .iter()
            .map(String::as_str)
            .chain([""])
            .find_map(|tag| self.source.get(namespace, key, tag))
    }

    fn compile(&self, pattern: &str) -> Result<Arc<CompiledPattern>, CompileError> {
        self.compiled(pattern)
    }

    fn condition(&self, spelling: &str) -> Result<Arc<dyn SwitchCondition>, BindError> {
        if let Some(condition) = self
            .conditions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(spelling)
        {
            trace!(spelling, "condition cache hit");
            return Ok(Arc::clone(condition));
        }
        debug!(spelling, "condition cache miss");
        let condition = self.dialect.resolve_condition_spelling(spelling)?;
        self.conditions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(spelling.to_string(), Arc::clone(&condition));
        Ok(condition)
    }

    fn known_keys(&self, namespace: &str) -> Vec<String> {
        self.source.keys(namespace)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("dialect", &self.dialect)
            .field("namespace", &self.namespace)
            .field("language", &self.language)
            .field("time_zone", &self.time_zone)
            .field("encoder", &self.encoder)
            .field("cached", &self.cache_len())
            .finish_non_exhaustive()
    }
}
