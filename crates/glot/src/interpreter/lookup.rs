use std::sync::Arc;

use crate::dialect::{BindError, CompileError, CompiledPattern};
use crate::strategy::SwitchCondition;
use crate::types::Language;

/// Access to other patterns during evaluation.
///
/// `@Key` references and `@Key` switch conditions go through this trait. The
/// [`Engine`](crate::Engine) implements it over a pattern source with compile
/// caching; hosts can implement it over their own storage.
pub trait PatternLookup: Send + Sync {
    /// The pattern text for `key`, searched along the language's chain.
    fn pattern(&self, namespace: &str, key: &str, language: &Language) -> Option<String>;

    /// Compile a pattern text with the lookup's dialect.
    fn compile(&self, pattern: &str) -> Result<Arc<CompiledPattern>, CompileError>;

    /// Resolve a condition spelling with the lookup's dialect.
    fn condition(&self, spelling: &str) -> Result<Arc<dyn SwitchCondition>, BindError>;

    /// Keys known in a namespace. Used for suggestions when a lookup fails.
    fn known_keys(&self, _namespace: &str) -> Vec<String> {
        Vec::new()
    }
}
