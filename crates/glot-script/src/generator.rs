//! The generator registry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use glot::dialect::BoundExpression;
use glot::{Language, PatternLookup};
use serde::Serialize;
use tracing::debug;

use crate::ScriptError;
use crate::catalog::Catalog;
use crate::checker::{Checker, MissingMapping};
use crate::generators::{
    ArithmeticGenerator, BooleanGenerator, CaseGenerator, DefaultFormatterGenerator,
    DirectGenerator, FormatStringGenerator, HashTagGenerator, IntervalGenerator,
    LookupConditionGenerator, LookupGenerator, PropertyGenerator, TakeAllGenerator,
    ValueListGenerator,
};
use crate::runtime::{FACTORY_ARGUMENTS, RUNTIME};
use crate::writer::{ScriptWriter, string_literal};

/// Writes JavaScript for one strategy type `T`.
///
/// `args` are JavaScript expressions the strategy works on: the value for
/// formatters and conditions, the wrapper and inner text for expanders, and
/// nothing for evaluators and custom parts.
pub trait StrategyGenerator<T>: Send + Sync + 'static {
    /// Helper functions the generated code calls. They are written once per
    /// catalog, inside the catalog factory.
    fn prerequisites(&self) -> &'static str {
        ""
    }

    /// Report strategies nested in `strategy`.
    fn check(&self, _strategy: &T, _checker: &mut Checker<'_>) {}

    fn write(&self, strategy: &T, writer: &mut ScriptWriter<'_>, args: &[&str]) -> fmt::Result;
}

/// A [`StrategyGenerator`] with its strategy type erased.
pub(crate) trait ErasedGenerator: Send + Sync {
    fn prerequisites(&self) -> &'static str;

    fn check(&self, strategy: &dyn Any, checker: &mut Checker<'_>);

    fn write(&self, strategy: &dyn Any, writer: &mut ScriptWriter<'_>, args: &[&str]) -> fmt::Result;
}

struct Typed<T, G> {
    generator: G,
    strategy: PhantomData<fn(&T)>,
}

impl<T: Any, G: StrategyGenerator<T>> ErasedGenerator for Typed<T, G> {
    fn prerequisites(&self) -> &'static str {
        self.generator.prerequisites()
    }

    fn check(&self, strategy: &dyn Any, checker: &mut Checker<'_>) {
        if let Some(strategy) = strategy.downcast_ref::<T>() {
            self.generator.check(strategy, checker);
        }
    }

    fn write(&self, strategy: &dyn Any, writer: &mut ScriptWriter<'_>, args: &[&str]) -> fmt::Result {
        let strategy = strategy.downcast_ref::<T>().ok_or(fmt::Error)?;
        self.generator.write(strategy, writer, args)
    }
}

/// What generated code may resolve at generation time.
#[derive(Clone, Copy)]
pub struct ScriptScope<'a> {
    /// Namespace of the pattern being generated.
    pub namespace: &'a str,
    pub language: &'a Language,
    /// Used to inline `@Key` conditions. Without it they never match.
    pub lookup: Option<&'a dyn PatternLookup>,
}

impl<'a> ScriptScope<'a> {
    pub fn new(language: &'a Language) -> Self {
        Self {
            namespace: "",
            language,
            lookup: None,
        }
    }

    pub fn with_namespace(mut self, namespace: &'a str) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_lookup(mut self, lookup: &'a dyn PatternLookup) -> Self {
        self.lookup = Some(lookup);
        self
    }
}

impl fmt::Debug for ScriptScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptScope")
            .field("namespace", &self.namespace)
            .field("language", &self.language)
            .field("lookup", &self.lookup.is_some())
            .finish()
    }
}

/// A generated expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Script {
    /// A JavaScript string literal for plain text, otherwise a
    /// `function(c){...}` taking the runtime parameter collection.
    pub source: String,
    /// Helper functions `source` calls.
    pub prerequisites: String,
    pub missing: Vec<MissingMapping>,
}

impl Script {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Maps strategy types to the generators that write them.
#[derive(Clone, Default)]
pub struct ScriptGenerator {
    generators: HashMap<TypeId, Arc<dyn ErasedGenerator>>,
}

impl ScriptGenerator {
    /// A generator with no mappings. Every strategy is reported missing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Generators for the built-in evaluators, the default, case and format
    /// string formatters, every built-in condition except plural keywords,
    /// and the `{#}` expander.
    pub fn standard() -> Self {
        Self::empty()
            .with(DirectGenerator)
            .with(PropertyGenerator)
            .with(LookupGenerator)
            .with(DefaultFormatterGenerator)
            .with(CaseGenerator)
            .with(FormatStringGenerator)
            .with(TakeAllGenerator)
            .with(ValueListGenerator)
            .with(IntervalGenerator)
            .with(BooleanGenerator)
            .with(ArithmeticGenerator)
            .with(LookupConditionGenerator)
            .with(HashTagGenerator)
    }

    /// Map strategy type `T` to `generator`, replacing any earlier mapping.
    pub fn register<T: Any, G: StrategyGenerator<T>>(&mut self, generator: G) {
        let typed = Typed {
            generator,
            strategy: PhantomData,
        };
        self.generators.insert(TypeId::of::<T>(), Arc::new(typed));
    }

    pub fn with<T: Any, G: StrategyGenerator<T>>(mut self, generator: G) -> Self {
        self.register(generator);
        self
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.generators.contains_key(&TypeId::of::<T>())
    }

    pub(crate) fn find(&self, id: TypeId) -> Option<&Arc<dyn ErasedGenerator>> {
        self.generators.get(&id)
    }

    /// Every strategy in `expression` without a generator, including
    /// strategies nested in other strategies.
    pub fn check(&self, expression: &BoundExpression, scope: &ScriptScope<'_>) -> Vec<MissingMapping> {
        let mut checker = Checker::new(self, *scope);
        checker.expression(expression);
        checker.finish().0
    }

    /// Generate JavaScript for a bound expression.
    pub fn generate(
        &self,
        expression: &BoundExpression,
        scope: &ScriptScope<'_>,
    ) -> Result<Script, ScriptError> {
        let mut checker = Checker::new(self, *scope);
        checker.expression(expression);
        let (missing, used) = checker.finish();

        let mut writer = ScriptWriter::new(self, *scope);
        writer.entry(expression, &missing)?;
        Ok(Script {
            source: writer.finish(),
            prerequisites: self.prerequisites(&used),
            missing,
        })
    }

    /// Write a catalog as a complete script defining a `Glot.TextManager`.
    ///
    /// Returns the missing mappings of all entries. Entries with missing
    /// mappings are written as placeholders.
    pub fn write_catalog(
        &self,
        catalog: &Catalog<'_>,
        out: &mut impl fmt::Write,
    ) -> Result<Vec<MissingMapping>, ScriptError> {
        let mut missing = Vec::new();
        let mut used = Vec::new();
        let mut entries = Vec::with_capacity(catalog.entries().len());

        for entry in catalog.entries() {
            let mut scope = ScriptScope::new(catalog.language()).with_namespace(&entry.namespace);
            if let Some(lookup) = catalog.lookup() {
                scope = scope.with_lookup(lookup);
            }
            let expression = entry.pattern.bound();
            let mut checker = Checker::new(self, scope);
            checker.expression(expression);
            let (entry_missing, entry_used) = checker.finish();
            if !entry_missing.is_empty() {
                debug!(key = %entry.key, missing = entry_missing.len(), "entry has missing mappings");
            }

            let mut writer = ScriptWriter::new(self, scope);
            writer.entry(expression, &entry_missing)?;
            let kind = if is_plain(expression) { '0' } else { '1' };
            entries.push((format!("{kind}{}", catalog.qualified_key(entry)), writer.finish()));

            for mapping in entry_missing {
                if !missing.contains(&mapping) {
                    missing.push(mapping);
                }
            }
            for id in entry_used {
                if !used.contains(&id) {
                    used.push(id);
                }
            }
        }

        if catalog.include_runtime() {
            out.write_str(RUNTIME)?;
        }
        write!(out, "var {}=new Glot.TextManager(", catalog.name())?;
        write_string(out, catalog.namespace())?;
        write!(
            out,
            ",{},{},function({FACTORY_ARGUMENTS}){{\n",
            catalog.culture(),
            catalog.encode()
        )?;
        out.write_str(&self.prerequisites(&used))?;
        out.write_str("return {\n")?;
        for (index, (key, source)) in entries.iter().enumerate() {
            if index > 0 {
                out.write_str(",\n")?;
            }
            write_string(out, key)?;
            write!(out, ":{source}")?;
        }
        out.write_str("\n};\n});\n")?;

        debug!(
            name = catalog.name(),
            entries = entries.len(),
            missing = missing.len(),
            "wrote catalog"
        );
        Ok(missing)
    }

    fn prerequisites(&self, used: &[TypeId]) -> String {
        let mut out = String::new();
        let helpers = used
            .iter()
            .filter_map(|id| self.find(*id))
            .map(|generator| generator.prerequisites());
        for helper in helpers {
            if !helper.is_empty() && !out.contains(helper) {
                out.push_str(helper);
            }
        }
        out
    }
}

impl fmt::Debug for ScriptGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptGenerator")
            .field("generators", &self.generators.len())
            .finish()
    }
}

/// Whether an expression is written as a string literal.
fn is_plain(expression: &BoundExpression) -> bool {
    expression.parts.is_empty() || expression.as_text().is_some()
}

fn write_string(out: &mut impl fmt::Write, text: &str) -> fmt::Result {
    out.write_str(&string_literal(text))
}
