//! Dialects: a grammar plus the strategies its nodes bind to.
//!
//! A [`Dialect`] owns ordered factory lists for evaluators, formatters,
//! conditions and custom parts. Resolution tries each factory in order and
//! the first one that accepts wins. [`Dialect::compile`] runs the whole
//! pipeline from pattern text to a [`CompiledPattern`].

mod binder;
mod bound;
mod error;
mod factory;
mod rewriter;
mod transform;

use std::fmt;
use std::sync::Arc;

use tracing::debug;

pub use bound::{
    BoundCase, BoundCustom, BoundExpression, BoundFormatGroup, BoundParameter, BoundPart,
    BoundSwitch,
};
pub use error::{BindError, CompileError, StrategyRole};
pub use factory::{ConditionFactory, CustomPartFactory, EvaluatorFactory, FormatterFactory};
pub use transform::{HtmlTagTransformer, PatternTransformer};

use crate::interpreter::{EvalContext, EvalError, evaluate_to};
use crate::parser::{CustomNode, DefaultParser, Expression, ParameterSpec, PatternParser, TextParser};
use crate::strategy::conditions::{
    ArithmeticConditionFactory, BooleanConditionFactory, IntervalConditionFactory,
    LookupConditionFactory, PluralConditionFactory, TakeAllConditionFactory,
    ValueListConditionFactory,
};
use crate::strategy::evaluators::{
    DirectEvaluatorFactory, LookupEvaluatorFactory, PropertyEvaluatorFactory,
};
use crate::strategy::formatters::{
    CaseFormatterFactory, DefaultFormatterFactory, FormatStringFormatterFactory,
    RomanFormatterFactory,
};
use crate::strategy::{
    CustomPart, FormatGroupExpander, HashTagExpander, ParameterEvaluator, SwitchCondition,
    ValueFormatter,
};
use crate::types::Encoder;

/// A parser plus strategy-resolution configuration.
///
/// Dialects are configured once and then shared; binding never mutates
/// them.
///
/// # Example
///
/// ```
/// use glot::{Dialect, EvalContext, ParameterSet};
///
/// let dialect = Dialect::standard();
/// let compiled = dialect.compile("#Count{1: one item | {#} items}").unwrap();
/// let mut ctx = EvalContext::new(ParameterSet::new().with("Count", 3));
/// assert_eq!(compiled.evaluate(&mut ctx).unwrap(), "3 items");
/// ```
#[derive(Clone)]
pub struct Dialect {
    parser: Arc<dyn PatternParser>,
    transformer: Option<Arc<dyn PatternTransformer>>,
    encode: bool,
    evaluators: Vec<Arc<dyn EvaluatorFactory>>,
    formatters: Vec<Arc<dyn FormatterFactory>>,
    conditions: Vec<Arc<dyn ConditionFactory>>,
    custom_parts: Vec<Arc<dyn CustomPartFactory>>,
    expander: Arc<dyn FormatGroupExpander>,
}

impl Dialect {
    /// A dialect with the given parser and no factories.
    pub fn empty(parser: impl PatternParser + 'static) -> Self {
        Self {
            parser: Arc::new(parser),
            transformer: None,
            encode: true,
            evaluators: Vec::new(),
            formatters: Vec::new(),
            conditions: Vec::new(),
            custom_parts: Vec::new(),
            expander: Arc::new(HashTagExpander),
        }
    }

    /// The full pattern grammar with the built-in strategies.
    ///
    /// Evaluators, in order: `@` lookups, dotted property paths, direct
    /// parameters. Formatters: `roman`, case tokens, format strings, the
    /// default. Conditions: always-true, `and`/`or`, `@` lookups, arithmetic,
    /// intervals, plural keywords, value lists.
    pub fn standard() -> Self {
        Self::standard_with(true)
    }

    /// [`Dialect::standard`] without plural keyword conditions. Cases such
    /// as `one` or `few` then fall through to value lists and match the
    /// value's text.
    pub fn standard_without_plurals() -> Self {
        Self::standard_with(false)
    }

    fn standard_with(plural_keywords: bool) -> Self {
        let dialect = Self::empty(DefaultParser)
            .with_evaluator(LookupEvaluatorFactory)
            .with_evaluator(PropertyEvaluatorFactory)
            .with_evaluator(DirectEvaluatorFactory)
            .with_formatter(RomanFormatterFactory)
            .with_formatter(CaseFormatterFactory)
            .with_formatter(FormatStringFormatterFactory)
            .with_formatter(DefaultFormatterFactory)
            .with_condition(TakeAllConditionFactory)
            .with_condition(BooleanConditionFactory)
            .with_condition(LookupConditionFactory)
            .with_condition(ArithmeticConditionFactory)
            .with_condition(IntervalConditionFactory);
        let dialect = if plural_keywords {
            dialect.with_condition(PluralConditionFactory)
        } else {
            dialect
        };
        dialect.with_condition(ValueListConditionFactory)
    }

    /// Patterns are plain text and output is not encoded.
    pub fn text() -> Self {
        Self::standard()
            .with_parser(TextParser)
            .with_encoding(false)
    }

    pub fn with_parser(mut self, parser: impl PatternParser + 'static) -> Self {
        self.parser = Arc::new(parser);
        self
    }

    pub fn with_transformer(mut self, transformer: impl PatternTransformer + 'static) -> Self {
        self.transformer = Some(Arc::new(transformer));
        self
    }

    /// Whether evaluation applies the context encoder. When false, output is
    /// written unencoded whatever the context says.
    pub fn with_encoding(mut self, encode: bool) -> Self {
        self.encode = encode;
        self
    }

    pub fn with_expander(mut self, expander: impl FormatGroupExpander) -> Self {
        self.expander = Arc::new(expander);
        self
    }

    /// Append an evaluator factory, consulted after the existing ones.
    pub fn with_evaluator(mut self, factory: impl EvaluatorFactory + 'static) -> Self {
        self.evaluators.push(Arc::new(factory));
        self
    }

    /// Append a formatter factory, consulted after the existing ones.
    pub fn with_formatter(mut self, factory: impl FormatterFactory + 'static) -> Self {
        self.formatters.push(Arc::new(factory));
        self
    }

    /// Append a condition factory, consulted after the existing ones.
    pub fn with_condition(mut self, factory: impl ConditionFactory + 'static) -> Self {
        self.conditions.push(Arc::new(factory));
        self
    }

    pub fn with_custom_part(mut self, factory: impl CustomPartFactory + 'static) -> Self {
        self.custom_parts.push(Arc::new(factory));
        self
    }

    /// Insert an evaluator factory at `index`; 0 makes it the first consulted.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the number of evaluator factories.
    pub fn insert_evaluator(&mut self, index: usize, factory: impl EvaluatorFactory + 'static) {
        self.evaluators.insert(index, Arc::new(factory));
    }

    /// Insert a formatter factory at `index`; 0 makes it the first consulted.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the number of formatter factories.
    pub fn insert_formatter(&mut self, index: usize, factory: impl FormatterFactory + 'static) {
        self.formatters.insert(index, Arc::new(factory));
    }

    /// Insert a condition factory at `index`; 0 makes it the first consulted.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the number of condition factories.
    pub fn insert_condition(&mut self, index: usize, factory: impl ConditionFactory + 'static) {
        self.conditions.insert(index, Arc::new(factory));
    }

    pub fn encode(&self) -> bool {
        self.encode
    }

    pub fn parser(&self) -> &dyn PatternParser {
        self.parser.as_ref()
    }

    pub fn transformer(&self) -> Option<&Arc<dyn PatternTransformer>> {
        self.transformer.as_ref()
    }

    pub fn expander(&self) -> Arc<dyn FormatGroupExpander> {
        Arc::clone(&self.expander)
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Find the evaluator for a parameter reference.
    pub fn resolve_evaluator(
        &self,
        spec: &ParameterSpec,
    ) -> Result<Arc<dyn ParameterEvaluator>, BindError> {
        self.evaluator_for(spec, "parameter")
    }

    /// Find the formatter for a format string. The empty string is the
    /// absent format.
    pub fn resolve_formatter(&self, format: &str) -> Result<Arc<dyn ValueFormatter>, BindError> {
        self.formatter_for(format, "parameter")
    }

    /// Find the condition for a case condition expression.
    pub fn resolve_condition(
        &self,
        condition: &Expression,
    ) -> Result<Arc<dyn SwitchCondition>, BindError> {
        self.condition_for(&condition_spelling(condition), "switch case")
    }

    /// Find the condition for a spelling such as `>= 5` or `1,2,3`.
    pub fn resolve_condition_spelling(
        &self,
        spelling: &str,
    ) -> Result<Arc<dyn SwitchCondition>, BindError> {
        self.condition_for(spelling, "switch case")
    }

    pub(crate) fn evaluator_for(
        &self,
        spec: &ParameterSpec,
        construct: &str,
    ) -> Result<Arc<dyn ParameterEvaluator>, BindError> {
        for factory in &self.evaluators {
            if let Some(evaluator) = factory.try_resolve(spec, self)? {
                debug!(name = %spec.name, evaluator = evaluator.kind(), "resolved evaluator");
                return Ok(evaluator);
            }
        }
        Err(BindError::unresolved(StrategyRole::Evaluator, construct, spec.name.clone()))
    }

    pub(crate) fn formatter_for(
        &self,
        format: &str,
        construct: &str,
    ) -> Result<Arc<dyn ValueFormatter>, BindError> {
        for factory in &self.formatters {
            if let Some(formatter) = factory.try_resolve(format, self)? {
                debug!(format, formatter = formatter.kind(), "resolved formatter");
                return Ok(formatter);
            }
        }
        Err(BindError::unresolved(StrategyRole::Formatter, construct, format))
    }

    pub(crate) fn condition_for(
        &self,
        spelling: &str,
        construct: &str,
    ) -> Result<Arc<dyn SwitchCondition>, BindError> {
        for factory in &self.conditions {
            if let Some(condition) = factory.try_resolve(spelling, self)? {
                debug!(spelling, condition = condition.kind(), "resolved condition");
                return Ok(condition);
            }
        }
        Err(BindError::unresolved(StrategyRole::Condition, construct, spelling))
    }

    pub(crate) fn custom_part_for(&self, node: &CustomNode) -> Result<Arc<dyn CustomPart>, BindError> {
        for factory in &self.custom_parts {
            if let Some(part) = factory.try_resolve(node, self)? {
                debug!(kind = %node.kind, part = part.kind(), "resolved custom part");
                return Ok(part);
            }
        }
        Err(BindError::unresolved(StrategyRole::CustomPart, &node.kind, node.content.clone()))
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    /// Attach strategies to every node and rewrite switch cases.
    ///
    /// Binding is pure: binding the same expression twice gives trees with
    /// the same strategies.
    pub fn bind(&self, expression: &Expression) -> Result<BoundExpression, BindError> {
        binder::bind_expression(self, expression)
    }

    /// Transform, parse, normalize, bind and rewrite a pattern.
    pub fn compile(&self, pattern: &str) -> Result<CompiledPattern, CompileError> {
        let source = match &self.transformer {
            Some(transformer) => transformer.encode(pattern),
            None => pattern.to_string(),
        };
        let expression = self.parser.parse(&source)?;
        let bound = self.bind(&expression)?;
        Ok(CompiledPattern {
            source: pattern.to_string(),
            expression,
            bound,
            encode: self.encode,
            transformer: self.transformer.clone(),
        })
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialect")
            .field("parser", &self.parser)
            .field("transformer", &self.transformer)
            .field("encode", &self.encode)
            .field("evaluators", &self.evaluators.len())
            .field("formatters", &self.formatters.len())
            .field("conditions", &self.conditions.len())
            .field("custom_parts", &self.custom_parts.len())
            .field("expander", &self.expander.kind())
            .finish()
    }
}

/// The text a condition factory sees for a case condition.
pub(crate) fn condition_spelling(condition: &Expression) -> String {
    match condition.as_text() {
        Some(text) => text.to_string(),
        None => condition.to_string(),
    }
}

/// A pattern bound by a dialect, ready for evaluation.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    expression: Expression,
    bound: BoundExpression,
    encode: bool,
    transformer: Option<Arc<dyn PatternTransformer>>,
}

impl CompiledPattern {
    /// The pattern text as given to [`Dialect::compile`].
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The normalized parse tree.
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn bound(&self) -> &BoundExpression {
        &self.bound
    }

    /// Evaluate to a string.
    pub fn evaluate(&self, ctx: &mut EvalContext<'_>) -> Result<String, EvalError> {
        let mut output = String::new();
        self.evaluate_to(ctx, &mut output)?;
        Ok(output)
    }

    /// Evaluate into a writer, applying the dialect's encoding setting and
    /// transformer.
    pub fn evaluate_to(
        &self,
        ctx: &mut EvalContext<'_>,
        out: &mut impl fmt::Write,
    ) -> Result<(), EvalError> {
        let previous = (!self.encode).then(|| ctx.replace_encoder(Encoder::Identity));
        let result = match &self.transformer {
            None => evaluate_to(&self.bound, ctx, out),
            Some(transformer) => {
                let mut buffer = String::new();
                evaluate_to(&self.bound, ctx, &mut buffer)
                    .and_then(|()| Ok(out.write_str(&transformer.decode(&buffer))?))
            }
        };
        if let Some(previous) = previous {
            ctx.replace_encoder(previous);
        }
        result
    }
}
