//! Expressions with runtime strategies attached.
//!
//! A bound tree mirrors the parsed [`Expression`] it came from, but every
//! node that needs runtime behavior owns its strategy. Trees are read-only
//! after binding and can be shared between threads.

use std::fmt;
use std::sync::Arc;

use crate::parser::{CustomNode, Expression, ParameterSpec};
use crate::strategy::{
    CustomPart, FormatGroupExpander, ParameterEvaluator, SwitchCondition, ValueFormatter,
};

/// An expression ready for evaluation.
#[derive(Debug, Clone, Default)]
pub struct BoundExpression {
    pub parts: Vec<BoundPart>,
}

/// A bound expression node.
#[derive(Debug, Clone)]
pub enum BoundPart {
    Text(String),
    Parameter(BoundParameter),
    Switch(BoundSwitch),
    FormatGroup(BoundFormatGroup),
    Custom(BoundCustom),
}

/// A parameter reference with its evaluator and formatter.
#[derive(Clone)]
pub struct BoundParameter {
    pub spec: ParameterSpec,
    pub evaluator: Arc<dyn ParameterEvaluator>,
    pub formatter: Arc<dyn ValueFormatter>,
}

/// A switch with one condition per case.
///
/// Cases are in evaluation order: every case written with a condition comes
/// before the cases written without one.
#[derive(Clone)]
pub struct BoundSwitch {
    pub spec: ParameterSpec,
    pub template: Option<String>,
    pub evaluator: Arc<dyn ParameterEvaluator>,
    /// `None` when the switch format resolved to a default formatter.
    pub formatter: Option<Arc<dyn ValueFormatter>>,
    pub cases: Vec<BoundCase>,
    pub null_case: Option<BoundExpression>,
}

/// A switch case.
#[derive(Clone)]
pub struct BoundCase {
    /// The condition as written in the pattern.
    pub source: Option<Expression>,
    /// The spelling the condition was resolved from. For templated switches
    /// this is the synthesized `@TemplateN` lookup.
    pub spelling: String,
    pub condition: Arc<dyn SwitchCondition>,
    pub expression: BoundExpression,
}

/// A format group with the evaluator for its wrapper pattern.
#[derive(Clone)]
pub struct BoundFormatGroup {
    pub name: String,
    pub evaluator: Arc<dyn ParameterEvaluator>,
    pub expander: Arc<dyn FormatGroupExpander>,
    pub expression: Option<BoundExpression>,
}

/// A host node and the part that renders it.
#[derive(Clone)]
pub struct BoundCustom {
    pub node: CustomNode,
    pub part: Arc<dyn CustomPart>,
}

impl BoundExpression {
    pub fn new(parts: Vec<BoundPart>) -> Self {
        Self { parts }
    }

    /// The text of an expression made of exactly one text part.
    pub fn as_text(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [BoundPart::Text(text)] => Some(text),
            _ => None,
        }
    }
}

impl fmt::Debug for BoundParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundParameter")
            .field("spec", &self.spec)
            .field("evaluator", &self.evaluator.kind())
            .field("formatter", &self.formatter.kind())
            .finish()
    }
}

impl fmt::Debug for BoundSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundSwitch")
            .field("spec", &self.spec)
            .field("template", &self.template)
            .field("evaluator", &self.evaluator.kind())
            .field("formatter", &self.formatter.as_ref().map(|formatter| formatter.kind()))
            .field("cases", &self.cases)
            .field("null_case", &self.null_case)
            .finish()
    }
}

impl fmt::Debug for BoundCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundCase")
            .field("spelling", &self.spelling)
            .field("condition", &self.condition.kind())
            .field("expression", &self.expression)
            .finish()
    }
}

impl fmt::Debug for BoundFormatGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundFormatGroup")
            .field("name", &self.name)
            .field("evaluator", &self.evaluator.kind())
            .field("expander", &self.expander.kind())
            .field("expression", &self.expression)
            .finish()
    }
}

impl fmt::Debug for BoundCustom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundCustom")
            .field("node", &self.node)
            .field("part", &self.part.kind())
            .finish()
    }
}
