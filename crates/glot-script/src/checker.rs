//! The pass that finds strategies without generators.

use std::any::{Any, TypeId};
use std::fmt;

use glot::dialect::{BoundExpression, BoundPart};
use glot::interpreter::DEFAULT_MAX_DEPTH;
use glot::strategy::{
    CustomPart, FormatGroupExpander, ParameterEvaluator, SwitchCondition, ValueFormatter,
};
use serde::Serialize;

use crate::generator::{ScriptGenerator, ScriptScope};

/// The strategy trait a missing mapping was found for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MappingRole {
    ParameterEvaluator,
    ValueFormatter,
    SwitchCondition,
    FormatGroupExpander,
    CustomPart,
}

impl fmt::Display for MappingRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MappingRole::ParameterEvaluator => "ParameterEvaluator",
            MappingRole::ValueFormatter => "ValueFormatter",
            MappingRole::SwitchCondition => "SwitchCondition",
            MappingRole::FormatGroupExpander => "FormatGroupExpander",
            MappingRole::CustomPart => "CustomPart",
        })
    }
}

/// A strategy type with no registered generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingMapping {
    pub role: MappingRole,
    /// The strategy's short type name.
    pub kind: &'static str,
}

impl fmt::Display for MissingMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Missing {}: {}", self.role, self.kind)
    }
}

/// Walks a bound expression and records which generators it needs.
///
/// Generators call back into the checker from
/// [`StrategyGenerator::check`](crate::StrategyGenerator::check) to report
/// the strategies they nest.
pub struct Checker<'a> {
    generator: &'a ScriptGenerator,
    scope: ScriptScope<'a>,
    missing: Vec<MissingMapping>,
    used: Vec<TypeId>,
    depth: usize,
}

impl<'a> Checker<'a> {
    pub(crate) fn new(generator: &'a ScriptGenerator, scope: ScriptScope<'a>) -> Self {
        Self {
            generator,
            scope,
            missing: Vec::new(),
            used: Vec::new(),
            depth: 0,
        }
    }

    pub fn scope(&self) -> &ScriptScope<'a> {
        &self.scope
    }

    pub fn expression(&mut self, expression: &BoundExpression) {
        for part in &expression.parts {
            match part {
                BoundPart::Text(_) => {}
                BoundPart::Parameter(parameter) => {
                    self.evaluator(parameter.evaluator.as_ref());
                    self.formatter(parameter.formatter.as_ref());
                }
                BoundPart::Switch(switch) => {
                    self.evaluator(switch.evaluator.as_ref());
                    if let Some(formatter) = &switch.formatter {
                        self.formatter(formatter.as_ref());
                    }
                    for case in &switch.cases {
                        self.condition(case.condition.as_ref());
                        self.expression(&case.expression);
                    }
                    if let Some(null_case) = &switch.null_case {
                        self.expression(null_case);
                    }
                }
                BoundPart::FormatGroup(group) => {
                    self.evaluator(group.evaluator.as_ref());
                    self.expander(group.expander.as_ref());
                    if let Some(expression) = &group.expression {
                        self.expression(expression);
                    }
                }
                BoundPart::Custom(custom) => self.custom_part(custom.part.as_ref()),
            }
        }
    }

    pub fn evaluator(&mut self, evaluator: &dyn ParameterEvaluator) {
        self.strategy(MappingRole::ParameterEvaluator, evaluator.as_any(), evaluator.kind());
    }

    pub fn formatter(&mut self, formatter: &dyn ValueFormatter) {
        self.strategy(MappingRole::ValueFormatter, formatter.as_any(), formatter.kind());
    }

    pub fn condition(&mut self, condition: &dyn SwitchCondition) {
        self.strategy(MappingRole::SwitchCondition, condition.as_any(), condition.kind());
    }

    pub fn expander(&mut self, expander: &dyn FormatGroupExpander) {
        self.strategy(MappingRole::FormatGroupExpander, expander.as_any(), expander.kind());
    }

    pub fn custom_part(&mut self, part: &dyn CustomPart) {
        self.strategy(MappingRole::CustomPart, part.as_any(), part.kind());
    }

    /// Run `check` one level deeper. Returns false without running it when
    /// the nesting limit is reached.
    pub fn nested(&mut self, check: impl FnOnce(&mut Self)) -> bool {
        if self.depth >= DEFAULT_MAX_DEPTH {
            return false;
        }
        self.depth += 1;
        check(self);
        self.depth -= 1;
        true
    }

    pub(crate) fn finish(self) -> (Vec<MissingMapping>, Vec<TypeId>) {
        (self.missing, self.used)
    }

    fn strategy(&mut self, role: MappingRole, strategy: &dyn Any, kind: &'static str) {
        let id = strategy.type_id();
        let generator = self.generator;
        match generator.find(id) {
            Some(found) => {
                if !self.used.contains(&id) {
                    self.used.push(id);
                }
                found.check(strategy, self);
            }
            None => {
                let mapping = MissingMapping { role, kind };
                if !self.missing.contains(&mapping) {
                    self.missing.push(mapping);
                }
            }
        }
    }
}

impl fmt::Debug for Checker<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("scope", &self.scope)
            .field("missing", &self.missing)
            .field("depth", &self.depth)
            .finish()
    }
}
