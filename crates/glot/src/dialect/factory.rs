//! Factory traits consulted by a [`Dialect`] when binding.
//!
//! A factory inspects one representation (a parameter spec, a format string,
//! a condition spelling or a custom node) and either produces a strategy or
//! declines with `Ok(None)` so the next factory in the list is tried.
//! Closures of the matching shape are factories too.

use std::sync::Arc;

use super::{BindError, Dialect};
use crate::parser::{CustomNode, ParameterSpec};
use crate::strategy::{CustomPart, ParameterEvaluator, SwitchCondition, ValueFormatter};

pub trait EvaluatorFactory: Send + Sync {
    fn try_resolve(
        &self,
        spec: &ParameterSpec,
        dialect: &Dialect,
    ) -> Result<Option<Arc<dyn ParameterEvaluator>>, BindError>;
}

pub trait FormatterFactory: Send + Sync {
    fn try_resolve(
        &self,
        format: &str,
        dialect: &Dialect,
    ) -> Result<Option<Arc<dyn ValueFormatter>>, BindError>;
}

pub trait ConditionFactory: Send + Sync {
    fn try_resolve(
        &self,
        spelling: &str,
        dialect: &Dialect,
    ) -> Result<Option<Arc<dyn SwitchCondition>>, BindError>;
}

pub trait CustomPartFactory: Send + Sync {
    fn try_resolve(
        &self,
        node: &CustomNode,
        dialect: &Dialect,
    ) -> Result<Option<Arc<dyn CustomPart>>, BindError>;
}

impl<F> EvaluatorFactory for F
where
    F: Fn(&ParameterSpec) -> Option<Arc<dyn ParameterEvaluator>> + Send + Sync,
{
    fn try_resolve(
        &self,
        spec: &ParameterSpec,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn ParameterEvaluator>>, BindError> {
        Ok(self(spec))
    }
}

impl<F> FormatterFactory for F
where
    F: Fn(&str) -> Option<Arc<dyn ValueFormatter>> + Send + Sync,
{
    fn try_resolve(
        &self,
        format: &str,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn ValueFormatter>>, BindError> {
        Ok(self(format))
    }
}

impl<F> ConditionFactory for F
where
    F: Fn(&str) -> Option<Arc<dyn SwitchCondition>> + Send + Sync,
{
    fn try_resolve(
        &self,
        spelling: &str,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn SwitchCondition>>, BindError> {
        Ok(self(spelling))
    }
}

impl<F> CustomPartFactory for F
where
    F: Fn(&CustomNode) -> Option<Arc<dyn CustomPart>> + Send + Sync,
{
    fn try_resolve(
        &self,
        node: &CustomNode,
        _dialect: &Dialect,
    ) -> Result<Option<Arc<dyn CustomPart>>, BindError> {
        Ok(self(node))
    }
}
