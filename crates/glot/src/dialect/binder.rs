//! Attaches strategies to a parsed expression.

use super::rewriter::rewrite_switch;
use super::{
    BindError, BoundCase, BoundCustom, BoundExpression, BoundFormatGroup, BoundParameter,
    BoundPart, BoundSwitch, Dialect, condition_spelling,
};
use crate::parser::{Expression, FormatGroup, ParameterSpec, Part, Switch, SwitchCase};

/// Bind every node of `expression`, then rewrite its switches.
pub(super) fn bind_expression(
    dialect: &Dialect,
    expression: &Expression,
) -> Result<BoundExpression, BindError> {
    let parts = expression
        .parts
        .iter()
        .map(|part| bind_part(dialect, part))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(BoundExpression::new(parts))
}

fn bind_part(dialect: &Dialect, part: &Part) -> Result<BoundPart, BindError> {
    Ok(match part {
        Part::Text { text } => BoundPart::Text(text.clone()),
        Part::Parameter(spec) => BoundPart::Parameter(BoundParameter {
            spec: spec.clone(),
            evaluator: dialect.evaluator_for(spec, "parameter")?,
            formatter: dialect.formatter_for(&spec.format, "parameter")?,
        }),
        Part::Switch(switch) => BoundPart::Switch(bind_switch(dialect, switch)?),
        Part::FormatGroup(group) => BoundPart::FormatGroup(bind_format_group(dialect, group)?),
        Part::Custom(node) => BoundPart::Custom(BoundCustom {
            node: node.clone(),
            part: dialect.custom_part_for(node)?,
        }),
    })
}

fn bind_switch(dialect: &Dialect, switch: &Switch) -> Result<BoundSwitch, BindError> {
    let evaluator = dialect.evaluator_for(&switch.parameter, "switch")?;
    // Default formatters are dropped so cases match the raw value.
    let formatter = dialect.formatter_for(&switch.parameter.format, "switch")?;
    let formatter = (!formatter.is_default()).then_some(formatter);

    let cases = switch
        .cases
        .iter()
        .map(|case| bind_case(dialect, case))
        .collect::<Result<Vec<_>, _>>()?;
    let null_case = switch
        .null_case
        .as_ref()
        .map(|null_case| bind_expression(dialect, &null_case.expression))
        .transpose()?;

    let mut bound = BoundSwitch {
        spec: switch.parameter.clone(),
        template: switch.template.clone(),
        evaluator,
        formatter,
        cases,
        null_case,
    };
    rewrite_switch(dialect, &mut bound)?;
    Ok(bound)
}

fn bind_case(dialect: &Dialect, case: &SwitchCase) -> Result<BoundCase, BindError> {
    let spelling = case
        .condition
        .as_ref()
        .map(condition_spelling)
        .unwrap_or_default();
    Ok(BoundCase {
        condition: dialect.condition_for(&spelling, "switch case")?,
        source: case.condition.clone(),
        spelling,
        expression: bind_expression(dialect, &case.expression)?,
    })
}

fn bind_format_group(dialect: &Dialect, group: &FormatGroup) -> Result<BoundFormatGroup, BindError> {
    let spec = ParameterSpec::named(group.name.clone());
    Ok(BoundFormatGroup {
        name: group.name.clone(),
        evaluator: dialect.evaluator_for(&spec, "format group")?,
        expander: dialect.expander(),
        expression: group
            .expression
            .as_ref()
            .map(|expression| bind_expression(dialect, expression))
            .transpose()?,
    })
}
