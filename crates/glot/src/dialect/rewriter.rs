//! Post-binding rewrite of switch cases.

use std::sync::Arc;

use super::{BindError, BoundSwitch, Dialect};
use crate::strategy::conditions::TakeAllCondition;

/// Expand a templated switch and move catch-all cases last.
///
/// In `#Plural(Count){item | items}` the condition-less cases are given the
/// lookups `@Plural1`, `@Plural2`, ... in order, except the last one, which
/// matches everything. Then every case written without a condition is moved
/// after the cases written with one, keeping relative order.
pub(super) fn rewrite_switch(dialect: &Dialect, switch: &mut BoundSwitch) -> Result<(), BindError> {
    if let Some(template) = &switch.template {
        let open: Vec<usize> = switch
            .cases
            .iter()
            .enumerate()
            .filter(|(_, case)| case.source.is_none())
            .map(|(index, _)| index)
            .collect();
        for (number, &index) in (1..).zip(&open) {
            let case = &mut switch.cases[index];
            if number == open.len() {
                case.spelling = String::new();
                case.condition = Arc::new(TakeAllCondition);
            } else {
                case.spelling = format!("@{template}{number}");
                case.condition = dialect.condition_for(&case.spelling, "templated switch")?;
            }
        }
    }

    switch.cases.sort_by_key(|case| case.source.is_none());
    Ok(())
}
