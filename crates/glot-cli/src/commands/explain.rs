//! Implementation of the `glot explain` command.

use glot::dialect::{BoundExpression, BoundPart};
use miette::Result;

use super::options::PatternOptions;
use crate::output::table::{StrategyRow, format_strategy_table};
use crate::output::{PatternDiagnostic, print_json};

/// Arguments for the explain command.
#[derive(Debug, clap::Args)]
pub struct ExplainArgs {
    /// Pattern to explain
    pub pattern: String,

    #[command(flatten)]
    pub options: PatternOptions,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the explain command.
pub fn run_explain(args: ExplainArgs) -> Result<i32> {
    let compiled = match args.options.dialect().compile(&args.pattern) {
        Ok(compiled) => compiled,
        Err(error) => {
            PatternDiagnostic::from_compile_error("pattern", &args.pattern, &error).report();
            return Ok(exitcode::DATAERR);
        }
    };

    let mut rows = Vec::new();
    collect_strategies(compiled.bound(), 0, &mut rows);

    if args.json {
        print_json(&rows)?;
    } else if rows.is_empty() {
        println!("Plain text, no strategies.");
    } else {
        println!("{}", format_strategy_table(&rows));
    }
    Ok(exitcode::OK)
}

/// Rows for every strategy in `expression`, in pattern order.
fn collect_strategies(expression: &BoundExpression, depth: usize, rows: &mut Vec<StrategyRow>) {
    for part in &expression.parts {
        match part {
            BoundPart::Text(_) => {}
            BoundPart::Parameter(parameter) => {
                let spec = &parameter.spec;
                rows.push(row(depth, "parameter", &spec.name, "evaluator", parameter.evaluator.kind()));
                rows.push(row(depth, "parameter", &spec.format, "formatter", parameter.formatter.kind()));
            }
            BoundPart::Switch(switch) => {
                let spec = &switch.spec;
                rows.push(row(depth, "switch", &spec.name, "evaluator", switch.evaluator.kind()));
                if let Some(formatter) = &switch.formatter {
                    rows.push(row(depth, "switch", &spec.format, "formatter", formatter.kind()));
                }
                for case in &switch.cases {
                    rows.push(row(depth, "case", &case.spelling, "condition", case.condition.kind()));
                    collect_strategies(&case.expression, depth + 1, rows);
                }
                if let Some(null_case) = &switch.null_case {
                    collect_strategies(null_case, depth + 1, rows);
                }
            }
            BoundPart::FormatGroup(group) => {
                rows.push(row(depth, "format group", &group.name, "evaluator", group.evaluator.kind()));
                rows.push(row(depth, "format group", &group.name, "expander", group.expander.kind()));
                if let Some(inner) = &group.expression {
                    collect_strategies(inner, depth + 1, rows);
                }
            }
            BoundPart::Custom(custom) => {
                rows.push(row(depth, "custom", &custom.node.content, "custom part", custom.part.kind()));
            }
        }
    }
}

fn row(
    depth: usize,
    construct: &'static str,
    text: &str,
    role: &'static str,
    strategy: &'static str,
) -> StrategyRow {
    StrategyRow {
        depth,
        construct,
        text: text.to_string(),
        role,
        strategy,
    }
}

#[cfg(test)]
mod tests {
    use glot::Dialect;

    use super::*;

    fn explain(pattern: &str) -> Vec<(usize, &'static str, String, &'static str)> {
        let compiled = Dialect::standard().compile(pattern).unwrap();
        let mut rows = Vec::new();
        collect_strategies(compiled.bound(), 0, &mut rows);
        rows.into_iter()
            .map(|row| (row.depth, row.role, row.text, row.strategy))
            .collect()
    }

    #[test]
    fn parameters_list_evaluator_and_formatter() {
        assert_eq!(
            explain("Hi {Name:uc}"),
            vec![
                (0, "evaluator", "Name".to_string(), "DirectEvaluator"),
                (0, "formatter", "uc".to_string(), "CaseFormatter"),
            ]
        );
    }

    #[test]
    fn switch_cases_nest() {
        let rows = explain("#Count{1: one | {#} items}");
        assert_eq!(rows[0], (0, "evaluator", "Count".to_string(), "DirectEvaluator"));
        assert_eq!(rows[1], (0, "condition", "1".to_string(), "ValueListCondition"));
        assert_eq!(rows[2], (0, "condition", String::new(), "TakeAllCondition"));
        assert_eq!(rows[3], (1, "evaluator", "#".to_string(), "DirectEvaluator"));
    }
}
