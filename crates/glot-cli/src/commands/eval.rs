//! Implementation of the `glot eval` command.

use glot::ParameterSet;
use miette::Result;
use serde::Serialize;
use tracing::debug;

use super::options::{PatternOptions, parse_key_val};
use crate::output::{PatternDiagnostic, print_error, print_json};
use crate::params::parse_value;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Pattern to evaluate
    pub pattern: String,

    /// Parameters in name=value format (repeatable). Values are typed:
    /// numbers, true/false, dates, ISO durations, [lists] and "strings"
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    #[command(flatten)]
    pub options: PatternOptions,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
struct EvalResult<'a> {
    result: &'a str,
}

/// JSON output for evaluation errors.
#[derive(Serialize)]
struct EvalErrorJson {
    error: String,
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> Result<i32> {
    let engine = args.options.engine()?;
    let time_zone = args.options.time_zone()?;

    if let Err(error) = engine.compiled(&args.pattern) {
        let diagnostic = PatternDiagnostic::from_compile_error("pattern", &args.pattern, &error);
        if args.json {
            print_json(&diagnostic.to_json())?;
        } else {
            diagnostic.report();
        }
        return Ok(exitcode::DATAERR);
    }

    let mut params = ParameterSet::new();
    for (name, value) in &args.params {
        params.set(name, parse_value(value, time_zone));
    }
    debug!(pattern = %args.pattern, params = params.len(), "evaluating");

    match engine.eval_str(&args.pattern, params) {
        Ok(result) => {
            if args.json {
                print_json(&EvalResult { result: &result })?;
            } else {
                println!("{}", result);
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                print_json(&EvalErrorJson {
                    error: e.to_string(),
                })?;
            } else {
                print_error(format_args!("evaluation failed: {}", e));
            }
            Ok(exitcode::DATAERR)
        }
    }
}
