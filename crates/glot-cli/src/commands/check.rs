//! Implementation of the `glot check` command.

use miette::Result;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use super::options::PatternOptions;
use crate::output::diagnostic::CompileErrorJson;
use crate::output::{PatternDiagnostic, print_json};

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Patterns to check
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Also check the patterns given with -d
    #[arg(long)]
    pub definitions: bool,

    #[command(flatten)]
    pub options: PatternOptions,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked pattern.
#[derive(Serialize)]
struct CheckResult<'a> {
    name: String,
    pattern: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<CompileErrorJson>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let dialect = args.options.dialect();

    let mut targets: Vec<(String, &str)> = args
        .patterns
        .iter()
        .enumerate()
        .map(|(index, pattern)| (format!("pattern {}", index + 1), pattern.as_str()))
        .collect();
    if args.definitions {
        targets.extend(
            args.options
                .defines
                .iter()
                .map(|(key, pattern)| (key.clone(), pattern.as_str())),
        );
    }

    let mut results = Vec::with_capacity(targets.len());
    let mut failed = 0;
    for (name, pattern) in targets {
        let error = match dialect.compile(pattern) {
            Ok(_) => {
                if !args.json {
                    println!("{} {}", "ok".if_supports_color(Stream::Stdout, |text| text.green()), name);
                }
                None
            }
            Err(error) => {
                failed += 1;
                let diagnostic = PatternDiagnostic::from_compile_error(&name, pattern, &error);
                if args.json {
                    Some(diagnostic.to_json())
                } else {
                    diagnostic.report();
                    None
                }
            }
        };
        results.push(CheckResult {
            name,
            pattern,
            error,
        });
    }

    if args.json {
        print_json(&results)?;
    }

    if failed > 0 {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
