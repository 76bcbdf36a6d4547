//! Implementation of the `glot print` command.

use glot::{CompileError, parse_pattern};
use miette::Result;

use crate::output::{PatternDiagnostic, print_json};

/// Arguments for the print command.
#[derive(Debug, clap::Args)]
pub struct PrintArgs {
    /// Pattern to normalize
    pub pattern: String,

    /// Print the parse tree as JSON instead
    #[arg(long)]
    pub json: bool,
}

/// Run the print command.
pub fn run_print(args: PrintArgs) -> Result<i32> {
    match parse_pattern(&args.pattern) {
        Ok(expression) => {
            if args.json {
                print_json(&expression)?;
            } else {
                println!("{}", expression);
            }
            Ok(exitcode::OK)
        }
        Err(error) => {
            let error = CompileError::from(error);
            let diagnostic = PatternDiagnostic::from_compile_error("pattern", &args.pattern, &error);
            if args.json {
                print_json(&diagnostic.to_json())?;
            } else {
                diagnostic.report();
            }
            Ok(exitcode::DATAERR)
        }
    }
}
