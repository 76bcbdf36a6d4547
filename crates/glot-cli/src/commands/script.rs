//! Implementation of the `glot script` command.

use std::fs::write;
use std::path::PathBuf;

use glot_script::{Catalog, MissingMapping, ScriptError, ScriptGenerator};
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;
use tracing::info;

use super::options::{PatternOptions, split_key};
use crate::output::{PatternDiagnostic, print_json, print_warning};

/// Arguments for the script command.
#[derive(Debug, clap::Args)]
pub struct ScriptArgs {
    #[command(flatten)]
    pub options: PatternOptions,

    /// JavaScript variable the text manager is assigned to
    #[arg(long, default_value = "texts")]
    pub name: String,

    /// Namespace whose keys are written without a prefix
    #[arg(long, default_value = "")]
    pub namespace: String,

    /// Leave out the runtime, for scripts loaded after another catalog
    #[arg(long)]
    pub no_runtime: bool,

    /// Do not HTML-encode output at runtime
    #[arg(long)]
    pub no_encode: bool,

    /// Exit with a non-zero code if any strategy has no generator
    #[arg(long)]
    pub strict: bool,

    /// Write the script to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output the script and missing mappings as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for generated scripts.
#[derive(Serialize)]
struct ScriptJson<'a> {
    script: &'a str,
    missing: &'a [MissingMapping],
}

/// Run the script command.
pub fn run_script(args: ScriptArgs) -> Result<i32> {
    if args.options.defines.is_empty() {
        return Err(miette!("no patterns to generate; pass them with -d key=pattern"));
    }

    let engine = args.options.engine()?;
    let dialect = args.options.dialect();
    let mut catalog = Catalog::builder()
        .name(&args.name)
        .namespace(&args.namespace)
        .language(args.options.language()?)
        .lookup(&engine)
        .encode(!args.no_encode)
        .include_runtime(!args.no_runtime)
        .build();

    for (key, pattern) in &args.options.defines {
        let (namespace, key) = split_key(key);
        match catalog.compile(&dialect, namespace, key, pattern) {
            Ok(()) => {}
            Err(ScriptError::Compile { key, source }) => {
                PatternDiagnostic::from_compile_error(&key, pattern, &source).report();
                return Ok(exitcode::DATAERR);
            }
            Err(error) => return Err(error).into_diagnostic(),
        }
    }

    let mut script = String::new();
    let missing = ScriptGenerator::standard()
        .write_catalog(&catalog, &mut script)
        .into_diagnostic()?;

    if args.json {
        print_json(&ScriptJson {
            script: &script,
            missing: &missing,
        })?;
    } else {
        for mapping in &missing {
            print_warning(mapping);
        }
        match &args.output {
            Some(path) => {
                write(path, &script)
                    .into_diagnostic()
                    .map_err(|e| miette!("Failed to write {}: {}", path.display(), e))?;
                info!(path = %path.display(), entries = catalog.entries().len(), "wrote script");
            }
            None => print!("{}", script),
        }
    }

    if args.strict && !missing.is_empty() {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
