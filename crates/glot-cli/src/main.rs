//! glot CLI entry point.
//!
//! Provides command-line tools for working with glot patterns:
//! - `glot eval` - Evaluate a pattern with parameters
//! - `glot check` - Parse and bind patterns, reporting errors
//! - `glot print` - Print the normalized pattern
//! - `glot explain` - Show the strategies a pattern binds to
//! - `glot script` - Generate a JavaScript catalog

mod commands;
mod output;
mod params;

use std::io;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    CheckArgs, EvalArgs, ExplainArgs, PrintArgs, ScriptArgs, run_check, run_eval, run_explain,
    run_print, run_script,
};
use miette::MietteHandlerOpts;
use tracing_subscriber::EnvFilter;

/// glot pattern tools.
#[derive(Debug, Parser)]
#[command(name = "glot")]
#[command(about = "glot pattern tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate a pattern
    Eval(EvalArgs),
    /// Check that patterns parse and bind
    Check(CheckArgs),
    /// Print a pattern in normalized form
    Print(PrintArgs),
    /// Show the strategies a pattern binds to
    Explain(ExplainArgs),
    /// Generate a JavaScript catalog from pattern definitions
    Script(ScriptArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors checks TTY, NO_COLOR and FORCE_COLOR itself
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr. `RUST_LOG` overrides the level chosen by `--verbose`.
fn setup_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_tracing(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Eval(args) => run_eval(args),
        Commands::Check(args) => run_check(args),
        Commands::Print(args) => run_print(args),
        Commands::Explain(args) => run_explain(args),
        Commands::Script(args) => run_script(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            exit(exitcode::SOFTWARE);
        }
    }
}
