//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "polint",
    version,
    about = "Page object linter",
    long_about = "polint: lint compiled page object descriptors for duplicate selectors, missing documentation and cross-file conflicts.\n\nConfiguration precedence: CLI > polint.{json,toml,yaml} > defaults.",
    after_help = "Examples:\n  polint lint 'build/lint/**/*.json'\n  polint lint build/lint/*.json --output sarif --no-report\n  polint rules --config polint.json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current polint version.")]
    Version,
    /// Lint page object fact files
    #[command(
        about = "Run lint rules",
        long_about = "Run local rules on every page object fact file, then global rules across all pairs. Files are processed in the order given (glob matches sorted per pattern).",
        after_help = "Examples:\n  polint lint 'facts/**/*.json'\n  polint lint a.json b.json --throw-on-error --output json"
    )]
    Lint {
        #[arg(required = true, help = "Fact files or glob patterns (JSON page object linting models)")]
        inputs: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Config file relative to repo root (default: discovered polint.*)")]
        config: Option<String>,
        #[arg(long, help = "Output mode: human|json|sarif (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Disable linting entirely")]
        disable: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Fail when any error-severity finding exists")]
        throw_on_error: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Do not write the SARIF report")]
        no_report: bool,
        #[arg(long, help = "Report path relative to the repo root")]
        report_output: Option<String>,
    },
    /// List the rule catalog
    #[command(
        about = "List rules",
        long_about = "Print every rule with its id, code and effective severity after configuration."
    )]
    Rules {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Config file relative to repo root (default: discovered polint.*)")]
        config: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
