//! polint CLI binary entry point.
//! Resolves configuration, loads fact files, runs the linter and prints results.

use clap::Parser;
use polint::cli::{Cli, Commands};
use polint::config::{self, CliOverrides};
use polint::output::{self, error_prefix, note_prefix};
use polint::rules::RuleSet;
use polint::source::FileSourceLines;
use polint::{facts, lint, LintError, Linter};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("POLINT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn resolve_or_exit(overrides: &CliOverrides) -> config::Effective {
    match config::resolve_effective(overrides) {
        Ok(eff) => {
            if !eff.config_found {
                eprintln!("{} No polint config found; using defaults.", note_prefix());
            }
            eff
        }
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            std::process::exit(2);
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Rules {
            repo_root,
            config,
            output,
        } => {
            let eff = resolve_or_exit(&CliOverrides {
                repo_root,
                config,
                ..CliOverrides::default()
            });
            let output = output.unwrap_or_else(|| "human".to_string());
            output::print_rules(&RuleSet::resolve(&eff.linting), &output);
        }
        Commands::Lint {
            inputs,
            repo_root,
            config,
            output,
            disable,
            throw_on_error,
            no_report,
            report_output,
        } => {
            let eff = resolve_or_exit(&CliOverrides {
                repo_root,
                config,
                disable: disable.then_some(true),
                write_report: no_report.then_some(false),
                throw_on_error: throw_on_error.then_some(true),
                report_output_path: report_output,
            });
            let output = output.unwrap_or_else(|| "human".to_string());

            let paths = match facts::expand_inputs(&eff.repo_root, &inputs) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    std::process::exit(2);
                }
            };
            let models = match facts::load_facts(&paths) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    std::process::exit(2);
                }
            };

            // With console reporting on, the engine already logged each
            // finding; the human printer then only adds the summary.
            let list_findings = !eff.linting.print_to_console;
            let linter =
                Linter::new(eff.linting).with_source_lines(FileSourceLines::new(&eff.repo_root));
            let result = linter.run(models, Some(&eff.repo_root));
            match &result {
                Ok(outcome) => output::print_lint(
                    &outcome.result,
                    linter.rules(),
                    Some(&eff.repo_root),
                    &output,
                    list_findings,
                ),
                Err(LintError::Failures(summary)) => {
                    eprintln!("{} linting failures", error_prefix());
                    if list_findings {
                        eprintln!("{}", summary);
                    }
                }
                Err(e) => eprintln!("{} {}", error_prefix(), e),
            }
            std::process::exit(lint::exit_code(&result));
        }
    }
}
