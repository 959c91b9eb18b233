mod commands;
mod exit_code;
mod progress;
mod sources;
mod watch;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "graphql")]
#[command(about = "Generate TypeScript and Flow types for GraphQL operations", long_about = None)]
#[command(version)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to GraphQL config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Project name (for multi-project configs)
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Suppress progress indicators (spinners)
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show progress indicators (spinners)
    pub show_progress: bool,
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate result types for the operations and fragments of a project
    ///
    /// Reads `extensions.codegen` from the GraphQL config and writes every
    /// file listed under `generates`.
    Codegen {
        /// Watch mode - regenerate on schema or document changes
        #[arg(short, long, conflicts_with = "check")]
        watch: bool,

        /// Exit with an error if any generated file is out of date, without writing
        #[arg(long, conflicts_with = "watch")]
        check: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_progress: !cli.quiet && !cli.no_progress,
        show_info: !cli.quiet,
    };

    match cli.command {
        Commands::Codegen { watch, check } => commands::codegen::run(
            cli.config,
            cli.project.as_deref(),
            watch,
            check,
            output_opts,
        ),
    }
}

/// Initialize tracing, filtered by `RUST_LOG` and silent by default
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color {
        control::set_override(false);
    } else if std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if let Ok(val) = std::env::var("CLICOLOR") {
        if val == "0" {
            control::set_override(false);
        }
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn codegen_flags_parse() {
        let cli = Cli::try_parse_from(["graphql", "--project", "web", "codegen", "--check"]).unwrap();
        assert_eq!(cli.project.as_deref(), Some("web"));
        assert!(matches!(
            cli.command,
            Commands::Codegen {
                watch: false,
                check: true
            }
        ));
    }

    #[test]
    fn watch_and_check_conflict() {
        assert!(Cli::try_parse_from(["graphql", "codegen", "--watch", "--check"]).is_err());
    }

    #[test]
    fn color_flags_conflict() {
        assert!(Cli::try_parse_from(["graphql", "--color", "--no-color", "codegen"]).is_err());
    }
}
