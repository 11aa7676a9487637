//! Argument parser for the `strcalc` binary.
//!
//! Kept in a library so `xtask` can render man pages and completions from
//! [`command()`], and so the parser can be unit tested without spawning the
//! binary.

pub mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// When to colorize terminal output.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Let owo-colors decide from the terminal.
    #[default]
    Auto,
    /// Force colors on.
    Always,
    /// Force colors off.
    Never,
}

impl ColorChoice {
    /// Set the process-wide owo-colors override.
    pub fn apply(self) {
        let forced = match self {
            Self::Auto => return,
            Self::Always => true,
            Self::Never => false,
        };
        owo_colors::set_override(forced);
    }
}

const AFTER_HELP: &str = "\
ENVIRONMENT:
    RUST_LOG                 Tracing filter, overrides -q/-v and log_level
    STRCALC_LOG_PATH         Write JSONL logs to this file
    STRCALC_LOG_DIR          Write JSONL logs to strcalc.jsonl in this directory
    STRCALC_<SETTING>        Any config setting, e.g. STRCALC_MAX_INPUT_BYTES=1024
";

/// Top-level `strcalc` arguments.
#[derive(Parser)]
#[command(name = "strcalc", version, about, long_about = None)]
#[command(arg_required_else_help = true, after_long_help = AFTER_HELP)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the bare version number and exit
    #[arg(long)]
    pub version_only: bool,

    /// Merge this config file over any discovered ones
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Change to DIR before discovering config or reading files
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub chdir: Option<PathBuf>,

    /// Log errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

/// `strcalc` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Sum the numbers in a delimited string
    Add(commands::add::AddArgs),

    /// Show version, effective configuration and summing rules
    Info(commands::info::InfoArgs),
}

/// The clap command tree, for man pages and shell completions.
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn add_parses_inline_input_and_flags() {
        let cli = Cli::parse_from(["strcalc", "--json", "add", "-e", "1,2"]);
        assert!(cli.json);
        let Some(Commands::Add(args)) = cli.command else {
            panic!("expected add subcommand");
        };
        assert_eq!(args.input.as_deref(), Some("1,2"));
        assert!(args.escapes);
        assert!(args.file.is_none());
    }

    #[test]
    fn global_flags_accepted_after_subcommand() {
        let cli = Cli::parse_from(["strcalc", "info", "-vv", "--color", "never"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.color, ColorChoice::Never));
        assert!(matches!(cli.command, Some(Commands::Info(_))));
    }

    #[test]
    fn input_and_file_conflict() {
        let result = Cli::try_parse_from(["strcalc", "add", "1,2", "--file", "numbers.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["strcalc", "-q", "-v", "info"]).is_err());
    }
}
