//! CLI argument parsing for the QA hook.
//!
//! The orchestrator runs the hook without arguments; every flag here is
//! optional and only tunes configuration, output and logging. Argument
//! errors are turned into a critical exit by `main`, never clap's own status.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Package repository QA hook.
///
/// Reads package metadata from PKG_* environment variables, runs the
/// repository's QA rules and exits 0 (pass), 1 (warning) or 2 (critical).
#[derive(Parser, Debug)]
#[command(name = "qa-hook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML rule configuration.
    #[arg(short, long, env = "QA_HOOK_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report format written to stdout.
    #[arg(long, value_enum, env = "QA_HOOK_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Omit the metadata dump and print findings only.
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the built-in rules with their effective settings and exit.
    #[arg(long)]
    pub list_rules: bool,

    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Parse arguments, leaving error reporting to the caller.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Cli::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_arguments() {
        let cli = Cli::try_parse_from(["qa-hook"]).unwrap();
        assert!(!cli.quiet);
        assert!(!cli.list_rules);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parse_all_flags() {
        let cli = Cli::try_parse_from([
            "qa-hook",
            "--config",
            "/etc/qa-hook.yaml",
            "--format",
            "json",
            "-q",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/qa-hook.yaml")));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn parse_list_rules() {
        let cli = Cli::try_parse_from(["qa-hook", "--list-rules"]).unwrap();
        assert!(cli.list_rules);
    }

    #[test]
    fn reject_unknown_format() {
        let err = Cli::try_parse_from(["qa-hook", "--format", "xml"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.use_stderr());
    }

    #[test]
    fn reject_unknown_argument() {
        let err = Cli::try_parse_from(["qa-hook", "--bogus"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn help_is_not_an_error_stream() {
        let err = Cli::try_parse_from(["qa-hook", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
    }
}
