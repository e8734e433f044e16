//! qa-hook: package repository QA validation hook.
//!
//! The repository tooling spawns this executable once per package with the
//! package metadata in PKG_* environment variables. It prints a report and
//! exits 0 (pass), 1 (warning, package accepted) or 2 (critical, package
//! rejected). Every internal fault, including a panic, exits 2.

mod cli;
pub mod config;
pub mod error;
pub mod exit_codes;
mod hook;
mod logging;
pub mod metadata;
pub mod outcome;
pub mod report;
pub mod rules;

#[cfg(test)]
mod test_support;

use cli::Cli;
use outcome::Outcome;
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are not failures
            let code = if err.use_stderr() {
                exit_codes::CRITICAL
            } else {
                exit_codes::PASS
            };
            return ExitCode::from(code as u8);
        }
    };

    logging::init(cli.verbose);

    let outcome = hook::guarded(|| hook::run(&cli));

    if let Outcome::Error(msg) | Outcome::Warning(msg) = &outcome {
        // stderr may be a closed pipe; the exit code still stands
        let _ = writeln!(std::io::stderr(), "{}: {}", outcome.label(), msg);
    }

    let code = outcome.exit_code();
    debug_assert!(exit_codes::is_valid(code));
    ExitCode::from(code as u8)
}
