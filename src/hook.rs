//! One hook invocation: configuration, metadata, rules, report.

use crate::cli::{Cli, OutputFormat};
use crate::config::HookConfig;
use crate::error::{HookError, Result};
use crate::metadata::PackageMetadata;
use crate::outcome::Outcome;
use crate::report::Report;
use crate::rules::RuleSet;
use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, info};

/// Run `f`, mapping errors and panics to a critical outcome.
pub fn guarded<F>(f: F) -> Outcome
where
    F: FnOnce() -> Result<Outcome>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(err)) => {
            error!(error = %err, "hook failed");
            Outcome::from(err)
        }
        Err(payload) => {
            let reason = panic_reason(payload.as_ref());
            error!(reason, "hook panicked");
            Outcome::Error(format!("internal error: the hook panicked ({})", reason))
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown cause"
    }
}

/// Run the hook against the current process environment, reporting to stdout.
pub fn run(cli: &Cli) -> Result<Outcome> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.list_rules {
        let config = HookConfig::resolve(cli.config.as_deref())?;
        list_rules(&RuleSet::from_config(&config)?, &mut out)?;
        return Ok(Outcome::Pass);
    }

    check(cli, &PackageMetadata::from_env(), &mut out)
}

/// Validate `pkg` and write the report to `out`.
pub fn check<W: Write>(cli: &Cli, pkg: &PackageMetadata, out: &mut W) -> Result<Outcome> {
    let config = HookConfig::resolve(cli.config.as_deref())?;
    let rules = RuleSet::from_config(&config)?;
    debug!(
        enabled = rules.rules().filter(|(_, _, enabled)| *enabled).count(),
        "rule set ready"
    );

    let evaluation = rules.evaluate(pkg);
    let outcome = evaluation.outcome();
    info!(
        atom = %pkg.atom,
        findings = evaluation.findings.len(),
        result = outcome.label(),
        "package checked"
    );

    let report = Report::new(pkg, &evaluation, &outcome);
    match cli.format {
        OutputFormat::Text => report.write_text(out, cli.quiet)?,
        OutputFormat::Json => report.write_json(out)?,
    }

    Ok(outcome)
}

/// Print each rule with its effective severity.
pub fn list_rules<W: Write>(rules: &RuleSet, out: &mut W) -> Result<()> {
    for (rule, severity, enabled) in rules.rules() {
        let state = if enabled {
            severity.to_string()
        } else {
            "DISABLED".to_string()
        };
        writeln!(out, "{:<20} {:<8} {}", rule.id(), state, rule.description())
            .map_err(|e| HookError::Report(e.to_string()))?;
    }
    Ok(())
}
