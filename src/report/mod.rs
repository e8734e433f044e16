//! Human and machine readable reports.
//!
//! A [`Report`] borrows the metadata record, the rule findings and the final
//! outcome and writes them to any [`Write`] sink. The text form dumps every
//! documented variable in a stable order, then the findings, then the verdict.

use crate::error::{HookError, Result};
use crate::metadata::{PackageMetadata, split_lines, vars};
use crate::outcome::Outcome;
use crate::rules::{Evaluation, Finding};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

#[cfg(test)]
mod tests;

/// Indentation for entries of multi-line variables.
const LIST_INDENT: &str = "    ";

/// Everything printed for one hook run.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub metadata: &'a PackageMetadata,
    pub evaluation: &'a Evaluation,
    pub outcome: &'a Outcome,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: BTreeMap<&'static str, &'a str>,
    findings: &'a [Finding],
    result: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    message: &'a str,
    exit_code: i32,
}

impl<'a> Report<'a> {
    pub fn new(
        metadata: &'a PackageMetadata,
        evaluation: &'a Evaluation,
        outcome: &'a Outcome,
    ) -> Self {
        Self {
            metadata,
            evaluation,
            outcome,
        }
    }

    /// Write the plain-text report. `quiet` skips the metadata dump.
    pub fn write_text<W: Write>(&self, out: &mut W, quiet: bool) -> Result<()> {
        if !quiet {
            for (name, value) in self.metadata.entries() {
                write_variable(out, name, value).map_err(report_error)?;
            }
            writeln!(out).map_err(report_error)?;
        }

        for finding in &self.evaluation.findings {
            writeln!(
                out,
                "[{}] {}: {}",
                finding.severity, finding.rule, finding.message
            )
            .map_err(report_error)?;
        }

        writeln!(out, "Result: {}", self.outcome.label()).map_err(report_error)?;
        out.flush().map_err(report_error)
    }

    /// Write the report as a single JSON document.
    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        let report = JsonReport {
            metadata: self.metadata.entries().collect(),
            findings: &self.evaluation.findings,
            result: self.outcome.label(),
            message: self.outcome.message(),
            exit_code: self.outcome.exit_code(),
        };

        serde_json::to_writer_pretty(&mut *out, &report)
            .map_err(|e| HookError::Report(e.to_string()))?;
        writeln!(out).map_err(report_error)?;
        out.flush().map_err(report_error)
    }
}

fn write_variable<W: Write>(out: &mut W, name: &str, value: &str) -> std::io::Result<()> {
    if value.is_empty() {
        return writeln!(out, "{}:", name);
    }
    if !vars::is_multi_line(name) {
        return writeln!(out, "{}: {}", name, value);
    }

    writeln!(out, "{}:", name)?;
    for entry in split_lines(value) {
        writeln!(out, "{}{}", LIST_INDENT, entry)?;
    }
    Ok(())
}

fn report_error(e: std::io::Error) -> HookError {
    HookError::Report(e.to_string())
}
