//! Tests for report rendering.

use super::*;
use crate::rules::Severity;
use crate::test_support::{complete_metadata, metadata_from};

fn text(report: &Report<'_>, quiet: bool) -> String {
    let mut buf = Vec::new();
    report.write_text(&mut buf, quiet).unwrap();
    String::from_utf8(buf).unwrap()
}

fn finding(
    rule: &'static str,
    severity: Severity,
    field: &'static str,
    message: &str,
) -> Finding {
    Finding {
        rule,
        severity,
        field,
        message: message.to_string(),
    }
}

#[test]
fn test_text_dumps_every_variable_in_order() {
    let pkg = metadata_from(&[("PKG_NAME", "foo"), ("PKG_VERSION", "1.0")]);
    let evaluation = Evaluation::default();
    let outcome = Outcome::Pass;
    let output = text(&Report::new(&pkg, &evaluation, &outcome), false);

    let names: Vec<&str> = output
        .lines()
        .filter_map(|line| line.split_once(':').map(|(name, _)| name))
        .filter(|name| vars::lookup(name).is_some())
        .collect();
    assert_eq!(names, vars::ALL.to_vec());

    assert!(output.contains("PKG_NAME: foo\n"));
    assert!(output.contains("PKG_VERSION: 1.0\n"));
    assert!(output.contains("PKG_LICENSE:\n"));
    assert!(output.ends_with("Result: PASS\n"));
}

#[test]
fn test_text_lists_multi_line_values_indented() {
    let pkg = complete_metadata();
    let evaluation = Evaluation::default();
    let outcome = Outcome::Pass;
    let output = text(&Report::new(&pkg, &evaluation, &outcome), false);

    assert!(output.contains("PKG_DEPS:\n    >=sys-libs/zlib-1.2.3\n    !app-misc/foo-legacy\n"));
    assert!(output.contains("PKG_NEEDED_LIBS:\n    libz.so.1|2\n    libc.so.6|2\n"));
}

#[test]
fn test_text_findings_and_result() {
    let pkg = metadata_from(&[]);
    let evaluation = Evaluation {
        findings: vec![
            finding("md5-format", Severity::Error, vars::PKG_MD5, "PKG_MD5 is not an MD5 digest"),
            finding(
                "keywords",
                Severity::Warning,
                vars::PKG_KEYWORDS,
                "keyword '~sparc' is unknown",
            ),
        ],
    };
    let outcome = evaluation.outcome();
    let output = text(&Report::new(&pkg, &evaluation, &outcome), true);

    assert_eq!(
        output,
        "[ERROR] md5-format: PKG_MD5 is not an MD5 digest\n\
         [WARNING] keywords: keyword '~sparc' is unknown\n\
         Result: ERROR\n"
    );
}

#[test]
fn test_quiet_omits_metadata() {
    let pkg = complete_metadata();
    let evaluation = Evaluation::default();
    let outcome = Outcome::Pass;
    let output = text(&Report::new(&pkg, &evaluation, &outcome), true);

    assert_eq!(output, "Result: PASS\n");
}

#[test]
fn test_json_report() {
    let pkg = metadata_from(&[("PKG_NAME", "foo")]);
    let evaluation = Evaluation {
        findings: vec![finding("keywords", Severity::Warning, vars::PKG_KEYWORDS, "odd keyword")],
    };
    let outcome = evaluation.outcome();

    let mut buf = Vec::new();
    Report::new(&pkg, &evaluation, &outcome)
        .write_json(&mut buf)
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    assert_eq!(value["metadata"]["PKG_NAME"], "foo");
    assert_eq!(value["metadata"]["PKG_SLOT"], "");
    assert_eq!(value["metadata"].as_object().unwrap().len(), vars::ALL.len());
    assert_eq!(value["findings"][0]["rule"], "keywords");
    assert_eq!(value["findings"][0]["severity"], "warning");
    assert_eq!(value["findings"][0]["field"], "PKG_KEYWORDS");
    assert_eq!(value["result"], "WARNING");
    assert_eq!(value["message"], "keywords: odd keyword");
    assert_eq!(value["exit_code"], 1);
}

#[test]
fn test_json_pass_has_no_message() {
    let pkg = metadata_from(&[]);
    let evaluation = Evaluation::default();
    let outcome = Outcome::Pass;

    let mut buf = Vec::new();
    Report::new(&pkg, &evaluation, &outcome)
        .write_json(&mut buf)
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    assert!(value.get("message").is_none());
    assert_eq!(value["findings"].as_array().unwrap().len(), 0);
    assert_eq!(value["exit_code"], 0);
}
