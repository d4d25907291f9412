#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proto_ir::Span;

use super::*;
use crate::ErrorCode;

fn err(code: ErrorCode, at: u32, msg: &str) -> Diagnostic {
    Diagnostic::error(code)
        .with_message(msg)
        .with_label(Span::new(at, at + 1), "here")
}

#[test]
fn empty_report() {
    let report = Report::new();
    assert!(report.is_empty());
    assert!(!report.has_errors());
    assert_eq!(report.error_count(), 0);
}

#[test]
fn counts_errors_and_warnings() {
    let mut report = Report::new();
    report.push(err(ErrorCode::E1001, 0, "a"));
    report.push(Diagnostic::warning(ErrorCode::E1009).with_message("w"));
    assert_eq!(report.len(), 2);
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.warning_count(), 1);
    assert!(report.has_errors());
}

#[test]
fn deduplicates_identical_diagnostics() {
    let mut report = Report::new();
    report.push(err(ErrorCode::E1005, 4, "missing `;`"));
    report.push(err(ErrorCode::E1005, 4, "missing `;`"));
    report.push(err(ErrorCode::E1005, 9, "missing `;`"));
    assert_eq!(report.len(), 2);

    let mut report = Report::with_config(ReportConfig {
        error_limit: 0,
        deduplicate: false,
    });
    report.push(err(ErrorCode::E1005, 4, "missing `;`"));
    report.push(err(ErrorCode::E1005, 4, "missing `;`"));
    assert_eq!(report.len(), 2);
}

#[test]
fn error_limit_drops_but_counts() {
    let mut report = Report::with_config(ReportConfig::with_error_limit(2));
    for i in 0..5 {
        report.push(err(ErrorCode::E1001, i, "x"));
    }
    report.push(Diagnostic::warning(ErrorCode::E1009).with_message("still kept"));
    assert_eq!(report.error_count(), 2);
    assert_eq!(report.suppressed(), 3);
    assert_eq!(report.len(), 3);
    assert!(report.has_errors());
}

#[test]
fn sorted_by_location() {
    let mut report = Report::new();
    report.push(err(ErrorCode::E1001, 20, "late"));
    report.push(Diagnostic::error(ErrorCode::E9001).with_message("no span"));
    report.push(err(ErrorCode::E1002, 3, "early"));
    let messages: Vec<_> = report.sorted().iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, vec!["early", "late", "no span"]);
    // Insertion order is preserved by `diagnostics`.
    assert_eq!(report.diagnostics()[0].message, "late");
}

#[test]
fn extend_goes_through_push() {
    let mut report = Report::new();
    report.extend([err(ErrorCode::E1001, 1, "a"), err(ErrorCode::E1001, 1, "a")]);
    assert_eq!(report.len(), 1);
    assert_eq!(report.into_diagnostics().len(), 1);
}
