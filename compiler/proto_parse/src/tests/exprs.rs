#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proto_diagnostic::ErrorCode;
use proto_ir::ast::dump::expr_to_string;
use proto_ir::ast::ExprKind;
use proto_ir::Span;

use super::{codes, parse};

/// The value of the single `option` in `src`, rendered.
fn option_value(src: &str) -> String {
    let (ctx, report) = parse(src);
    assert!(report.is_empty(), "{:#?}", report.diagnostics());
    let option = ctx.file_view().defs().next().unwrap();
    expr_to_string(option.value().unwrap())
}

#[test]
fn scalars() {
    assert_eq!(option_value("option a = 1;"), "1");
    assert_eq!(option_value("option a = 0x1F;"), "0x1F");
    assert_eq!(option_value("option a = 1.5e3;"), "1.5e3");
    assert_eq!(option_value("option a = \"s\";"), "\"s\"");
    assert_eq!(option_value("option a = true;"), "true");
    assert_eq!(option_value("option a = .pkg.CONST;"), ".pkg.CONST");
}

#[test]
fn negatives() {
    assert_eq!(option_value("option a = -1;"), "-1");
    assert_eq!(option_value("option a = -inf;"), "-inf");
    assert_eq!(option_value("option a = --1;"), "--1");
}

#[test]
fn arrays() {
    assert_eq!(option_value("option a = [];"), "[]");
    assert_eq!(option_value("option a = [1, -2, [x]];"), "[1, -2, [x]]");
}

#[test]
fn message_literals() {
    assert_eq!(option_value("option a = {};"), "{}");
    assert_eq!(
        option_value("option a = { x: 1, y: \"two\"; z: [3] };"),
        "{ x: 1, y: \"two\", z: [3] }"
    );
    assert_eq!(
        option_value("option a = { x: 1 y { z: 2 } [ext.field]: 3 };"),
        "{ x: 1, y { z: 2 }, [ext.field]: 3 }"
    );
}

#[test]
fn equals_inside_message_literal() {
    assert_eq!(option_value("option a = { x = 1 };"), "{ x: 1 }");
}

#[test]
fn keyless_entry() {
    let (ctx, report) = parse("option a = { 1 };");
    assert_eq!(codes(&report), [ErrorCode::E1011]);
    let value = ctx.file_view().defs().next().unwrap().value().unwrap();
    let dict = value.as_dict().unwrap();
    let entry = dict.entries().at(0);
    assert!(entry.key().is_none());
    assert!(entry.value().is_some());
}

#[test]
fn ranges_in_reserved() {
    let (ctx, report) = parse("message M { reserved 1 to 5, 7 to max; }");
    assert!(report.is_empty());
    let body = ctx.file_view().defs().next().unwrap().body().unwrap();
    let range = body.at(0).as_range().unwrap();
    let args: Vec<_> = range.args().iter().collect();
    assert_eq!(args.len(), 2);
    assert_eq!(args[0].kind(), ExprKind::Range);
    assert_eq!(expr_to_string(args[1]), "7 to max");
}

#[test]
fn range_missing_end() {
    let (_, report) = parse("message M { reserved 1 to; }");
    assert_eq!(codes(&report), [ErrorCode::E1002]);
}

#[test]
fn minus_without_operand() {
    let (_, report) = parse("option a = -;");
    assert_eq!(codes(&report), [ErrorCode::E1002]);
}

#[test]
fn missing_value_after_colon() {
    let (_, report) = parse("option a = { x: };");
    assert_eq!(codes(&report), [ErrorCode::E1002]);
}

#[test]
fn adjacent_strings_concatenate() {
    assert_eq!(option_value("option a = 'x' \"y\";"), "'x' \"y\"");

    let (ctx, report) = parse("option a = \"foo\"\n  'bar' \"\";");
    assert!(report.is_empty(), "{:#?}", report.diagnostics());
    let value = ctx.file_view().defs().next().unwrap().value().unwrap();
    let lit = value.as_literal().unwrap();
    assert!(lit.is_concatenation());
    assert_eq!(lit.pieces().count(), 3);
    assert_eq!(lit.as_string().as_deref(), Some("foobar"));
    assert_eq!(lit.span(), Span::new(11, 27));
}

#[test]
fn adjacent_strings_in_import() {
    let (ctx, report) = parse(r#"import "google/" "any.proto";"#);
    assert!(report.is_empty(), "{:#?}", report.diagnostics());
    let import = ctx.file_view().imports().next().unwrap();
    assert_eq!(import.file_name().as_deref(), Some("google/any.proto"));
}
