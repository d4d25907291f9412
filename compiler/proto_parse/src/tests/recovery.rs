#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proto_diagnostic::{Diagnostic, ErrorCode};
use proto_ir::ast::dump::dump;
use proto_ir::ast::DefKind;
use proto_ir::Span;

use super::{codes, parse};

/// Apply the first machine-applicable fix of `diag` to `src`.
fn fixed(src: &str, diag: &Diagnostic) -> String {
    let fix = diag.machine_applicable_fixes().next().expect("no fix");
    fix.apply(src).expect("fix does not apply")
}

#[test]
fn missing_semicolon_fix() {
    let src = "syntax = \"proto3\"\npackage a; // trailing\n";
    let (ctx, report) = parse(src);
    assert_eq!(codes(&report), [ErrorCode::E1005]);
    assert_eq!(fixed(src, &report.diagnostics()[0]), "syntax = \"proto3\";\npackage a; // trailing\n");
    assert!(ctx.file_view().package().is_some());
}

#[test]
fn missing_semicolon_before_comment() {
    let src = "message M {\n  int32 x = 1 // one\n}\n";
    let (_, report) = parse(src);
    assert_eq!(codes(&report), [ErrorCode::E1005]);
    assert_eq!(fixed(src, &report.diagnostics()[0]), "message M {\n  int32 x = 1; // one\n}\n");
}

#[test]
fn missing_equals_fix() {
    let src = "option java_package \"x\";";
    let (ctx, report) = parse(src);
    assert_eq!(codes(&report), [ErrorCode::E1006]);
    assert_eq!(fixed(src, &report.diagnostics()[0]), "option java_package = \"x\";");

    let option = ctx.file_view().defs().next().unwrap();
    assert_eq!(option.classify(), DefKind::Option);
    assert!(option.equals().is_none());
    assert!(option.value().is_some());
}

#[test]
fn missing_equals_in_compact_options() {
    let src = "message M { int32 x = 1 [deprecated true]; }";
    let (_, report) = parse(src);
    assert_eq!(codes(&report), [ErrorCode::E1006]);
    assert_eq!(
        fixed(src, &report.diagnostics()[0]),
        "message M { int32 x = 1 [deprecated = true]; }"
    );
}

#[test]
fn unexpected_token_is_skipped() {
    let (ctx, report) = parse("= message M {}");
    assert_eq!(codes(&report), [ErrorCode::E1001]);
    assert_eq!(dump(&ctx), "file\n  message M\n");
}

#[test]
fn missing_comma_between_types() {
    let (ctx, report) = parse("service S { rpc M(A B) returns (C); }");
    assert_eq!(codes(&report), [ErrorCode::E1007]);
    let method = ctx.file_view().defs().next().unwrap().body().unwrap().at(0).as_def().unwrap();
    assert_eq!(method.signature().unwrap().inputs().len(), 1);
}

#[test]
fn missing_comma_in_array() {
    let src = "option a = [1 2];";
    let (_, report) = parse(src);
    assert_eq!(codes(&report), [ErrorCode::E1007]);
    let diag = &report.diagnostics()[0];
    assert!(diag.machine_applicable_fixes().next().is_none());
    let maybe = &diag.structured_suggestions[0];
    assert_eq!(maybe.apply(src).unwrap(), "option a = [1, 2];");
}

#[test]
fn leftover_tokens_in_options() {
    let (_, report) = parse("message M { int32 x = 1 [a = 1, ;]; }");
    assert!(codes(&report).contains(&ErrorCode::E1001));
}

#[test]
fn unclosed_angle() {
    let (ctx, report) = parse("message M { map<string, int32 m = 1; }");
    assert!(codes(&report).contains(&ErrorCode::E1013));
    assert_eq!(ctx.file_view().defs().next().unwrap().classify(), DefKind::Message);
}

#[test]
fn repeated_options_mark_corrupt() {
    let (ctx, report) = parse("message M { int32 x = 1 [a = 1] [b = 2]; }");
    assert_eq!(codes(&report), [ErrorCode::E1008]);
    assert_eq!(dump(&ctx), "file\n  message M\n    field int32 x = 1 [a = 1] !corrupt\n");
}

#[test]
fn repeated_value() {
    let (_, report) = parse("enum E { A = 1 = 2; }");
    assert_eq!(codes(&report), [ErrorCode::E1008]);
}

#[test]
fn field_without_name() {
    let (ctx, report) = parse("message M { map<int32, string> = 1; }");
    assert_eq!(codes(&report), [ErrorCode::E1003]);
    assert_eq!(
        dump(&ctx),
        "file\n  message M\n    field map<int32, string> <missing> = 1\n"
    );
}

#[test]
fn returns_without_parens() {
    let (_, report) = parse("service S { rpc M(A) returns B; }");
    assert!(codes(&report).contains(&ErrorCode::E1004));
}

#[test]
fn unnamed_service() {
    let (ctx, report) = parse("service {}");
    assert_eq!(codes(&report), [ErrorCode::E1010]);
    let service = ctx.file_view().defs().next().unwrap();
    assert_eq!(service.classify(), DefKind::Service);
    assert!(service.is_corrupt());
}

#[test]
fn recovery_continues_after_bad_member() {
    let (ctx, report) = parse("message M { int32 x = ; string y = 2; }");
    assert_eq!(codes(&report), [ErrorCode::E1002]);
    assert_eq!(
        dump(&ctx),
        "file\n  message M\n    field int32 x = <missing>\n    field string y = 2\n"
    );
}

#[test]
fn unclosed_brace_keeps_contents() {
    let (ctx, report) = parse("message M { int32 x = 1; ");
    assert_eq!(codes(&report), [ErrorCode::E0010]);
    assert_eq!(dump(&ctx), "file\n  message M\n    field int32 x = 1\n");
    let body = ctx.file_view().defs().next().unwrap().body().unwrap();
    assert_eq!(body.span(), Span::new(10, 24));
}

#[test]
fn unclosed_orphan_brace_is_a_body() {
    let (ctx, report) = parse("{ message N {} enum E {}");
    assert_eq!(codes(&report), [ErrorCode::E0010]);
    assert_eq!(dump(&ctx), "file\n  body\n    message N\n    enum E\n");
}

#[test]
fn missing_comma_in_reserved_skips_to_semicolon() {
    let (ctx, report) = parse("message M { reserved 1 2; int32 x = 3; }");
    assert_eq!(codes(&report), [ErrorCode::E1007]);
    assert_eq!(dump(&ctx), "file\n  message M\n    reserved 1\n    field int32 x = 3\n");
}

#[test]
fn missing_comma_in_type_arguments_skips_to_close() {
    let (ctx, report) = parse("message M { map<string Foo> m = 1; }");
    assert_eq!(codes(&report), [ErrorCode::E1007]);
    assert_eq!(dump(&ctx), "file\n  message M\n    field map<string> m = 1\n");
}

#[test]
fn trailing_comma_in_reserved() {
    let src = "message M { reserved 1, ; }";
    let (ctx, report) = parse(src);
    assert_eq!(codes(&report), [ErrorCode::E1014]);
    assert_eq!(dump(&ctx), "file\n  message M\n    reserved 1\n");
    assert_eq!(fixed(src, &report.diagnostics()[0]), "message M { reserved 1 ; }");
}

#[test]
fn trailing_comma_in_lists() {
    let (_, report) = parse("option a = [1, 2,];");
    assert_eq!(codes(&report), [ErrorCode::E1014]);
    let (_, report) = parse("service S { rpc M(A,) returns (B); }");
    assert_eq!(codes(&report), [ErrorCode::E1014]);
    let (_, report) = parse("message M { int32 x = 1 [a = 1,]; }");
    assert_eq!(codes(&report), [ErrorCode::E1014]);
}

#[test]
fn invalid_utf8_parses_as_empty() {
    let mut report = proto_diagnostic::Report::new();
    let bytes = vec![b'm', 0xff, 0xfe];
    let ctx = crate::parse_bytes("bad.proto", bytes, &mut report, crate::ParseOptions::default());
    assert!(report.has_errors());
    assert!(ctx.root().is_empty());
}
