#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use proto_ir::ast::dump::dump;

use super::parse;

const FRAGMENTS: &[&str] = &[
    "message", "enum", "service", "rpc", "returns", "stream", "option", "optional", "repeated",
    "map", "oneof", "group", "extend", "reserved", "extensions", "to", "max", "syntax", "package",
    "import", "public", "M", "x", "a.b", ".c", "=", ";", ",", ":", ".", "/", "-", "<", ">", "{",
    "}", "(", ")", "[", "]", "1", "0x10", "\"s\"", "//c\n", "/*c*/",
];

fn fragments() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..48).prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn token_soup_terminates(src in fragments()) {
        let (ctx, _) = parse(&src);
        let _ = dump(&ctx);
    }

    #[test]
    fn arbitrary_text_terminates(src in "[a-z0-9 ={}()<>\\[\\];,.:\"/-]{0,80}") {
        let (ctx, _) = parse(&src);
        let _ = dump(&ctx);
    }

    #[test]
    fn clean_input_reports_nothing(
        name in "[A-Z][a-z]{0,8}",
        field in "[a-z]{1,8}",
        number in 1u32..536_870_911,
    ) {
        let src = format!("message {name} {{ optional string {field}_ = {number}; }}");
        let (_, report) = parse(&src);
        prop_assert!(report.is_empty(), "{:#?}", report.diagnostics());
    }
}

#[test]
fn deep_nesting() {
    let depth = 5_000;
    let src = format!("{}{}", "message M { ".repeat(depth), "}".repeat(depth));
    let (ctx, report) = parse(&src);
    assert!(report.is_empty());
    assert_eq!(dump(&ctx).lines().count(), depth + 1);
}

#[test]
fn deep_expression_nesting() {
    let depth = 5_000;
    let src = format!("option a = {}1{};", "[".repeat(depth), "]".repeat(depth));
    let (_, report) = parse(&src);
    assert!(report.is_empty());
}
