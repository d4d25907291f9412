#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proto_diagnostic::ErrorCode;
use proto_ir::ast::dump::dump;
use proto_ir::ast::DefKind;
use proto_ir::Span;

use super::{codes, dump_clean, parse};

#[test]
fn small_file() {
    let src = r#"syntax = "proto3"; package a.b; message M { string name = 1; }"#;
    let (ctx, report) = parse(src);
    assert!(report.is_empty());

    let file = ctx.file_view();
    assert_eq!(file.syntax().unwrap().value().unwrap().span().text(src), "\"proto3\"");
    assert_eq!(file.package().unwrap().path().unwrap().to_string(), "a.b");
    assert_eq!(ctx.root().span().text(src), src);

    let message = file.defs().next().unwrap();
    assert_eq!(message.classify(), DefKind::Message);
    assert_eq!(
        dump(&ctx),
        "file\n  syntax \"proto3\"\n  package a.b\n  message M\n    field string name = 1\n"
    );
}

#[test]
fn unnamed_message_missing_semicolon() {
    let (ctx, report) = parse("message { int32 x = 1 }");
    let codes = codes(&report);
    assert!(codes.contains(&ErrorCode::E1010), "{codes:?}");
    assert!(codes.contains(&ErrorCode::E1005), "{codes:?}");

    let message = ctx.file_view().defs().next().unwrap();
    assert_eq!(message.classify(), DefKind::Message);
    assert!(message.name().is_none());
    assert!(message.is_corrupt());

    let field = message.body().unwrap().at(0).as_def().unwrap();
    assert_eq!(field.classify(), DefKind::Field);
    assert!(field.semi().is_none());
    assert_eq!(dump(&ctx), "file\n  message <missing> !corrupt\n    field int32 x = 1\n");
}

#[test]
fn modifier_used_as_name() {
    let (ctx, report) = parse("message M { optional optional = 1; }");
    assert_eq!(codes(&report), [ErrorCode::E1004]);

    let field = ctx.file_view().defs().next().unwrap().body().unwrap().at(0).as_def().unwrap();
    assert_eq!(field.classify(), DefKind::Field);
    assert_eq!(field.name().unwrap().to_string(), "optional");
    assert!(field.ty().unwrap().as_prefixed().unwrap().ty().is_none());
    assert_eq!(
        dump(&ctx),
        "file\n  message M\n    field optional <missing> optional = 1\n"
    );
}

#[test]
fn modifier_with_type_and_keyword_name() {
    assert_eq!(
        dump_clean("message M { optional Foo optional = 1; }"),
        "file\n  message M\n    field optional Foo optional = 1\n"
    );
}

#[test]
fn repeated_returns_keeps_first() {
    let (ctx, report) = parse("service S { rpc M(In) returns (Out) returns (Out2); }");
    assert_eq!(codes(&report), [ErrorCode::E1008]);
    let diag = &report.diagnostics()[0];
    assert_eq!(diag.primary_span(), Some(Span::new(36, 50)));
    let first: Vec<Span> = diag.labels.iter().filter(|l| !l.is_primary).map(|l| l.span).collect();
    assert_eq!(first, [Span::new(22, 35)]);

    let method = ctx.file_view().defs().next().unwrap().body().unwrap().at(0).as_def().unwrap();
    assert_eq!(method.classify(), DefKind::Method);
    assert!(method.is_corrupt());
    let outputs: Vec<String> = method
        .signature()
        .unwrap()
        .outputs()
        .iter()
        .map(proto_ir::ast::dump::type_to_string)
        .collect();
    assert_eq!(outputs, ["Out"]);
}

#[test]
fn full_file() {
    let src = r#"
syntax = "proto2";
package acme.v1;

import "google/protobuf/descriptor.proto";
import public "other.proto";

option java_package = "com.acme.v1";

extend google.protobuf.FieldOptions {
  optional int32 weight = 50000;
}

message Order {
  reserved 2, 15 to 20;
  extensions 100 to max;

  required string id = 1 [(weight) = 3];
  repeated Line lines = 3;
  map<string, int32> totals = 4;

  optional group Note = 5 {
    optional string text = 6;
  }

  oneof payer {
    string card = 7;
    string account = 8;
  }

  enum State {
    NEW = 0;
    DONE = 1 [deprecated = true];
  }
}

service Orders {
  rpc Get(GetRequest) returns (Order);
  rpc Watch(stream Query) returns (stream Order) {
    option idempotency_level = NO_SIDE_EFFECTS;
  }
}
"#;
    let expected = "\
file
  syntax \"proto2\"
  package acme.v1
  import \"google/protobuf/descriptor.proto\"
  import public \"other.proto\"
  option java_package = \"com.acme.v1\"
  extend google.protobuf.FieldOptions
    field optional int32 weight = 50000
  message Order
    reserved 2, 15 to 20
    extensions 100 to max
    field required string id = 1 [(weight) = 3]
    field repeated Line lines = 3
    field map<string, int32> totals = 4
    group optional Note = 5
      field optional string text = 6
    oneof payer
      field string card = 7
      field string account = 8
    enum State
      enum-value NEW = 0
      enum-value DONE = 1 [deprecated = true]
  service Orders
    method Get(GetRequest) returns (Order)
    method Watch(stream Query) returns (stream Order)
      option idempotency_level = NO_SIDE_EFFECTS
";
    assert_eq!(dump_clean(src), expected);
}
