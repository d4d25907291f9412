#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use proto_diagnostic::ColorMode;

use super::{Command, DriverConfig};
use crate::DriverError;

#[test]
fn defaults_to_help() {
    let config = DriverConfig::from_args(Vec::<String>::new()).unwrap();
    assert_eq!(config.command, Command::Help);
}

#[test]
fn parse_with_files_and_options() {
    let config =
        DriverConfig::from_args(["parse", "a.proto", "--color=never", "b.proto", "--trace-nodes"])
            .unwrap();
    assert_eq!(
        config,
        DriverConfig {
            command: Command::Parse,
            files: vec![PathBuf::from("a.proto"), PathBuf::from("b.proto")],
            color: ColorMode::Never,
            trace_nodes: true,
        }
    );
    assert!(config.parse_options().context.trace_creation);
    assert!(config.parse_options().check_placement);
}

#[test]
fn double_dash_ends_options() {
    let config = DriverConfig::from_args(["dump", "--", "--odd.proto"]).unwrap();
    assert_eq!(config.files, [PathBuf::from("--odd.proto")]);
}

#[test]
fn bad_color() {
    let err = DriverConfig::from_args(["parse", "--color=sometimes", "a.proto"]).unwrap_err();
    assert!(matches!(err, DriverError::InvalidColor(_)));
    assert!(err.to_string().contains("sometimes"));
}

#[test]
fn unknown_command_and_option() {
    assert!(matches!(
        DriverConfig::from_args(["build"]),
        Err(DriverError::UnknownCommand(c)) if c == "build"
    ));
    assert!(matches!(
        DriverConfig::from_args(["parse", "-x"]),
        Err(DriverError::UnknownOption(o)) if o == "-x"
    ));
}

#[test]
fn file_counts() {
    let err = DriverConfig::from_args(["lex", "a.proto", "b.proto"]).unwrap_err();
    assert_eq!(err.to_string(), "`lex` expects exactly one file, got 2");
    let err = DriverConfig::from_args(["parse"]).unwrap_err();
    assert_eq!(err.to_string(), "`parse` expects at least one file, got 0");
    assert!(DriverConfig::from_args(["help"]).is_ok());
}
