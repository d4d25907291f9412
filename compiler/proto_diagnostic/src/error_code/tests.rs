#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

#[test]
fn display_matches_as_str() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::E0010.as_str(), "E0010");
}

#[test]
fn all_is_sorted_and_complete() {
    let mut sorted = ErrorCode::ALL.to_vec();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.as_slice(), ErrorCode::ALL);
    assert_eq!(ErrorCode::ALL.len(), 26);
}

#[test]
fn phases() {
    assert!(ErrorCode::E0004.is_lexer_error());
    assert!(!ErrorCode::E0004.is_parser_error());
    assert!(ErrorCode::E1008.is_parser_error());
    assert!(!ErrorCode::E9001.is_lexer_error());
    assert!(!ErrorCode::E9001.is_parser_error());
}

#[test]
fn parse_round_trips_every_code() {
    for &code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(code));
        assert!(!code.title().is_empty());
    }
}

#[test]
fn parse_is_case_insensitive() {
    assert_eq!("e1005".parse::<ErrorCode>(), Ok(ErrorCode::E1005));
}

#[test]
fn parse_unknown() {
    let err = "E4242".parse::<ErrorCode>().unwrap_err();
    assert_eq!(err.to_string(), "unknown error code `E4242`");
}
