use super::{JsonScanner, unescape};
use crate::{error::JsonSyntaxError, token::TokenType};

fn tokens_of(json: &str) -> Vec<TokenType> {
    let mut scanner = JsonScanner::new();
    let window = json.as_bytes();
    let mut out = Vec::new();
    while let Some(token) = scanner.read(window, true).expect("valid input") {
        out.push(token);
    }
    out
}

fn error_of(json: &str) -> JsonSyntaxError {
    let mut scanner = JsonScanner::new();
    let window = json.as_bytes();
    loop {
        match scanner.read(window, true) {
            Ok(Some(_)) => {}
            Ok(None) => panic!("input scanned cleanly"),
            Err(e) => return e,
        }
    }
}

#[test]
fn scalar_tokens() {
    use TokenType::*;
    assert_eq!(tokens_of("true"), vec![True]);
    assert_eq!(tokens_of("false"), vec![False]);
    assert_eq!(tokens_of("null"), vec![Null]);
    assert_eq!(tokens_of("\"hi\""), vec![String]);
    assert_eq!(tokens_of("-12.5e3"), vec![Number]);
}

#[test]
fn container_tokens() {
    use TokenType::*;
    assert_eq!(
        tokens_of(r#"{"a": [1, null], "b": {}}"#),
        vec![
            StartObject,
            PropertyName,
            StartArray,
            Number,
            Null,
            EndArray,
            PropertyName,
            StartObject,
            EndObject,
            EndObject,
        ]
    );
}

#[test]
fn comments_are_tokens() {
    use TokenType::*;
    assert_eq!(
        tokens_of("[1, // one\n 2, /* two */ 3]"),
        vec![StartArray, Number, Comment, Number, Comment, Number, EndArray]
    );
}

#[test]
fn number_payload_range() {
    let mut scanner = JsonScanner::new();
    let window = b" -263.50 ";
    assert_eq!(scanner.read(window, true).unwrap(), Some(TokenType::Number));
    assert_eq!(&window[scanner.value_range()], b"-263.50");
}

#[test]
fn string_payload_excludes_quotes() {
    let mut scanner = JsonScanner::new();
    let window = br#""abc\n""#;
    assert_eq!(scanner.read(window, true).unwrap(), Some(TokenType::String));
    assert_eq!(&window[scanner.value_range()], br"abc\n");
    assert!(scanner.has_escapes());
}

#[test]
fn needs_more_data_rolls_back_partial_token() {
    let mut scanner = JsonScanner::new();
    // Window ends in the middle of `false`.
    assert_eq!(scanner.read(b"[true, fal", false).unwrap(), Some(TokenType::StartArray));
    assert_eq!(scanner.read(b"[true, fal", false).unwrap(), Some(TokenType::True));
    assert_eq!(scanner.read(b"[true, fal", false).unwrap(), None);
    // Committed bytes stop before the partial literal.
    assert_eq!(scanner.consumed(), 7);
}

#[test]
fn number_at_final_window_edge_terminates() {
    let mut scanner = JsonScanner::new();
    assert_eq!(scanner.read(b"42", true).unwrap(), Some(TokenType::Number));
    assert_eq!(scanner.read(b"42", true).unwrap(), None);
}

#[test]
fn number_at_nonfinal_window_edge_requests_refill() {
    let mut scanner = JsonScanner::new();
    assert_eq!(scanner.read(b"42", false).unwrap(), None);
}

#[test]
fn rejects_malformed_input() {
    assert_eq!(error_of("tru"), JsonSyntaxError::UnexpectedEndOfInput);
    assert_eq!(error_of("truf"), JsonSyntaxError::InvalidLiteral);
    assert_eq!(error_of("01"), JsonSyntaxError::TrailingData);
    assert_eq!(error_of("-"), JsonSyntaxError::InvalidNumber);
    assert_eq!(error_of("1."), JsonSyntaxError::InvalidNumber);
    assert_eq!(error_of("1e"), JsonSyntaxError::InvalidNumber);
    assert_eq!(error_of("[1,]"), JsonSyntaxError::InvalidCharacter(b']'));
    assert_eq!(error_of("[1 2]"), JsonSyntaxError::InvalidCharacter(b'2'));
    assert_eq!(error_of("{1: 2}"), JsonSyntaxError::InvalidCharacter(b'1'));
    assert_eq!(error_of("[1"), JsonSyntaxError::UnexpectedEndOfInput);
    assert_eq!(error_of("\"abc"), JsonSyntaxError::UnexpectedEndOfInput);
    assert_eq!(error_of("\"\\x\""), JsonSyntaxError::InvalidEscape);
    assert_eq!(error_of("1 2"), JsonSyntaxError::TrailingData);
}

#[test]
fn leading_zero_is_its_own_token() {
    // "0" is a complete number; a digit after it is trailing data at the
    // root, which the expectation machine rejects.
    assert_eq!(tokens_of("0"), vec![TokenType::Number]);
    assert_eq!(error_of("00"), JsonSyntaxError::TrailingData);
}

#[test]
fn unescape_resolves_simple_escapes() {
    assert_eq!(unescape(br"a\nb\t\\").unwrap(), "a\nb\t\\");
    assert_eq!(unescape(br#"\""#).unwrap(), "\"");
}

#[test]
fn unescape_resolves_unicode_and_surrogates() {
    assert_eq!(unescape(br"\u00e9").unwrap(), "é");
    assert_eq!(unescape(br"\uD83D\uDE00").unwrap(), "😀");
    assert_eq!(unescape(br"\uD83D").unwrap_err(), JsonSyntaxError::InvalidEscape);
}

#[test]
fn resume_from_captured_state_continues_mid_document() {
    let full = b"[1, 2]";
    let mut scanner = JsonScanner::new();
    assert_eq!(scanner.read(full, false).unwrap(), Some(TokenType::StartArray));
    assert_eq!(scanner.read(full, false).unwrap(), Some(TokenType::Number));

    // Capture between tokens, discard committed bytes, resume over the rest.
    let consumed = scanner.consumed();
    let state = scanner.state().clone();
    let rest = &full[consumed..];
    let mut resumed = JsonScanner::resume(state);
    assert_eq!(resumed.read(rest, true).unwrap(), Some(TokenType::Number));
    assert_eq!(resumed.read(rest, true).unwrap(), Some(TokenType::EndArray));
    assert_eq!(resumed.read(rest, true).unwrap(), None);
}
