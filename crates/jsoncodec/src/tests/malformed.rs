use crate::{
    CodecError, JsonSyntaxError, TokenType,
    codec::{
        ValueCodec,
        composite::CollectionCodec,
        numerics::BigIntCodec,
        primitives::{I32Codec, StringCodec},
        temporal::DurationCodec,
    },
};

#[test]
fn scalar_codec_rejects_object_token() {
    let err = I32Codec.from_json_str("{}", None).unwrap_err();
    match err {
        CodecError::UnexpectedToken { found, .. } => assert_eq!(found, TokenType::StartObject),
        other => panic!("expected UnexpectedToken, got {other}"),
    }
    assert!(err_message(&I32Codec.from_json_str("{}", None).unwrap_err()).contains("StartObject"));
}

#[test]
fn string_codec_rejects_number_token() {
    let err = StringCodec.from_json_str("12", None).unwrap_err();
    assert!(matches!(
        err,
        CodecError::UnexpectedToken {
            found: TokenType::Number,
            ..
        }
    ));
}

#[test]
fn collection_rejects_object_element() {
    let err = CollectionCodec::new(I32Codec)
        .from_json_str("[{}]", None)
        .unwrap_err();
    assert!(matches!(
        err,
        CodecError::UnexpectedToken {
            found: TokenType::StartObject,
            ..
        }
    ));
}

#[test]
fn unterminated_array_fails_instead_of_looping() {
    let err = CollectionCodec::new(I32Codec)
        .from_json_str("[1, 2", None)
        .unwrap_err();
    assert!(matches!(
        err,
        CodecError::Syntax(JsonSyntaxError::UnexpectedEndOfInput)
    ));
}

#[test]
fn bigint_format_failure_names_the_type() {
    let err = BigIntCodec.from_json_str("\"abc\"", None).unwrap_err();
    match &err {
        CodecError::Format { literal, type_name } => {
            assert_eq!(literal, "abc");
            assert_eq!(*type_name, "BigInt");
        }
        other => panic!("expected Format, got {other}"),
    }
    assert!(err_message(&err).contains("BigInt"));
    assert!(err_message(&err).contains("abc"));
}

#[test]
fn out_of_range_duration_is_a_format_error() {
    let err = DurationCodec
        .from_json_str("\"1000000000000:0:00:00\"", None)
        .unwrap_err();
    match err {
        CodecError::Format { literal, type_name } => {
            assert_eq!(literal, "1000000000000:0:00:00");
            assert_eq!(type_name, "TimeDelta");
        }
        other => panic!("expected Format, got {other}"),
    }
}

#[test]
fn number_overflow_is_a_format_error() {
    let err = I32Codec.from_json_str("4294967296", None).unwrap_err();
    assert!(matches!(err, CodecError::Format { .. }));
}

#[test]
fn empty_input_is_rejected_before_reading() {
    for json in ["", "   ", "\n\t"] {
        let err = I32Codec.from_json_str(json, None).unwrap_err();
        assert!(matches!(err, CodecError::EmptyJson));
    }
}

#[test]
fn malformed_bytes_fail_immediately() {
    let err = I32Codec.from_json_str("tru!", None).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Syntax(JsonSyntaxError::InvalidLiteral)
    ));
}

fn err_message(err: &CodecError) -> String {
    err.to_string()
}
