//! Error taxonomy for the codec subsystem.
//!
//! Two layers: [`JsonSyntaxError`] describes byte-level problems raised by
//! the scanner (malformed tokens, premature end of input), while
//! [`CodecError`] is what every read/write entry point returns. A syntax
//! error is never recovered; a failed read of one value fails the entire
//! containing document parse.

use thiserror::Error;

use crate::token::TokenType;

/// A malformed byte sequence encountered by the low-level scanner.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum JsonSyntaxError {
    /// A byte that cannot start or continue any token in the current
    /// position.
    #[error("invalid character '{}' in JSON input", char::from(*.0))]
    InvalidCharacter(u8),
    /// A `true`/`false`/`null` literal with unexpected bytes.
    #[error("invalid literal in JSON input")]
    InvalidLiteral,
    /// A number violating the RFC 8259 grammar (leading zero, bare sign,
    /// dangling exponent).
    #[error("invalid number in JSON input")]
    InvalidNumber,
    /// A string escape other than `\" \\ \/ \b \f \n \r \t \uXXXX`.
    #[error("invalid escape sequence in JSON string")]
    InvalidEscape,
    /// An unescaped control character inside a string.
    #[error("unescaped control character in JSON string")]
    ControlCharacterInString,
    /// A string payload that is not valid UTF-8 after unescaping.
    #[error("invalid UTF-8 in JSON string")]
    InvalidUtf8,
    /// Input ended while a token or container was still open.
    #[error("unexpected end of JSON input")]
    UnexpectedEndOfInput,
    /// Bytes after the end of the single root value.
    #[error("trailing data after JSON value")]
    TrailingData,
}

/// Any failure produced by a codec read or write.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The underlying bytes are not well-formed JSON.
    #[error(transparent)]
    Syntax(#[from] JsonSyntaxError),

    /// The current token kind is not valid for the value being read, e.g. a
    /// `StartObject` where a scalar was expected.
    #[error("unexpected {found} token while reading {reading}")]
    UnexpectedToken {
        /// The token kind that was encountered.
        found: TokenType,
        /// Human-readable description of the value being read.
        reading: &'static str,
    },

    /// A textual payload could not be parsed into the target type.
    #[error("cannot parse '{literal}' as {type_name}")]
    Format {
        /// The offending literal as it appeared in the document.
        literal: String,
        /// Name of the type the literal was parsed into.
        type_name: &'static str,
    },

    /// A string literal that names no member of the enum and is not a
    /// numeric value of its underlying type.
    #[error("'{literal}' is not a valid value for enum {enum_type}")]
    BadEnumValue {
        /// The offending string literal.
        literal: String,
        /// Name of the enum type.
        enum_type: &'static str,
    },

    /// `from_json_str` was handed null/empty/whitespace-only text.
    #[error("cannot read value from empty JSON string")]
    EmptyJson,

    /// An erased value did not have the type the codec was built for.
    #[error("value passed to codec for {expected} has a different runtime type")]
    ValueType {
        /// Name of the codec's declared value type.
        expected: &'static str,
    },

    /// A stream read or write failure, propagated unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Shorthand used by codecs rejecting a token kind.
    #[must_use]
    pub(crate) fn unexpected(found: TokenType, reading: &'static str) -> Self {
        Self::UnexpectedToken { found, reading }
    }

    /// Shorthand for a parse failure naming the target type.
    #[must_use]
    pub(crate) fn format(literal: impl Into<String>, type_name: &'static str) -> Self {
        Self::Format {
            literal: literal.into(),
            type_name,
        }
    }
}
