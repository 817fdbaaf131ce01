//! The token-type vocabulary shared by the scanner, cursor and codecs.

use core::fmt;

/// The kind of the JSON token a cursor is currently positioned on.
///
/// Matches the RFC 8259 token grammar plus `Comment` (both `//` and
/// `/* */` forms are surfaced so callers can skip them) and `None`, the
/// state before the first `move_next` and after a clean end of document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// No token: before the first read, or after the document ended.
    None,
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    /// An object member name (the string before a `:`).
    PropertyName,
    /// A `//` or `/* */` comment.
    Comment,
    /// A string value.
    String,
    /// A number value.
    Number,
    /// The literal `true`.
    True,
    /// The literal `false`.
    False,
    /// The literal `null`.
    Null,
}

impl TokenType {
    /// Returns `true` for `StartArray` / `StartObject`.
    #[must_use]
    pub fn starts_container(self) -> bool {
        matches!(self, Self::StartArray | Self::StartObject)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::StartObject => "StartObject",
            Self::EndObject => "EndObject",
            Self::StartArray => "StartArray",
            Self::EndArray => "EndArray",
            Self::PropertyName => "PropertyName",
            Self::Comment => "Comment",
            Self::String => "String",
            Self::Number => "Number",
            Self::True => "True",
            Self::False => "False",
            Self::Null => "Null",
        };
        f.write_str(name)
    }
}
