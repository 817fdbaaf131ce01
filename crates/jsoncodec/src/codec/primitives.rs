//! Codecs for booleans, native-width numbers, strings, chars and byte
//! arrays.
//!
//! Every codec here is a stateless unit struct; the registry hands out one
//! shared instance per type. Booleans and native-width integers/floats map
//! directly onto JSON boolean/number tokens with no string wrapping.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::{
    codec::ValueCodec, error::CodecError, reader::TokenCursor, token::TokenType,
    writer::JsonWriter,
};

/// `bool` as a JSON boolean token.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolCodec;

impl ValueCodec for BoolCodec {
    type Value = bool;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<bool>,
    ) -> Result<bool, CodecError> {
        match cursor.token_type() {
            TokenType::True | TokenType::False => Ok(cursor.bool_value()),
            other => Err(CodecError::unexpected(other, "bool")),
        }
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &bool) -> Result<(), CodecError> {
        writer.bool_value(*value)?;
        Ok(())
    }
}

macro_rules! number_codec {
    ($(#[$doc:meta])* $codec:ident, $ty:ty, $reading:literal) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $codec;

        impl ValueCodec for $codec {
            type Value = $ty;

            fn read(
                &self,
                cursor: &mut TokenCursor<'_, '_>,
                _existing: Option<$ty>,
            ) -> Result<$ty, CodecError> {
                match cursor.token_type() {
                    TokenType::Number => cursor.parse_number($reading),
                    other => Err(CodecError::unexpected(other, $reading)),
                }
            }

            fn write(&self, writer: &mut JsonWriter<'_>, value: &$ty) -> Result<(), CodecError> {
                writer.number(value)?;
                Ok(())
            }
        }
    };
}

number_codec!(
    /// `i8` as a JSON number token.
    I8Codec, i8, "i8"
);
number_codec!(
    /// `i16` as a JSON number token.
    I16Codec, i16, "i16"
);
number_codec!(
    /// `i32` as a JSON number token.
    I32Codec, i32, "i32"
);
number_codec!(
    /// `i64` as a JSON number token.
    I64Codec, i64, "i64"
);
number_codec!(
    /// `u8` as a JSON number token.
    U8Codec, u8, "u8"
);
number_codec!(
    /// `u16` as a JSON number token.
    U16Codec, u16, "u16"
);
number_codec!(
    /// `u32` as a JSON number token.
    U32Codec, u32, "u32"
);
number_codec!(
    /// `u64` as a JSON number token.
    U64Codec, u64, "u64"
);

macro_rules! float_codec {
    ($(#[$doc:meta])* $codec:ident, $ty:ty, $reading:literal) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $codec;

        impl ValueCodec for $codec {
            type Value = $ty;

            fn read(
                &self,
                cursor: &mut TokenCursor<'_, '_>,
                _existing: Option<$ty>,
            ) -> Result<$ty, CodecError> {
                match cursor.token_type() {
                    TokenType::Number => cursor.parse_number($reading),
                    other => Err(CodecError::unexpected(other, $reading)),
                }
            }

            fn write(&self, writer: &mut JsonWriter<'_>, value: &$ty) -> Result<(), CodecError> {
                // JSON numbers cannot represent NaN or infinities.
                if !value.is_finite() {
                    return Err(CodecError::format(value.to_string(), $reading));
                }
                writer.number(value)?;
                Ok(())
            }
        }
    };
}

float_codec!(
    /// `f32` as a JSON number token.
    F32Codec, f32, "f32"
);
float_codec!(
    /// `f64` as a JSON number token.
    F64Codec, f64, "f64"
);

/// `String` as a JSON string.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringCodec;

impl ValueCodec for StringCodec {
    type Value = String;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<String>,
    ) -> Result<String, CodecError> {
        match cursor.token_type() {
            TokenType::String => Ok(cursor.string_value()?.into_owned()),
            other => Err(CodecError::unexpected(other, "String")),
        }
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &String) -> Result<(), CodecError> {
        writer.string(value)?;
        Ok(())
    }
}

/// `char` as a single-character JSON string. Reading takes the first
/// character of the string without validating its length.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharCodec;

impl ValueCodec for CharCodec {
    type Value = char;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<char>,
    ) -> Result<char, CodecError> {
        match cursor.token_type() {
            TokenType::String => {
                let text = cursor.string_value()?;
                text.chars()
                    .next()
                    .ok_or_else(|| CodecError::format(text.into_owned(), "char"))
            }
            other => Err(CodecError::unexpected(other, "char")),
        }
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &char) -> Result<(), CodecError> {
        let mut tmp = [0u8; 4];
        writer.string(value.encode_utf8(&mut tmp))?;
        Ok(())
    }
}

/// `Vec<u8>` as a base64-encoded JSON string (standard alphabet, padded).
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesCodec;

impl ValueCodec for BytesCodec {
    type Value = Vec<u8>;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, CodecError> {
        match cursor.token_type() {
            TokenType::String => {
                let text = cursor.string_value()?;
                BASE64
                    .decode(text.as_bytes())
                    .map_err(|_| CodecError::format(text.into_owned(), "base64 bytes"))
            }
            other => Err(CodecError::unexpected(other, "bytes")),
        }
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &Vec<u8>) -> Result<(), CodecError> {
        writer.string(&BASE64.encode(value))?;
        Ok(())
    }
}
