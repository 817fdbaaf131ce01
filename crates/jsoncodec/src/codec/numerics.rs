//! Codecs for numeric types whose values exceed native JSON-number
//! fidelity.
//!
//! These are written as numeric-looking JSON strings so that no precision is
//! lost in transit: `Decimal` keeps its scale (trailing zeros included),
//! 128-bit integers and `BigInt` round-trip digits that would overflow an
//! `f64`-based consumer. Reads accept a number token as well, for documents
//! produced by writers that chose the bare form.

use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::{
    codec::ValueCodec, error::CodecError, reader::TokenCursor, token::TokenType,
    writer::JsonWriter,
};

fn read_text_number<T: std::str::FromStr>(
    cursor: &mut TokenCursor<'_, '_>,
    type_name: &'static str,
) -> Result<T, CodecError> {
    match cursor.token_type() {
        TokenType::String => {
            let text = cursor.string_value()?;
            text.parse()
                .map_err(|_| CodecError::format(text.into_owned(), type_name))
        }
        TokenType::Number => cursor.parse_number(type_name),
        other => Err(CodecError::unexpected(other, type_name)),
    }
}

/// `rust_decimal::Decimal` as a JSON string preserving full precision and
/// scale: `263.50` is written as `"263.50"` and reads back bit-for-bit
/// identical.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecimalCodec;

impl ValueCodec for DecimalCodec {
    type Value = Decimal;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<Decimal>,
    ) -> Result<Decimal, CodecError> {
        read_text_number(cursor, "Decimal")
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &Decimal) -> Result<(), CodecError> {
        writer.string(&value.to_string())?;
        Ok(())
    }
}

/// `half::f16` as a JSON string with at most four fractional digits,
/// trailing zeros trimmed.
#[derive(Debug, Default, Clone, Copy)]
pub struct F16Codec;

fn format_f16(value: half::f16) -> String {
    let wide = f32::from(value);
    if !wide.is_finite() {
        return wide.to_string();
    }
    let mut text = format!("{wide:.4}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

impl ValueCodec for F16Codec {
    type Value = half::f16;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<half::f16>,
    ) -> Result<half::f16, CodecError> {
        let wide: f32 = read_text_number(cursor, "f16")?;
        Ok(half::f16::from_f32(wide))
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &half::f16) -> Result<(), CodecError> {
        writer.string(&format_f16(*value))?;
        Ok(())
    }
}

/// `num_bigint::BigInt` as a round-trippable JSON string.
#[derive(Debug, Default, Clone, Copy)]
pub struct BigIntCodec;

impl ValueCodec for BigIntCodec {
    type Value = BigInt;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<BigInt>,
    ) -> Result<BigInt, CodecError> {
        read_text_number(cursor, "BigInt")
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &BigInt) -> Result<(), CodecError> {
        writer.string(&value.to_string())?;
        Ok(())
    }
}

/// `i128` as a round-trippable JSON string.
#[derive(Debug, Default, Clone, Copy)]
pub struct I128Codec;

impl ValueCodec for I128Codec {
    type Value = i128;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<i128>,
    ) -> Result<i128, CodecError> {
        read_text_number(cursor, "i128")
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &i128) -> Result<(), CodecError> {
        writer.string(&value.to_string())?;
        Ok(())
    }
}

/// `u128` as a round-trippable JSON string.
#[derive(Debug, Default, Clone, Copy)]
pub struct U128Codec;

impl ValueCodec for U128Codec {
    type Value = u128;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<u128>,
    ) -> Result<u128, CodecError> {
        read_text_number(cursor, "u128")
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &u128) -> Result<(), CodecError> {
        writer.string(&value.to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::format_f16;

    #[test]
    fn f16_formatting_trims_trailing_zeros() {
        assert_eq!(format_f16(half::f16::from_f32(1.5)), "1.5");
        assert_eq!(format_f16(half::f16::from_f32(2.0)), "2");
        assert_eq!(format_f16(half::f16::from_f32(0.0)), "0");
    }
}
