//! Enum codecs.
//!
//! An enum value's canonical JSON form is the numeric value of its
//! underlying integer repr. Which codec applies is decided once, when the
//! type is registered, from the repr's signedness — never inside the hot
//! read/write path:
//!
//! - [`SignedEnumCodec`] / [`UnsignedEnumCodec`]: number tokens only.
//! - [`LenientEnumCodec`]: additionally accepts a string token, first as an
//!   exact member name, then as a numeric string of the repr type. Each
//!   string coercion reports one [`CodecWarning::StringEnumValue`] event
//!   when a sink configured to warn is attached.

use std::fmt::Display;
use std::str::FromStr;

use crate::{
    codec::ValueCodec,
    diag::CodecWarning,
    error::CodecError,
    reader::TokenCursor,
    token::TokenType,
    writer::JsonWriter,
};

/// Underlying integer type of a [`JsonEnum`].
pub trait EnumRepr: Copy + Display + FromStr + Send + Sync + 'static {
    /// Whether the repr is a signed integer type.
    const SIGNED: bool;
}

macro_rules! enum_repr {
    ($($ty:ty => $signed:literal),* $(,)?) => {
        $(impl EnumRepr for $ty {
            const SIGNED: bool = $signed;
        })*
    };
}

enum_repr! {
    i8 => true, i16 => true, i32 => true, i64 => true,
    u8 => false, u16 => false, u32 => false, u64 => false,
}

/// A Rust enum with a stable integer repr and name table, making it
/// codec-capable. Typically implemented next to the enum definition (or by
/// a small macro in the model layer).
pub trait JsonEnum: Copy + Send + Sync + 'static {
    /// The declared underlying integer type.
    type Repr: EnumRepr;

    /// Type name used in diagnostics and errors.
    const NAME: &'static str;

    /// The member's underlying integer value.
    fn to_repr(self) -> Self::Repr;

    /// Member for an underlying integer value, if one is defined.
    fn from_repr(repr: Self::Repr) -> Option<Self>;

    /// Member with exactly this name, if one is defined.
    fn from_name(name: &str) -> Option<Self>;
}

fn read_numeric<E: JsonEnum>(cursor: &TokenCursor<'_, '_>) -> Result<E, CodecError> {
    let repr: E::Repr = cursor.parse_number(E::NAME)?;
    E::from_repr(repr).ok_or_else(|| CodecError::BadEnumValue {
        literal: repr.to_string(),
        enum_type: E::NAME,
    })
}

macro_rules! numeric_enum_codec {
    ($(#[$doc:meta])* $codec:ident, $signed:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $codec<E>(core::marker::PhantomData<fn() -> E>);

        impl<E: JsonEnum> $codec<E> {
            /// Shared, stateless instance for `E`.
            #[must_use]
            pub fn new() -> Self {
                assert!(
                    E::Repr::SIGNED == $signed,
                    "enum repr signedness must match the codec variant",
                );
                Self(core::marker::PhantomData)
            }
        }

        impl<E: JsonEnum> Default for $codec<E> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<E: JsonEnum> ValueCodec for $codec<E> {
            type Value = E;

            fn read(
                &self,
                cursor: &mut TokenCursor<'_, '_>,
                _existing: Option<E>,
            ) -> Result<E, CodecError> {
                match cursor.token_type() {
                    TokenType::Number => read_numeric(cursor),
                    other => Err(CodecError::unexpected(other, E::NAME)),
                }
            }

            fn write(&self, writer: &mut JsonWriter<'_>, value: &E) -> Result<(), CodecError> {
                writer.number(&value.to_repr())?;
                Ok(())
            }
        }
    };
}

numeric_enum_codec!(
    /// Enum with a signed underlying type, as its numeric JSON value.
    SignedEnumCodec,
    true
);
numeric_enum_codec!(
    /// Enum with an unsigned underlying type, as its numeric JSON value.
    UnsignedEnumCodec,
    false
);

/// String-tolerant enum codec.
///
/// Writes the numeric form like the strict codecs. Reads accept a string
/// token as a fallback: exact member name first, then a numeric string of
/// the repr type. Unparsable strings raise [`CodecError::BadEnumValue`].
#[derive(Debug, Clone, Copy)]
pub struct LenientEnumCodec<E>(core::marker::PhantomData<fn() -> E>);

impl<E: JsonEnum> LenientEnumCodec<E> {
    /// Shared, stateless instance for `E`.
    #[must_use]
    pub fn new() -> Self {
        Self(core::marker::PhantomData)
    }
}

impl<E: JsonEnum> Default for LenientEnumCodec<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: JsonEnum> ValueCodec for LenientEnumCodec<E> {
    type Value = E;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<E>,
    ) -> Result<E, CodecError> {
        match cursor.token_type() {
            TokenType::Number => read_numeric(cursor),
            TokenType::String => {
                let text = cursor.string_value()?;
                let parsed = E::from_name(&text)
                    .or_else(|| text.parse::<E::Repr>().ok().and_then(E::from_repr));
                match parsed {
                    Some(value) => {
                        if let Some(sink) = cursor.sink() {
                            if sink.warns_on_string_enum() {
                                sink.report(CodecWarning::StringEnumValue {
                                    literal: &text,
                                    enum_type: E::NAME,
                                });
                            }
                        }
                        Ok(value)
                    }
                    None => Err(CodecError::BadEnumValue {
                        literal: text.into_owned(),
                        enum_type: E::NAME,
                    }),
                }
            }
            other => Err(CodecError::unexpected(other, E::NAME)),
        }
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &E) -> Result<(), CodecError> {
        writer.number(&value.to_repr())?;
        Ok(())
    }
}
