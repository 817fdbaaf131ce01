//! The value codec contract.
//!
//! Two layers, resolved at model-build time rather than per call:
//!
//! - [`ValueCodec`] is the strongly typed contract. Composite codecs compose
//!   through it, so a collection of `i32` reads `i32`s with no boxing and no
//!   per-element dispatch beyond one static call.
//! - [`ErasedValueCodec`] is the object-safe, type-erased contract used for
//!   storage and dispatch: a registry or property-metadata slot holds an
//!   `Arc<dyn ErasedValueCodec>` and moves values as `Box<dyn Any + Send>`.
//!   Every `ValueCodec` is an `ErasedValueCodec` through the blanket impl.
//!
//! Null handling is the caller's responsibility one layer up: `read` is
//! never invoked when the JSON value is the `null` literal (collection
//! codecs, which see `null` element tokens themselves, are the exception and
//! handle them inline).
//!
//! All codec instances are immutable after construction and freely shared
//! across threads.

use std::any::{Any, TypeId, type_name};

use crate::{
    error::CodecError,
    reader::{ReadBuffer, TokenCursor},
    writer::JsonWriter,
};

pub mod composite;
pub mod enums;
pub mod numerics;
pub mod primitives;
pub mod temporal;

/// A paired read/write unit for one value shape.
pub trait ValueCodec: Send + Sync + 'static {
    /// The in-memory type this codec reads and writes.
    type Value: Send + 'static;

    /// Reads one JSON value.
    ///
    /// Precondition: the cursor's current token is the first token of the
    /// value (never `Null`). Postcondition: the current token is the last
    /// token consumed for this value — the same token for scalars, the
    /// close token for containers.
    ///
    /// `existing`, when supplied, permits in-place reuse of a pre-existing
    /// container; it is cleared before repopulating. Scalar codecs ignore
    /// it.
    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        existing: Option<Self::Value>,
    ) -> Result<Self::Value, CodecError>;

    /// Writes exactly one JSON value, with no trailing separators. The
    /// caller supplies surrounding structure (property names, commas).
    fn write(&self, writer: &mut JsonWriter<'_>, value: &Self::Value) -> Result<(), CodecError>;

    /// Name of the value type, used in error messages.
    fn value_type_name(&self) -> &'static str {
        type_name::<Self::Value>()
    }

    /// Reads a value from a complete JSON string. Rejects empty or
    /// whitespace-only input before any token is read.
    fn from_json_str(
        &self,
        json: &str,
        existing: Option<Self::Value>,
    ) -> Result<Self::Value, CodecError> {
        if json.trim().is_empty() {
            return Err(CodecError::EmptyJson);
        }
        let mut data = ReadBuffer::new(json.as_bytes());
        let mut cursor = TokenCursor::new(&mut data);
        cursor.move_next()?;
        self.read(&mut cursor, existing)
    }

    /// Writes a value to a JSON string.
    fn to_json_string(&self, value: &Self::Value) -> Result<String, CodecError> {
        let mut out = Vec::new();
        let mut writer = JsonWriter::new(&mut out);
        self.write(&mut writer, value)?;
        Ok(String::from_utf8(out).expect("writer emits UTF-8"))
    }
}

/// Object-safe, type-erased view of a [`ValueCodec`].
pub trait ErasedValueCodec: Send + Sync {
    /// [`ValueCodec::read`] over an opaque value representation.
    fn read_value(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        existing: Option<Box<dyn Any + Send>>,
    ) -> Result<Box<dyn Any + Send>, CodecError>;

    /// [`ValueCodec::write`] over an opaque value representation.
    fn write_value(
        &self,
        writer: &mut JsonWriter<'_>,
        value: &(dyn Any + Send),
    ) -> Result<(), CodecError>;

    /// `TypeId` of the declared value type.
    fn value_type(&self) -> TypeId;

    /// Name of the declared value type.
    fn value_type_name(&self) -> &'static str;
}

impl<C: ValueCodec> ErasedValueCodec for C {
    fn read_value(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        existing: Option<Box<dyn Any + Send>>,
    ) -> Result<Box<dyn Any + Send>, CodecError> {
        let existing = match existing {
            Some(boxed) => Some(*boxed.downcast::<C::Value>().map_err(|_| {
                CodecError::ValueType {
                    expected: ValueCodec::value_type_name(self),
                }
            })?),
            None => None,
        };
        let value = self.read(cursor, existing)?;
        Ok(Box::new(value))
    }

    fn write_value(
        &self,
        writer: &mut JsonWriter<'_>,
        value: &(dyn Any + Send),
    ) -> Result<(), CodecError> {
        let value = value
            .downcast_ref::<C::Value>()
            .ok_or(CodecError::ValueType {
                expected: ValueCodec::value_type_name(self),
            })?;
        self.write(writer, value)
    }

    fn value_type(&self) -> TypeId {
        TypeId::of::<C::Value>()
    }

    fn value_type_name(&self) -> &'static str {
        ValueCodec::value_type_name(self)
    }
}
