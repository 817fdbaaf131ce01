//! Composite codecs: collections, casts, value conversions, always-null.
//!
//! These are constructed once per distinct (type, element-codec) or
//! (type, converter) combination when the model is finalized, hold owned
//! references to their wrapped inner codec(s), and are shared immutably
//! afterwards.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::{
    codec::ValueCodec, error::CodecError, reader::TokenCursor, token::TokenType,
    writer::JsonWriter,
};

/// Element loop shared by the collection codecs. `on_null` decides what an
/// explicit `null` element token does for the concrete variant.
fn read_elements<C: ValueCodec, T>(
    element: &C,
    cursor: &mut TokenCursor<'_, '_>,
    out: &mut Vec<T>,
    mut push_value: impl FnMut(&mut Vec<T>, C::Value),
    mut on_null: impl FnMut(&mut Vec<T>),
) -> Result<(), CodecError> {
    if cursor.token_type() != TokenType::StartArray {
        return Err(CodecError::unexpected(cursor.token_type(), "collection"));
    }
    loop {
        match cursor.move_next()? {
            TokenType::EndArray => return Ok(()),
            TokenType::String
            | TokenType::Number
            | TokenType::True
            | TokenType::False
            // Nested arrays dispatch back into the element codec, which
            // covers collection-of-collection composition.
            | TokenType::StartArray => {
                let value = element.read(cursor, None)?;
                push_value(out, value);
            }
            TokenType::Null => on_null(out),
            TokenType::Comment => {}
            other => return Err(CodecError::unexpected(other, "collection")),
        }
    }
}

/// `Vec<T>` of non-nullable elements.
///
/// An explicit `null` element token is dropped without appending, matching
/// the element type's non-nullability; existing persisted documents rely on
/// this leniency.
#[derive(Debug, Clone)]
pub struct CollectionCodec<C> {
    element: C,
}

impl<C: ValueCodec> CollectionCodec<C> {
    /// Wraps the element codec.
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<C: ValueCodec> ValueCodec for CollectionCodec<C> {
    type Value = Vec<C::Value>;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        existing: Option<Vec<C::Value>>,
    ) -> Result<Vec<C::Value>, CodecError> {
        let mut out = existing.unwrap_or_default();
        out.clear();
        read_elements(&self.element, cursor, &mut out, Vec::push, |_| {})?;
        Ok(out)
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &Vec<C::Value>) -> Result<(), CodecError> {
        // Always a JSON array, even when empty; null-vs-empty is the
        // caller's decision one level up.
        writer.start_array()?;
        for element in value {
            self.element.write(writer, element)?;
        }
        writer.end_array()?;
        Ok(())
    }
}

/// `Vec<Option<T>>` of nullable elements: a `null` element token appends
/// `None`.
#[derive(Debug, Clone)]
pub struct NullableCollectionCodec<C> {
    element: C,
}

impl<C: ValueCodec> NullableCollectionCodec<C> {
    /// Wraps the element codec.
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<C: ValueCodec> ValueCodec for NullableCollectionCodec<C> {
    type Value = Vec<Option<C::Value>>;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        existing: Option<Vec<Option<C::Value>>>,
    ) -> Result<Vec<Option<C::Value>>, CodecError> {
        let mut out = existing.unwrap_or_default();
        out.clear();
        read_elements(
            &self.element,
            cursor,
            &mut out,
            |out, value| out.push(Some(value)),
            |out| out.push(None),
        )?;
        Ok(out)
    }

    fn write(
        &self,
        writer: &mut JsonWriter<'_>,
        value: &Vec<Option<C::Value>>,
    ) -> Result<(), CodecError> {
        writer.start_array()?;
        for element in value {
            match element {
                Some(element) => self.element.write(writer, element)?,
                None => writer.null()?,
            }
        }
        writer.end_array()?;
        Ok(())
    }
}

/// `Box<[T]>`: a fixed-size target always materializes through a growable
/// intermediate `Vec` and converts at the end; a supplied `existing`
/// instance is never reused.
#[derive(Debug, Clone)]
pub struct ArrayCodec<C> {
    element: C,
}

impl<C: ValueCodec> ArrayCodec<C> {
    /// Wraps the element codec.
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<C: ValueCodec> ValueCodec for ArrayCodec<C> {
    type Value = Box<[C::Value]>;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<Box<[C::Value]>>,
    ) -> Result<Box<[C::Value]>, CodecError> {
        let mut out = Vec::new();
        read_elements(&self.element, cursor, &mut out, Vec::push, |_| {})?;
        Ok(out.into_boxed_slice())
    }

    fn write(
        &self,
        writer: &mut JsonWriter<'_>,
        value: &Box<[C::Value]>,
    ) -> Result<(), CodecError> {
        writer.start_array()?;
        for element in value.iter() {
            self.element.write(writer, element)?;
        }
        writer.end_array()?;
        Ok(())
    }
}

/// Adapts a provider-type codec to a different declared type through the
/// `From` impls between the two — no independent read/write logic. Exists
/// so a declared type and its storage representation can differ by a safe
/// widening/narrowing conversion without a bespoke codec.
#[derive(Debug, Clone)]
pub struct CastCodec<C, T> {
    inner: C,
    _declared: PhantomData<fn() -> T>,
}

impl<C, T> CastCodec<C, T>
where
    C: ValueCodec,
    T: From<C::Value> + Clone + Send + 'static,
    C::Value: From<T>,
{
    /// Wraps the provider-type codec.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            _declared: PhantomData,
        }
    }
}

impl<C, T> ValueCodec for CastCodec<C, T>
where
    C: ValueCodec,
    T: From<C::Value> + Clone + Send + Sync + 'static,
    C::Value: From<T>,
{
    type Value = T;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        existing: Option<T>,
    ) -> Result<T, CodecError> {
        let existing = existing.map(C::Value::from);
        self.inner.read(cursor, existing).map(T::from)
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &T) -> Result<(), CodecError> {
        let provider = C::Value::from(value.clone());
        self.inner.write(writer, &provider)
    }
}

/// Adapts a provider-type codec through an arbitrary bidirectional value
/// conversion pair, letting user-defined conversions participate in the
/// streaming pipeline without their own JSON logic.
pub struct ConvertedCodec<C: ValueCodec, T> {
    inner: C,
    to_provider: Arc<dyn Fn(&T) -> C::Value + Send + Sync>,
    from_provider: Arc<dyn Fn(C::Value) -> T + Send + Sync>,
}

impl<C: ValueCodec, T> ConvertedCodec<C, T> {
    /// Wraps the provider-type codec with the conversion pair.
    pub fn new(
        inner: C,
        to_provider: impl Fn(&T) -> C::Value + Send + Sync + 'static,
        from_provider: impl Fn(C::Value) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner,
            to_provider: Arc::new(to_provider),
            from_provider: Arc::new(from_provider),
        }
    }
}

impl<C, T> ValueCodec for ConvertedCodec<C, T>
where
    C: ValueCodec,
    T: Send + Sync + 'static,
{
    type Value = T;

    fn read(
        &self,
        cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<T>,
    ) -> Result<T, CodecError> {
        let provider = self.inner.read(cursor, None)?;
        Ok((self.from_provider)(provider))
    }

    fn write(&self, writer: &mut JsonWriter<'_>, value: &T) -> Result<(), CodecError> {
        self.inner.write(writer, &(self.to_provider)(value))
    }
}

/// Codec for a value statically known to always serialize as `null`.
#[derive(Debug, Clone, Copy)]
pub struct NullCodec<T>(PhantomData<fn() -> T>);

impl<T> NullCodec<T> {
    /// The shared always-null instance.
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for NullCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> ValueCodec for NullCodec<T> {
    type Value = Option<T>;

    fn read(
        &self,
        _cursor: &mut TokenCursor<'_, '_>,
        _existing: Option<Option<T>>,
    ) -> Result<Option<T>, CodecError> {
        // Never consumes extra tokens.
        Ok(None)
    }

    fn write(&self, writer: &mut JsonWriter<'_>, _value: &Option<T>) -> Result<(), CodecError> {
        writer.null()?;
        Ok(())
    }
}
