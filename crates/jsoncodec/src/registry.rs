//! Type-to-codec resolution.
//!
//! Primitive codecs are stateless, so one shared instance per type serves
//! every property in every model. The registry is populated once at startup
//! and treated as immutable afterwards; callers cache the resolved `Arc` on
//! their property metadata rather than calling [`CodecRegistry::find`] per
//! read.
//!
//! Composition is deliberately not resolved here: collection, cast and
//! converted codecs are wired by the model-building layer, which knows the
//! element type, the concrete collection type and the converter, around
//! whatever `find` returned for the element/provider type.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use crate::codec::{
    ErasedValueCodec, ValueCodec,
    enums::{EnumRepr, JsonEnum, LenientEnumCodec, SignedEnumCodec, UnsignedEnumCodec},
    numerics::{BigIntCodec, DecimalCodec, F16Codec, I128Codec, U128Codec},
    primitives::{
        BoolCodec, BytesCodec, CharCodec, F32Codec, F64Codec, I8Codec, I16Codec, I32Codec,
        I64Codec, StringCodec, U8Codec, U16Codec, U32Codec, U64Codec,
    },
    temporal::{DateCodec, DateTimeCodec, DateTimeOffsetCodec, DurationCodec, TimeCodec, UuidCodec},
};

/// Shared, immutable codec lookup keyed by value type.
pub struct CodecRegistry {
    codecs: HashMap<TypeId, Arc<dyn ErasedValueCodec>>,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecRegistry {
    /// A registry holding every built-in primitive codec singleton.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(BoolCodec);
        registry.register(I8Codec);
        registry.register(I16Codec);
        registry.register(I32Codec);
        registry.register(I64Codec);
        registry.register(U8Codec);
        registry.register(U16Codec);
        registry.register(U32Codec);
        registry.register(U64Codec);
        registry.register(F32Codec);
        registry.register(F64Codec);
        registry.register(StringCodec);
        registry.register(CharCodec);
        registry.register(BytesCodec);
        registry.register(DecimalCodec);
        registry.register(F16Codec);
        registry.register(BigIntCodec);
        registry.register(I128Codec);
        registry.register(U128Codec);
        registry.register(UuidCodec);
        registry.register(DateTimeCodec);
        registry.register(DateTimeOffsetCodec);
        registry.register(DateCodec);
        registry.register(TimeCodec);
        registry.register(DurationCodec);
        registry
    }

    /// A registry with nothing registered.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Registers `codec` as the shared instance for its value type,
    /// replacing any previous registration.
    pub fn register<C: ValueCodec>(&mut self, codec: C) {
        let erased: Arc<dyn ErasedValueCodec> = Arc::new(codec);
        self.codecs.insert(erased.value_type(), erased);
    }

    /// Registers the numeric codec for enum `E`, selecting the signed or
    /// unsigned variant from the repr's signedness.
    pub fn register_enum<E: JsonEnum>(&mut self) {
        if E::Repr::SIGNED {
            self.register(SignedEnumCodec::<E>::new());
        } else {
            self.register(UnsignedEnumCodec::<E>::new());
        }
    }

    /// Registers the string-tolerant codec for enum `E` instead of the
    /// strict numeric one.
    pub fn register_enum_lenient<E: JsonEnum>(&mut self) {
        self.register(LenientEnumCodec::<E>::new());
    }

    /// Looks up the codec registered for a value type. Returns `None` for
    /// types requiring composition by the caller (collections, converters).
    #[must_use]
    pub fn find(&self, type_id: TypeId) -> Option<Arc<dyn ErasedValueCodec>> {
        self.codecs.get(&type_id).cloned()
    }

    /// [`CodecRegistry::find`] with the type named statically.
    #[must_use]
    pub fn find_for<T: 'static>(&self) -> Option<Arc<dyn ErasedValueCodec>> {
        self.find(TypeId::of::<T>())
    }
}
