//! Streaming, type-directed JSON value codecs.
//!
//! This crate serializes primitive, enum, nullable and collection-typed
//! values to and from a UTF-8 JSON token stream without a general-purpose
//! reflection serializer and without building a document tree. Codecs are
//! resolved once, when a model is built, and are then shared immutably
//! across every read and write for the mapped value.
//!
//! Reading is incremental: [`ReadBuffer`] pulls bytes from a slice or an
//! [`std::io::Read`] source into a growable window, and [`TokenCursor`]
//! walks tokens over it, refilling transparently when a token crosses a
//! window boundary. A read can be suspended between tokens
//! ([`TokenCursor::capture_state`]) and resumed later with a fresh cursor.
//!
//! # Examples
//!
//! ```rust
//! use jsoncodec::{ValueCodec, codec::primitives::I32Codec};
//!
//! let json = I32Codec.to_json_string(&42).unwrap();
//! assert_eq!(json, "42");
//! assert_eq!(I32Codec.from_json_str(&json, None).unwrap(), 42);
//! ```
//!
//! Collections compose over element codecs:
//!
//! ```rust
//! use jsoncodec::{ValueCodec, codec::composite::NullableCollectionCodec};
//! use jsoncodec::codec::primitives::I64Codec;
//!
//! let codec = NullableCollectionCodec::new(I64Codec);
//! let json = codec.to_json_string(&vec![Some(1), None, Some(3)]).unwrap();
//! assert_eq!(json, "[1,null,3]");
//! ```

pub mod codec;
pub mod diag;
mod error;
pub mod reader;
mod registry;
mod scanner;
mod token;
pub mod writer;

#[cfg(test)]
mod tests;

pub use codec::{ErasedValueCodec, ValueCodec};
pub use diag::{CodecWarning, DiagnosticsSink, TracingSink};
pub use error::{CodecError, JsonSyntaxError};
pub use reader::{ReadBuffer, TokenCursor};
pub use registry::CodecRegistry;
pub use token::TokenType;
pub use writer::JsonWriter;
