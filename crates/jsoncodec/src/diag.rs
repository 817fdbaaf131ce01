//! Diagnostics sink for non-fatal coercion warnings.
//!
//! The only current producer is the lenient enum codec, which reports when a
//! JSON string literal was coerced into an enum value. A sink is optional;
//! reads without one silently skip the warning path.

/// A non-fatal event observed while reading a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecWarning<'a> {
    /// A string literal was used where a numeric enum value is the canonical
    /// representation.
    StringEnumValue {
        /// The literal as it appeared in the document.
        literal: &'a str,
        /// Name of the enum type it was coerced into.
        enum_type: &'static str,
    },
}

/// Receiver for [`CodecWarning`]s, attached at cursor construction.
pub trait DiagnosticsSink: Send + Sync {
    /// Whether string-to-enum coercion should be reported at all. Sinks
    /// return `false` to disable the path without detaching.
    fn warns_on_string_enum(&self) -> bool {
        true
    }

    /// Delivers one warning event.
    fn report(&self, warning: CodecWarning<'_>);
}

/// Default sink routing warnings to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn report(&self, warning: CodecWarning<'_>) {
        match warning {
            CodecWarning::StringEnumValue { literal, enum_type } => {
                tracing::warn!(literal, enum_type, "string literal used for enum value");
            }
        }
    }
}
