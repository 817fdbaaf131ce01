//! UTF-8 JSON writer.
//!
//! Emits one value at a time into any [`std::io::Write`] sink, tracking just
//! enough structure (one bool per open container) to insert commas and
//! colons. Codecs call the scalar emitters; the structural methods exist for
//! collection codecs and for callers assembling whole documents around
//! individual values.

use std::fmt::Display;
use std::io::{self, Write};

/// Streaming JSON writer over a borrowed byte sink.
pub struct JsonWriter<'w> {
    out: &'w mut dyn Write,
    /// One entry per open container: whether it already has an element.
    levels: Vec<bool>,
    /// Set between a property name and its value.
    pending_name: bool,
}

impl<'w> JsonWriter<'w> {
    /// Creates a writer over `out`. Nothing is written until the first emit.
    pub fn new(out: &'w mut dyn Write) -> Self {
        Self {
            out,
            levels: Vec::new(),
            pending_name: false,
        }
    }

    /// Inserts the separating comma when the current container already has
    /// an element. Values following a property name never take a comma.
    fn before_value(&mut self) -> io::Result<()> {
        if self.pending_name {
            self.pending_name = false;
            return Ok(());
        }
        if let Some(has_element) = self.levels.last_mut() {
            if *has_element {
                self.out.write_all(b",")?;
            }
            *has_element = true;
        }
        Ok(())
    }

    /// Emits the `null` literal.
    pub fn null(&mut self) -> io::Result<()> {
        self.before_value()?;
        self.out.write_all(b"null")
    }

    /// Emits `true` or `false`.
    pub fn bool_value(&mut self, value: bool) -> io::Result<()> {
        self.before_value()?;
        self.out.write_all(if value { b"true" } else { b"false" })
    }

    /// Emits a bare number token from the value's display form.
    pub fn number<T: Display>(&mut self, value: &T) -> io::Result<()> {
        self.before_value()?;
        write!(self.out, "{value}")
    }

    /// Emits an escaped, quoted string value.
    pub fn string(&mut self, value: &str) -> io::Result<()> {
        self.before_value()?;
        self.out.write_all(b"\"")?;
        self.write_escaped(value)?;
        self.out.write_all(b"\"")
    }

    /// Emits `[` and opens a level.
    pub fn start_array(&mut self) -> io::Result<()> {
        self.before_value()?;
        self.levels.push(false);
        self.out.write_all(b"[")
    }

    /// Emits `]` and closes the current level.
    pub fn end_array(&mut self) -> io::Result<()> {
        self.levels.pop();
        self.out.write_all(b"]")
    }

    /// Emits `{` and opens a level.
    pub fn start_object(&mut self) -> io::Result<()> {
        self.before_value()?;
        self.levels.push(false);
        self.out.write_all(b"{")
    }

    /// Emits `}` and closes the current level.
    pub fn end_object(&mut self) -> io::Result<()> {
        self.levels.pop();
        self.out.write_all(b"}")
    }

    /// Emits an escaped member name and its `:`; the next emit is its value.
    pub fn property_name(&mut self, name: &str) -> io::Result<()> {
        self.before_value()?;
        self.out.write_all(b"\"")?;
        self.write_escaped(name)?;
        self.out.write_all(b"\":")?;
        self.pending_name = true;
        Ok(())
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    // Escapes quotes, backslashes, control characters and the Unicode line
    // separators U+2028/U+2029 (which pre-2019 JSON parsers may mishandle).
    // Characters outside the BMP pass through as raw UTF-8.
    fn write_escaped(&mut self, src: &str) -> io::Result<()> {
        for c in src.chars() {
            match c {
                '"' => self.out.write_all(b"\\\"")?,
                '\\' => self.out.write_all(b"\\\\")?,
                '\u{2028}' | '\u{2029}' => {
                    write!(self.out, "\\u{:04X}", c as u32)?;
                }
                c if c.is_ascii_control() || (c.is_control() && c as u32 <= 0xFFFF) => {
                    write!(self.out, "\\u{:04X}", c as u32)?;
                }
                _ => {
                    let mut tmp = [0u8; 4];
                    self.out.write_all(c.encode_utf8(&mut tmp).as_bytes())?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::JsonWriter;

    fn written(build: impl FnOnce(&mut JsonWriter<'_>) -> std::io::Result<()>) -> String {
        let mut out = Vec::new();
        let mut writer = JsonWriter::new(&mut out);
        build(&mut writer).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn scalars() {
        assert_eq!(written(|w| w.null()), "null");
        assert_eq!(written(|w| w.bool_value(true)), "true");
        assert_eq!(written(|w| w.number(&-12.5)), "-12.5");
        assert_eq!(written(|w| w.string("a\"b")), r#""a\"b""#);
    }

    #[test]
    fn arrays_insert_commas() {
        let json = written(|w| {
            w.start_array()?;
            w.number(&1)?;
            w.number(&2)?;
            w.start_array()?;
            w.end_array()?;
            w.end_array()
        });
        assert_eq!(json, "[1,2,[]]");
    }

    #[test]
    fn objects_insert_commas_and_colons() {
        let json = written(|w| {
            w.start_object()?;
            w.property_name("a")?;
            w.number(&1)?;
            w.property_name("b")?;
            w.null()?;
            w.end_object()
        });
        assert_eq!(json, r#"{"a":1,"b":null}"#);
    }

    #[test]
    fn control_characters_are_escaped() {
        assert_eq!(written(|w| w.string("a\nb")), "\"a\\u000Ab\"");
        assert_eq!(written(|w| w.string("\u{2028}")), "\"\\u2028\"");
    }
}
