//! Incremental read buffer and the token cursor over it.
//!
//! [`ReadBuffer`] owns the bytes a read operation works over: either a
//! caller-provided slice (no refill ever happens) or a growable window pulled
//! from an [`std::io::Read`] source. It survives across cursor suspensions —
//! a read can stop between tokens, capture its continuation state into the
//! buffer, and later resume with a fresh [`TokenCursor`] at the exact byte
//! position.
//!
//! [`TokenCursor`] is the transient view: it pairs a scanner with the buffer
//! and drives the refill loop. One cursor per resume point; it is consumed
//! by [`TokenCursor::capture_state`] and never outlives its read call.
//!
//! Buffer invariant: `position <= available <= buffer.len()`, where
//! `position` counts bytes already consumed and safe to discard, and
//! `available` counts valid bytes currently buffered.

use std::borrow::Cow;
use std::io::Read;
use std::str::FromStr;

use crate::{
    diag::DiagnosticsSink,
    error::{CodecError, JsonSyntaxError},
    scanner::{JsonScanner, ScannerState, unescape},
    token::TokenType,
};

const INITIAL_STREAM_BUFFER: usize = 256;

enum Source<'de> {
    /// A fixed in-memory document; final from the start.
    Fixed(&'de [u8]),
    /// A pull-based byte stream refilled on demand.
    Stream(Box<dyn Read + 'de>),
}

/// Growable byte window feeding a [`TokenCursor`], with capture/resume
/// support across suspension points.
pub struct ReadBuffer<'de> {
    source: Source<'de>,
    buffer: Vec<u8>,
    position: usize,
    available: usize,
    final_block: bool,
    state: ScannerState,
}

impl<'de> ReadBuffer<'de> {
    /// Wraps a complete in-memory document. No stream refill ever happens.
    #[must_use]
    pub fn new(bytes: &'de [u8]) -> Self {
        Self {
            source: Source::Fixed(bytes),
            buffer: Vec::new(),
            position: 0,
            available: bytes.len(),
            final_block: true,
            state: ScannerState::default(),
        }
    }

    /// Wraps a byte stream, performing the initial fill before any token is
    /// read. Stream errors propagate unchanged.
    pub fn from_reader(reader: impl Read + 'de) -> Result<Self, CodecError> {
        let mut buffer = Self {
            source: Source::Stream(Box::new(reader)),
            buffer: vec![0; INITIAL_STREAM_BUFFER],
            position: 0,
            available: 0,
            final_block: false,
            state: ScannerState::default(),
        };
        buffer.fill()?;
        Ok(buffer)
    }

    /// The unconsumed window the scanner operates on.
    pub(crate) fn window(&self) -> &[u8] {
        match &self.source {
            Source::Fixed(bytes) => &bytes[self.position..],
            Source::Stream(_) => &self.buffer[self.position..self.available],
        }
    }

    pub(crate) fn is_final(&self) -> bool {
        self.final_block
    }

    pub(crate) fn state(&self) -> ScannerState {
        self.state.clone()
    }

    /// Commits `consumed` window bytes and stores the continuation state, so
    /// the next cursor resumes after the last token read.
    pub(crate) fn capture(&mut self, consumed: usize, state: ScannerState) {
        self.position += consumed;
        self.state = state;
    }

    /// Discards `consumed` window bytes and pulls more input from the
    /// stream, shifting unconsumed leftover bytes to the front of the
    /// buffer. The buffer doubles only when a whole window was exhausted
    /// without consuming anything, i.e. one token is larger than the window.
    pub(crate) fn refill(&mut self, consumed: usize) -> Result<(), CodecError> {
        self.position += consumed;
        match self.source {
            // A fixed document cannot yield more bytes; the scanner sees an
            // empty final window and reports end-of-data on its own.
            Source::Fixed(_) => Ok(()),
            Source::Stream(_) => {
                let leftover = self.available - self.position;
                if leftover == self.buffer.len() {
                    self.buffer.resize(self.buffer.len() * 2, 0);
                } else if leftover > 0 {
                    self.buffer.copy_within(self.position..self.available, 0);
                }
                self.position = 0;
                self.available = leftover;
                self.fill()
            }
        }
    }

    /// Reads from the stream until the buffer is full or the stream is
    /// exhausted; only hitting end-of-stream marks the window final.
    fn fill(&mut self) -> Result<(), CodecError> {
        let Source::Stream(reader) = &mut self.source else {
            return Ok(());
        };
        while self.available < self.buffer.len() {
            let n = reader.read(&mut self.buffer[self.available..])?;
            if n == 0 {
                self.final_block = true;
                tracing::trace!(available = self.available, "stream exhausted");
                break;
            }
            self.available += n;
        }
        Ok(())
    }
}

/// Token-at-a-time cursor over a [`ReadBuffer`].
///
/// Created fresh per resume point. `move_next` and `skip` transparently
/// refill the buffer when the window runs out mid-token; malformed bytes
/// fail immediately and are never retried.
pub struct TokenCursor<'a, 'de> {
    data: &'a mut ReadBuffer<'de>,
    scanner: JsonScanner,
    sink: Option<&'a dyn DiagnosticsSink>,
}

impl<'a, 'de> TokenCursor<'a, 'de> {
    /// Resumes reading from the buffer's captured state.
    pub fn new(data: &'a mut ReadBuffer<'de>) -> Self {
        Self::with_sink(data, None)
    }

    /// Resumes reading with a diagnostics sink attached.
    pub fn with_sink(data: &'a mut ReadBuffer<'de>, sink: Option<&'a dyn DiagnosticsSink>) -> Self {
        let scanner = JsonScanner::resume(data.state());
        Self { data, scanner, sink }
    }

    /// The kind of the current token; `TokenType::None` before the first
    /// `move_next` and after a clean end of document.
    #[must_use]
    pub fn token_type(&self) -> TokenType {
        self.scanner.token_type()
    }

    /// The diagnostics sink attached at construction, if any.
    #[must_use]
    pub fn sink(&self) -> Option<&dyn DiagnosticsSink> {
        self.sink
    }

    /// Advances to the next token, refilling the buffer as needed. Returns
    /// `TokenType::None` at the clean end of the document; running out of
    /// bytes inside a value or an open container is a syntax error.
    pub fn move_next(&mut self) -> Result<TokenType, CodecError> {
        loop {
            match self.scanner.read(self.data.window(), self.data.is_final())? {
                Some(token) => return Ok(token),
                None => {
                    if self.data.is_final() {
                        return Ok(TokenType::None);
                    }
                    self.data.refill(self.scanner.consumed())?;
                    self.scanner.rebase();
                }
            }
        }
    }

    /// Skips the subtree rooted at the current token. A no-op for scalars;
    /// for `StartArray`/`StartObject` it consumes tokens through the
    /// matching close token.
    pub fn skip(&mut self) -> Result<(), CodecError> {
        if !self.token_type().starts_container() {
            return Ok(());
        }
        let target = self.scanner.depth() - 1;
        while self.scanner.depth() > target {
            self.move_next()?;
        }
        Ok(())
    }

    /// Suspends reading: commits consumed bytes and continuation state back
    /// to the buffer so a later cursor picks up at the next sibling token.
    pub fn capture_state(self) {
        let state = self.scanner.state().clone();
        self.data.capture(self.scanner.consumed(), state);
    }

    /// Raw payload bytes of the current token (string payloads exclude the
    /// quotes and are still escaped).
    #[must_use]
    pub fn raw_value(&self) -> &[u8] {
        &self.data.window()[self.scanner.value_range()]
    }

    /// Decoded text of the current `String` or `PropertyName` token,
    /// borrowing from the buffer when the payload contains no escapes.
    pub fn string_value(&self) -> Result<Cow<'_, str>, CodecError> {
        let raw = self.raw_value();
        if self.scanner.has_escapes() {
            Ok(Cow::Owned(unescape(raw)?))
        } else {
            core::str::from_utf8(raw)
                .map(Cow::Borrowed)
                .map_err(|_| JsonSyntaxError::InvalidUtf8.into())
        }
    }

    /// Value of the current `True`/`False` token.
    #[must_use]
    pub fn bool_value(&self) -> bool {
        self.token_type() == TokenType::True
    }

    /// Parses the current `Number` token's text; a parse failure names the
    /// target type.
    pub fn parse_number<T: FromStr>(&self, type_name: &'static str) -> Result<T, CodecError> {
        let text =
            core::str::from_utf8(self.raw_value()).map_err(|_| JsonSyntaxError::InvalidUtf8)?;
        text.parse()
            .map_err(|_| CodecError::format(text, type_name))
    }
}
