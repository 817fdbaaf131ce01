//! Scanner: resumable token reader over a borrowed byte window.
//!
//! Why this exists
//! - The cursor layer reads from a window that may end mid-token when the
//!   input is stream-backed. The scanner must therefore never commit a
//!   partially read token: on window exhaustion it rolls back to the last
//!   committed byte and reports *need more data*, and after the buffer
//!   refills it rescans the token from its first byte.
//! - Structural state (open containers, what token kind is legal next) is
//!   kept in a small, cloneable [`ScannerState`] so a read can be suspended
//!   between tokens and resumed later with a fresh scanner.
//!
//! What it does
//! - Tokenizes RFC 8259 JSON plus `//` and `/* */` comments, one token per
//!   [`JsonScanner::read`] call. Separators (`,` `:`) and whitespace are
//!   consumed silently; containers, scalars, property names and comments are
//!   surfaced as tokens.
//! - Tracks `consumed`, the byte count of fully committed input, which the
//!   buffer layer uses to discard bytes on refill.
//!
//! Invariants
//! - `consumed <= pos <= window.len()` during a scan; between `read` calls
//!   `consumed == pos`.
//! - After `Ok(Some(_))` the token's payload range lies entirely inside the
//!   current window and stays valid until the next `read` or `rebase`.
//! - `read` never returns `Ok(None)` for a final window unless the document
//!   ended cleanly; truncated input inside a token or an open container is
//!   an [`JsonSyntaxError::UnexpectedEndOfInput`].

use core::ops::Range;

use crate::{error::JsonSyntaxError, token::TokenType};

#[cfg(test)]
mod tests;

/// Which container the scanner is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// What the grammar permits at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// Before the single root value.
    RootValue,
    /// A value is required (after `,` in an array or `:` in an object).
    Value,
    /// Just after `[`: a value or `]`.
    ValueOrEnd,
    /// Just after `{`: a member name or `}`.
    NameOrEnd,
    /// After `,` in an object: a member name is required.
    Name,
    /// After a member name: `:`.
    Colon,
    /// After a value inside a container: `,` or the closing bracket.
    CommaOrEnd,
    /// The root value is complete.
    Done,
}

/// Continuation state captured between tokens.
///
/// Cheap to clone: the container stack is one entry per open nesting level.
#[derive(Debug, Clone)]
pub(crate) struct ScannerState {
    stack: Vec<Container>,
    expect: Expect,
}

impl Default for ScannerState {
    fn default() -> Self {
        Self {
            stack: Vec::new(),
            expect: Expect::RootValue,
        }
    }
}

/// Outcome of a successful `read`: either a token or a request for more
/// bytes (`None`). For a final window, `None` means the document ended.
pub(crate) type ScanResult = Result<Option<TokenType>, JsonSyntaxError>;

/// Low-level token reader. Holds indices into a window it does not own; the
/// window is passed to every call so the buffer layer can swap it out on
/// refill.
#[derive(Debug)]
pub(crate) struct JsonScanner {
    pos: usize,
    consumed: usize,
    token: TokenType,
    value: Range<usize>,
    has_escapes: bool,
    pending_escapes: bool,
    state: ScannerState,
}

impl JsonScanner {
    pub(crate) fn new() -> Self {
        Self::resume(ScannerState::default())
    }

    /// Rebuilds a scanner from captured continuation state, positioned at
    /// the start of a fresh window.
    pub(crate) fn resume(state: ScannerState) -> Self {
        Self {
            pos: 0,
            consumed: 0,
            token: TokenType::None,
            value: 0..0,
            has_escapes: false,
            pending_escapes: false,
            state,
        }
    }

    /// Bytes of the window fully committed so far.
    pub(crate) fn consumed(&self) -> usize {
        self.consumed
    }

    /// Number of currently open containers.
    pub(crate) fn depth(&self) -> usize {
        self.state.stack.len()
    }

    pub(crate) fn token_type(&self) -> TokenType {
        self.token
    }

    /// Payload range of the current token within the window (inside the
    /// quotes for strings and names, the full text for numbers/comments).
    pub(crate) fn value_range(&self) -> Range<usize> {
        self.value.clone()
    }

    /// Whether the current string token contains backslash escapes.
    pub(crate) fn has_escapes(&self) -> bool {
        self.has_escapes
    }

    pub(crate) fn state(&self) -> &ScannerState {
        &self.state
    }

    /// Resets window-relative indices after the buffer discarded everything
    /// up to `consumed` and presented a new window.
    pub(crate) fn rebase(&mut self) {
        self.pos = 0;
        self.consumed = 0;
        self.token = TokenType::None;
        self.value = 0..0;
        self.has_escapes = false;
        self.pending_escapes = false;
    }

    /// Reads the next token from `window`.
    ///
    /// Returns `Ok(None)` when the window is exhausted: for a non-final
    /// window that is a refill request, for a final window it is the clean
    /// end of the document. All malformed input fails immediately.
    pub(crate) fn read(&mut self, window: &[u8], is_final: bool) -> ScanResult {
        loop {
            self.skip_whitespace(window);
            let Some(&b) = window.get(self.pos) else {
                return self.handle_exhausted(is_final);
            };

            // Comments are legal between any two tokens and do not disturb
            // the expectation state.
            if b == b'/' {
                return self.scan_comment(window, is_final);
            }

            match self.state.expect {
                Expect::Done => return Err(JsonSyntaxError::TrailingData),
                Expect::Colon => {
                    if b == b':' {
                        self.advance_separator();
                        self.state.expect = Expect::Value;
                    } else {
                        return Err(JsonSyntaxError::InvalidCharacter(b));
                    }
                }
                Expect::CommaOrEnd => match (b, self.state.stack.last()) {
                    (b',', Some(Container::Array)) => {
                        self.advance_separator();
                        self.state.expect = Expect::Value;
                    }
                    (b',', Some(Container::Object)) => {
                        self.advance_separator();
                        self.state.expect = Expect::Name;
                    }
                    (b']', Some(Container::Array)) => return self.end_container(TokenType::EndArray),
                    (b'}', Some(Container::Object)) => {
                        return self.end_container(TokenType::EndObject);
                    }
                    _ => return Err(JsonSyntaxError::InvalidCharacter(b)),
                },
                Expect::NameOrEnd if b == b'}' => {
                    return self.end_container(TokenType::EndObject);
                }
                Expect::NameOrEnd | Expect::Name => {
                    if b == b'"' {
                        return self.scan_name(window, is_final);
                    }
                    return Err(JsonSyntaxError::InvalidCharacter(b));
                }
                Expect::ValueOrEnd if b == b']' => return self.end_container(TokenType::EndArray),
                Expect::RootValue | Expect::Value | Expect::ValueOrEnd => {
                    return self.scan_value(b, window, is_final);
                }
            }
        }
    }

    fn skip_whitespace(&mut self, window: &[u8]) {
        while let Some(&b) = window.get(self.pos) {
            if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.consumed = self.pos;
    }

    fn advance_separator(&mut self) {
        self.pos += 1;
        self.consumed = self.pos;
    }

    fn handle_exhausted(&mut self, is_final: bool) -> ScanResult {
        if !is_final {
            // Roll back to the commit point; the partial token (if any) is
            // rescanned against the refilled window.
            self.pos = self.consumed;
            return Ok(None);
        }
        match self.state.expect {
            Expect::Done | Expect::RootValue => {
                self.token = TokenType::None;
                self.value = 0..0;
                Ok(None)
            }
            _ => Err(JsonSyntaxError::UnexpectedEndOfInput),
        }
    }

    fn commit_token(&mut self, token: TokenType, value: Range<usize>) -> ScanResult {
        self.consumed = self.pos;
        self.token = token;
        self.value = value;
        Ok(Some(token))
    }

    /// Expectation transition once a value (scalar or closed container) has
    /// been fully read.
    fn value_done(&mut self) {
        self.state.expect = if self.state.stack.is_empty() {
            Expect::Done
        } else {
            Expect::CommaOrEnd
        };
    }

    fn end_container(&mut self, token: TokenType) -> ScanResult {
        self.pos += 1;
        self.state.stack.pop();
        self.value_done();
        self.commit_token(token, self.pos - 1..self.pos)
    }

    fn scan_value(&mut self, b: u8, window: &[u8], is_final: bool) -> ScanResult {
        match b {
            b'{' => {
                self.pos += 1;
                self.state.stack.push(Container::Object);
                self.state.expect = Expect::NameOrEnd;
                self.commit_token(TokenType::StartObject, self.pos - 1..self.pos)
            }
            b'[' => {
                self.pos += 1;
                self.state.stack.push(Container::Array);
                self.state.expect = Expect::ValueOrEnd;
                self.commit_token(TokenType::StartArray, self.pos - 1..self.pos)
            }
            b'"' => match self.scan_string(window, is_final)? {
                Some(value) => {
                    let escaped = self.pending_escapes;
                    self.value_done();
                    self.has_escapes = escaped;
                    self.commit_token(TokenType::String, value)
                }
                None => Ok(None),
            },
            b't' => self.scan_literal(window, is_final, b"true", TokenType::True),
            b'f' => self.scan_literal(window, is_final, b"false", TokenType::False),
            b'n' => self.scan_literal(window, is_final, b"null", TokenType::Null),
            b'-' | b'0'..=b'9' => self.scan_number(window, is_final),
            _ => Err(JsonSyntaxError::InvalidCharacter(b)),
        }
    }

    fn scan_name(&mut self, window: &[u8], is_final: bool) -> ScanResult {
        match self.scan_string(window, is_final)? {
            Some(value) => {
                let escaped = self.pending_escapes;
                self.state.expect = Expect::Colon;
                self.has_escapes = escaped;
                self.commit_token(TokenType::PropertyName, value)
            }
            None => Ok(None),
        }
    }

    /// Scans a string starting at the opening quote. On success `pos` sits
    /// past the closing quote and the returned range covers the raw payload
    /// between the quotes. Returns `Ok(None)` when more bytes are needed.
    fn scan_string(&mut self, window: &[u8], is_final: bool) -> Result<Option<Range<usize>>, JsonSyntaxError> {
        let start = self.pos + 1;
        let mut i = start;
        self.pending_escapes = false;
        loop {
            let Some(&b) = window.get(i) else {
                return self.string_exhausted(is_final);
            };
            match b {
                b'"' => {
                    self.pos = i + 1;
                    return Ok(Some(start..i));
                }
                b'\\' => {
                    self.pending_escapes = true;
                    let Some(&esc) = window.get(i + 1) else {
                        return self.string_exhausted(is_final);
                    };
                    match esc {
                        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => i += 2,
                        b'u' => {
                            if window.len() < i + 6 {
                                return self.string_exhausted(is_final);
                            }
                            if !window[i + 2..i + 6].iter().all(u8::is_ascii_hexdigit) {
                                return Err(JsonSyntaxError::InvalidEscape);
                            }
                            i += 6;
                        }
                        _ => return Err(JsonSyntaxError::InvalidEscape),
                    }
                }
                0x00..=0x1F => return Err(JsonSyntaxError::ControlCharacterInString),
                _ => i += 1,
            }
        }
    }

    fn string_exhausted(&mut self, is_final: bool) -> Result<Option<Range<usize>>, JsonSyntaxError> {
        if is_final {
            Err(JsonSyntaxError::UnexpectedEndOfInput)
        } else {
            self.pos = self.consumed;
            Ok(None)
        }
    }

    fn scan_literal(
        &mut self,
        window: &[u8],
        is_final: bool,
        literal: &'static [u8],
        token: TokenType,
    ) -> ScanResult {
        let end = self.pos + literal.len();
        if window.len() < end {
            if window[self.pos..] == literal[..window.len() - self.pos] {
                return self.handle_exhausted_in_token(is_final);
            }
            return Err(JsonSyntaxError::InvalidLiteral);
        }
        if &window[self.pos..end] != literal {
            return Err(JsonSyntaxError::InvalidLiteral);
        }
        let start = self.pos;
        self.pos = end;
        self.value_done();
        self.commit_token(token, start..end)
    }

    fn handle_exhausted_in_token(&mut self, is_final: bool) -> ScanResult {
        if is_final {
            Err(JsonSyntaxError::UnexpectedEndOfInput)
        } else {
            self.pos = self.consumed;
            Ok(None)
        }
    }

    /// RFC 8259 number grammar: `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
    /// A number only terminates at a non-number byte or at the end of a
    /// final window, so a non-final window exhausting mid-number always
    /// requests a refill.
    fn scan_number(&mut self, window: &[u8], is_final: bool) -> ScanResult {
        #[derive(PartialEq, Clone, Copy)]
        enum Part {
            Sign,
            Zero,
            Int,
            Dot,
            Frac,
            Exp,
            ExpSign,
            ExpInt,
        }

        let start = self.pos;
        let mut i = start;
        let mut part = Part::Sign;
        loop {
            let Some(&b) = window.get(i) else {
                if !is_final {
                    return self.handle_exhausted_in_token(false);
                }
                break;
            };
            part = match (part, b) {
                (Part::Sign, b'-') if i == start => {
                    i += 1;
                    continue;
                }
                (Part::Sign, b'0') => Part::Zero,
                (Part::Sign, b'1'..=b'9') => Part::Int,
                (Part::Int, b'0'..=b'9') => Part::Int,
                (Part::Zero | Part::Int, b'.') => Part::Dot,
                (Part::Dot | Part::Frac, b'0'..=b'9') => Part::Frac,
                (Part::Zero | Part::Int | Part::Frac, b'e' | b'E') => Part::Exp,
                (Part::Exp, b'+' | b'-') => Part::ExpSign,
                (Part::Exp | Part::ExpSign | Part::ExpInt, b'0'..=b'9') => Part::ExpInt,
                (Part::Zero | Part::Int | Part::Frac | Part::ExpInt, _) => break,
                _ => return Err(JsonSyntaxError::InvalidNumber),
            };
            i += 1;
        }
        if !matches!(part, Part::Zero | Part::Int | Part::Frac | Part::ExpInt) {
            return Err(JsonSyntaxError::InvalidNumber);
        }
        self.pos = i;
        self.value_done();
        self.commit_token(TokenType::Number, start..i)
    }

    fn scan_comment(&mut self, window: &[u8], is_final: bool) -> ScanResult {
        let start = self.pos;
        let Some(&kind) = window.get(start + 1) else {
            return self.handle_exhausted_in_token(is_final);
        };
        match kind {
            b'/' => {
                let mut i = start + 2;
                while let Some(&b) = window.get(i) {
                    if b == b'\n' {
                        break;
                    }
                    i += 1;
                }
                if i == window.len() && !is_final {
                    return self.handle_exhausted_in_token(false);
                }
                self.pos = i;
                self.commit_token(TokenType::Comment, start + 2..i)
            }
            b'*' => {
                let mut i = start + 2;
                loop {
                    let Some(&b) = window.get(i) else {
                        return self.handle_exhausted_in_token(is_final);
                    };
                    if b == b'*' && window.get(i + 1) == Some(&b'/') {
                        self.pos = i + 2;
                        return self.commit_token(TokenType::Comment, start + 2..i);
                    }
                    i += 1;
                }
            }
            _ => Err(JsonSyntaxError::InvalidCharacter(b'/')),
        }
    }
}

/// Decodes a raw string payload containing backslash escapes into an owned
/// string. The scanner already validated escape shapes; this resolves them,
/// pairing UTF-16 surrogates from `\u` escapes.
pub(crate) fn unescape(raw: &[u8]) -> Result<String, JsonSyntaxError> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let b = raw[i];
        if b != b'\\' {
            out.push(b);
            i += 1;
            continue;
        }
        let esc = raw[i + 1];
        i += 2;
        let ch = match esc {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => {
                let unit = parse_hex4(&raw[i..i + 4])?;
                i += 4;
                if (0xD800..=0xDBFF).contains(&unit) {
                    // High surrogate: a low surrogate escape must follow.
                    if raw.len() < i + 6 || raw[i] != b'\\' || raw[i + 1] != b'u' {
                        return Err(JsonSyntaxError::InvalidEscape);
                    }
                    let low = parse_hex4(&raw[i + 2..i + 6])?;
                    i += 6;
                    if !(0xDC00..=0xDFFF).contains(&low) {
                        return Err(JsonSyntaxError::InvalidEscape);
                    }
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    char::from_u32(code).ok_or(JsonSyntaxError::InvalidEscape)?
                } else {
                    char::from_u32(unit).ok_or(JsonSyntaxError::InvalidEscape)?
                }
            }
            _ => return Err(JsonSyntaxError::InvalidEscape),
        };
        let mut tmp = [0u8; 4];
        out.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
    }
    String::from_utf8(out).map_err(|_| JsonSyntaxError::InvalidUtf8)
}

fn parse_hex4(digits: &[u8]) -> Result<u32, JsonSyntaxError> {
    let text = core::str::from_utf8(digits).map_err(|_| JsonSyntaxError::InvalidEscape)?;
    u32::from_str_radix(text, 16).map_err(|_| JsonSyntaxError::InvalidEscape)
}
