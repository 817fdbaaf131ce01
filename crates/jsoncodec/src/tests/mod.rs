//! In-crate integration tests for the codec subsystem.

mod collections;
mod malformed;

use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    codec::enums::JsonEnum,
    diag::{CodecWarning, DiagnosticsSink},
};

/// An `io::Read` that yields at most `chunk` bytes per call, to exercise
/// buffer refill paths.
pub(crate) struct ChunkedReader<'a> {
    data: &'a [u8],
    pos: usize,
    chunk: usize,
}

impl<'a> ChunkedReader<'a> {
    pub(crate) fn new(data: &'a [u8], chunk: usize) -> Self {
        Self { data, pos: 0, chunk }
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Counts warning events; configurable to decline warning.
pub(crate) struct CountingSink {
    pub(crate) warn: bool,
    pub(crate) events: AtomicUsize,
}

impl CountingSink {
    pub(crate) fn new(warn: bool) -> Self {
        Self {
            warn,
            events: AtomicUsize::new(0),
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.events.load(Ordering::Relaxed)
    }
}

impl DiagnosticsSink for CountingSink {
    fn warns_on_string_enum(&self) -> bool {
        self.warn
    }

    fn report(&self, _warning: CodecWarning<'_>) {
        self.events.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red = 1,
    Green = 2,
    Blue = 3,
}

impl JsonEnum for Color {
    type Repr = i32;

    const NAME: &'static str = "Color";

    fn to_repr(self) -> i32 {
        self as i32
    }

    fn from_repr(repr: i32) -> Option<Self> {
        match repr {
            1 => Some(Self::Red),
            2 => Some(Self::Green),
            3 => Some(Self::Blue),
            _ => None,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Red" => Some(Self::Red),
            "Green" => Some(Self::Green),
            "Blue" => Some(Self::Blue),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Priority {
    Low = 0,
    High = 255,
}

impl JsonEnum for Priority {
    type Repr = u8;

    const NAME: &'static str = "Priority";

    fn to_repr(self) -> u8 {
        self as u8
    }

    fn from_repr(repr: u8) -> Option<Self> {
        match repr {
            0 => Some(Self::Low),
            255 => Some(Self::High),
            _ => None,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Low" => Some(Self::Low),
            "High" => Some(Self::High),
            _ => None,
        }
    }
}
