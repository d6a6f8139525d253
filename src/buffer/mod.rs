//! Per-step accumulation of process output

mod ansi;

pub use ansi::strip_ansi;

use crate::pattern::trim_response;
use ansi::AnsiFilter;
use bytes::BytesMut;

/// Default size of a single stdout read.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Growing byte buffer owned by one expect step.
///
/// Each expect step starts with a fresh buffer and drops it once the step
/// resolves; nothing is carried over to the next step.
pub struct OutputBuffer {
    buffer: BytesMut,
    ansi: Option<AnsiFilter>,
}

impl OutputBuffer {
    /// Create an empty buffer, optionally stripping ANSI sequences on append.
    pub fn new(strip_ansi: bool) -> Self {
        Self {
            buffer: BytesMut::with_capacity(DEFAULT_CHUNK_SIZE),
            ansi: strip_ansi.then(AnsiFilter::new),
        }
    }

    /// Append a chunk read from stdout.
    pub fn append(&mut self, data: &[u8]) {
        match &mut self.ansi {
            Some(filter) => {
                let mut clean = Vec::with_capacity(data.len());
                filter.filter_into(data, &mut clean);
                self.buffer.extend_from_slice(&clean);
            }
            None => self.buffer.extend_from_slice(data),
        }
    }

    /// Everything collected so far, lossily decoded and with one trailing
    /// line terminator removed.
    pub fn response(&self) -> String {
        trim_response(&String::from_utf8_lossy(&self.buffer)).to_owned()
    }
}
