//! Fixed-capacity append buffer for unsynchronised sensor bytes.
//!
//! Bytes are only ever appended or dropped all at once.  When the buffer is
//! full the contents are discarded: a stream that went this long without a
//! usable header is misaligned or corrupt, and the next header resynchronises.

use heapless::Vec;

use super::STREAM_CAPACITY;

/// Result of a single [`StreamBuffer::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The byte was stored.
    Stored,
    /// The buffer was full: it has been reset to empty and the byte dropped.
    Overflowed,
}

/// Append-only byte buffer with a compile-time capacity.
pub struct StreamBuffer<const N: usize = STREAM_CAPACITY> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> Default for StreamBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> StreamBuffer<N> {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append one byte, resetting the buffer if it is already full.
    pub fn append(&mut self, byte: u8) -> AppendOutcome {
        match self.bytes.push(byte) {
            Ok(()) => AppendOutcome::Stored,
            Err(_) => {
                self.bytes.clear();
                AppendOutcome::Overflowed
            }
        }
    }

    /// Drop every buffered byte.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}
