//! Header search over the raw stream buffer.
//!
//! Once enough bytes are buffered, the synchroniser walks the buffer for the
//! first `0x5A 0x5A` pair that is followed by a complete payload.  A header
//! too close to the end of the buffer is skipped rather than accepted, and a
//! buffer with no usable header is left untouched so more bytes can arrive.
//!
//! The earliest usable header always wins.  Frame-aligned data puts the real
//! header at the front, ahead of any coincidental `0x5A 0x5A` inside the
//! temperature codes.

use super::buffer::StreamBuffer;
use super::{FRAME_HEADER, FRAME_PAYLOAD_LEN, HEADER_SKIP, MIN_SCAN_LEN};

/// A complete candidate frame payload borrowed from the stream buffer.
#[derive(Debug, Clone, Copy)]
pub struct RawFrameWindow<'a> {
    header_at: usize,
    payload: &'a [u8; FRAME_PAYLOAD_LEN],
}

impl<'a> RawFrameWindow<'a> {
    /// Buffer offset of the matched header.
    pub fn header_at(&self) -> usize {
        self.header_at
    }

    /// Buffer offset of the first payload byte.
    pub fn payload_start(&self) -> usize {
        self.header_at + HEADER_SKIP
    }

    pub fn payload(&self) -> &'a [u8; FRAME_PAYLOAD_LEN] {
        self.payload
    }

    /// Raw sensor codes, one per pixel, in row-major order.
    pub fn codes(&self) -> impl Iterator<Item = i16> + 'a {
        self.payload
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
    }
}

/// Locates frames inside a [`StreamBuffer`].
#[derive(Debug, Clone, Copy)]
pub struct FrameSynchronizer {
    min_scan_len: usize,
}

impl Default for FrameSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSynchronizer {
    pub const fn new() -> Self {
        Self {
            min_scan_len: MIN_SCAN_LEN,
        }
    }

    /// Whether `len` buffered bytes are enough to start scanning.
    pub fn ready(&self, len: usize) -> bool {
        len >= self.min_scan_len
    }

    /// Scan the buffer for the earliest header with a full payload behind it.
    pub fn scan<'a, const N: usize>(&self, buffer: &'a StreamBuffer<N>) -> Option<RawFrameWindow<'a>> {
        self.locate(buffer.as_slice())
    }

    /// Slice form of [`scan`](Self::scan).
    pub fn locate<'a>(&self, bytes: &'a [u8]) -> Option<RawFrameWindow<'a>> {
        if !self.ready(bytes.len()) {
            return None;
        }

        bytes.windows(2).enumerate().find_map(|(pos, pair)| {
            if pair != FRAME_HEADER {
                return None;
            }
            let start = pos + HEADER_SKIP;
            let payload = bytes.get(start..start + FRAME_PAYLOAD_LEN)?;
            let payload = <&[u8; FRAME_PAYLOAD_LEN]>::try_from(payload).ok()?;
            Some(RawFrameWindow {
                header_at: pos,
                payload,
            })
        })
    }
}
