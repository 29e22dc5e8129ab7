//! Sensor byte stream: buffering and frame synchronisation.
//!
//! The GY-MCU90640 module streams frames continuously once started.  The
//! UART delivers them as an unaligned byte stream, so the firmware buffers
//! raw bytes and scans for the magic header to recover frame boundaries.
//!
//! ```text
//! ┌──────┬──────┬──────────┬────────────────────────────────────┐
//! │ 0x5A │ 0x5A │ meta (2B)│ 768 × LE i16 temperature codes     │
//! └──────┴──────┴──────────┴────────────────────────────────────┘
//!   ◀──── HEADER_SKIP ────▶ ◀────────── FRAME_PAYLOAD_LEN ───────▶
//! ```

pub mod buffer;
pub mod sync;

pub use buffer::{AppendOutcome, StreamBuffer};
pub use sync::{FrameSynchronizer, RawFrameWindow};

use crate::thermal::PIXEL_COUNT;

/// Two-byte magic sequence that opens every frame.
pub const FRAME_HEADER: [u8; 2] = [0x5A, 0x5A];

/// Bytes between the header position and the first temperature code
/// (magic plus two bytes of metadata the core does not interpret).
pub const HEADER_SKIP: usize = 4;

/// Raw payload size: one little-endian `i16` per pixel.
pub const FRAME_PAYLOAD_LEN: usize = PIXEL_COUNT * 2;

/// Buffered length at which header scanning starts.
pub const MIN_SCAN_LEN: usize = 1544;

/// Raw byte storage for one frame plus slack.
pub const STREAM_CAPACITY: usize = 2000;

/// Command that starts continuous frame output on the sensor module.
pub const SENSOR_START_COMMAND: [u8; 3] = [0xA5, 0x45, 0xEA];
