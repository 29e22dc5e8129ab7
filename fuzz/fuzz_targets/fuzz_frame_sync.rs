//! Fuzz target: stream buffer → frame synchronizer → pixel decoder
//!
//! Pushes arbitrary bytes through the same path the pipeline uses and
//! asserts that nothing panics, the buffer stays bounded, and every decoded
//! pixel is either in the glitch window or the fallback value.
//!
//! cargo fuzz run fuzz_frame_sync

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermocam::stream::{FrameSynchronizer, StreamBuffer};
use thermocam::thermal::{GlitchFilter, PixelDecoder};

fuzz_target!(|data: &[u8]| {
    let mut buffer: StreamBuffer = StreamBuffer::new();
    let sync = FrameSynchronizer::new();
    let decoder = PixelDecoder::new(GlitchFilter::WIDE);

    for &byte in data {
        let _ = buffer.append(byte);
        assert!(buffer.len() <= buffer.capacity());

        if let Some(window) = sync.scan(&buffer) {
            let decoded = decoder.decode(&window);
            for &t in decoded.frame.pixels() {
                assert!(GlitchFilter::WIDE.accepts(t) || t == GlitchFilter::WIDE.fallback_c);
            }
            buffer.clear();
        }
    }
});
