//! Raw payload → calibrated temperature grid.
//!
//! Each pixel is a little-endian `i16` in hundredths of a degree.  Values
//! outside the plausible range are sensor or transmission noise: they are
//! replaced by a fixed fallback and kept out of the hotspot scan, so a single
//! bad sample can neither paint a bright speck nor drag the reading.
//!
//! Decoding never fails.  A frame with masked pixels is still shown; dropping
//! the whole frame would freeze the live image instead.

use serde::{Deserialize, Serialize};

use super::{CODE_SCALE, FRAME_WIDTH, PIXEL_COUNT};
use crate::stream::{FRAME_PAYLOAD_LEN, RawFrameWindow};

/// Plausibility window for decoded samples.
///
/// Both bounds are exclusive: a sample equal to `min_c` or `max_c` counts
/// as a glitch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlitchFilter {
    pub min_c: f32,
    pub max_c: f32,
    /// Value written in place of a rejected sample.
    pub fallback_c: f32,
}

impl GlitchFilter {
    /// Face / body-temperature profile.
    pub const SCREENING: Self = Self {
        min_c: -10.0,
        max_c: 100.0,
        fallback_c: 30.0,
    };

    /// Full sensor range profile.
    pub const WIDE: Self = Self {
        min_c: -40.0,
        max_c: 300.0,
        fallback_c: 25.0,
    };

    pub fn accepts(&self, celsius: f32) -> bool {
        celsius > self.min_c && celsius < self.max_c
    }
}

impl Default for GlitchFilter {
    fn default() -> Self {
        Self::SCREENING
    }
}

/// One decoded 32×24 frame, row-major, in °C.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalFrame {
    pixels: [f32; PIXEL_COUNT],
}

impl ThermalFrame {
    /// Build a frame from already-calibrated values.
    pub fn from_pixels(pixels: [f32; PIXEL_COUNT]) -> Self {
        Self { pixels }
    }

    pub fn pixels(&self) -> &[f32; PIXEL_COUNT] {
        &self.pixels
    }

    /// Temperature at column `x`, row `y`.
    pub fn at(&self, x: usize, y: usize) -> Option<f32> {
        if x >= FRAME_WIDTH {
            return None;
        }
        self.pixels.get(y * FRAME_WIDTH + x).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.pixels.chunks_exact(FRAME_WIDTH)
    }
}

/// Aggregates computed while decoding, over accepted samples only.
///
/// When no sample was accepted both extremes hold the fallback value so
/// auto-ranging still has a (degenerate) span; [`hotspot`](Self::hotspot)
/// is `None` in that case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Hottest accepted temperature.
    pub max_c: f32,
    /// Coldest accepted temperature (drives auto-ranging).
    pub min_c: f32,
    pub accepted: u16,
    pub glitches: u16,
}

impl FrameStats {
    /// Hotspot of the frame, if any sample was plausible.
    pub fn hotspot(&self) -> Option<f32> {
        (self.accepted > 0).then_some(self.max_c)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFrame {
    pub frame: ThermalFrame,
    pub stats: FrameStats,
}

/// Converts raw frame windows into temperature frames.
#[derive(Debug, Clone, Copy)]
pub struct PixelDecoder {
    filter: GlitchFilter,
}

impl PixelDecoder {
    pub fn new(filter: GlitchFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &GlitchFilter {
        &self.filter
    }

    pub fn decode(&self, window: &RawFrameWindow<'_>) -> DecodedFrame {
        self.decode_payload(window.payload())
    }

    pub fn decode_payload(&self, payload: &[u8; FRAME_PAYLOAD_LEN]) -> DecodedFrame {
        let mut pixels = [self.filter.fallback_c; PIXEL_COUNT];
        let mut max_c = f32::NEG_INFINITY;
        let mut min_c = f32::INFINITY;
        let mut accepted: u16 = 0;

        for (pixel, pair) in pixels.iter_mut().zip(payload.chunks_exact(2)) {
            let code = i16::from_le_bytes([pair[0], pair[1]]);
            let celsius = f32::from(code) / CODE_SCALE;
            if self.filter.accepts(celsius) {
                *pixel = celsius;
                max_c = max_c.max(celsius);
                min_c = min_c.min(celsius);
                accepted += 1;
            }
        }

        if accepted == 0 {
            max_c = self.filter.fallback_c;
            min_c = self.filter.fallback_c;
        }

        DecodedFrame {
            frame: ThermalFrame { pixels },
            stats: FrameStats {
                max_c,
                min_c,
                accepted,
                glitches: PIXEL_COUNT as u16 - accepted,
            },
        }
    }
}
