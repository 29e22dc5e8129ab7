//! 256-entry colour tables built from piecewise-linear ramps.
//!
//! A ramp is a list of segments.  Each segment covers palette indices from
//! its `start` up to the next segment's `start`, and produces
//! `base + slope * (index - start)` per channel, saturated to 0–255.
//!
//! ```text
//! ironbow   0 ────── 64 ────── 128 ────── 192 ────── 255
//!           black→blue  blue→purple  purple→orange  yellow→white
//!
//! rainbow   0 ──────────────── 128 ──────────────── 255
//!           blue → green             green → red
//! ```

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

/// Number of palette entries (one per colour index).
pub const PALETTE_SIZE: usize = 256;

/// Upper bound on segments per ramp.
pub const MAX_SEGMENTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RampSegment {
    /// First palette index covered by this segment.
    pub start: u8,
    /// Colour at `start`.
    pub base: Rgb,
    /// Per-index change of each channel.
    pub slope: (i16, i16, i16),
}

impl RampSegment {
    pub const fn new(start: u8, base: Rgb, slope: (i16, i16, i16)) -> Self {
        Self { start, base, slope }
    }

    fn colour_at(&self, index: u8) -> Rgb {
        let step = i32::from(index - self.start);
        let channel = |base: u8, slope: i16| -> u8 {
            (i32::from(base) + i32::from(slope) * step).clamp(0, 255) as u8
        };
        (
            channel(self.base.0, self.slope.0),
            channel(self.base.1, self.slope.1),
            channel(self.base.2, self.slope.2),
        )
    }
}

/// Black → blue → purple → orange → yellow/white.
pub const IRONBOW: [RampSegment; 4] = [
    RampSegment::new(0, (0, 0, 0), (0, 0, 4)),
    RampSegment::new(64, (0, 0, 255), (4, 0, 0)),
    RampSegment::new(128, (255, 0, 255), (0, 4, -4)),
    RampSegment::new(192, (255, 255, 0), (0, 0, 4)),
];

/// Blue → green → red.
pub const RAINBOW: [RampSegment; 2] = [
    RampSegment::new(0, (0, 0, 255), (0, 2, -2)),
    RampSegment::new(128, (0, 255, 0), (2, -2, 0)),
];

/// User-defined ramp, as stored in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ramp {
    segments: Vec<RampSegment, MAX_SEGMENTS>,
}

impl Ramp {
    pub fn from_segments(segments: &[RampSegment]) -> Result<Self, ConfigError> {
        let segments = Vec::from_slice(segments)
            .map_err(|()| ConfigError::ValidationFailed("ramp has more than 4 segments"))?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[RampSegment] {
        &self.segments
    }
}

/// Palette selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RampKind {
    Ironbow,
    Rainbow,
    Custom(Ramp),
}

impl RampKind {
    pub fn segments(&self) -> &[RampSegment] {
        match self {
            Self::Ironbow => &IRONBOW,
            Self::Rainbow => &RAINBOW,
            Self::Custom(ramp) => ramp.segments(),
        }
    }
}

/// Check the ramp shape: 2–4 segments, first at index 0, strictly ascending.
pub fn validate_segments(segments: &[RampSegment]) -> Result<(), ConfigError> {
    if !(2..=MAX_SEGMENTS).contains(&segments.len()) {
        return Err(ConfigError::ValidationFailed("ramp needs 2–4 segments"));
    }
    if segments[0].start != 0 {
        return Err(ConfigError::ValidationFailed("first ramp segment must start at 0"));
    }
    if segments.windows(2).any(|w| w[1].start <= w[0].start) {
        return Err(ConfigError::ValidationFailed("ramp segment starts must ascend"));
    }
    Ok(())
}

/// Immutable colour table indexed by [`ColorMapper`](super::ColorMapper) output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colours: [Rgb; PALETTE_SIZE],
}

impl Palette {
    /// Interpolate all 256 entries from `segments`.
    pub fn build(segments: &[RampSegment]) -> Result<Self, ConfigError> {
        validate_segments(segments)?;

        let mut colours = [(0, 0, 0); PALETTE_SIZE];
        let mut current = 0;
        for (index, colour) in (0..=u8::MAX).zip(colours.iter_mut()) {
            while current + 1 < segments.len() && index >= segments[current + 1].start {
                current += 1;
            }
            *colour = segments[current].colour_at(index);
        }
        Ok(Self { colours })
    }

    pub fn from_kind(kind: &RampKind) -> Result<Self, ConfigError> {
        Self::build(kind.segments())
    }

    pub fn rgb(&self, index: u8) -> Rgb {
        self.colours[usize::from(index)]
    }

    /// Entry packed as RGB565 (`RRRRRGGG GGGBBBBB`) for the TFT controller.
    pub fn rgb565(&self, index: u8) -> u16 {
        let (r, g, b) = self.rgb(index);
        ((u16::from(r) & 0xF8) << 8) | ((u16::from(g) & 0xFC) << 3) | (u16::from(b) >> 3)
    }

    pub fn colours(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.colours
    }
}
