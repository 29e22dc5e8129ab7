//! Temperature → palette index mapping.
//!
//! Each pixel is clamped to the active visualisation range and rescaled
//! linearly onto 0–255.  The range is either fixed by configuration or taken
//! from each frame's own min/max (auto-ranging).
//!
//! [`ColorQuantization::TruncateToDegree`] truncates the temperature and the
//! range bounds to whole degrees before clamping, matching the shipped
//! firmware's integer mapping.  Sub-degree structure is lost in the image
//! (never in the numeric readout).  [`ColorQuantization::Continuous`] clamps
//! and scales the floating-point value instead.

use serde::{Deserialize, Serialize};

use crate::thermal::{FRAME_WIDTH, FrameStats, PIXEL_COUNT, ThermalFrame};

/// Highest palette index.
const INDEX_MAX: i32 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualizationRange {
    pub min_c: f32,
    pub max_c: f32,
}

impl VisualizationRange {
    pub const fn new(min_c: f32, max_c: f32) -> Self {
        Self { min_c, max_c }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RangeMode {
    /// Same range for every frame.
    Fixed(VisualizationRange),
    /// Range follows each frame's coldest and hottest accepted pixel.
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorQuantization {
    TruncateToDegree,
    Continuous,
}

/// One palette index per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFrame {
    indices: [u8; PIXEL_COUNT],
}

impl Default for IndexFrame {
    fn default() -> Self {
        Self {
            indices: [0; PIXEL_COUNT],
        }
    }
}

impl IndexFrame {
    pub fn indices(&self) -> &[u8; PIXEL_COUNT] {
        &self.indices
    }

    pub fn at(&self, x: usize, y: usize) -> Option<u8> {
        if x >= FRAME_WIDTH {
            return None;
        }
        self.indices.get(y * FRAME_WIDTH + x).copied()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColorMapper {
    mode: RangeMode,
    quantization: ColorQuantization,
}

impl ColorMapper {
    pub fn new(mode: RangeMode, quantization: ColorQuantization) -> Self {
        Self { mode, quantization }
    }

    pub fn mode(&self) -> RangeMode {
        self.mode
    }

    /// Range in effect for a frame with these stats.
    pub fn active_range(&self, stats: &FrameStats) -> VisualizationRange {
        match self.mode {
            RangeMode::Fixed(range) => range,
            RangeMode::Auto => VisualizationRange::new(stats.min_c, stats.max_c),
        }
    }

    /// Palette index for one temperature.
    pub fn index_for(&self, celsius: f32, range: VisualizationRange) -> u8 {
        match self.quantization {
            ColorQuantization::TruncateToDegree => {
                // Float→int casts saturate; widen so the scaling cannot overflow.
                let lo = i64::from(range.min_c as i32);
                let hi = i64::from(range.max_c as i32);
                if hi <= lo {
                    return 0;
                }
                let t = i64::from(celsius as i32).clamp(lo, hi);
                ((t - lo) * i64::from(INDEX_MAX) / (hi - lo)) as u8
            }
            ColorQuantization::Continuous => {
                let span = range.max_c - range.min_c;
                if span <= 0.0 || !span.is_finite() {
                    return 0;
                }
                let t = celsius.clamp(range.min_c, range.max_c);
                ((t - range.min_c) / span * INDEX_MAX as f32) as u8
            }
        }
    }

    /// Map every pixel of `frame` into `out`; returns the range used.
    pub fn map_frame(
        &self,
        frame: &ThermalFrame,
        stats: &FrameStats,
        out: &mut IndexFrame,
    ) -> VisualizationRange {
        let range = self.active_range(stats);
        for (index, &celsius) in out.indices.iter_mut().zip(frame.pixels()) {
            *index = self.index_for(celsius, range);
        }
        range
    }
}
