//! Displayed hotspot temperature with magnitude-dependent smoothing.
//!
//! The raw per-frame hotspot jitters by a few tenths of a degree even when
//! the camera is aimed at a steady target.  The displayed value therefore
//! follows a two-regime exponential moving average:
//!
//! | `|target - shown|`   | gain        | effect                          |
//! |----------------------|-------------|---------------------------------|
//! | `> fast_threshold_c` | `fast_gain` | new subject, settles in ~2 frames |
//! | otherwise            | `slow_gain` | steady target, flicker damped   |
//!
//! The first frame is shown as-is so there is no start-up ramp.

use serde::{Deserialize, Serialize};

use super::decoder::FrameStats;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Added to the hotspot before smoothing.
    pub calibration_offset_c: f32,
    /// Differences strictly above this use the fast gain.
    pub fast_threshold_c: f32,
    pub fast_gain: f32,
    pub slow_gain: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            calibration_offset_c: 0.0,
            fast_threshold_c: 0.5,
            fast_gain: 0.6,
            slow_gain: 0.1,
        }
    }
}

/// Carries the displayed temperature across frames.
#[derive(Debug, Clone)]
pub struct TemperatureSmoother {
    config: SmoothingConfig,
    displayed_c: Option<f32>,
    raw_max_c: f32,
}

impl TemperatureSmoother {
    pub fn new(config: SmoothingConfig) -> Self {
        Self {
            config,
            displayed_c: None,
            raw_max_c: 0.0,
        }
    }

    /// Fold one frame's hotspot into the displayed value and return it.
    ///
    /// A frame with no plausible sample leaves the state untouched and
    /// returns `None`.
    pub fn update(&mut self, stats: &FrameStats) -> Option<f32> {
        stats.hotspot().map(|hotspot_c| self.update_raw(hotspot_c))
    }

    /// [`update`](Self::update) from a bare hotspot value.
    pub fn update_raw(&mut self, hotspot_c: f32) -> f32 {
        let target = hotspot_c + self.config.calibration_offset_c;
        self.raw_max_c = target;

        let shown = match self.displayed_c {
            None => target,
            Some(shown) => {
                let diff = target - shown;
                let gain = if diff.abs() > self.config.fast_threshold_c {
                    self.config.fast_gain
                } else {
                    self.config.slow_gain
                };
                shown + diff * gain
            }
        };
        self.displayed_c = Some(shown);
        shown
    }

    /// Smoothed value, or 0.0 before the first frame.
    pub fn displayed(&self) -> f32 {
        self.displayed_c.unwrap_or(0.0)
    }

    /// Whether at least one frame has been folded in.
    pub fn is_primed(&self) -> bool {
        self.displayed_c.is_some()
    }

    /// Last calibrated hotspot, before smoothing.
    pub fn raw_max(&self) -> f32 {
        self.raw_max_c
    }

    pub fn reset(&mut self) {
        self.displayed_c = None;
        self.raw_max_c = 0.0;
    }
}
