//! System configuration parameters
//!
//! All tunable parameters for the ThermoCam pipeline.  Values can be
//! overridden from NVS (persisted `postcard` blob) or a JSON document.
//!
//! Two profiles ship with the firmware:
//!
//! | Profile          | Glitch window | Fallback | Palette | Range        | CSV |
//! |------------------|---------------|----------|---------|--------------|-----|
//! | `FeverScreening` | −10 … 100 °C  | 30.0     | ironbow | fixed 25–38  | off |
//! | `AutoRange`      | −40 … 300 °C  | 25.0     | rainbow | per frame    | on  |

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::liveness::DEFAULT_TIMEOUT_MS;
use crate::render::palette::validate_segments;
use crate::render::{ColorQuantization, RampKind, RangeMode, VisualizationRange};
use crate::thermal::{GlitchFilter, SmoothingConfig};

/// Sensor codes are i16 hundredths: temperatures outside this span never
/// arrive, so no bound may lie beyond it.
const CODE_MIN_C: f32 = i16::MIN as f32 / 100.0;
const CODE_MAX_C: f32 = i16::MAX as f32 / 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    FeverScreening,
    AutoRange,
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalConfig {
    // --- Decoding ---
    pub glitch: GlitchFilter,

    // --- Readout ---
    pub smoothing: SmoothingConfig,
    /// Displayed temperature at or above this raises the fever flag (°C).
    pub fever_threshold_c: f32,

    // --- Visualisation ---
    pub range: RangeMode,
    pub quantization: ColorQuantization,
    pub palette: RampKind,

    // --- Link ---
    /// Sensor silence tolerated before NO_SIGNAL (milliseconds).
    pub watchdog_timeout_ms: u32,
    /// Emit every decoded frame as a CSV line on the export UART.
    pub csv_export: bool,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self::for_profile(Profile::FeverScreening)
    }
}

impl ThermalConfig {
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::FeverScreening => Self {
                glitch: GlitchFilter::SCREENING,
                smoothing: SmoothingConfig::default(),
                // Forehead surface temperature reads ~1 °C below core.
                fever_threshold_c: 37.0,
                // Narrow range for facial contrast.
                range: RangeMode::Fixed(VisualizationRange::new(25.0, 38.0)),
                quantization: ColorQuantization::TruncateToDegree,
                palette: RampKind::Ironbow,
                watchdog_timeout_ms: DEFAULT_TIMEOUT_MS,
                csv_export: false,
            },
            Profile::AutoRange => Self {
                glitch: GlitchFilter::WIDE,
                smoothing: SmoothingConfig::default(),
                fever_threshold_c: 37.0,
                range: RangeMode::Auto,
                quantization: ColorQuantization::TruncateToDegree,
                palette: RampKind::Rainbow,
                watchdog_timeout_ms: DEFAULT_TIMEOUT_MS,
                csv_export: true,
            },
        }
    }

    /// Parse a JSON override document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.glitch;
        if !(g.min_c.is_finite() && g.max_c.is_finite() && g.fallback_c.is_finite()) {
            return Err(ConfigError::ValidationFailed("glitch bounds must be finite"));
        }
        if g.min_c >= g.max_c {
            return Err(ConfigError::ValidationFailed("glitch min_c must be < max_c"));
        }
        if g.min_c < CODE_MIN_C || g.max_c > CODE_MAX_C {
            return Err(ConfigError::ValidationFailed(
                "glitch bounds must lie within -327.68–327.67",
            ));
        }

        let s = &self.smoothing;
        if !(s.fast_gain > 0.0 && s.fast_gain <= 1.0) {
            return Err(ConfigError::ValidationFailed("fast_gain must be in (0, 1]"));
        }
        if !(s.slow_gain > 0.0 && s.slow_gain <= 1.0) {
            return Err(ConfigError::ValidationFailed("slow_gain must be in (0, 1]"));
        }
        if !(s.fast_threshold_c.is_finite() && s.fast_threshold_c >= 0.0) {
            return Err(ConfigError::ValidationFailed(
                "fast_threshold_c must be finite and >= 0",
            ));
        }
        if !s.calibration_offset_c.is_finite() || s.calibration_offset_c.abs() > 20.0 {
            return Err(ConfigError::ValidationFailed(
                "calibration_offset_c must be within ±20",
            ));
        }

        if !self.fever_threshold_c.is_finite() {
            return Err(ConfigError::ValidationFailed("fever_threshold_c must be finite"));
        }

        if let RangeMode::Fixed(r) = self.range {
            if !(r.min_c.is_finite() && r.max_c.is_finite()) || r.min_c >= r.max_c {
                return Err(ConfigError::ValidationFailed(
                    "visualisation min_c must be < max_c",
                ));
            }
            if r.min_c < CODE_MIN_C || r.max_c > CODE_MAX_C {
                return Err(ConfigError::ValidationFailed(
                    "visualisation range must lie within -327.68–327.67",
                ));
            }
        }

        validate_segments(self.palette.segments())?;

        if !(100..=60_000).contains(&self.watchdog_timeout_ms) {
            return Err(ConfigError::ValidationFailed(
                "watchdog_timeout_ms must be 100–60000",
            ));
        }
        Ok(())
    }
}
