//! Temperature processing: pixel decoding and hotspot smoothing.

pub mod decoder;
pub mod smoother;

pub use decoder::{DecodedFrame, FrameStats, GlitchFilter, PixelDecoder, ThermalFrame};
pub use smoother::{SmoothingConfig, TemperatureSmoother};

/// Sensor columns.
pub const FRAME_WIDTH: usize = 32;
/// Sensor rows.
pub const FRAME_HEIGHT: usize = 24;
/// Pixels per frame.
pub const PIXEL_COUNT: usize = FRAME_WIDTH * FRAME_HEIGHT;

/// Raw code to °C: the sensor module reports hundredths of a degree.
pub const CODE_SCALE: f32 = 100.0;
