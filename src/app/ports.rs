//! Port traits — the hexagonal boundary between the frame pipeline and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ThermalPipeline (domain)
//! ```
//!
//! Driven adapters (UART, TFT, log, NVS) implement these traits.  The
//! [`ThermalPipeline`](super::service::ThermalPipeline) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::config::ThermalConfig;
use crate::error::{ConfigError, LinkError};
use crate::render::{IndexFrame, Palette, VisualizationRange};

// ───────────────────────────────────────────────────────────────
// Sensor link (driven adapter: UART ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Byte channel to the thermal sensor module.
pub trait SensorLink {
    /// Read whatever bytes are already waiting, up to `buf.len()`.
    /// Returns 0 if nothing is available.  Must not block.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, LinkError>;

    /// Write a command to the sensor.
    fn write_command(&mut self, command: &[u8]) -> Result<(), LinkError>;
}

// ───────────────────────────────────────────────────────────────
// Display (driven adapter: domain → TFT)
// ───────────────────────────────────────────────────────────────

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    /// Palette index per pixel, 32 × 24 row-major.
    pub indices: &'a IndexFrame,
    pub palette: &'a Palette,
    /// Range the indices were mapped from (for a colour-bar legend).
    pub range: VisualizationRange,
    /// Smoothed hotspot for the HUD; `None` when the frame had no
    /// plausible sample.
    pub displayed_c: Option<f32>,
    /// `displayed_c` is at or above the fever threshold.
    pub fever: bool,
}

pub trait DisplayPort {
    /// Boot screen, shown once before the first frame.
    fn show_splash(&mut self);

    /// Draw one frame with its HUD.  Replaces any error screen.
    fn render(&mut self, view: &RenderView<'_>);

    /// Sensor-error screen.
    fn show_no_signal(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Frame export (driven adapter: domain → host UART)
// ───────────────────────────────────────────────────────────────

pub trait FrameExport {
    /// Send one complete, terminated CSV line.
    fn export_line(&mut self, line: &str) -> Result<(), LinkError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists pipeline configuration.
///
/// Implementations MUST validate before persisting; invalid values are
/// rejected with [`ConfigError::ValidationFailed`], not clamped.
pub trait ConfigPort {
    /// Returns [`ConfigError::NotFound`] if nothing has been stored yet.
    fn load(&self) -> Result<ThermalConfig, ConfigError>;

    fn save(&mut self, config: &ThermalConfig) -> Result<(), ConfigError>;
}
