//! Outbound application events.
//!
//! The [`ThermalPipeline`](super::service::ThermalPipeline) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them: log to serial, count, or forward.

use crate::error::LinkError;
use crate::render::VisualizationRange;
use crate::thermal::FrameStats;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// The pipeline sent the start command and is waiting for frames.
    Started,

    /// A frame was synchronised, decoded, and handed to the display.
    FrameDecoded(FrameSummary),

    /// The stream buffer filled without a usable header and was dropped.
    BufferOverflow,

    /// The sensor went silent (LIVE → NO_SIGNAL).
    SignalLost,

    /// Still silent; the start command was sent again.
    SensorRestartRetry,

    /// Bytes are arriving again after a NO_SIGNAL period.
    SignalRestored,

    /// A link operation failed; the loop carries on.
    LinkFault(LinkError),
}

/// Per-frame summary suitable for logging or telemetry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    pub sequence: u32,
    pub stats: FrameStats,
    /// `None` when every sample was a glitch.
    pub displayed_c: Option<f32>,
    pub range: VisualizationRange,
    pub fever: bool,
}
