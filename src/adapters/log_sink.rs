//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured pipeline events to the
//! ESP-IDF logger (which goes to UART0 / USB-CDC in production).  Per-frame
//! records go out at `debug` so the console is not flooded at frame rate;
//! every `telemetry_every` frames one summary is logged at `info`.

use log::{debug, info, warn};

use crate::app::events::{AppEvent, FrameSummary};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink {
    telemetry_every: u32,
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new(32)
    }
}

impl LogEventSink {
    pub fn new(telemetry_every: u32) -> Self {
        Self {
            telemetry_every: telemetry_every.max(1),
        }
    }

    fn log_frame(&self, f: &FrameSummary) {
        let Some(displayed_c) = f.displayed_c else {
            warn!("FRAME | #{} | all {} samples rejected", f.sequence, f.stats.glitches);
            return;
        };
        if f.sequence % self.telemetry_every == 0 {
            info!(
                "FRAME | #{} | T={:.1}\u{00b0}C (hot {:.2} / cold {:.2}) | \
                 range={:.1}..{:.1} | glitches={} | fever={}",
                f.sequence,
                displayed_c,
                f.stats.max_c,
                f.stats.min_c,
                f.range.min_c,
                f.range.max_c,
                f.stats.glitches,
                if f.fever { "YES" } else { "no" },
            );
        } else {
            debug!(
                "FRAME | #{} | T={:.1}\u{00b0}C | hot={:.2}",
                f.sequence, displayed_c, f.stats.max_c
            );
        }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | start command sent"),
            AppEvent::FrameDecoded(f) => self.log_frame(f),
            AppEvent::BufferOverflow => debug!("STREAM | overflow, buffer reset"),
            AppEvent::SignalLost => warn!("LINK | no signal"),
            AppEvent::SensorRestartRetry => info!("LINK | still silent, start re-sent"),
            AppEvent::SignalRestored => info!("LINK | signal restored"),
            AppEvent::LinkFault(e) => warn!("LINK | fault: {}", e),
        }
    }
}
