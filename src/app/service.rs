//! Application service — the hexagonal core.
//!
//! [`ThermalPipeline`] owns every piece of process-lifetime state (stream
//! buffer, smoother, palette, watchdog) and runs the named stages of the
//! frame path.  All I/O flows through port traits passed in at call sites,
//! making the whole pipeline testable with synthetic byte streams.
//!
//! ```text
//!  SensorLink ──▶ ingest ──▶ sync ──▶ decode ──▶ present ──▶ DisplayPort
//!      ▲                                            │       └▶ FrameExport
//!      └──────── start command ◀── liveness ◀── clock
//! ```
//!
//! Everything is single-threaded and poll-driven: [`ThermalPipeline::poll`]
//! drains the bytes already waiting on the link, handles any completed
//! frames, checks the liveness watchdog, and returns.  Nothing blocks.

use log::{debug, info, warn};

use crate::config::ThermalConfig;
use crate::error::{ConfigError, LinkError};
use crate::export::CsvExporter;
use crate::liveness::{LinkState, LivenessWatchdog, WatchdogAction};
use crate::render::{ColorMapper, IndexFrame, Palette};
use crate::stream::{AppendOutcome, FrameSynchronizer, SENSOR_START_COMMAND, StreamBuffer};
use crate::thermal::{DecodedFrame, PixelDecoder, TemperatureSmoother};

use super::events::{AppEvent, FrameSummary};
use super::ports::{DisplayPort, EventSink, FrameExport, RenderView, SensorLink};

/// Bytes pulled from the link per read call.
const READ_CHUNK: usize = 64;

/// Running counters since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub bytes_received: u64,
    pub frames_decoded: u32,
    pub buffer_overflows: u32,
    pub glitch_samples: u64,
    /// Frames in which every sample was a glitch.
    pub blind_frames: u32,
    pub signal_losses: u32,
    pub link_faults: u32,
}

/// Outcome of one [`ThermalPipeline::poll`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollReport {
    pub bytes: usize,
    pub frames: u32,
    pub watchdog: Option<WatchdogAction>,
}

// ───────────────────────────────────────────────────────────────
// ThermalPipeline
// ───────────────────────────────────────────────────────────────

pub struct ThermalPipeline {
    config: ThermalConfig,
    buffer: StreamBuffer,
    sync: FrameSynchronizer,
    decoder: PixelDecoder,
    smoother: TemperatureSmoother,
    mapper: ColorMapper,
    palette: Palette,
    watchdog: LivenessWatchdog,
    exporter: Option<CsvExporter>,
    indices: IndexFrame,
    stats: PipelineStats,
}

impl ThermalPipeline {
    /// Validate `config` and build every stage.
    ///
    /// Does **not** talk to the sensor — call [`start`](Self::start) next.
    pub fn new(config: ThermalConfig, now_ms: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let palette = Palette::from_kind(&config.palette)?;

        Ok(Self {
            buffer: StreamBuffer::new(),
            sync: FrameSynchronizer::new(),
            decoder: PixelDecoder::new(config.glitch),
            smoother: TemperatureSmoother::new(config.smoothing),
            mapper: ColorMapper::new(config.range, config.quantization),
            palette,
            watchdog: LivenessWatchdog::new(config.watchdog_timeout_ms, now_ms),
            exporter: config.csv_export.then(CsvExporter::new),
            indices: IndexFrame::default(),
            stats: PipelineStats::default(),
            config,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Show the splash screen, start the sensor, and arm the watchdog.
    pub fn start(
        &mut self,
        link: &mut impl SensorLink,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
        now_ms: u64,
    ) {
        display.show_splash();
        self.send_start_command(link, sink);
        self.watchdog.arm(now_ms);
        sink.emit(&AppEvent::Started);
        info!(
            "ThermalPipeline started (range={:?}, export={})",
            self.config.range,
            self.exporter.is_some()
        );
    }

    // ── Per-poll orchestration ────────────────────────────────

    /// Drain the link, present every completed frame, then check liveness.
    pub fn poll(
        &mut self,
        link: &mut impl SensorLink,
        out: &mut (impl DisplayPort + FrameExport),
        sink: &mut impl EventSink,
        now_ms: u64,
    ) -> PollReport {
        let mut report = PollReport::default();
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            let n = match link.read_available(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    self.record_link_fault(e, sink);
                    break;
                }
            };
            report.bytes += n;

            for &byte in &chunk[..n] {
                if let Some(decoded) = self.ingest(byte, now_ms, sink) {
                    self.present(&decoded, out, sink);
                    report.frames += 1;
                }
            }
        }

        report.watchdog = self.check_liveness(link, out, sink, now_ms);
        report
    }

    // ── Stages ────────────────────────────────────────────────

    /// Feed one received byte.  Returns a decoded frame when this byte
    /// completed one; the stream buffer is emptied in that case.
    pub fn ingest(&mut self, byte: u8, now_ms: u64, sink: &mut impl EventSink) -> Option<DecodedFrame> {
        self.stats.bytes_received += 1;

        if self.watchdog.record_byte(now_ms) {
            info!("Sensor link restored");
            sink.emit(&AppEvent::SignalRestored);
        }

        if self.buffer.append(byte) == AppendOutcome::Overflowed {
            self.stats.buffer_overflows += 1;
            debug!("Stream buffer overflow, resynchronising");
            sink.emit(&AppEvent::BufferOverflow);
            return None;
        }

        let window = self.sync.scan(&self.buffer)?;
        let decoded = self.decoder.decode(&window);
        // Trailing bytes of the next frame go too; the sensor streams
        // continuously, so the following header arrives shortly.
        self.buffer.clear();

        self.stats.frames_decoded = self.stats.frames_decoded.wrapping_add(1);
        self.stats.glitch_samples += u64::from(decoded.stats.glitches);
        Some(decoded)
    }

    /// Smooth the hotspot, map colours, and hand the frame to the outputs.
    pub fn present(
        &mut self,
        decoded: &DecodedFrame,
        out: &mut (impl DisplayPort + FrameExport),
        sink: &mut impl EventSink,
    ) -> FrameSummary {
        let displayed_c = self.smoother.update(&decoded.stats);
        if displayed_c.is_none() {
            self.stats.blind_frames += 1;
            debug!("Frame #{} has no plausible sample", self.stats.frames_decoded);
        }
        let range = self
            .mapper
            .map_frame(&decoded.frame, &decoded.stats, &mut self.indices);
        let fever = displayed_c.is_some_and(|t| t >= self.config.fever_threshold_c);

        out.render(&RenderView {
            indices: &self.indices,
            palette: &self.palette,
            range,
            displayed_c,
            fever,
        });

        if let Some(exporter) = self.exporter.as_mut() {
            let line = exporter.encode(&decoded.frame);
            if let Err(e) = out.export_line(line) {
                self.record_link_fault(e, sink);
            }
        }

        let summary = FrameSummary {
            sequence: self.stats.frames_decoded,
            stats: decoded.stats,
            displayed_c,
            range,
            fever,
        };
        sink.emit(&AppEvent::FrameDecoded(summary));
        summary
    }

    /// Fire the liveness watchdog if the sensor has been silent too long.
    pub fn check_liveness(
        &mut self,
        link: &mut impl SensorLink,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
        now_ms: u64,
    ) -> Option<WatchdogAction> {
        let action = self.watchdog.check(now_ms)?;
        match action {
            WatchdogAction::SignalLost => {
                self.stats.signal_losses += 1;
                warn!(
                    "No sensor data for {} ms, restarting sensor",
                    self.watchdog.timeout_ms()
                );
                sink.emit(&AppEvent::SignalLost);
            }
            WatchdogAction::Retry => {
                debug!("Sensor still silent, retrying start command");
                sink.emit(&AppEvent::SensorRestartRetry);
            }
        }
        display.show_no_signal();
        self.send_start_command(link, sink);
        Some(action)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Smoothed hotspot, carried over frames that had none.
    pub fn displayed_temp(&self) -> f32 {
        self.smoother.displayed()
    }

    pub fn link_state(&self) -> LinkState {
        self.watchdog.state()
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette indices of the most recent frame.
    pub fn indices(&self) -> &IndexFrame {
        &self.indices
    }

    pub fn config(&self) -> &ThermalConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn send_start_command(&mut self, link: &mut impl SensorLink, sink: &mut impl EventSink) {
        if let Err(e) = link.write_command(&SENSOR_START_COMMAND) {
            self.record_link_fault(e, sink);
        }
    }

    fn record_link_fault(&mut self, error: LinkError, sink: &mut impl EventSink) {
        self.stats.link_faults += 1;
        warn!("Link fault: {}", error);
        sink.emit(&AppEvent::LinkFault(error));
    }
}
