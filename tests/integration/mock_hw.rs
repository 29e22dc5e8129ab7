//! Mock adapters for integration tests.
//!
//! Records every link, display, and export call so tests can assert on the
//! full history without a UART or a panel.

use std::collections::VecDeque;

use thermocam::app::events::AppEvent;
use thermocam::app::ports::{DisplayPort, EventSink, FrameExport, RenderView, SensorLink};
use thermocam::error::LinkError;
use thermocam::render::{IndexFrame, VisualizationRange};
use thermocam::stream::{FRAME_HEADER, FRAME_PAYLOAD_LEN};
use thermocam::thermal::PIXEL_COUNT;

// ── Frame builder ─────────────────────────────────────────────

/// One sensor frame as the module sends it: header, two length bytes,
/// 768 little-endian codes, ambient temperature, and checksum.
pub fn frame_bytes(code_at: impl Fn(usize) -> i16) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(4 + FRAME_PAYLOAD_LEN + 4);
    bytes.extend_from_slice(&FRAME_HEADER);
    bytes.extend_from_slice(&[0x02, 0x06]);
    for i in 0..PIXEL_COUNT {
        bytes.extend_from_slice(&code_at(i).to_le_bytes());
    }
    bytes.extend_from_slice(&[0xC4, 0x09, 0x00, 0x00]);
    bytes
}

/// Frame where every pixel reads `code`.
pub fn uniform_frame(code: i16) -> Vec<u8> {
    frame_bytes(|_| code)
}

// ── MockLink ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MockLink {
    rx: VecDeque<u8>,
    pub commands: Vec<Vec<u8>>,
    pub fail_writes: bool,
    pub fail_reads: bool,
}

#[allow(dead_code)]
impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inject(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl SensorLink for MockLink {
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        if self.fail_reads {
            return Err(LinkError::ReadFailed);
        }
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write_command(&mut self, command: &[u8]) -> Result<(), LinkError> {
        if self.fail_writes {
            return Err(LinkError::WriteFailed);
        }
        self.commands.push(command.to_vec());
        Ok(())
    }
}

// ── MockScreen (display + export) ─────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenCall {
    Splash,
    Render {
        displayed_c: Option<f32>,
        fever: bool,
        range: VisualizationRange,
    },
    NoSignal,
}

#[derive(Default)]
pub struct MockScreen {
    pub calls: Vec<ScreenCall>,
    pub last_indices: Option<IndexFrame>,
    pub lines: Vec<String>,
}

#[allow(dead_code)]
impl MockScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renders(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ScreenCall::Render { .. }))
            .count()
    }

    pub fn no_signal_screens(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ScreenCall::NoSignal))
            .count()
    }

    pub fn last_render(&self) -> Option<(Option<f32>, bool, VisualizationRange)> {
        self.calls.iter().rev().find_map(|c| match c {
            ScreenCall::Render {
                displayed_c,
                fever,
                range,
            } => Some((*displayed_c, *fever, *range)),
            _ => None,
        })
    }
}

impl DisplayPort for MockScreen {
    fn show_splash(&mut self) {
        self.calls.push(ScreenCall::Splash);
    }

    fn render(&mut self, view: &RenderView<'_>) {
        self.last_indices = Some(view.indices.clone());
        self.calls.push(ScreenCall::Render {
            displayed_c: view.displayed_c,
            fever: view.fever,
            range: view.range,
        });
    }

    fn show_no_signal(&mut self) {
        self.calls.push(ScreenCall::NoSignal);
    }
}

impl FrameExport for MockScreen {
    fn export_line(&mut self, line: &str) -> Result<(), LinkError> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
