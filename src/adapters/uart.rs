//! UART adapters — the sensor link and the CSV export channel.
//!
//! [`SensorUart`] implements [`SensorLink`] for the GY-MCU90640 module,
//! [`ExportUart`] implements [`FrameExport`] for the host-side viewer.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: wraps an `esp_idf_hal` [`UartDriver`]; reads never block.
//! On host/test: bytes are injected into a queue and writes are recorded.

#[cfg(not(target_os = "espidf"))]
use std::collections::VecDeque;

#[cfg(target_os = "espidf")]
use esp_idf_hal::{delay::NON_BLOCK, uart::UartDriver};
#[cfg(target_os = "espidf")]
use log::debug;

use crate::app::ports::{FrameExport, SensorLink};
use crate::error::LinkError;

// ───────────────────────────────────────────────────────────────
// SensorUart
// ───────────────────────────────────────────────────────────────

pub struct SensorUart {
    #[cfg(target_os = "espidf")]
    driver: UartDriver<'static>,

    #[cfg(not(target_os = "espidf"))]
    rx: VecDeque<u8>,
    #[cfg(not(target_os = "espidf"))]
    commands: Vec<Vec<u8>>,
}

#[cfg(target_os = "espidf")]
impl SensorUart {
    pub fn new(driver: UartDriver<'static>) -> Self {
        Self { driver }
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for SensorUart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "espidf"))]
impl SensorUart {
    pub fn new() -> Self {
        log::info!("SensorUart(sim): no hardware, bytes are injected");
        Self {
            rx: VecDeque::new(),
            commands: Vec::new(),
        }
    }

    /// Queue bytes as if the sensor had sent them.
    pub fn inject(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Commands written so far, oldest first.
    pub fn commands(&self) -> &[Vec<u8>] {
        &self.commands
    }
}

impl SensorLink for SensorUart {
    #[cfg(target_os = "espidf")]
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        self.driver.read(buf, NON_BLOCK).map_err(|e| {
            debug!("SensorUart: read error {}", e);
            LinkError::ReadFailed
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    #[cfg(target_os = "espidf")]
    fn write_command(&mut self, command: &[u8]) -> Result<(), LinkError> {
        write_all(&mut self.driver, command)
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_command(&mut self, command: &[u8]) -> Result<(), LinkError> {
        self.commands.push(command.to_vec());
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// ExportUart
// ───────────────────────────────────────────────────────────────

pub struct ExportUart {
    #[cfg(target_os = "espidf")]
    driver: UartDriver<'static>,

    #[cfg(not(target_os = "espidf"))]
    lines: Vec<String>,
}

#[cfg(target_os = "espidf")]
impl ExportUart {
    pub fn new(driver: UartDriver<'static>) -> Self {
        Self { driver }
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for ExportUart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "espidf"))]
impl ExportUart {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl FrameExport for ExportUart {
    #[cfg(target_os = "espidf")]
    fn export_line(&mut self, line: &str) -> Result<(), LinkError> {
        write_all(&mut self.driver, line.as_bytes())
    }

    #[cfg(not(target_os = "espidf"))]
    fn export_line(&mut self, line: &str) -> Result<(), LinkError> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}

/// Blocking write; a partial write is reported, not retried.
#[cfg(target_os = "espidf")]
fn write_all(driver: &mut UartDriver<'static>, bytes: &[u8]) -> Result<(), LinkError> {
    let written = driver.write(bytes).map_err(|_| LinkError::WriteFailed)?;
    if written != bytes.len() {
        return Err(LinkError::ShortWrite {
            written,
            expected: bytes.len(),
        });
    }
    Ok(())
}
