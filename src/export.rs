//! CSV frame export for host-side viewers.
//!
//! One line per decoded frame: 768 comma-separated values with two decimals,
//! terminated by CRLF.  The host viewer reshapes the line into a 24×32 matrix
//! and interpolates it far more smoothly than the embedded display can.
//!
//! ```text
//! 25.31,25.40,24.98, … ,31.07\r\n
//! ```

use core::fmt::Write;

use crate::error::ExportError;
use crate::thermal::{PIXEL_COUNT, ThermalFrame};

/// Line terminator, as a serial `println` would emit.
pub const LINE_END: &str = "\r\n";

/// Reusable CSV line encoder.
pub struct CsvExporter {
    line: String,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvExporter {
    pub fn new() -> Self {
        Self {
            // "-40.00," is the widest in-range cell.
            line: String::with_capacity(PIXEL_COUNT * 7 + LINE_END.len()),
        }
    }

    /// Encode `frame`; the returned line is valid until the next call.
    pub fn encode(&mut self, frame: &ThermalFrame) -> &str {
        self.line.clear();
        for (i, celsius) in frame.pixels().iter().enumerate() {
            if i > 0 {
                self.line.push(',');
            }
            // Writing into a String cannot fail.
            let _ = write!(self.line, "{celsius:.2}");
        }
        self.line.push_str(LINE_END);
        &self.line
    }
}

/// Parse one exported line back into a frame.
pub fn parse_csv_line(line: &str) -> Result<ThermalFrame, ExportError> {
    let line = line.trim();
    let count = line.split(',').count();
    if count != PIXEL_COUNT {
        return Err(ExportError::WrongSampleCount(count));
    }

    let mut pixels = [0.0f32; PIXEL_COUNT];
    for (i, (pixel, field)) in pixels.iter_mut().zip(line.split(',')).enumerate() {
        *pixel = field.trim().parse().map_err(|_| ExportError::BadValue(i))?;
    }
    Ok(ThermalFrame::from_pixels(pixels))
}
