//! Viewport geometry for drawing a frame on the TFT.
//!
//! The 32×24 grid is stretched over the viewport with integer cell edges at
//! `x * width / 32`, so neighbouring cells share an edge and the whole
//! viewport is covered with no gaps even when the size is not a multiple of
//! the grid.

use core::fmt::Write;

use heapless::String;

use crate::thermal::{FRAME_HEIGHT, FRAME_WIDTH};

/// Drawable area of the 1.14" ST7789 panel in landscape.
pub const VIEWPORT: Viewport = Viewport {
    x: 40,
    y: 18,
    width: 240,
    height: 135,
};

/// Half-length of each crosshair arm, in pixels.
pub const CROSSHAIR_ARM: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Offset of the viewport on the panel.
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    /// Viewport-relative rectangle covering grid cell (`col`, `row`).
    pub fn cell(&self, col: usize, row: usize) -> Option<Rect> {
        if col >= FRAME_WIDTH || row >= FRAME_HEIGHT {
            return None;
        }
        let edge = |i: usize, extent: u16, cells: usize| (i * usize::from(extent) / cells) as u16;

        let x0 = edge(col, self.width, FRAME_WIDTH);
        let x1 = edge(col + 1, self.width, FRAME_WIDTH);
        let y0 = edge(row, self.height, FRAME_HEIGHT);
        let y1 = edge(row + 1, self.height, FRAME_HEIGHT);
        Some(Rect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }

    /// Viewport-relative crosshair centre.
    pub fn centre(&self) -> (u16, u16) {
        (self.width / 2, self.height / 2)
    }
}

/// Shown when there is no reading to display.
pub const NO_READING: &str = "--.-";

/// HUD temperature text, one decimal place.
pub fn readout(celsius: Option<f32>) -> String<8> {
    let mut s = String::new();
    // Eight bytes fit "-999.9"; anything wider is not a real reading.
    let written = match celsius {
        Some(c) => write!(s, "{c:.1}").is_ok(),
        None => false,
    };
    if !written {
        s.clear();
        let _ = s.push_str(NO_READING);
    }
    s
}
