//! Display adapter — rasterises frames into an RGB565 viewport buffer.
//!
//! [`LogDisplay`] implements [`DisplayPort`] without a panel driver: it
//! draws exactly what the TFT would show (scaled cells, crosshair, HUD)
//! into an in-memory framebuffer and logs screen changes.  A panel driver
//! can blit [`LogDisplay::framebuffer`] as-is.
//!
//! [`FrameOutputs`] bundles a display with a [`FrameExport`] so both can be
//! handed to the pipeline as one argument.

use heapless::String;
use log::{debug, info, warn};

use crate::app::ports::{DisplayPort, FrameExport, RenderView};
use crate::error::LinkError;
use crate::render::layout::{CROSSHAIR_ARM, VIEWPORT, readout};
use crate::thermal::{FRAME_HEIGHT, FRAME_WIDTH};

pub const BLACK: u16 = 0x0000;
pub const WHITE: u16 = 0xFFFF;
pub const RED: u16 = 0xF800;

const FB_WIDTH: usize = VIEWPORT.width as usize;
const FB_HEIGHT: usize = VIEWPORT.height as usize;

/// What is currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Blank,
    Splash,
    Frame,
    NoSignal,
}

/// Last HUD drawn over a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub text: String<8>,
    pub fever: bool,
}

pub struct LogDisplay {
    framebuffer: Vec<u16>,
    screen: Screen,
    hud: Option<Hud>,
    frames_drawn: u32,
}

impl Default for LogDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl LogDisplay {
    pub fn new() -> Self {
        Self {
            framebuffer: vec![BLACK; FB_WIDTH * FB_HEIGHT],
            screen: Screen::Blank,
            hud: None,
            frames_drawn: 0,
        }
    }

    /// Row-major viewport pixels, `VIEWPORT.width` per row.
    pub fn framebuffer(&self) -> &[u16] {
        &self.framebuffer
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u16> {
        if x >= FB_WIDTH {
            return None;
        }
        self.framebuffer.get(y * FB_WIDTH + x).copied()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn hud(&self) -> Option<&Hud> {
        self.hud.as_ref()
    }

    pub fn frames_drawn(&self) -> u32 {
        self.frames_drawn
    }

    fn fill(&mut self, colour: u16) {
        self.framebuffer.fill(colour);
    }

    fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, colour: u16) {
        let x_end = (x + width).min(FB_WIDTH);
        for row in self.framebuffer.chunks_exact_mut(FB_WIDTH).skip(y).take(height) {
            if let Some(span) = row.get_mut(x..x_end) {
                span.fill(colour);
            }
        }
    }

    fn draw_crosshair(&mut self) {
        let (cx, cy) = VIEWPORT.centre();
        let (cx, cy) = (usize::from(cx), usize::from(cy));
        let arm = usize::from(CROSSHAIR_ARM);
        self.fill_rect(cx.saturating_sub(arm), cy, 2 * arm, 1, WHITE);
        self.fill_rect(cx, cy.saturating_sub(arm), 1, 2 * arm, WHITE);
    }
}

impl DisplayPort for LogDisplay {
    fn show_splash(&mut self) {
        self.fill(BLACK);
        self.hud = None;
        self.screen = Screen::Splash;
        info!("DISPLAY | Init System...");
    }

    fn render(&mut self, view: &RenderView<'_>) {
        for row in 0..FRAME_HEIGHT {
            for col in 0..FRAME_WIDTH {
                let (Some(cell), Some(index)) = (VIEWPORT.cell(col, row), view.indices.at(col, row))
                else {
                    continue;
                };
                let colour = view.palette.rgb565(index);
                self.fill_rect(
                    usize::from(cell.x),
                    usize::from(cell.y),
                    usize::from(cell.width),
                    usize::from(cell.height),
                    colour,
                );
            }
        }
        self.draw_crosshair();

        if self.screen != Screen::Frame {
            info!("DISPLAY | live image");
        }
        let hud = Hud {
            text: readout(view.displayed_c),
            fever: view.fever,
        };
        if view.fever {
            debug!("DISPLAY | TEMP (C): {} FEVER", hud.text);
        } else {
            debug!("DISPLAY | TEMP (C): {}", hud.text);
        }
        self.hud = Some(hud);
        self.screen = Screen::Frame;
        self.frames_drawn = self.frames_drawn.wrapping_add(1);
    }

    fn show_no_signal(&mut self) {
        self.fill(RED);
        self.hud = None;
        self.screen = Screen::NoSignal;
        warn!("DISPLAY | SENSOR ERROR");
    }
}

// ───────────────────────────────────────────────────────────────
// FrameOutputs
// ───────────────────────────────────────────────────────────────

/// A display and an export channel behind one value.
pub struct FrameOutputs<D, E> {
    pub display: D,
    pub export: E,
}

impl<D: DisplayPort, E: FrameExport> FrameOutputs<D, E> {
    pub fn new(display: D, export: E) -> Self {
        Self { display, export }
    }
}

impl<D: DisplayPort, E> DisplayPort for FrameOutputs<D, E> {
    fn show_splash(&mut self) {
        self.display.show_splash();
    }

    fn render(&mut self, view: &RenderView<'_>) {
        self.display.render(view);
    }

    fn show_no_signal(&mut self) {
        self.display.show_no_signal();
    }
}

impl<D, E: FrameExport> FrameExport for FrameOutputs<D, E> {
    fn export_line(&mut self, line: &str) -> Result<(), LinkError> {
        self.export.export_line(line)
    }
}
