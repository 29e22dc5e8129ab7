//! TFT backlight switch.
//!
//! The ST7789 board wires its backlight to a plain GPIO (active HIGH).
//! Generic over [`OutputPin`] so the host tests can use a mock pin.

use embedded_hal::digital::OutputPin;
use log::{info, warn};

pub struct Backlight<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> Backlight<P> {
    /// Takes the pin; the backlight stays in whatever state the pin was left.
    pub fn new(pin: P) -> Self {
        Self { pin, on: false }
    }

    pub fn on(&mut self) -> Result<(), P::Error> {
        self.pin.set_high()?;
        self.on = true;
        info!("Backlight: on");
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), P::Error> {
        self.pin.set_low()?;
        self.on = false;
        Ok(())
    }

    /// Switch on, logging instead of failing.  A dark panel is not fatal.
    pub fn on_or_warn(&mut self) {
        if self.on().is_err() {
            warn!("Backlight: GPIO write failed, panel stays dark");
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
