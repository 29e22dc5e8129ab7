//! Board drivers: backlight and the firmware task watchdog.

pub mod backlight;
pub mod watchdog;
