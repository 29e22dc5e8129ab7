//! Task Watchdog Timer (TWDT) driver, fed by frame-loop progress.
//!
//! The sensor liveness watchdog ([`crate::liveness`]) only catches silence.
//! A sensor streaming garbage (wrong baud, half-booted module) keeps the
//! link "live" while no frame ever synchronises, and the screen freezes.
//! [`TaskWatchdog::feed`] therefore withholds the TWDT reset once bytes have
//! been arriving for [`FRAME_STALL_MS`] without a decoded frame; the TWDT
//! then reboots the board, which re-initialises the UART and the sensor.
//!
//! The hardware timeout comes from `CONFIG_ESP_TASK_WDT_TIMEOUT_S`; this
//! driver only subscribes the main task.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::{error, info};
#[cfg(target_os = "espidf")]
use log::warn;

use crate::app::service::PollReport;

/// Longest stretch of incoming bytes without a frame before feeding stops.
pub const FRAME_STALL_MS: u64 = 5_000;

/// Tracks whether the frame loop is getting anywhere.
#[derive(Debug, Clone, Copy)]
pub struct FrameProgress {
    stall_ms: u64,
    last_progress_ms: u64,
    starved: bool,
}

impl FrameProgress {
    pub fn new(stall_ms: u64, now_ms: u64) -> Self {
        Self {
            stall_ms,
            last_progress_ms: now_ms,
            starved: false,
        }
    }

    /// Fold in one poll.  Returns `false` once bytes have kept arriving for
    /// longer than the stall window without a single frame.
    ///
    /// A silent link counts as progress: silence is the liveness
    /// watchdog's job, and it keeps retrying the sensor.
    pub fn observe(&mut self, report: &PollReport, now_ms: u64) -> bool {
        if report.frames > 0 || report.bytes == 0 || report.watchdog.is_some() {
            self.last_progress_ms = now_ms;
            self.starved = false;
            return true;
        }
        let stalled = now_ms.saturating_sub(self.last_progress_ms) > self.stall_ms;
        if stalled && !self.starved {
            error!(
                "No frame in {} ms while bytes keep arriving; letting the task watchdog reset",
                self.stall_ms
            );
        }
        self.starved = stalled;
        !stalled
    }

    pub fn is_starved(&self) -> bool {
        self.starved
    }
}

pub struct TaskWatchdog {
    progress: FrameProgress,
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl TaskWatchdog {
    /// Subscribe the calling task to the TWDT.
    pub fn new(now_ms: u64) -> Self {
        let progress = FrameProgress::new(FRAME_STALL_MS, now_ms);

        #[cfg(target_os = "espidf")]
        {
            // SAFETY: called once from main() on the main task.
            let ret = unsafe { esp_task_wdt_add(core::ptr::null_mut()) };
            let subscribed = ret == ESP_OK;
            if subscribed {
                info!(
                    "TaskWatchdog: subscribed ({} s, frame stall {} ms)",
                    CONFIG_ESP_TASK_WDT_TIMEOUT_S, FRAME_STALL_MS
                );
            } else {
                warn!("TaskWatchdog: failed to subscribe ({})", ret);
            }
            Self { progress, subscribed }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            info!("TaskWatchdog(sim): frame stall {} ms", FRAME_STALL_MS);
            Self { progress }
        }
    }

    /// Feed the TWDT if the last poll shows the loop is still useful.
    /// Returns whether it was fed.
    pub fn feed(&mut self, report: &PollReport, now_ms: u64) -> bool {
        let healthy = self.progress.observe(report, now_ms);

        #[cfg(target_os = "espidf")]
        {
            if healthy && self.subscribed {
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }

        healthy
    }

    pub fn progress(&self) -> &FrameProgress {
        &self.progress
    }
}
