//! Sensor liveness watchdog.
//!
//! Separate from the ESP-IDF task watchdog: this one watches the *sensor*,
//! not the firmware.  Every received byte refreshes it.  When the UART stays
//! silent for longer than the timeout, the control loop shows the error
//! screen and re-sends the start command.
//!
//! ```text
//!            byte received
//!        ┌────────────────────┐
//!        ▼                    │
//!     ┌──────┐  timeout   ┌───────────┐
//!     │ LIVE │──────────▶│ NO_SIGNAL │──┐ timeout (retry:
//!     └──────┘ SignalLost └───────────┘◀─┘ restart again)
//! ```
//!
//! The timestamp is reset on every firing, so a dead sensor is retried once
//! per timeout rather than on every poll.

/// Default silence allowed before the sensor is considered lost.
pub const DEFAULT_TIMEOUT_MS: u32 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Live,
    NoSignal,
}

/// What the control loop must do after [`LivenessWatchdog::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogAction {
    /// First expiry: LIVE → NO_SIGNAL.  Show the error and restart the sensor.
    SignalLost,
    /// Still silent one timeout later.  Restart the sensor again.
    Retry,
}

pub struct LivenessWatchdog {
    timeout_ms: u64,
    last_byte_ms: u64,
    state: LinkState,
}

impl LivenessWatchdog {
    pub fn new(timeout_ms: u32, now_ms: u64) -> Self {
        Self {
            timeout_ms: u64::from(timeout_ms),
            last_byte_ms: now_ms,
            state: LinkState::Live,
        }
    }

    /// Restart the timeout window without touching the link state
    /// (e.g. right after sending the start command at boot).
    pub fn arm(&mut self, now_ms: u64) {
        self.last_byte_ms = now_ms;
    }

    /// A byte arrived.  Returns `true` if this ended a NO_SIGNAL period.
    pub fn record_byte(&mut self, now_ms: u64) -> bool {
        self.last_byte_ms = now_ms;
        let restored = self.state == LinkState::NoSignal;
        self.state = LinkState::Live;
        restored
    }

    /// Compare the silence so far against the timeout.
    pub fn check(&mut self, now_ms: u64) -> Option<WatchdogAction> {
        if now_ms.saturating_sub(self.last_byte_ms) <= self.timeout_ms {
            return None;
        }
        self.last_byte_ms = now_ms;
        match self.state {
            LinkState::Live => {
                self.state = LinkState::NoSignal;
                Some(WatchdogAction::SignalLost)
            }
            LinkState::NoSignal => Some(WatchdogAction::Retry),
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}
