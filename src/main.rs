//! ThermoCam Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SensorUart     LogDisplay + ExportUart   LogEventSink         │
//! │  (SensorLink)   (DisplayPort+FrameExport) (EventSink)          │
//! │  NvsConfigStore Esp32Clock                                     │
//! │  (ConfigPort)                                                  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ThermalPipeline (pure logic)                │    │
//! │  │  sync · decode · smooth · colour map · liveness        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use esp_idf_hal::units::Hertz;
use log::{info, warn};

use thermocam::adapters::display::{FrameOutputs, LogDisplay};
use thermocam::adapters::log_sink::LogEventSink;
use thermocam::adapters::nvs::NvsConfigStore;
use thermocam::adapters::time::Esp32Clock;
use thermocam::adapters::uart::{ExportUart, SensorUart};
use thermocam::app::ports::ConfigPort;
use thermocam::app::service::ThermalPipeline;
use thermocam::config::{Profile, ThermalConfig};
use thermocam::drivers::backlight::Backlight;
use thermocam::drivers::watchdog::TaskWatchdog;
use thermocam::error::ConfigError;
use thermocam::pins;

/// Profile used when NVS holds no configuration.
const BOOT_PROFILE: Profile = Profile::FeverScreening;

/// Idle time between polls; yields to the IDLE task so the TWDT is happy.
const POLL_INTERVAL_MS: u32 = 1;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ThermoCam v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let peripherals = Peripherals::take()?;

    // ── 2. Backlight ──────────────────────────────────────────
    // SAFETY: the pin number comes from the board map and is not claimed
    // through `peripherals.pins` anywhere else.
    let backlight_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::BACKLIGHT_GPIO) })?;
    let mut backlight = Backlight::new(backlight_pin);
    backlight.on_or_warn();

    // ── 3. Load config from NVS (or profile defaults) ─────────
    let config = match NvsConfigStore::new().and_then(|nvs| nvs.load()) {
        Ok(cfg) => {
            info!("Config loaded from NVS");
            cfg
        }
        Err(ConfigError::NotFound) => {
            info!("No stored config, using {:?} profile", BOOT_PROFILE);
            ThermalConfig::for_profile(BOOT_PROFILE)
        }
        Err(e) => {
            warn!("NVS config load failed ({}), using {:?} profile", e, BOOT_PROFILE);
            ThermalConfig::for_profile(BOOT_PROFILE)
        }
    };

    // ── 4. UARTs ──────────────────────────────────────────────
    // SAFETY (both): pin numbers come from the board map and are used once.
    let sensor_driver = UartDriver::new(
        peripherals.uart1,
        unsafe { AnyIOPin::new(pins::SENSOR_TX_GPIO) },
        unsafe { AnyIOPin::new(pins::SENSOR_RX_GPIO) },
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::new().baudrate(Hertz(pins::SENSOR_BAUD)),
    )?;
    info!(
        "Sensor on UART{} (rx={}, tx={}, {} baud)",
        pins::SENSOR_UART_NUM,
        pins::SENSOR_RX_GPIO,
        pins::SENSOR_TX_GPIO,
        pins::SENSOR_BAUD
    );

    let export_driver = UartDriver::new(
        peripherals.uart2,
        unsafe { AnyIOPin::new(pins::EXPORT_TX_GPIO) },
        unsafe { AnyIOPin::new(pins::EXPORT_RX_GPIO) },
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::new().baudrate(Hertz(pins::EXPORT_BAUD)),
    )?;
    if config.csv_export {
        info!(
            "CSV export on UART{} ({} baud)",
            pins::EXPORT_UART_NUM,
            pins::EXPORT_BAUD
        );
    }

    // ── 5. Construct adapters + pipeline ──────────────────────
    let mut link = SensorUart::new(sensor_driver);
    let mut outputs = FrameOutputs::new(LogDisplay::new(), ExportUart::new(export_driver));
    let mut log_sink = LogEventSink::default();
    let clock = Esp32Clock::new();
    let mut watchdog = TaskWatchdog::new(clock.uptime_ms());

    let mut pipeline = ThermalPipeline::new(config, clock.uptime_ms())?;
    pipeline.start(&mut link, &mut outputs, &mut log_sink, clock.uptime_ms());

    info!("System ready. Entering frame loop.");

    // ── 6. Frame loop ─────────────────────────────────────────
    loop {
        let now_ms = clock.uptime_ms();
        let report = pipeline.poll(&mut link, &mut outputs, &mut log_sink, now_ms);
        watchdog.feed(&report, now_ms);
        FreeRtos::delay_ms(POLL_INTERVAL_MS);
    }
}
