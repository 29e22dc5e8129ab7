//! GPIO / UART assignments for the ThermoCam board
//! (ESP32 + 1.14" ST7789 TFT + GY-MCU90640 thermal module).
//!
//! Single source of truth: `main` references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Thermal sensor module (GY-MCU90640, UART 8N1)
// ---------------------------------------------------------------------------

/// UART peripheral wired to the sensor module.
pub const SENSOR_UART_NUM: u8 = 1;
/// ESP32 RX, connected to the module's TX.
pub const SENSOR_RX_GPIO: i32 = 21;
/// ESP32 TX, connected to the module's RX.
pub const SENSOR_TX_GPIO: i32 = 22;
/// Fixed by the module firmware.
pub const SENSOR_BAUD: u32 = 115_200;

// ---------------------------------------------------------------------------
// CSV frame export (host viewer)
// ---------------------------------------------------------------------------

/// UART0 carries the log console, so frames go out on UART2.
pub const EXPORT_UART_NUM: u8 = 2;
pub const EXPORT_TX_GPIO: i32 = 17;
pub const EXPORT_RX_GPIO: i32 = 16;
/// One CSV line is ~4.6 KB; at 921600 baud that is ~50 ms per frame.
pub const EXPORT_BAUD: u32 = 921_600;

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// TFT backlight enable (active HIGH).
pub const BACKLIGHT_GPIO: i32 = 4;
