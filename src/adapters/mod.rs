//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                      |
//! |------------|--------------|----------------------------------|
//! | `display`  | DisplayPort  | RGB565 viewport framebuffer      |
//! | `log_sink` | EventSink    | Serial log output                |
//! | `nvs`      | ConfigPort   | NVS / in-memory store            |
//! | `time`     | —            | ESP32 system timer               |
//! | `uart`     | SensorLink   | GY-MCU90640 over UART1           |
//! |            | FrameExport  | Host viewer over UART2           |

pub mod display;
pub mod log_sink;
pub mod nvs;
pub mod time;
pub mod uart;
