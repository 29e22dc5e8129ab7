//! Application core — the frame pipeline, zero I/O.
//!
//! All interaction with the sensor, display, export link, and flash happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable with synthetic byte streams.

pub mod events;
pub mod ports;
pub mod service;
