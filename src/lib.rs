//! ThermoCam firmware library.
//!
//! Exposes the frame pipeline and its adapters for integration testing and
//! host-side tooling. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod liveness;
pub mod pins;
pub mod render;
pub mod stream;
pub mod thermal;

pub mod adapters;
pub mod drivers;
