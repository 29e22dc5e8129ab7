//! Stored configuration → pipeline behaviour, through the real adapters.

use thermocam::adapters::display::{FrameOutputs, LogDisplay, Screen};
use thermocam::adapters::log_sink::LogEventSink;
use thermocam::adapters::nvs::NvsConfigStore;
use thermocam::adapters::uart::{ExportUart, SensorUart};
use thermocam::app::ports::ConfigPort;
use thermocam::app::service::ThermalPipeline;
use thermocam::config::{Profile, ThermalConfig};
use thermocam::error::ConfigError;
use thermocam::render::RampKind;

use crate::mock_hw::uniform_frame;

#[test]
fn first_boot_falls_back_to_profile() {
    let store = NvsConfigStore::new().unwrap();
    let config = match store.load() {
        Err(ConfigError::NotFound) => ThermalConfig::for_profile(Profile::FeverScreening),
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(config, ThermalConfig::default());
}

#[test]
fn stored_profile_drives_the_simulated_device() {
    let mut store = NvsConfigStore::new().unwrap();
    store.save(&ThermalConfig::for_profile(Profile::AutoRange)).unwrap();
    let config = store.load().unwrap();
    assert_eq!(config.palette, RampKind::Rainbow);

    let mut link = SensorUart::new();
    let mut outputs = FrameOutputs::new(LogDisplay::new(), ExportUart::new());
    let mut sink = LogEventSink::default();
    let mut p = ThermalPipeline::new(config, 0).unwrap();

    p.start(&mut link, &mut outputs, &mut sink, 0);
    assert_eq!(outputs.display.screen(), Screen::Splash);
    assert_eq!(link.commands().len(), 1);

    link.inject(&uniform_frame(2950));
    assert_eq!(p.poll(&mut link, &mut outputs, &mut sink, 5).frames, 1);

    assert_eq!(outputs.display.screen(), Screen::Frame);
    assert_eq!(outputs.display.hud().unwrap().text.as_str(), "29.5");
    assert_eq!(outputs.export.lines().len(), 1);
}

#[test]
fn json_override_is_validated() {
    let mut config = ThermalConfig::default();
    config.fever_threshold_c = 37.5;
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(ThermalConfig::from_json(&json).unwrap(), config);

    config.watchdog_timeout_ms = 10;
    let json = serde_json::to_string(&config).unwrap();
    assert!(matches!(
        ThermalConfig::from_json(&json),
        Err(ConfigError::ValidationFailed(_))
    ));
}
