//! Sensor liveness: no-signal screen, start-command retries, recovery.

use thermocam::app::events::AppEvent;
use thermocam::app::service::ThermalPipeline;
use thermocam::config::ThermalConfig;
use thermocam::liveness::{LinkState, WatchdogAction};
use thermocam::stream::SENSOR_START_COMMAND;

use crate::mock_hw::{MockLink, MockScreen, RecordingSink, ScreenCall, uniform_frame};

#[test]
fn silence_fires_once_per_timeout_and_recovers() {
    let mut p = ThermalPipeline::new(ThermalConfig::default(), 0).unwrap();
    let mut link = MockLink::new();
    let mut screen = MockScreen::new();
    let mut sink = RecordingSink::new();
    p.start(&mut link, &mut screen, &mut sink, 0);

    assert_eq!(p.poll(&mut link, &mut screen, &mut sink, 3000).watchdog, None);

    let report = p.poll(&mut link, &mut screen, &mut sink, 3001);
    assert_eq!(report.watchdog, Some(WatchdogAction::SignalLost));
    assert_eq!(p.link_state(), LinkState::NoSignal);
    assert_eq!(screen.calls.last(), Some(&ScreenCall::NoSignal));
    assert_eq!(link.commands.len(), 2);
    assert!(link.commands.iter().all(|c| c == &SENSOR_START_COMMAND));

    // Timestamp was reset on firing: quiet until a full timeout passes again.
    assert_eq!(p.poll(&mut link, &mut screen, &mut sink, 4000).watchdog, None);
    let report = p.poll(&mut link, &mut screen, &mut sink, 6002);
    assert_eq!(report.watchdog, Some(WatchdogAction::Retry));
    assert_eq!(link.commands.len(), 3);
    assert_eq!(screen.no_signal_screens(), 2);

    assert_eq!(sink.count(|e| matches!(e, AppEvent::SignalLost)), 1);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SensorRestartRetry)), 1);
    assert_eq!(p.stats().signal_losses, 1);

    link.inject(&uniform_frame(3400));
    let report = p.poll(&mut link, &mut screen, &mut sink, 6100);
    assert_eq!(report.frames, 1);
    assert_eq!(p.link_state(), LinkState::Live);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SignalRestored)), 1);
    assert!(matches!(screen.calls.last(), Some(ScreenCall::Render { .. })));
}

#[test]
fn partial_bytes_keep_link_alive() {
    let mut p = ThermalPipeline::new(ThermalConfig::default(), 0).unwrap();
    let mut link = MockLink::new();
    let mut screen = MockScreen::new();
    let mut sink = RecordingSink::new();
    p.start(&mut link, &mut screen, &mut sink, 0);

    // Bytes with no decodable frame still count as a live sensor.
    for t in (1000..12_000).step_by(1000) {
        link.inject(&[0x00; 10]);
        assert_eq!(p.poll(&mut link, &mut screen, &mut sink, t).watchdog, None);
    }
    assert_eq!(p.link_state(), LinkState::Live);
    assert_eq!(screen.no_signal_screens(), 0);
}

#[test]
fn custom_timeout_is_honoured() {
    let mut config = ThermalConfig::default();
    config.watchdog_timeout_ms = 500;
    let mut p = ThermalPipeline::new(config, 0).unwrap();
    let mut link = MockLink::new();
    let mut screen = MockScreen::new();
    let mut sink = RecordingSink::new();
    p.start(&mut link, &mut screen, &mut sink, 100);

    assert_eq!(p.poll(&mut link, &mut screen, &mut sink, 600).watchdog, None);
    assert_eq!(
        p.poll(&mut link, &mut screen, &mut sink, 601).watchdog,
        Some(WatchdogAction::SignalLost)
    );
}
