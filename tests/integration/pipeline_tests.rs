//! End-to-end frame path: bytes in, rendered frames and events out.

use thermocam::app::events::AppEvent;
use thermocam::app::service::ThermalPipeline;
use thermocam::config::{Profile, ThermalConfig};
use thermocam::export::parse_csv_line;
use thermocam::render::{RangeMode, VisualizationRange};
use thermocam::stream::{SENSOR_START_COMMAND, STREAM_CAPACITY};
use thermocam::thermal::PIXEL_COUNT;

use crate::mock_hw::{MockLink, MockScreen, RecordingSink, ScreenCall, frame_bytes, uniform_frame};

fn started(config: ThermalConfig) -> (ThermalPipeline, MockLink, MockScreen, RecordingSink) {
    let mut pipeline = ThermalPipeline::new(config, 0).unwrap();
    let mut link = MockLink::new();
    let mut screen = MockScreen::new();
    let mut sink = RecordingSink::new();
    pipeline.start(&mut link, &mut screen, &mut sink, 0);
    (pipeline, link, screen, sink)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn start_shows_splash_and_sends_start_command() {
    let (_, link, screen, sink) = started(ThermalConfig::default());
    assert_eq!(screen.calls, vec![ScreenCall::Splash]);
    assert_eq!(link.commands, vec![SENSOR_START_COMMAND.to_vec()]);
    assert_eq!(sink.events, vec![AppEvent::Started]);
}

#[test]
fn one_frame_renders_with_hud() {
    let (mut p, mut link, mut screen, mut sink) = started(ThermalConfig::default());
    link.inject(&uniform_frame(3650));

    let report = p.poll(&mut link, &mut screen, &mut sink, 10);
    assert_eq!(report.frames, 1);
    assert_eq!(report.bytes, 1544);
    assert_eq!(report.watchdog, None);

    let (displayed, fever, range) = screen.last_render().unwrap();
    assert!(approx(displayed.unwrap(), 36.5));
    assert!(!fever);
    assert_eq!(range, VisualizationRange::new(25.0, 38.0));

    // 36.5 truncates to 36: (36 - 25) * 255 / 13
    let indices = screen.last_indices.as_ref().unwrap();
    assert!(indices.indices().iter().all(|&i| i == 215));

    assert_eq!(p.stats().frames_decoded, 1);
    assert_eq!(p.buffered_len(), 0);
    // Export is off in the screening profile.
    assert!(screen.lines.is_empty());
}

#[test]
fn frame_split_across_polls() {
    let (mut p, mut link, mut screen, mut sink) = started(ThermalConfig::default());
    let frame = uniform_frame(3000);
    let (head, tail) = frame.split_at(700);

    link.inject(head);
    assert_eq!(p.poll(&mut link, &mut screen, &mut sink, 10).frames, 0);
    assert_eq!(p.buffered_len(), 700);

    link.inject(tail);
    assert_eq!(p.poll(&mut link, &mut screen, &mut sink, 20).frames, 1);
    assert_eq!(screen.renders(), 1);
}

#[test]
fn garbage_before_header_is_skipped() {
    let (mut p, mut link, mut screen, mut sink) = started(ThermalConfig::default());
    link.inject(&[0x11; 100]);
    link.inject(&uniform_frame(3300));

    assert_eq!(p.poll(&mut link, &mut screen, &mut sink, 10).frames, 1);
    assert!(approx(p.displayed_temp(), 33.0));
}

#[test]
fn back_to_back_frames_in_one_poll() {
    let (mut p, mut link, mut screen, mut sink) = started(ThermalConfig::default());
    link.inject(&uniform_frame(3000));
    link.inject(&uniform_frame(3000));

    assert_eq!(p.poll(&mut link, &mut screen, &mut sink, 10).frames, 2);
    assert_eq!(screen.renders(), 2);
    let decoded = sink.count(|e| matches!(e, AppEvent::FrameDecoded(_)));
    assert_eq!(decoded, 2);
}

#[test]
fn zero_frame_maps_to_bottom_of_palette() {
    let mut config = ThermalConfig::default();
    config.range = RangeMode::Fixed(VisualizationRange::new(20.0, 40.0));
    let (mut p, mut link, mut screen, mut sink) = started(config);
    link.inject(&uniform_frame(0));

    p.poll(&mut link, &mut screen, &mut sink, 10);
    let indices = screen.last_indices.as_ref().unwrap();
    assert!(indices.indices().iter().all(|&i| i == 0));
    assert!(approx(p.displayed_temp(), 0.0));
}

#[test]
fn glitch_pixel_gets_fallback_and_is_counted() {
    let (mut p, mut link, mut screen, mut sink) = started(ThermalConfig::default());
    // 0x2710 = 10000 → 100.00 °C, just outside the screening window.
    link.inject(&frame_bytes(|i| if i == 0 { 0x2710 } else { 2500 }));

    p.poll(&mut link, &mut screen, &mut sink, 10);

    let summary = sink
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::FrameDecoded(s) => Some(*s),
            _ => None,
        })
        .unwrap();
    assert_eq!(summary.stats.glitches, 1);
    assert_eq!(summary.stats.accepted, (PIXEL_COUNT - 1) as u16);
    // The fallback value does not count towards the hotspot.
    assert!(approx(summary.stats.max_c, 25.0));
    assert_eq!(p.stats().glitch_samples, 1);
}

#[test]
fn hotspot_smoothing_over_frames() {
    let (mut p, mut link, mut screen, mut sink) = started(ThermalConfig::default());

    link.inject(&uniform_frame(3600));
    p.poll(&mut link, &mut screen, &mut sink, 10);
    assert!(approx(p.displayed_temp(), 36.0));

    // Small change: slow gain.
    link.inject(&uniform_frame(3620));
    p.poll(&mut link, &mut screen, &mut sink, 20);
    assert!(approx(p.displayed_temp(), 36.02));

    // Large change: fast gain, and over the fever threshold.
    link.inject(&uniform_frame(4000));
    p.poll(&mut link, &mut screen, &mut sink, 30);
    assert!(approx(p.displayed_temp(), 38.408));
    let (_, fever, _) = screen.last_render().unwrap();
    assert!(fever);
}

#[test]
fn auto_range_profile_exports_csv() {
    let (mut p, mut link, mut screen, mut sink) = started(ThermalConfig::for_profile(Profile::AutoRange));
    link.inject(&frame_bytes(|i| 2000 + i as i16)); // 20.00 .. 27.67 °C

    p.poll(&mut link, &mut screen, &mut sink, 10);
    assert_eq!(screen.lines.len(), 1);
    let line = &screen.lines[0];
    assert!(line.starts_with("20.00,20.01,"));
    assert!(line.ends_with("27.67\r\n"));

    let parsed = parse_csv_line(line).unwrap();
    assert!(approx(parsed.pixels()[100], 21.0));

    let (_, _, range) = screen.last_render().unwrap();
    assert!(approx(range.min_c, 20.0));
    assert!(approx(range.max_c, 27.67));
    let indices = screen.last_indices.as_ref().unwrap();
    assert_eq!(indices.indices()[0], 0);
    assert_eq!(indices.indices()[PIXEL_COUNT - 1], 255);
}

#[test]
fn overflow_resets_buffer_then_recovers() {
    let (mut p, mut link, mut screen, mut sink) = started(ThermalConfig::default());
    link.inject(&vec![0x00; STREAM_CAPACITY + 1]);

    p.poll(&mut link, &mut screen, &mut sink, 10);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::BufferOverflow)), 1);
    assert_eq!(p.stats().buffer_overflows, 1);
    assert_eq!(p.buffered_len(), 0);

    link.inject(&uniform_frame(3100));
    assert_eq!(p.poll(&mut link, &mut screen, &mut sink, 20).frames, 1);
}

#[test]
fn link_faults_are_reported_not_fatal() {
    let mut p = ThermalPipeline::new(ThermalConfig::default(), 0).unwrap();
    let mut link = MockLink::new();
    let mut screen = MockScreen::new();
    let mut sink = RecordingSink::new();

    link.fail_writes = true;
    p.start(&mut link, &mut screen, &mut sink, 0);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::LinkFault(_))), 1);

    link.fail_reads = true;
    let report = p.poll(&mut link, &mut screen, &mut sink, 10);
    assert_eq!(report.bytes, 0);
    assert_eq!(p.stats().link_faults, 2);
}

#[test]
fn all_glitch_frame_keeps_previous_reading() {
    let (mut p, mut link, mut screen, mut sink) = started(ThermalConfig::default());
    link.inject(&uniform_frame(3600));
    p.poll(&mut link, &mut screen, &mut sink, 10);

    // Every sample far outside the screening window.
    link.inject(&uniform_frame(i16::MAX));
    assert_eq!(p.poll(&mut link, &mut screen, &mut sink, 20).frames, 1);

    // The fallback value never reaches the smoothed reading.
    assert!(approx(p.displayed_temp(), 36.0));
    assert_eq!(p.stats().blind_frames, 1);

    let (displayed, fever, _) = screen.last_render().unwrap();
    assert_eq!(displayed, None);
    assert!(!fever);

    let last = sink
        .events
        .iter()
        .rev()
        .find_map(|e| match e {
            AppEvent::FrameDecoded(s) => Some(*s),
            _ => None,
        })
        .unwrap();
    assert_eq!(last.displayed_c, None);
    assert_eq!(last.stats.hotspot(), None);

    // A readable frame picks up from where the reading was.
    link.inject(&uniform_frame(3620));
    p.poll(&mut link, &mut screen, &mut sink, 30);
    assert!(approx(p.displayed_temp(), 36.02));
    assert_eq!(p.stats().blind_frames, 1);
}
