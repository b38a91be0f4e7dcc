//! Dial sensor tests: number assembly, publish timing, diagnostics.

use fetap_core::config::DialConfig;
use fetap_core::events::EventKind;
use fetap_core::sensor::DialSensor;
use fetap_core::signal::{EdgeObserver, Level, Tickable};

const PULSE_OPEN_US: i64 = 60_000;
const PULSE_PERIOD_US: i64 = 100_000;
const TIMEOUT_US: i64 = 200_000;

fn make_sensor(timeout_ms: u32) -> DialSensor {
    DialSensor::new(DialConfig::new(4, timeout_ms)).unwrap()
}

fn feed_pulses(sensor: &mut DialSensor, start_us: i64, n: u8) -> i64 {
    let mut last_falling = start_us;
    for i in 0..i64::from(n) {
        let t = start_us + i * PULSE_PERIOD_US;
        sensor.on_edge(Level::Low, t);
        sensor.on_edge(Level::High, t + PULSE_OPEN_US);
        last_falling = t;
    }
    last_falling
}

#[test]
fn test_two_digit_number_published_after_idle() {
    let mut sensor = make_sensor(200);

    // Digit 3
    let last = feed_pulses(&mut sensor, 0, 3);
    sensor.tick(last + TIMEOUT_US + 10_000);
    assert_eq!(sensor.digits_in_progress(), "3");
    assert_eq!(sensor.take_number(), None);

    // Digit 1 starts before the publish timeout expires
    let start = last + TIMEOUT_US + 90_000;
    let last = feed_pulses(&mut sensor, start, 1);
    sensor.tick(last + TIMEOUT_US + 10_000);
    assert_eq!(sensor.digits_in_progress(), "31");

    // Idle long enough after the second digit: number goes out
    sensor.tick(last + 3 * TIMEOUT_US);
    let number = sensor.take_number().expect("number should publish");
    assert_eq!(number.as_str(), "31");
    assert_eq!(sensor.digits_in_progress(), "");

    let stats = sensor.stats().snapshot();
    assert_eq!(stats.pulses_counted, 4);
    assert_eq!(stats.digits_decoded, 2);
    assert_eq!(stats.numbers_published, 1);
    assert_eq!(stats.spurious_trains, 0);
}

#[test]
fn test_number_published_once() {
    let mut sensor = make_sensor(200);

    let last = feed_pulses(&mut sensor, 0, 5);
    sensor.tick(last + TIMEOUT_US);
    sensor.tick(last + 3 * TIMEOUT_US);

    assert_eq!(sensor.take_number().unwrap().as_str(), "5");
    assert_eq!(sensor.take_number(), None);

    // Further idle ticks do not re-publish
    sensor.tick(last + 10 * TIMEOUT_US);
    assert_eq!(sensor.take_number(), None);
}

#[test]
fn test_spurious_train_leaves_number_untouched() {
    let mut sensor = make_sensor(200);

    let last = feed_pulses(&mut sensor, 0, 11);
    sensor.tick(last + TIMEOUT_US);

    assert_eq!(sensor.digits_in_progress(), "");
    sensor.tick(last + 5 * TIMEOUT_US);
    assert_eq!(sensor.take_number(), None);

    assert_eq!(sensor.stats().snapshot().spurious_trains, 1);
    assert_eq!(sensor.stats().snapshot().digits_decoded, 0);
}

#[test]
fn test_zero_timeout_publishes_single_digits() {
    let mut sensor = make_sensor(0);

    let last = feed_pulses(&mut sensor, 0, 4);
    sensor.tick(last + PULSE_OPEN_US + 1);

    assert_eq!(sensor.take_number().unwrap().as_str(), "4");
}

#[test]
fn test_bounce_is_counted_and_logged() {
    let mut sensor = make_sensor(200);

    sensor.on_edge(Level::Low, 0);
    sensor.on_edge(Level::Low, 1_000); // bounce

    assert_eq!(sensor.stats().snapshot().edges_bounced, 1);

    let mut saw_bounce = false;
    while let Some(event) = sensor.events().drain() {
        if event.kind == EventKind::EdgeBounced {
            saw_bounce = true;
            assert_eq!(event.timestamp_us, 1_000);
        }
    }
    assert!(saw_bounce);
}

#[test]
fn test_events_cover_full_dial() {
    let mut sensor = make_sensor(200);

    let last = feed_pulses(&mut sensor, 0, 2);
    sensor.tick(last + TIMEOUT_US);
    sensor.tick(last + 3 * TIMEOUT_US);
    sensor.take_number().unwrap();

    let mut pulse_events = 0;
    let mut digit_events = 0;
    let mut publish_events = 0;
    while let Some(event) = sensor.events().drain() {
        match event.kind {
            EventKind::PulseCounted { .. } => pulse_events += 1,
            EventKind::DigitDecoded { .. } => digit_events += 1,
            EventKind::NumberPublished { digits } => {
                publish_events += 1;
                assert_eq!(digits, 1);
            }
            _ => {}
        }
    }
    assert_eq!(pulse_events, 2);
    assert_eq!(digit_events, 1);
    assert_eq!(publish_events, 1);
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    assert!(DialSensor::new(DialConfig::new(200, 200)).is_err());
    assert!(DialSensor::new(DialConfig::new(4, 1_000_001)).is_err());
}
