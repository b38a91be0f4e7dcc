//! Configuration validation tests.

use fetap_core::config::{
    ConfigError, DialConfig, MicrophoneConfig, SpeakerConfig, DEFAULT_DEBOUNCE_MS,
    MAX_DIAL_TIMEOUT_MS,
};

#[test]
fn test_dial_config_accepts_full_range() {
    assert!(DialConfig::new(0, 0).validate().is_ok());
    assert!(DialConfig::new(48, MAX_DIAL_TIMEOUT_MS).validate().is_ok());
}

#[test]
fn test_dial_pin_out_of_range() {
    assert_eq!(
        DialConfig::new(49, 200).validate(),
        Err(ConfigError::InvalidPin { pin: 49 })
    );
}

#[test]
fn test_dial_timeout_out_of_range() {
    assert_eq!(
        DialConfig::new(4, MAX_DIAL_TIMEOUT_MS + 1).validate(),
        Err(ConfigError::TimeoutOutOfRange {
            timeout_ms: MAX_DIAL_TIMEOUT_MS + 1
        })
    );
}

#[test]
fn test_debounce_must_pass_dial_edges() {
    // The contact-closed phase is 40 ms; a window that long eats real edges
    assert_eq!(
        DialConfig::new(4, 200).with_debounce_ms(40).validate(),
        Err(ConfigError::DebounceTooLong { debounce_ms: 40 })
    );
    assert!(DialConfig::new(4, 200).with_debounce_ms(39).validate().is_ok());
}

#[test]
fn test_default_debounce_applies() {
    let config = DialConfig::new(4, 200);
    assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
}

#[test]
fn test_microphone_pins_validated() {
    assert!(MicrophoneConfig::new(5, 6, 7).validate().is_ok());
    assert_eq!(
        MicrophoneConfig::new(5, 99, 7).validate(),
        Err(ConfigError::InvalidPin { pin: 99 })
    );
}

#[test]
fn test_speaker_defaults_are_valid() {
    let config = SpeakerConfig::new(5, 6, 8);
    assert_eq!(config.gain_shift, 4);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_error_messages_name_the_value() {
    let err = DialConfig::new(49, 200).validate().unwrap_err();
    assert!(err.to_string().contains("49"));

    let err = DialConfig::new(4, 2_000_000).validate().unwrap_err();
    assert!(err.to_string().contains("2000000"));
}
