//! Tests for identifier derivation, sanitization and topic building.

use emberlink_homeassistant::error::ConfigError;
use emberlink_homeassistant::topic::{self, TopicSet, TOPIC_CAPACITY};
use heapless::String;

type Buf = String<TOPIC_CAPACITY>;

// -----------------------------------------------------------------------------
// Identifier precedence
// -----------------------------------------------------------------------------

#[test]
fn unique_id_wins_over_object_id_and_name() {
    let id = topic::derive_identifier(Some("uid"), Some("oid"), Some("name")).unwrap();
    assert_eq!(id, "uid");
}

#[test]
fn object_id_wins_over_name() {
    let id = topic::derive_identifier(None, Some("oid"), Some("name")).unwrap();
    assert_eq!(id, "oid");
}

#[test]
fn name_is_the_last_resort() {
    let id = topic::derive_identifier(None, None, Some("name")).unwrap();
    assert_eq!(id, "name");
}

#[test]
fn missing_identifier_is_rejected() {
    let err = topic::derive_identifier(None, None, None).unwrap_err();
    assert_eq!(err, ConfigError::MissingIdentifier);
}

#[test]
fn empty_winner_is_rejected_even_with_fallbacks_present() {
    // Precedence is fixed: an empty unique_id is picked first and rejected,
    // it does not fall through to the name.
    let err = topic::derive_identifier(Some(""), None, Some("name")).unwrap_err();
    assert_eq!(err, ConfigError::MissingIdentifier);
}

// -----------------------------------------------------------------------------
// Sanitization
// -----------------------------------------------------------------------------

#[test]
fn sanitize_replaces_separator_and_punctuation() {
    let cleaned: Buf = topic::sanitize("Living Room/Temp").unwrap();
    assert_eq!(cleaned.as_str(), "Living-Room-Temp");

    let cleaned: Buf = topic::sanitize("Sensor#1").unwrap();
    assert_eq!(cleaned.as_str(), "Sensor-1");
}

#[test]
fn sanitize_output_stays_in_the_safe_charset() {
    let cleaned: Buf = topic::sanitize("a+b/c#d e\u{e9}f").unwrap();
    assert!(cleaned
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
}

#[test]
fn sanitize_is_idempotent() {
    let once: Buf = topic::sanitize("My Device/Name#2").unwrap();
    let twice: Buf = topic::sanitize(once.as_str()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn sanitize_accepts_degenerate_all_punctuation_input() {
    let cleaned: Buf = topic::sanitize("///").unwrap();
    assert_eq!(cleaned.as_str(), "---");
}

#[test]
fn sanitize_reports_overflow() {
    let long = "x".repeat(TOPIC_CAPACITY + 1);
    let err = topic::sanitize::<TOPIC_CAPACITY>(&long).unwrap_err();
    assert_eq!(err, ConfigError::TopicOverflow);
}

// -----------------------------------------------------------------------------
// Base topic
// -----------------------------------------------------------------------------

#[test]
fn base_topic_without_device() {
    let base: Buf = topic::base_topic("binary_sensor", None, "my_sensor").unwrap();
    assert_eq!(base.as_str(), "binary_sensor/my_sensor");
}

#[test]
fn base_topic_includes_sanitized_device_name() {
    let base: Buf = topic::base_topic("sensor", Some("Living Room Hub"), "temp#1").unwrap();
    assert_eq!(base.as_str(), "sensor/Living-Room-Hub/temp-1");
}

#[test]
fn distinct_identifiers_never_collide() {
    let a: Buf = topic::base_topic("sensor", Some("hub"), "alpha").unwrap();
    let b: Buf = topic::base_topic("sensor", Some("hub"), "beta").unwrap();
    assert_ne!(a, b);
}

// -----------------------------------------------------------------------------
// Topic set
// -----------------------------------------------------------------------------

#[test]
fn binary_sensor_topic_layout() {
    let topics: TopicSet<'_, 4> = TopicSet::build(
        "homeassistant",
        "emberlink",
        "binary_sensor/my_sensor",
        &["state_topic"],
        &[],
    )
    .unwrap();

    assert_eq!(
        topics.config_topic(),
        "homeassistant/binary_sensor/my_sensor/config"
    );
    assert_eq!(
        topics.state_topic("state_topic"),
        Some("emberlink/binary_sensor/my_sensor/state")
    );
    assert_eq!(
        topics.attributes_topic(),
        "emberlink/binary_sensor/my_sensor/attributes"
    );
    assert_eq!(
        topics.availability_topic(),
        "emberlink/binary_sensor/my_sensor/availability"
    );
}

#[test]
fn trailing_topic_suffix_is_stripped_once() {
    let topics: TopicSet<'_, 4> = TopicSet::build(
        "homeassistant",
        "emberlink",
        "climate/thermostat",
        &["temperature_state_topic"],
        &["temperature_command_topic"],
    )
    .unwrap();

    assert_eq!(
        topics.state_topic("temperature_state_topic"),
        Some("emberlink/climate/thermostat/temperature_state")
    );
    assert_eq!(
        topics.command_topic("temperature_command_topic"),
        Some("emberlink/climate/thermostat/temperature_command")
    );
}

#[test]
fn channel_names_without_suffix_pass_through() {
    let topics: TopicSet<'_, 4> = TopicSet::build(
        "homeassistant",
        "emberlink",
        "sensor/meter",
        &["state"],
        &[],
    )
    .unwrap();

    assert_eq!(
        topics.state_topic("state"),
        Some("emberlink/sensor/meter/state")
    );
}

#[test]
fn command_channel_reverse_lookup() {
    let topics: TopicSet<'_, 4> = TopicSet::build(
        "homeassistant",
        "emberlink",
        "switch/relay",
        &["state_topic"],
        &["command_topic"],
    )
    .unwrap();

    assert_eq!(
        topics.command_channel("emberlink/switch/relay/command"),
        Some("command_topic")
    );
    assert_eq!(topics.command_channel("emberlink/switch/other/command"), None);
    // A state topic never matches the command table.
    assert_eq!(topics.command_channel("emberlink/switch/relay/state"), None);
}

#[test]
fn unknown_channel_resolves_to_none() {
    let topics: TopicSet<'_, 4> = TopicSet::build(
        "homeassistant",
        "emberlink",
        "sensor/meter",
        &["state_topic"],
        &[],
    )
    .unwrap();

    assert_eq!(topics.state_topic("unknown_topic"), None);
}

#[test]
fn channel_capacity_is_enforced() {
    let err = TopicSet::<'_, 1>::build(
        "homeassistant",
        "emberlink",
        "climate/thermostat",
        &["mode_state_topic", "temperature_state_topic"],
        &[],
    )
    .unwrap_err();

    assert_eq!(err, ConfigError::TooManyChannels);
}

#[test]
fn custom_prefixes_are_honored() {
    let topics: TopicSet<'_, 4> = TopicSet::build(
        "discover",
        "acme",
        "sensor/meter",
        &["state_topic"],
        &[],
    )
    .unwrap();

    assert_eq!(topics.config_topic(), "discover/sensor/meter/config");
    assert_eq!(topics.state_topic("state_topic"), Some("acme/sensor/meter/state"));
}
