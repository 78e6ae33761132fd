//! Tests for discovery document assembly and serialization.

use emberlink_homeassistant::config::{AvailabilityConfig, EntityConfig, ExtensionValue};
use emberlink_homeassistant::device::{DeviceConfig, OriginConfig};
use emberlink_homeassistant::discovery::DiscoveryDocument;
use emberlink_homeassistant::topic::TopicSet;

fn serialize<const CHANNELS: usize>(
    config: &EntityConfig<'_>,
    topics: &TopicSet<'_, CHANNELS>,
) -> std::string::String {
    let doc = DiscoveryDocument::new(config, topics);
    let mut buf = [0u8; 2048];
    let len = serde_json_core::to_slice(&doc, &mut buf).unwrap();
    std::str::from_utf8(&buf[..len]).unwrap().to_string()
}

fn topics_for<'a>(
    base: &str,
    states: &'a [&'a str],
    commands: &'a [&'a str],
) -> TopicSet<'a, 16> {
    TopicSet::build("homeassistant", "emberlink", base, states, commands).unwrap()
}

// -----------------------------------------------------------------------------
// Minimal document
// -----------------------------------------------------------------------------

#[test]
fn minimal_document_layout_is_exact() {
    let config = EntityConfig::new("binary_sensor")
        .with_unique_id("my_sensor")
        .with_state_channels(&["state_topic"]);
    let topics = topics_for("binary_sensor/my_sensor", &["state_topic"], &[]);

    let json = serialize(&config, &topics);
    assert_eq!(
        json,
        concat!(
            "{\"unique_id\":\"my_sensor\",",
            "\"json_attributes_topic\":\"emberlink/binary_sensor/my_sensor/attributes\",",
            "\"availability\":{\"topic\":\"emberlink/binary_sensor/my_sensor/availability\"},",
            "\"state_topic\":\"emberlink/binary_sensor/my_sensor/state\"}"
        )
    );
}

#[test]
fn attributes_and_availability_topics_are_always_present() {
    // Even with no availability configuration declared, the document carries
    // a synthesized availability object with the resolved topic.
    let config = EntityConfig::new("sensor")
        .with_name("Bare Sensor")
        .with_state_channels(&["state_topic"]);
    let topics = topics_for("sensor/Bare-Sensor", &["state_topic"], &[]);

    let json = serialize(&config, &topics);
    assert!(json.contains("\"json_attributes_topic\":\"emberlink/sensor/Bare-Sensor/attributes\""));
    assert!(json.contains(
        "\"availability\":{\"topic\":\"emberlink/sensor/Bare-Sensor/availability\"}"
    ));
}

#[test]
fn serialization_is_deterministic() {
    let config = EntityConfig::new("sensor")
        .with_unique_id("meter")
        .with_state_channels(&["state_topic"]);
    let topics = topics_for("sensor/meter", &["state_topic"], &[]);

    assert_eq!(serialize(&config, &topics), serialize(&config, &topics));
}

// -----------------------------------------------------------------------------
// Declared fields
// -----------------------------------------------------------------------------

#[test]
fn declared_availability_payloads_are_merged_with_the_resolved_topic() {
    let config = EntityConfig::new("sensor")
        .with_unique_id("meter")
        .with_availability(AvailabilityConfig::new().with_payloads("up", "down"))
        .with_state_channels(&["state_topic"]);
    let topics = topics_for("sensor/meter", &["state_topic"], &[]);

    let json = serialize(&config, &topics);
    assert!(json.contains(concat!(
        "\"availability\":{\"payload_available\":\"up\",",
        "\"payload_not_available\":\"down\",",
        "\"topic\":\"emberlink/sensor/meter/availability\"}"
    )));
}

#[test]
fn common_fields_serialize_when_declared() {
    let config = EntityConfig::new("sensor")
        .with_unique_id("meter")
        .with_name("Power Meter")
        .with_device_class("power")
        .with_icon("mdi:flash")
        .with_enabled_by_default(true)
        .with_expire_after(120)
        .with_value_template("{{ value_json.power }}")
        .with_qos(1)
        .with_state_channels(&["state_topic"]);
    let topics = topics_for("sensor/meter", &["state_topic"], &[]);

    let json = serialize(&config, &topics);
    assert!(json.contains("\"name\":\"Power Meter\""));
    assert!(json.contains("\"device_class\":\"power\""));
    assert!(json.contains("\"icon\":\"mdi:flash\""));
    assert!(json.contains("\"enabled_by_default\":true"));
    assert!(json.contains("\"expire_after\":120"));
    assert!(json.contains("\"value_template\":\"{{ value_json.power }}\""));
    assert!(json.contains("\"qos\":1"));
    // Undeclared fields stay out entirely.
    assert!(!json.contains("force_update"));
    assert!(!json.contains("entity_category"));
}

#[test]
fn device_and_origin_blocks_serialize() {
    let device = DeviceConfig::new(&["dev-1"])
        .with_name("My Device")
        .with_manufacturer("Acme")
        .with_model("Sensor v1")
        .with_sw_version("1.2.3");
    let origin = OriginConfig::new("emberlink").with_sw_version("0.1.0");
    let config = EntityConfig::new("sensor")
        .with_unique_id("meter")
        .with_device(&device)
        .with_origin(&origin)
        .with_state_channels(&["state_topic"]);
    let topics = topics_for("sensor/My-Device/meter", &["state_topic"], &[]);

    let json = serialize(&config, &topics);
    assert!(json.contains(concat!(
        "\"device\":{\"identifiers\":[\"dev-1\"],\"name\":\"My Device\",",
        "\"manufacturer\":\"Acme\",\"model\":\"Sensor v1\",\"sw_version\":\"1.2.3\"}"
    )));
    assert!(json.contains("\"origin\":{\"name\":\"emberlink\",\"sw_version\":\"0.1.0\"}"));
}

// -----------------------------------------------------------------------------
// Channel keys and extensions
// -----------------------------------------------------------------------------

#[test]
fn every_channel_appears_under_its_declared_name() {
    let states = ["mode_state_topic", "temperature_state_topic"];
    let commands = ["mode_command_topic", "temperature_command_topic"];
    let config = EntityConfig::new("climate")
        .with_unique_id("thermostat")
        .with_state_channels(&states)
        .with_command_channels(&commands);
    let topics = topics_for("climate/thermostat", &states, &commands);

    let json = serialize(&config, &topics);
    assert!(json.contains("\"mode_state_topic\":\"emberlink/climate/thermostat/mode_state\""));
    assert!(json.contains(
        "\"temperature_state_topic\":\"emberlink/climate/thermostat/temperature_state\""
    ));
    assert!(json.contains("\"mode_command_topic\":\"emberlink/climate/thermostat/mode_command\""));
    assert!(json.contains(
        "\"temperature_command_topic\":\"emberlink/climate/thermostat/temperature_command\""
    ));
}

#[test]
fn extensions_are_merged_last() {
    let extensions = [
        ("payload_on", ExtensionValue::Text("UP")),
        ("suggested_display_precision", ExtensionValue::Integer(2)),
        ("optimistic", ExtensionValue::Bool(true)),
    ];
    let config = EntityConfig::new("switch")
        .with_unique_id("relay")
        .with_state_channels(&["state_topic"])
        .with_extensions(&extensions);
    let topics = topics_for("switch/relay", &["state_topic"], &[]);

    let json = serialize(&config, &topics);
    assert!(json.ends_with(
        "\"payload_on\":\"UP\",\"suggested_display_precision\":2,\"optimistic\":true}"
    ));
}
