//! Stock component channel tables
//!
//! Pure data: the logical channel names each stock Home Assistant component
//! exposes. Entities pass these (or any subset) as their capability lists;
//! nothing here carries behavior.

/// Read-only sensor reporting a numeric or textual value.
pub mod sensor {
    pub const KIND: &str = "sensor";
    pub const STATE_CHANNELS: &[&str] = &["state_topic"];
    pub const COMMAND_CHANNELS: &[&str] = &[];
}

/// Two-state sensor (ON/OFF).
pub mod binary_sensor {
    pub const KIND: &str = "binary_sensor";
    pub const STATE_CHANNELS: &[&str] = &["state_topic"];
    pub const COMMAND_CHANNELS: &[&str] = &[];
}

/// Stateful toggle controllable from the hub.
pub mod switch {
    pub const KIND: &str = "switch";
    pub const STATE_CHANNELS: &[&str] = &["state_topic"];
    pub const COMMAND_CHANNELS: &[&str] = &["command_topic"];
}

/// Momentary push button; commands only, no state.
pub mod button {
    pub const KIND: &str = "button";
    pub const STATE_CHANNELS: &[&str] = &[];
    pub const COMMAND_CHANNELS: &[&str] = &["command_topic"];
}

/// Thermostat with the full set of mode, temperature, humidity and swing
/// channels.
pub mod climate {
    pub const KIND: &str = "climate";
    pub const STATE_CHANNELS: &[&str] = &[
        "action_topic",
        "current_humidity_topic",
        "current_temperature_topic",
        "fan_mode_state_topic",
        "mode_state_topic",
        "preset_mode_state_topic",
        "swing_horizontal_mode_state_topic",
        "swing_mode_state_topic",
        "target_humidity_state_topic",
        "temperature_high_state_topic",
        "temperature_low_state_topic",
        "temperature_state_topic",
    ];
    pub const COMMAND_CHANNELS: &[&str] = &[
        "fan_mode_command_topic",
        "mode_command_topic",
        "power_command_topic",
        "preset_mode_command_topic",
        "swing_horizontal_mode_command_topic",
        "swing_mode_command_topic",
        "target_humidity_command_topic",
        "temperature_command_topic",
        "temperature_high_command_topic",
        "temperature_low_command_topic",
    ];
}
