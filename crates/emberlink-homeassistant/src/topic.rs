//! Topic derivation for Home Assistant MQTT discovery
//!
//! Every topic an entity touches is derived here, once, at construction.
//! Both publish and subscribe sides read from the same [`TopicSet`], which is
//! what keeps the discovery document and the live topics consistent.

use core::fmt::Write;
use heapless::{String, Vec};

use crate::error::ConfigError;

/// Topic buffer capacity
pub const TOPIC_CAPACITY: usize = 128;

/// A fully derived topic string
pub type TopicBuf = String<TOPIC_CAPACITY>;

/// Pick the canonical identifier for an entity.
///
/// Precedence is fixed: `unique_id`, then `object_id`, then `name`. The first
/// present value is taken even if a later one is also set; an empty winner is
/// rejected.
pub fn derive_identifier<'a>(
    unique_id: Option<&'a str>,
    object_id: Option<&'a str>,
    name: Option<&'a str>,
) -> Result<&'a str, ConfigError> {
    let identifier = unique_id
        .or(object_id)
        .or(name)
        .ok_or(ConfigError::MissingIdentifier)?;

    if identifier.is_empty() {
        return Err(ConfigError::MissingIdentifier);
    }

    Ok(identifier)
}

/// Replace every character outside `[A-Za-z0-9_-]` with `-`.
///
/// Keeps user-supplied names free of characters that are structurally
/// significant to the broker's topic syntax (`/`, `#`, `+`). Idempotent.
pub fn sanitize<const N: usize>(raw: &str) -> Result<String<N>, ConfigError> {
    let mut out = String::new();
    for ch in raw.chars() {
        let mapped = if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            ch
        } else {
            '-'
        };
        out.push(mapped).map_err(|()| ConfigError::TopicOverflow)?;
    }
    Ok(out)
}

/// Build the shared namespace prefix for one entity.
///
/// Format: `{component}[/{device}]/{identifier}`, with the device name and
/// identifier sanitized. A degenerate identifier (all punctuation collapsing
/// to dashes) is accepted as-is.
pub fn base_topic<const N: usize>(
    component: &str,
    device_name: Option<&str>,
    identifier: &str,
) -> Result<String<N>, ConfigError> {
    let mut topic: String<N> = String::new();
    let overflow = |_| ConfigError::TopicOverflow;

    topic.push_str(component).map_err(overflow)?;
    if let Some(device) = device_name {
        let cleaned: String<N> = sanitize(device)?;
        topic.push('/').map_err(overflow)?;
        topic.push_str(&cleaned).map_err(overflow)?;
    }
    let cleaned: String<N> = sanitize(identifier)?;
    topic.push('/').map_err(overflow)?;
    topic.push_str(&cleaned).map_err(overflow)?;

    Ok(topic)
}

/// One logical channel resolved to its full topic.
#[derive(Debug, Clone)]
pub struct ChannelTopic<'a> {
    /// Logical channel name, e.g. `state_topic` or `temperature_command_topic`
    pub name: &'a str,
    /// Fully qualified topic string
    pub topic: TopicBuf,
}

/// The complete, immutable topic map of one entity.
///
/// `CHANNELS` bounds the state and command channel counts independently; the
/// widest stock component (climate) needs 12 state and 10 command entries.
#[derive(Debug, Clone)]
pub struct TopicSet<'a, const CHANNELS: usize> {
    config: TopicBuf,
    attributes: TopicBuf,
    availability: TopicBuf,
    states: Vec<ChannelTopic<'a>, CHANNELS>,
    commands: Vec<ChannelTopic<'a>, CHANNELS>,
}

impl<'a, const CHANNELS: usize> TopicSet<'a, CHANNELS> {
    /// Derive every topic for an entity under `base`.
    ///
    /// State and command channels land under
    /// `{state_prefix}/{base}/{channel}` with a single trailing `_topic`
    /// suffix stripped from the channel name; the config topic lives under
    /// the discovery prefix instead.
    pub fn build(
        discovery_prefix: &str,
        state_prefix: &str,
        base: &str,
        state_channels: &'a [&'a str],
        command_channels: &'a [&'a str],
    ) -> Result<Self, ConfigError> {
        let mut config = TopicBuf::new();
        write!(config, "{}/{}/config", discovery_prefix, base)
            .map_err(|_| ConfigError::TopicOverflow)?;

        let attributes = fixed_topic(state_prefix, base, "attributes")?;
        let availability = fixed_topic(state_prefix, base, "availability")?;

        let mut states: Vec<ChannelTopic<'a>, CHANNELS> = Vec::new();
        for name in state_channels {
            let entry = ChannelTopic {
                name,
                topic: channel_topic(state_prefix, base, name)?,
            };
            states.push(entry).map_err(|_| ConfigError::TooManyChannels)?;
        }

        let mut commands: Vec<ChannelTopic<'a>, CHANNELS> = Vec::new();
        for name in command_channels {
            let entry = ChannelTopic {
                name,
                topic: channel_topic(state_prefix, base, name)?,
            };
            commands.push(entry).map_err(|_| ConfigError::TooManyChannels)?;
        }

        Ok(Self {
            config,
            attributes,
            availability,
            states,
            commands,
        })
    }

    /// Discovery config topic
    pub fn config_topic(&self) -> &str {
        &self.config
    }

    /// Attributes topic
    pub fn attributes_topic(&self) -> &str {
        &self.attributes
    }

    /// Availability topic
    pub fn availability_topic(&self) -> &str {
        &self.availability
    }

    /// Resolve a state channel name to its topic.
    pub fn state_topic(&self, channel: &str) -> Option<&str> {
        self.states
            .iter()
            .find(|entry| entry.name == channel)
            .map(|entry| entry.topic.as_str())
    }

    /// Resolve a command channel name to its topic.
    pub fn command_topic(&self, channel: &str) -> Option<&str> {
        self.commands
            .iter()
            .find(|entry| entry.name == channel)
            .map(|entry| entry.topic.as_str())
    }

    /// Match an inbound topic against the command entries.
    ///
    /// Linear scan; channel counts are bounded by the component schema.
    pub fn command_channel(&self, topic: &str) -> Option<&'a str> {
        self.commands
            .iter()
            .find(|entry| entry.topic.as_str() == topic)
            .map(|entry| entry.name)
    }

    /// All state channel entries, in declaration order.
    pub fn state_entries(&self) -> &[ChannelTopic<'a>] {
        &self.states
    }

    /// All command channel entries, in declaration order.
    pub fn command_entries(&self) -> &[ChannelTopic<'a>] {
        &self.commands
    }
}

/// Topic for a fixed suffix (`attributes`, `availability`) under the state prefix.
fn fixed_topic(state_prefix: &str, base: &str, suffix: &str) -> Result<TopicBuf, ConfigError> {
    let mut topic = TopicBuf::new();
    write!(topic, "{}/{}/{}", state_prefix, base, suffix).map_err(|_| ConfigError::TopicOverflow)?;
    Ok(topic)
}

/// Topic for a logical channel, with a single trailing `_topic` stripped.
fn channel_topic(state_prefix: &str, base: &str, channel: &str) -> Result<TopicBuf, ConfigError> {
    let segment = channel.strip_suffix("_topic").unwrap_or(channel);
    fixed_topic(state_prefix, base, segment)
}
