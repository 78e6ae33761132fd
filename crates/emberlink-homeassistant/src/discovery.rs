//! Discovery document assembly
//!
//! The document is a borrowed view over the entity configuration and its
//! topic set, serialized on demand. Field order is fixed by the serializer,
//! so the payload is byte-deterministic: declared fields, the attribute and
//! availability topics, one key per exposed channel, extensions last.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::config::EntityConfig;
use crate::topic::TopicSet;

/// The availability object of the discovery document: declared payloads plus
/// the resolved topic. Synthesized as a bare `{topic}` when the entity
/// declared no availability configuration.
#[derive(Serialize)]
struct AvailabilityBlock<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    payload_available: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload_not_available: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_template: Option<&'a str>,
    topic: &'a str,
}

/// Borrowed view assembling the retained discovery payload.
///
/// Pure data: building and serializing it has no side effects and may be
/// repeated; the result depends only on the inputs.
pub struct DiscoveryDocument<'d, 'a, const CHANNELS: usize> {
    config: &'d EntityConfig<'a>,
    topics: &'d TopicSet<'a, CHANNELS>,
}

impl<'d, 'a, const CHANNELS: usize> DiscoveryDocument<'d, 'a, CHANNELS> {
    pub fn new(config: &'d EntityConfig<'a>, topics: &'d TopicSet<'a, CHANNELS>) -> Self {
        Self { config, topics }
    }
}

impl<const CHANNELS: usize> Serialize for DiscoveryDocument<'_, '_, CHANNELS> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let config = self.config;
        let mut map = serializer.serialize_map(None)?;

        if let Some(name) = config.name {
            map.serialize_entry("name", name)?;
        }
        if let Some(unique_id) = config.unique_id {
            map.serialize_entry("unique_id", unique_id)?;
        }
        if let Some(object_id) = config.object_id {
            map.serialize_entry("object_id", object_id)?;
        }
        if let Some(device_class) = config.device_class {
            map.serialize_entry("device_class", device_class)?;
        }
        if let Some(entity_category) = config.entity_category {
            map.serialize_entry("entity_category", entity_category)?;
        }
        if let Some(icon) = config.icon {
            map.serialize_entry("icon", icon)?;
        }
        if let Some(enabled_by_default) = config.enabled_by_default {
            map.serialize_entry("enabled_by_default", &enabled_by_default)?;
        }
        if let Some(expire_after) = config.expire_after {
            map.serialize_entry("expire_after", &expire_after)?;
        }
        if let Some(force_update) = config.force_update {
            map.serialize_entry("force_update", &force_update)?;
        }
        if let Some(value_template) = config.value_template {
            map.serialize_entry("value_template", value_template)?;
        }
        if let Some(template) = config.json_attributes_template {
            map.serialize_entry("json_attributes_template", template)?;
        }
        if let Some(qos) = config.qos {
            map.serialize_entry("qos", &qos)?;
        }
        if let Some(device) = config.device {
            map.serialize_entry("device", device)?;
        }
        if let Some(origin) = config.origin {
            map.serialize_entry("origin", origin)?;
        }

        map.serialize_entry("json_attributes_topic", self.topics.attributes_topic())?;

        let declared = config.availability.unwrap_or_default();
        map.serialize_entry(
            "availability",
            &AvailabilityBlock {
                payload_available: declared.payload_available,
                payload_not_available: declared.payload_not_available,
                value_template: declared.value_template,
                topic: self.topics.availability_topic(),
            },
        )?;

        for entry in self.topics.state_entries() {
            map.serialize_entry(entry.name, entry.topic.as_str())?;
        }
        for entry in self.topics.command_entries() {
            map.serialize_entry(entry.name, entry.topic.as_str())?;
        }

        for (key, value) in config.extensions {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}
