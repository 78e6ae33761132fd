//! Entity and bus configuration
//!
//! Configuration is declared once, then folded by [`ResolvedConfig::resolve`]
//! into a single immutable record holding every default already applied.
//! Operations consult the resolved record only; no fallback logic lives at
//! use sites.

use emberlink_bus::ConnectionOptions;
use serde::{Serialize, Serializer};

use crate::device::{DeviceConfig, OriginConfig};
use crate::router::HandlerPolicy;

/// Default discovery prefix the hub listens under
pub const DEFAULT_DISCOVERY_PREFIX: &str = "homeassistant";
/// Default prefix for state, attribute and availability topics
pub const DEFAULT_STATE_PREFIX: &str = "emberlink";
/// Default payload marking the entity available
pub const PAYLOAD_AVAILABLE: &str = "online";
/// Default payload marking the entity unavailable
pub const PAYLOAD_NOT_AVAILABLE: &str = "offline";

/// Declared availability behavior of an entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityConfig<'a> {
    /// Payload representing the available state
    pub payload_available: Option<&'a str>,
    /// Payload representing the unavailable state
    pub payload_not_available: Option<&'a str>,
    /// Template extracting availability from the payload
    pub value_template: Option<&'a str>,
}

impl<'a> AvailabilityConfig<'a> {
    pub const fn new() -> Self {
        Self {
            payload_available: None,
            payload_not_available: None,
            value_template: None,
        }
    }

    /// Set both availability payloads.
    #[must_use]
    pub const fn with_payloads(mut self, available: &'a str, not_available: &'a str) -> Self {
        self.payload_available = Some(available);
        self.payload_not_available = Some(not_available);
        self
    }

    /// Set the value template.
    #[must_use]
    pub const fn with_value_template(mut self, template: &'a str) -> Self {
        self.value_template = Some(template);
        self
    }
}

/// A free-form value carried through into the discovery document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtensionValue<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Serialize for ExtensionValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            ExtensionValue::Text(v) => serializer.serialize_str(v),
            ExtensionValue::Integer(v) => serializer.serialize_i64(v),
            ExtensionValue::Float(v) => serializer.serialize_f64(v),
            ExtensionValue::Bool(v) => serializer.serialize_bool(v),
        }
    }
}

/// Declared configuration of one entity.
///
/// Identity (`unique_id`/`object_id`/`name`), the declared discovery fields,
/// the channel capability lists, and the pass-through extension map. The
/// typed fields cover the common schema; anything component-specific goes in
/// `extensions` and is merged last into the discovery document.
#[derive(Debug, Clone)]
pub struct EntityConfig<'a> {
    /// Component kind, e.g. `sensor`, `switch`, `climate`
    pub component: &'a str,
    /// Globally unique entity id; highest-precedence identifier
    pub unique_id: Option<&'a str>,
    /// Id used instead of the name for entity_id generation
    pub object_id: Option<&'a str>,
    /// Human-readable name; lowest-precedence identifier
    pub name: Option<&'a str>,
    /// Parent device
    pub device: Option<&'a DeviceConfig<'a>>,
    /// Announcing application
    pub origin: Option<&'a OriginConfig<'a>>,
    /// Availability behavior; a bare availability object is synthesized when absent
    pub availability: Option<AvailabilityConfig<'a>>,
    /// Device class refining the component kind
    pub device_class: Option<&'a str>,
    /// `config`, `diagnostic` or `system`
    pub entity_category: Option<&'a str>,
    /// Frontend icon (`mdi:` name)
    pub icon: Option<&'a str>,
    /// Whether the entity starts enabled
    pub enabled_by_default: Option<bool>,
    /// Seconds after which the state expires
    pub expire_after: Option<u32>,
    /// Whether every received payload counts as an update
    pub force_update: Option<bool>,
    /// Template extracting the value from state payloads
    pub value_template: Option<&'a str>,
    /// Template extracting the attribute dictionary
    pub json_attributes_template: Option<&'a str>,
    /// Maximum QoS advertised to the hub
    pub qos: Option<u8>,
    /// Logical state channels this entity publishes on
    pub state_channels: &'a [&'a str],
    /// Logical command channels this entity listens on
    pub command_channels: &'a [&'a str],
    /// Pass-through fields merged last into the discovery document
    pub extensions: &'a [(&'a str, ExtensionValue<'a>)],
}

impl<'a> EntityConfig<'a> {
    /// Create a configuration for the given component kind.
    pub const fn new(component: &'a str) -> Self {
        Self {
            component,
            unique_id: None,
            object_id: None,
            name: None,
            device: None,
            origin: None,
            availability: None,
            device_class: None,
            entity_category: None,
            icon: None,
            enabled_by_default: None,
            expire_after: None,
            force_update: None,
            value_template: None,
            json_attributes_template: None,
            qos: None,
            state_channels: &[],
            command_channels: &[],
            extensions: &[],
        }
    }

    /// Set the unique id.
    #[must_use]
    pub const fn with_unique_id(mut self, unique_id: &'a str) -> Self {
        self.unique_id = Some(unique_id);
        self
    }

    /// Set the object id.
    #[must_use]
    pub const fn with_object_id(mut self, object_id: &'a str) -> Self {
        self.object_id = Some(object_id);
        self
    }

    /// Set the name.
    #[must_use]
    pub const fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    /// Set the parent device.
    #[must_use]
    pub const fn with_device(mut self, device: &'a DeviceConfig<'a>) -> Self {
        self.device = Some(device);
        self
    }

    /// Set the origin block.
    #[must_use]
    pub const fn with_origin(mut self, origin: &'a OriginConfig<'a>) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Set the availability behavior.
    #[must_use]
    pub const fn with_availability(mut self, availability: AvailabilityConfig<'a>) -> Self {
        self.availability = Some(availability);
        self
    }

    /// Set the device class.
    #[must_use]
    pub const fn with_device_class(mut self, device_class: &'a str) -> Self {
        self.device_class = Some(device_class);
        self
    }

    /// Set the entity category.
    #[must_use]
    pub const fn with_entity_category(mut self, category: &'a str) -> Self {
        self.entity_category = Some(category);
        self
    }

    /// Set the icon.
    #[must_use]
    pub const fn with_icon(mut self, icon: &'a str) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set whether the entity starts enabled.
    #[must_use]
    pub const fn with_enabled_by_default(mut self, enabled: bool) -> Self {
        self.enabled_by_default = Some(enabled);
        self
    }

    /// Set the state expiry.
    #[must_use]
    pub const fn with_expire_after(mut self, seconds: u32) -> Self {
        self.expire_after = Some(seconds);
        self
    }

    /// Set force-update behavior.
    #[must_use]
    pub const fn with_force_update(mut self, force_update: bool) -> Self {
        self.force_update = Some(force_update);
        self
    }

    /// Set the state value template.
    #[must_use]
    pub const fn with_value_template(mut self, template: &'a str) -> Self {
        self.value_template = Some(template);
        self
    }

    /// Set the attribute dictionary template.
    #[must_use]
    pub const fn with_json_attributes_template(mut self, template: &'a str) -> Self {
        self.json_attributes_template = Some(template);
        self
    }

    /// Set the advertised QoS.
    #[must_use]
    pub const fn with_qos(mut self, qos: u8) -> Self {
        self.qos = Some(qos);
        self
    }

    /// Set the state channels.
    #[must_use]
    pub const fn with_state_channels(mut self, channels: &'a [&'a str]) -> Self {
        self.state_channels = channels;
        self
    }

    /// Set the command channels.
    #[must_use]
    pub const fn with_command_channels(mut self, channels: &'a [&'a str]) -> Self {
        self.command_channels = channels;
        self
    }

    /// Set the pass-through extension map.
    #[must_use]
    pub const fn with_extensions(mut self, extensions: &'a [(&'a str, ExtensionValue<'a>)]) -> Self {
        self.extensions = extensions;
        self
    }
}

/// Bus-level settings shared by every entity built against them.
#[derive(Debug, Clone, Copy)]
pub struct BusSettings<'a> {
    /// Connect-time transport parameters
    pub connection: ConnectionOptions<'a>,
    /// Discovery prefix override
    pub discovery_prefix: Option<&'a str>,
    /// State prefix override
    pub state_prefix: Option<&'a str>,
}

impl<'a> BusSettings<'a> {
    pub const fn new(connection: ConnectionOptions<'a>) -> Self {
        Self {
            connection,
            discovery_prefix: None,
            state_prefix: None,
        }
    }

    /// Override the discovery prefix.
    #[must_use]
    pub const fn with_discovery_prefix(mut self, prefix: &'a str) -> Self {
        self.discovery_prefix = Some(prefix);
        self
    }

    /// Override the state prefix.
    #[must_use]
    pub const fn with_state_prefix(mut self, prefix: &'a str) -> Self {
        self.state_prefix = Some(prefix);
        self
    }
}

/// Per-entity settings: the bus plus behavior toggles.
#[derive(Debug, Clone, Copy)]
pub struct EntitySettings<'a> {
    /// Bus settings
    pub bus: BusSettings<'a>,
    /// Manage availability manually instead of via last will plus
    /// `write_config`'s automatic online announcement
    pub manual_availability: bool,
    /// What to do when the command handler fails
    pub handler_policy: HandlerPolicy,
}

impl<'a> EntitySettings<'a> {
    pub const fn new(bus: BusSettings<'a>) -> Self {
        Self {
            bus,
            manual_availability: false,
            handler_policy: HandlerPolicy::Propagate,
        }
    }

    /// Take over availability publishing manually.
    #[must_use]
    pub const fn with_manual_availability(mut self, manual: bool) -> Self {
        self.manual_availability = manual;
        self
    }

    /// Set the command-handler failure policy.
    #[must_use]
    pub const fn with_handler_policy(mut self, policy: HandlerPolicy) -> Self {
        self.handler_policy = policy;
        self
    }
}

/// Every scattered default resolved once, at construction.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedConfig<'a> {
    /// Prefix the discovery document is published under
    pub discovery_prefix: &'a str,
    /// Prefix for state, attribute and availability topics
    pub state_prefix: &'a str,
    /// Payload published when the entity is available
    pub payload_available: &'a str,
    /// Payload published when the entity is unavailable
    pub payload_not_available: &'a str,
    /// Whether the application manages availability itself
    pub manual_availability: bool,
    /// Command-handler failure policy
    pub handler_policy: HandlerPolicy,
}

impl<'a> ResolvedConfig<'a> {
    /// Fold settings and declared configuration into one record.
    pub fn resolve(settings: &EntitySettings<'a>, config: &EntityConfig<'a>) -> Self {
        let availability = config.availability;
        Self {
            discovery_prefix: settings
                .bus
                .discovery_prefix
                .unwrap_or(DEFAULT_DISCOVERY_PREFIX),
            state_prefix: settings.bus.state_prefix.unwrap_or(DEFAULT_STATE_PREFIX),
            payload_available: availability
                .and_then(|a| a.payload_available)
                .unwrap_or(PAYLOAD_AVAILABLE),
            payload_not_available: availability
                .and_then(|a| a.payload_not_available)
                .unwrap_or(PAYLOAD_NOT_AVAILABLE),
            manual_availability: settings.manual_availability,
            handler_policy: settings.handler_policy,
        }
    }
}
