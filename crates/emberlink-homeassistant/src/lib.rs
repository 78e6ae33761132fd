//! Home Assistant MQTT discovery for programs exposing virtual entities
//!
//! This crate derives every topic an entity needs, assembles and publishes
//! the retained discovery document, pushes state/attribute/availability
//! updates, and dispatches inbound commands back to registered handlers.
//! It is structured in three layers:
//!
//! - **Topic & discovery engine** (`topic`, `discovery`): deterministic topic
//!   derivation from entity identity, plus the retained discovery payload
//! - **Publisher** (`entity`, `state`): retained state, attribute and
//!   availability publication over an injected [`emberlink_bus`] connection
//! - **Command router** (`router`, `command`): QoS 1 command subscriptions
//!   driven by the transport's connected event, exact-topic dispatch to a
//!   registered handler
//!
//! # Example
//!
//! ```ignore
//! use emberlink_bus::{ConnectionOptions, LogConnection};
//! use emberlink_homeassistant::{
//!     component, BusSettings, Entity, EntityConfig, EntityRegistration, EntitySettings,
//!     StateValue,
//! };
//!
//! const CONFIG: EntityConfig = EntityConfig::new(component::binary_sensor::KIND)
//!     .with_unique_id("hallway_motion")
//!     .with_device_class("motion")
//!     .with_state_channels(component::binary_sensor::STATE_CHANNELS);
//!
//! let settings = EntitySettings::new(BusSettings::new(ConnectionOptions::new(
//!     "emberlink", "broker.local", 1883,
//! )));
//! let registration = EntityRegistration { config: CONFIG, on_state_change: None, on_command: None };
//! let mut sensor: Entity<_, 4, 1024> = Entity::new(settings, registration, LogConnection)?;
//!
//! sensor.write_config().await?;
//! sensor.set_state("state_topic", StateValue::Text("ON")).await?;
//! ```

#![no_std]

pub mod command;
pub mod component;
pub mod config;
pub mod device;
pub mod discovery;
pub mod entity;
pub mod error;
pub mod router;
pub mod state;
pub mod topic;

pub use command::{CommandPayload, JsonScalar};
pub use config::{
    AvailabilityConfig, BusSettings, EntityConfig, EntitySettings, ExtensionValue, ResolvedConfig,
    DEFAULT_DISCOVERY_PREFIX, DEFAULT_STATE_PREFIX, PAYLOAD_AVAILABLE, PAYLOAD_NOT_AVAILABLE,
};
pub use device::{DeviceConfig, OriginConfig};
pub use discovery::DiscoveryDocument;
pub use entity::{Entity, EntityRegistration, StateChangedHandler};
pub use error::{CommandError, ConfigError, Error};
pub use router::{CommandHandler, HandlerPolicy, SubscriptionState};
pub use state::StateValue;
pub use topic::{ChannelTopic, TopicSet, TOPIC_CAPACITY};
