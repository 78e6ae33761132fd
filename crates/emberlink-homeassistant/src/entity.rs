//! The discoverable entity
//!
//! Wraps an injected bus connection and provides the full discovery
//! lifecycle: retained config publication, state/attribute/availability
//! publishing, and command dispatch via [`poll`](Entity::poll).

use emberlink_bus::{BusConnection, BusEvent, LastWill, QoS};

use crate::config::{EntityConfig, EntitySettings, ResolvedConfig};
use crate::discovery::DiscoveryDocument;
use crate::error::{ConfigError, Error};
use crate::router::{CommandHandler, CommandRouter, SubscriptionState};
use crate::state::{self, StateValue};
use crate::topic::{self, TopicBuf, TopicSet};

/// Callback invoked after a state publish has been issued (or acknowledged,
/// for the awaiting variant).
pub type StateChangedHandler = fn(channel: &str, value: &StateValue<'_>);

/// An entity registration: declared configuration plus callbacks.
pub struct EntityRegistration<'a> {
    /// Declared entity configuration
    pub config: EntityConfig<'a>,
    /// Invoked after each state publish
    pub on_state_change: Option<StateChangedHandler>,
    /// Invoked for each dispatched command; its presence marks the entity
    /// command-bearing
    pub on_command: Option<CommandHandler>,
}

/// A discoverable entity bound to its own bus connection.
///
/// `CHANNELS` bounds the per-direction channel count, `BUF` sizes the
/// serialization buffer (the discovery document is the largest payload).
///
/// All topics are derived once at construction and never change; the entity
/// only ever touches topics under its own derived namespace, which is what
/// makes multiple entities safe on one broker without coordination.
pub struct Entity<'a, C, const CHANNELS: usize, const BUF: usize>
where
    C: BusConnection,
{
    config: EntityConfig<'a>,
    resolved: ResolvedConfig<'a>,
    identifier: &'a str,
    topics: TopicSet<'a, CHANNELS>,
    bus: C,
    router: CommandRouter<CHANNELS>,
    on_state_change: Option<StateChangedHandler>,
    wrote_config: bool,
    buf: [u8; BUF],
}

impl<'a, C, const CHANNELS: usize, const BUF: usize> Entity<'a, C, CHANNELS, BUF>
where
    C: BusConnection,
{
    /// Build an entity over `bus`.
    ///
    /// Derives the identifier and the full topic set and resolves every
    /// configured default. Unless availability is managed manually, the
    /// connection's last will is set to the offline payload on the
    /// availability topic so the broker announces an abrupt disconnect on
    /// its own. The connection must not have connected yet for the will to
    /// take effect.
    pub fn new(
        settings: EntitySettings<'a>,
        registration: EntityRegistration<'a>,
        mut bus: C,
    ) -> Result<Self, ConfigError> {
        let config = registration.config;

        if registration.on_command.is_some() && config.command_channels.is_empty() {
            return Err(ConfigError::NoCommandChannels);
        }
        if registration.on_command.is_none() && config.state_channels.is_empty() {
            return Err(ConfigError::NoStateChannels);
        }

        let identifier =
            topic::derive_identifier(config.unique_id, config.object_id, config.name)?;
        let resolved = ResolvedConfig::resolve(&settings, &config);

        let device_name = config
            .device
            .and_then(|d| d.name)
            .filter(|name| !name.is_empty());
        let base: TopicBuf = topic::base_topic(config.component, device_name, identifier)?;
        let topics = TopicSet::build(
            resolved.discovery_prefix,
            resolved.state_prefix,
            &base,
            config.state_channels,
            config.command_channels,
        )?;

        if !resolved.manual_availability {
            bus.set_will(&LastWill::retained(
                topics.availability_topic(),
                resolved.payload_not_available.as_bytes(),
            ));
        }

        let router = CommandRouter::new(
            config.command_channels.len(),
            registration.on_command,
            resolved.handler_policy,
        )?;

        log::debug!("created entity '{}'", identifier);

        Ok(Self {
            config,
            resolved,
            identifier,
            topics,
            bus,
            router,
            on_state_change: registration.on_state_change,
            wrote_config: false,
            buf: [0u8; BUF],
        })
    }

    /// Publish the retained discovery document.
    ///
    /// Not deduplicated: calling again re-publishes, which the broker
    /// absorbs. Unless availability is manual, announces the entity online
    /// right after.
    pub async fn write_config(&mut self) -> Result<(), Error<C::Error>> {
        log::debug!("writing configuration for '{}'", self.identifier);
        let doc = DiscoveryDocument::new(&self.config, &self.topics);
        let len = serde_json_core::to_slice(&doc, &mut self.buf).map_err(|_| Error::Serialization)?;
        self.bus
            .publish(
                self.topics.config_topic(),
                &self.buf[..len],
                QoS::AtLeastOnce,
                true,
            )
            .await
            .map_err(Error::Bus)?;
        self.wrote_config = true;

        if !self.resolved.manual_availability {
            self.set_availability(true).await?;
        }
        Ok(())
    }

    /// Retained-publish a JSON attribute map. Keys are not validated.
    pub async fn set_attributes<T: serde::Serialize>(
        &mut self,
        attributes: &T,
    ) -> Result<(), Error<C::Error>> {
        log::debug!("setting attributes for '{}'", self.identifier);
        let len =
            serde_json_core::to_slice(attributes, &mut self.buf).map_err(|_| Error::Serialization)?;
        self.bus
            .publish(
                self.topics.attributes_topic(),
                &self.buf[..len],
                QoS::AtLeastOnce,
                true,
            )
            .await
            .map_err(Error::Bus)
    }

    /// Retained-publish the availability payload.
    pub async fn set_availability(&mut self, available: bool) -> Result<(), Error<C::Error>> {
        log::debug!("setting availability for '{}'", self.identifier);
        let payload = if available {
            self.resolved.payload_available
        } else {
            self.resolved.payload_not_available
        };
        self.bus
            .publish(
                self.topics.availability_topic(),
                payload.as_bytes(),
                QoS::AtLeastOnce,
                true,
            )
            .await
            .map_err(Error::Bus)
    }

    /// Retained-publish a state value and await the acknowledgment.
    ///
    /// An unregistered channel is skipped with a debug log; callers may
    /// register a narrower channel set than the component defines. The
    /// state-changed callback runs after the publish resolves.
    pub async fn set_state(
        &mut self,
        channel: &str,
        value: StateValue<'_>,
    ) -> Result<(), Error<C::Error>> {
        let Some(topic) = self.topics.state_topic(channel) else {
            log::debug!(
                "state channel '{}' not registered for '{}'; skipping",
                channel,
                self.identifier
            );
            return Ok(());
        };
        log::debug!("setting '{}' state for '{}'", channel, self.identifier);
        let len = state::encode(value, &mut self.buf).map_err(|()| Error::Serialization)?;
        self.bus
            .publish(topic, &self.buf[..len], QoS::AtMostOnce, true)
            .await
            .map_err(Error::Bus)?;
        if let Some(on_state_change) = self.on_state_change {
            on_state_change(channel, &value);
        }
        Ok(())
    }

    /// Retained-publish a state value without awaiting the acknowledgment.
    ///
    /// The callback runs once the publish has been handed to the transport.
    pub fn set_state_nowait(
        &mut self,
        channel: &str,
        value: StateValue<'_>,
    ) -> Result<(), Error<C::Error>> {
        let Some(topic) = self.topics.state_topic(channel) else {
            log::debug!(
                "state channel '{}' not registered for '{}'; skipping",
                channel,
                self.identifier
            );
            return Ok(());
        };
        log::debug!("setting '{}' state for '{}'", channel, self.identifier);
        let len = state::encode(value, &mut self.buf).map_err(|()| Error::Serialization)?;
        self.bus
            .publish_nowait(topic, &self.buf[..len], QoS::AtMostOnce, true)
            .map_err(Error::Bus)?;
        if let Some(on_state_change) = self.on_state_change {
            on_state_change(channel, &value);
        }
        Ok(())
    }

    /// Drive the connection: resubscribe on connect, dispatch on message.
    ///
    /// Returns `Ok(true)` when a command handler ran. Handler failures
    /// surface here under the propagate policy.
    pub async fn poll(&mut self) -> Result<bool, Error<C::Error>> {
        let mut connected = false;
        match self.bus.poll().await.map_err(Error::Bus)? {
            Some(BusEvent::Connected) => connected = true,
            Some(BusEvent::Message(msg)) => {
                return self.router.dispatch(&self.topics, &msg);
            }
            None => {}
        }

        if connected {
            log::debug!("connected; subscribing command topics for '{}'", self.identifier);
            self.router.subscribe_all(&mut self.bus, &self.topics).await?;
        }
        Ok(false)
    }

    /// The canonical identifier derived from the configuration.
    pub fn identifier(&self) -> &'a str {
        self.identifier
    }

    /// Whether the discovery document has been published at least once.
    pub fn wrote_config(&self) -> bool {
        self.wrote_config
    }

    /// The entity's derived topic set.
    pub fn topics(&self) -> &TopicSet<'a, CHANNELS> {
        &self.topics
    }

    /// Subscription state of the command channel at `index`, in declaration
    /// order.
    pub fn subscription_state(&self, index: usize) -> Option<SubscriptionState> {
        self.router.state(index)
    }

    /// The underlying bus connection.
    pub fn bus(&self) -> &C {
        &self.bus
    }

    /// The underlying bus connection, mutably.
    pub fn bus_mut(&mut self) -> &mut C {
        &mut self.bus
    }
}
