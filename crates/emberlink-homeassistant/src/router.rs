//! Command routing
//!
//! Subscribes the entity's command topics and dispatches inbound messages to
//! the registered handler, keyed by logical channel name. Subscription is
//! driven entirely by the transport's connected event: the router itself
//! holds no reconnect logic and re-runs the subscribe pass whenever the
//! transport reports a fresh session.

use emberlink_bus::{BusConnection, InboundMessage, QoS};
use heapless::Vec;

use crate::command::CommandPayload;
use crate::error::{CommandError, ConfigError, Error};
use crate::topic::TopicSet;

/// Handler invoked for every dispatched command.
pub type CommandHandler = fn(channel: &str, payload: &CommandPayload<'_>) -> Result<(), CommandError>;

/// What to do when the command handler fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerPolicy {
    /// Surface the failure from `poll`, the transport's message-handling context
    Propagate,
    /// Log the failure at warn and report the message handled
    LogAndContinue,
}

/// Subscription lifecycle of one command topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    /// No subscribe issued yet
    Unsubscribed,
    /// Subscribe issued, acknowledgment pending
    Subscribing,
    /// Subscribe acknowledged
    Subscribed,
}

/// Per-entity command dispatch table.
pub(crate) struct CommandRouter<const CHANNELS: usize> {
    states: Vec<SubscriptionState, CHANNELS>,
    handler: Option<CommandHandler>,
    policy: HandlerPolicy,
}

impl<const CHANNELS: usize> CommandRouter<CHANNELS> {
    pub(crate) fn new(
        command_count: usize,
        handler: Option<CommandHandler>,
        policy: HandlerPolicy,
    ) -> Result<Self, ConfigError> {
        let mut states = Vec::new();
        for _ in 0..command_count {
            states
                .push(SubscriptionState::Unsubscribed)
                .map_err(|_| ConfigError::TooManyChannels)?;
        }
        Ok(Self {
            states,
            handler,
            policy,
        })
    }

    /// Subscription state of the command topic at `index`, in declaration order.
    pub(crate) fn state(&self, index: usize) -> Option<SubscriptionState> {
        self.states.get(index).copied()
    }

    /// Subscribe every command topic with at-least-once delivery.
    ///
    /// Run on every connected event; after a reconnect the broker may have
    /// dropped session state, so the whole pass repeats from scratch.
    pub(crate) async fn subscribe_all<C: BusConnection>(
        &mut self,
        bus: &mut C,
        topics: &TopicSet<'_, CHANNELS>,
    ) -> Result<(), Error<C::Error>> {
        for (index, entry) in topics.command_entries().iter().enumerate() {
            self.states[index] = SubscriptionState::Subscribing;
            log::debug!("subscribing to command topic '{}'", entry.topic.as_str());
            bus.subscribe(entry.topic.as_str(), QoS::AtLeastOnce)
                .await
                .map_err(Error::Bus)?;
            self.states[index] = SubscriptionState::Subscribed;
        }
        Ok(())
    }

    /// Dispatch an inbound message against the command entries.
    ///
    /// Returns `Ok(true)` when a handler ran. An unmatched topic is ignored
    /// without logging: on a shared broker the message may simply belong to
    /// another entity.
    pub(crate) fn dispatch<E>(
        &self,
        topics: &TopicSet<'_, CHANNELS>,
        msg: &InboundMessage<'_>,
    ) -> Result<bool, Error<E>> {
        let Some(channel) = topics.command_channel(msg.topic) else {
            return Ok(false);
        };

        let Some(payload) = CommandPayload::decode(msg.payload) else {
            log::debug!("dropping non-UTF-8 command payload on '{}'", msg.topic);
            return Ok(false);
        };

        let Some(handler) = self.handler else {
            return Ok(false);
        };

        log::debug!("dispatching command on channel '{}'", channel);
        match handler(channel, &payload) {
            Ok(()) => Ok(true),
            Err(err) => match self.policy {
                HandlerPolicy::Propagate => Err(Error::Handler(err)),
                HandlerPolicy::LogAndContinue => {
                    log::warn!("command handler failed on '{}': {}", channel, err);
                    Ok(true)
                }
            },
        }
    }
}
