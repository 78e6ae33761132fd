//! Shared test double: a recording bus connection with scripted events.

use std::collections::VecDeque;

use emberlink_bus::{BusConnection, BusEvent, InboundMessage, LastWill, QoS};

/// One recorded publish call.
pub(crate) struct PublishRecord {
    pub(crate) topic: String,
    pub(crate) payload: Vec<u8>,
    pub(crate) qos: QoS,
    pub(crate) retain: bool,
    /// Whether the caller awaited the acknowledgment
    pub(crate) awaited: bool,
}

/// One recorded subscribe call.
pub(crate) struct SubscribeRecord {
    pub(crate) topic: String,
    pub(crate) qos: QoS,
}

/// Event the fake transport will yield from `poll`.
pub(crate) enum ScriptedEvent {
    Connected,
    Message { topic: String, payload: Vec<u8> },
}

#[derive(Debug)]
pub(crate) struct BusFailure;

/// In-memory `BusConnection` recording every call and replaying scripted
/// events.
pub(crate) struct RecordingBus {
    pub(crate) publishes: Vec<PublishRecord>,
    pub(crate) subscribes: Vec<SubscribeRecord>,
    pub(crate) will: Option<(String, Vec<u8>, bool)>,
    pub(crate) events: VecDeque<ScriptedEvent>,
    pub(crate) fail_publish: bool,
    current: Option<(String, Vec<u8>)>,
}

impl Default for RecordingBus {
    fn default() -> Self {
        Self {
            publishes: Vec::new(),
            subscribes: Vec::new(),
            will: None,
            events: VecDeque::new(),
            fail_publish: false,
            current: None,
        }
    }
}

impl RecordingBus {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a connected event for the next poll.
    pub(crate) fn script_connected(&mut self) {
        self.events.push_back(ScriptedEvent::Connected);
    }

    /// Queue an inbound message for the next poll.
    pub(crate) fn script_message(&mut self, topic: &str, payload: &[u8]) {
        self.events.push_back(ScriptedEvent::Message {
            topic: topic.to_string(),
            payload: payload.to_vec(),
        });
    }
}

impl BusConnection for RecordingBus {
    type Error = BusFailure;

    fn set_will(&mut self, will: &LastWill<'_>) {
        self.will = Some((will.topic.to_string(), will.payload.to_vec(), will.retain));
    }

    async fn publish(
        &mut self,
        topic: &str,
        payload: &[u8],
        qos: QoS,
        retain: bool,
    ) -> Result<(), Self::Error> {
        if self.fail_publish {
            return Err(BusFailure);
        }
        self.publishes.push(PublishRecord {
            topic: topic.to_string(),
            payload: payload.to_vec(),
            qos,
            retain,
            awaited: true,
        });
        Ok(())
    }

    fn publish_nowait(
        &mut self,
        topic: &str,
        payload: &[u8],
        qos: QoS,
        retain: bool,
    ) -> Result<(), Self::Error> {
        if self.fail_publish {
            return Err(BusFailure);
        }
        self.publishes.push(PublishRecord {
            topic: topic.to_string(),
            payload: payload.to_vec(),
            qos,
            retain,
            awaited: false,
        });
        Ok(())
    }

    async fn subscribe(&mut self, topic: &str, qos: QoS) -> Result<(), Self::Error> {
        self.subscribes.push(SubscribeRecord {
            topic: topic.to_string(),
            qos,
        });
        Ok(())
    }

    async fn poll(&mut self) -> Result<Option<BusEvent<'_>>, Self::Error> {
        match self.events.pop_front() {
            None => Ok(None),
            Some(ScriptedEvent::Connected) => Ok(Some(BusEvent::Connected)),
            Some(ScriptedEvent::Message { topic, payload }) => {
                self.current = Some((topic, payload));
                let (topic, payload) = self.current.as_ref().unwrap();
                Ok(Some(BusEvent::Message(InboundMessage {
                    topic: topic.as_str(),
                    payload: payload.as_slice(),
                })))
            }
        }
    }
}
