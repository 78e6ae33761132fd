//! Message-level types shared between the discovery layer and transports.

/// Delivery quality for publishes and subscriptions.
///
/// Only the two levels the discovery protocol uses are modeled; exactly-once
/// delivery has no consumer in this stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QoS {
    /// QoS 0, at most once
    AtMostOnce,
    /// QoS 1, at least once
    AtLeastOnce,
}

/// An inbound publish delivered by the transport.
///
/// Borrows the transport's receive buffer; valid until the next poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboundMessage<'a> {
    /// Full topic the message arrived on
    pub topic: &'a str,
    /// Raw payload bytes
    pub payload: &'a [u8],
}

/// Event yielded by [`BusConnection::poll`](crate::BusConnection::poll).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent<'a> {
    /// The connection (re)established a session with the broker.
    ///
    /// Fired again after every transport-level reconnect; subscribers rely on
    /// this to re-issue their subscriptions, since the broker may have
    /// dropped session state.
    Connected,
    /// An inbound message on a subscribed topic.
    Message(InboundMessage<'a>),
}
