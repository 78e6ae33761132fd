//! The transport seam: connection options and the [`BusConnection`] trait.

use crate::message::{BusEvent, QoS};

/// A message the broker holds and publishes on abrupt client disconnect.
#[derive(Debug, Clone, Copy)]
pub struct LastWill<'a> {
    /// Topic the will is published on
    pub topic: &'a str,
    /// Will payload bytes
    pub payload: &'a [u8],
    /// Delivery quality for the will publish
    pub qos: QoS,
    /// Whether the broker retains the will
    pub retain: bool,
}

impl<'a> LastWill<'a> {
    /// Create a retained, at-least-once will.
    pub const fn retained(topic: &'a str, payload: &'a [u8]) -> Self {
        Self {
            topic,
            payload,
            qos: QoS::AtLeastOnce,
            retain: true,
        }
    }
}

/// Connect-time parameters for a bus connection.
///
/// Consumed by the concrete transport when it opens the network session; the
/// discovery layer itself only reads the prefix-independent pieces it needs
/// for client identification.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions<'a> {
    /// Client identifier presented to the broker
    pub client_id: &'a str,
    /// Broker hostname or address
    pub host: &'a str,
    /// Broker port
    pub port: u16,
    /// Username, if the broker requires authentication
    pub username: Option<&'a str>,
    /// Password, if the broker requires authentication
    pub password: Option<&'a str>,
    /// Whether the transport should wrap the session in TLS
    pub use_tls: bool,
    /// Keep-alive interval in seconds
    pub keep_alive_secs: u16,
}

impl<'a> ConnectionOptions<'a> {
    /// Create options with the required fields and defaults for the rest.
    pub const fn new(client_id: &'a str, host: &'a str, port: u16) -> Self {
        Self {
            client_id,
            host,
            port,
            username: None,
            password: None,
            use_tls: false,
            keep_alive_secs: 60,
        }
    }

    /// Set broker credentials.
    #[must_use]
    pub const fn with_credentials(mut self, username: &'a str, password: &'a str) -> Self {
        self.username = Some(username);
        self.password = Some(password);
        self
    }

    /// Enable TLS on the transport.
    #[must_use]
    pub const fn with_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    /// Set the keep-alive interval.
    #[must_use]
    pub const fn with_keep_alive(mut self, secs: u16) -> Self {
        self.keep_alive_secs = secs;
        self
    }
}

/// Minimal asynchronous pub/sub contract the discovery layer is built on.
///
/// Implementations wrap a concrete MQTT client. Publish and subscribe resolve
/// when the transport acknowledges the operation; `publish_nowait` hands the
/// message to the transport's outgoing queue without awaiting the
/// acknowledgment. Neither retries: delivery robustness is the transport's
/// concern.
#[allow(async_fn_in_trait)]
pub trait BusConnection {
    type Error: core::fmt::Debug;

    /// Configure the last-will message applied at the next connect.
    ///
    /// Must be called before the transport opens its session to take effect;
    /// the discovery layer does so during entity construction.
    fn set_will(&mut self, will: &LastWill<'_>);

    /// Publish a payload and await the transport acknowledgment.
    async fn publish(
        &mut self,
        topic: &str,
        payload: &[u8],
        qos: QoS,
        retain: bool,
    ) -> Result<(), Self::Error>;

    /// Queue a publish without awaiting the acknowledgment.
    fn publish_nowait(
        &mut self,
        topic: &str,
        payload: &[u8],
        qos: QoS,
        retain: bool,
    ) -> Result<(), Self::Error>;

    /// Subscribe to a topic and await the subscribe acknowledgment.
    async fn subscribe(&mut self, topic: &str, qos: QoS) -> Result<(), Self::Error>;

    /// Drive the connection, yielding the next event if one is pending.
    async fn poll(&mut self) -> Result<Option<BusEvent<'_>>, Self::Error>;
}

/// Log-only connection used while no broker is wired up.
///
/// Every operation succeeds and is reported through `log`, which allows
/// exercising topic derivation and discovery publication end to end without
/// network access. `poll` never yields an event.
pub struct LogConnection;

impl BusConnection for LogConnection {
    type Error = core::convert::Infallible;

    fn set_will(&mut self, will: &LastWill<'_>) {
        log::debug!(
            "bus(LOG): will on '{}' len={} retain={}",
            will.topic,
            will.payload.len(),
            will.retain
        );
    }

    async fn publish(
        &mut self,
        topic: &str,
        payload: &[u8],
        qos: QoS,
        retain: bool,
    ) -> Result<(), Self::Error> {
        log::debug!(
            "bus(LOG): publish '{}' len={} {:?} retain={}",
            topic,
            payload.len(),
            qos,
            retain
        );
        Ok(())
    }

    fn publish_nowait(
        &mut self,
        topic: &str,
        payload: &[u8],
        qos: QoS,
        retain: bool,
    ) -> Result<(), Self::Error> {
        log::debug!(
            "bus(LOG): publish (queued) '{}' len={} {:?} retain={}",
            topic,
            payload.len(),
            qos,
            retain
        );
        Ok(())
    }

    async fn subscribe(&mut self, topic: &str, qos: QoS) -> Result<(), Self::Error> {
        log::debug!("bus(LOG): subscribe '{}' {:?}", topic, qos);
        Ok(())
    }

    async fn poll(&mut self) -> Result<Option<BusEvent<'_>>, Self::Error> {
        Ok(None)
    }
}
