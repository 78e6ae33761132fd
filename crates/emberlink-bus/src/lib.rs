//! # Publish/Subscribe Bus Contract
//!
//! `emberlink-bus` defines the contract between the emberlink discovery layer
//! and whatever MQTT client actually moves bytes. The discovery layer never
//! connects, reconnects or retries on its own; it is handed a type
//! implementing [`BusConnection`] and issues retained publishes and QoS 1
//! subscriptions through it.
//!
//! ## Core pieces
//!
//! - **[`BusConnection`]:** Transport seam. Implementations wrap a concrete
//!   MQTT client over any reliable transport. Built with native `async fn` in
//!   traits (Rust 2024), so no `async-trait` shim is needed.
//! - **[`ConnectionOptions`] / [`LastWill`]:** Connect-time parameters. The
//!   will is set by the discovery layer before the first connect so the
//!   broker announces an abrupt disconnect without application help.
//! - **[`BusEvent`]:** What `poll` yields: a (re)connect notification that
//!   drives command-topic subscription, or an inbound message.
//! - **[`LogConnection`]:** Log-only implementation for exercising the
//!   discovery layer without a broker.
//!
//! ## Usage
//!
//! ```no_run
//! # use emberlink_bus::{BusConnection, BusEvent, QoS};
//! # async fn run<C: BusConnection>(mut conn: C) -> Result<(), C::Error> {
//! conn.publish("emberlink/sensor/kitchen/state", b"21.5", QoS::AtLeastOnce, true).await?;
//!
//! loop {
//!     match conn.poll().await? {
//!         Some(BusEvent::Connected) => { /* re-issue subscriptions */ }
//!         Some(BusEvent::Message(msg)) => { /* dispatch */ let _ = msg; }
//!         None => {}
//!     }
//! }
//! # }
//! ```

#![no_std]

pub mod connection;
pub mod message;

pub use connection::{BusConnection, ConnectionOptions, LastWill, LogConnection};
pub use message::{BusEvent, InboundMessage, QoS};
