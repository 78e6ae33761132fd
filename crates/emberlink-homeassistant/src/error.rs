//! Error types for the discovery layer

use core::fmt;

/// Construction-time configuration error, fatal to entity creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// None of `unique_id`, `object_id`, `name` was usable as an identifier
    MissingIdentifier,
    /// A state-bearing entity was built with no state channels
    NoStateChannels,
    /// A command-bearing entity was built with no command channels
    NoCommandChannels,
    /// A derived topic exceeded the topic buffer capacity
    TopicOverflow,
    /// More channels were declared than the entity's channel capacity
    TooManyChannels,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingIdentifier => {
                write!(f, "entity must have a unique_id, object_id, or name")
            }
            ConfigError::NoStateChannels => write!(f, "no state channels provided"),
            ConfigError::NoCommandChannels => write!(f, "no command channels provided"),
            ConfigError::TopicOverflow => write!(f, "derived topic exceeds buffer capacity"),
            ConfigError::TooManyChannels => write!(f, "channel count exceeds capacity"),
        }
    }
}

/// Failure reported by a command handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandError(pub &'static str);

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for entity operations, generic over the transport error.
#[derive(Debug)]
pub enum Error<E> {
    /// Invalid entity configuration
    Config(ConfigError),
    /// Transport rejected a publish or subscribe
    Bus(E),
    /// JSON serialization error
    Serialization,
    /// Command handler failure under the propagate policy
    Handler(CommandError),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "configuration error: {}", e),
            Error::Bus(e) => write!(f, "bus error: {:?}", e),
            Error::Serialization => write!(f, "JSON serialization error"),
            Error::Handler(e) => write!(f, "command handler error: {}", e),
        }
    }
}

impl<E> From<ConfigError> for Error<E> {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}
