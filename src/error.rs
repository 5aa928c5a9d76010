use std::io;

/// Failures raised by a [`Communicator`](crate::Communicator) while moving
/// messages to and from the server.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("STUN transaction timed out")]
    Timeout,
    #[error("failed to encode or decode STUN message: {0}")]
    Codec(String),
    #[error("malformed STUN message")]
    Malformed,
    #[error("failed to resolve STUN server {0}")]
    Resolve(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A callback-form operation was called without one of its handlers.
    #[error("{operation} callback handlers are undefined")]
    MissingCallback { operation: &'static str },
    /// A callback-form operation was called outside a tokio runtime.
    #[error("{operation} needs a tokio runtime to deliver its callbacks")]
    NoRuntime { operation: &'static str },
    /// The server answered with an ERROR-CODE attribute.
    #[error("bind error: {reason} ({code})")]
    Bind { code: u16, reason: String },
    #[error("bind reply carries neither an error code nor a mapped address")]
    NoMappedAddress,
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// Whether the server itself reported the failure.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Bind { .. } | Error::NoMappedAddress)
    }
}
