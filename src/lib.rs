//! A STUN binding client.
//!
//! [`StunClient`] sends a Binding request through a [`Communicator`] and
//! turns the server's reply into the public address a NAT mapped us to.
//! Every operation comes as a future and, in [`callback`], as a pair of
//! success/failure handlers.

pub mod callback;
mod client;
pub mod codec;
mod communicator;
mod config;
mod error;
mod interpret;
mod message;
mod transport;

pub use client::StunClient;
pub use codec::Reply;
pub use communicator::Communicator;
pub use config::{ClientConfig, DEFAULT_SERVER, DEFAULT_TIMEOUT};
pub use error::{Error, TransportError};
pub use interpret::{interpret, MappedEndpoint};
pub use message::{compose_binding_indication, compose_binding_request, MessageDescriptor};
pub use transport::UdpCommunicator;
