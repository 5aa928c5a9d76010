use std::future::Future;

use futures::TryFutureExt as _;

use crate::codec::Reply;
use crate::communicator::Communicator;
use crate::error::Error;
use crate::interpret::{interpret, MappedEndpoint};
use crate::message::{compose_binding_indication, compose_binding_request};

/// STUN binding client.
///
/// Every operation is an independent exchange: the client keeps no state
/// besides the communicator, so many binds may be in flight at once. The
/// callback forms live in [`crate::callback`].
#[derive(Debug, Clone)]
pub struct StunClient<C> {
    communicator: C,
}

impl<C> StunClient<C>
where
    C: Communicator,
{
    pub fn new(communicator: C) -> Self {
        Self { communicator }
    }

    pub fn communicator(&self) -> &C {
        &self.communicator
    }

    /// Discovers our public transport address.
    ///
    /// Fails with [`Error::Bind`] if the server replied with an error code and
    /// with [`Error::Transport`] if the communicator could not complete the
    /// transaction.
    pub fn bind(
        &self,
    ) -> impl Future<Output = Result<MappedEndpoint, Error>> + Send + 'static {
        let reply = self.send_bind_request();

        async move {
            let reply = reply.await?;

            interpret(&reply)
        }
    }

    /// Sends a binding request and resolves with the raw reply.
    pub fn send_bind_request(
        &self,
    ) -> impl Future<Output = Result<Reply, Error>> + Send + 'static {
        tracing::debug!("send bind request");

        self.communicator
            .send_request(compose_binding_request())
            .err_into::<Error>()
    }

    pub fn send_bind_indication(
        &self,
    ) -> impl Future<Output = Result<(), Error>> + Send + 'static {
        tracing::debug!("send bind indication");

        self.communicator
            .send_indication(compose_binding_indication())
            .err_into::<Error>()
    }
}
