use futures::future::BoxFuture;

use crate::codec::Reply;
use crate::error::TransportError;
use crate::message::MessageDescriptor;

/// Something that can put STUN messages on the wire.
///
/// Implementations own transaction IDs, reply matching, timeouts and the
/// socket. The returned futures must not borrow the communicator so that
/// exchanges can be spawned independently.
pub trait Communicator: Send + Sync + 'static {
    /// Sends a request and resolves with the reply matching its transaction.
    fn send_request(
        &self,
        message: MessageDescriptor,
    ) -> BoxFuture<'static, Result<Reply, TransportError>>;

    /// Sends an indication. Resolves once it has been dispatched.
    fn send_indication(
        &self,
        message: MessageDescriptor,
    ) -> BoxFuture<'static, Result<(), TransportError>>;
}

impl<C> Communicator for std::sync::Arc<C>
where
    C: Communicator + ?Sized,
{
    fn send_request(
        &self,
        message: MessageDescriptor,
    ) -> BoxFuture<'static, Result<Reply, TransportError>> {
        (**self).send_request(message)
    }

    fn send_indication(
        &self,
        message: MessageDescriptor,
    ) -> BoxFuture<'static, Result<(), TransportError>> {
        (**self).send_indication(message)
    }
}
