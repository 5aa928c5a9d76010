use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt as _;
use stun_codec::{MessageClass, TransactionId};
use tokio::net::UdpSocket;
use tokio::sync::Mutex;

use crate::codec::{self, Reply};
use crate::communicator::Communicator;
use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::message::MessageDescriptor;

const MAX_MESSAGE_SIZE: usize = 1500;

/// A [`Communicator`] talking to a single STUN server over UDP.
///
/// Requests are sent once and wait up to the configured timeout for their
/// reply; there is no retransmission. Only one request is in flight at a
/// time, concurrent callers queue behind it.
#[derive(Debug, Clone)]
pub struct UdpCommunicator {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    socket: UdpSocket,
    server: SocketAddr,
    timeout: Duration,
    in_flight: Mutex<()>,
}

impl UdpCommunicator {
    pub async fn connect(config: &ClientConfig) -> Result<Self, TransportError> {
        let server = resolve(&config.server, config.prefer_ipv4).await?;
        let socket = UdpSocket::bind(config.local_addr).await?;
        socket.connect(server).await?;

        tracing::debug!(%server, local = %socket.local_addr()?, "connected to STUN server");

        Ok(Self {
            inner: Arc::new(Inner {
                socket,
                server,
                timeout: config.timeout,
                in_flight: Mutex::new(()),
            }),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.inner.socket.local_addr()?)
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.inner.server
    }
}

impl Communicator for UdpCommunicator {
    fn send_request(
        &self,
        message: MessageDescriptor,
    ) -> BoxFuture<'static, Result<Reply, TransportError>> {
        let inner = self.inner.clone();

        async move { inner.request(message).await }.boxed()
    }

    fn send_indication(
        &self,
        message: MessageDescriptor,
    ) -> BoxFuture<'static, Result<(), TransportError>> {
        let inner = self.inner.clone();

        async move {
            let payload = codec::encode(&message, codec::new_transaction_id())?;
            inner.socket.send(&payload).await?;

            Ok(())
        }
        .boxed()
    }
}

impl Inner {
    async fn request(&self, message: MessageDescriptor) -> Result<Reply, TransportError> {
        let transaction_id = codec::new_transaction_id();
        let payload = codec::encode(&message, transaction_id)?;

        let _guard = self.in_flight.lock().await;
        self.socket.send(&payload).await?;

        tokio::time::timeout(self.timeout, self.recv_reply(transaction_id))
            .await
            .map_err(|_| TransportError::Timeout)?
    }

    async fn recv_reply(&self, transaction_id: TransactionId) -> Result<Reply, TransportError> {
        let mut buf = vec![0u8; MAX_MESSAGE_SIZE];

        loop {
            let num_read = self.socket.recv(&mut buf).await?;

            let reply = match codec::decode(&buf[..num_read]) {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::debug!("discarding undecodable datagram: {e}");
                    continue;
                }
            };

            let is_response = matches!(
                reply.class(),
                MessageClass::SuccessResponse | MessageClass::ErrorResponse
            );
            if !is_response || reply.transaction_id() != transaction_id {
                tracing::debug!(class = ?reply.class(), "discarding unrelated STUN message");
                continue;
            }

            return Ok(reply);
        }
    }
}

async fn resolve(server: &str, prefer_ipv4: bool) -> Result<SocketAddr, TransportError> {
    let addrs = tokio::net::lookup_host(server).await?.collect::<Vec<_>>();

    let preferred = if prefer_ipv4 {
        addrs.iter().copied().find(SocketAddr::is_ipv4)
    } else {
        None
    };

    preferred
        .or_else(|| addrs.first().copied())
        .ok_or_else(|| TransportError::Resolve(server.to_owned()))
}
