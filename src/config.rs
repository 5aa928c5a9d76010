use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_SERVER: &str = "stun.cloudflare.com:3478";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Settings for [`UdpCommunicator`](crate::UdpCommunicator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `host:port` of the STUN server.
    pub server: String,
    pub local_addr: SocketAddr,
    /// How long a request waits for its reply.
    pub timeout: Duration,
    /// Pick an IPv4 address when the server name resolves to several.
    pub prefer_ipv4: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_owned(),
            local_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            timeout: DEFAULT_TIMEOUT,
            prefer_ipv4: true,
        }
    }
}

impl ClientConfig {
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    pub fn with_local_addr(mut self, local_addr: SocketAddr) -> Self {
        self.local_addr = local_addr;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_prefer_ipv4(mut self, prefer_ipv4: bool) -> Self {
        self.prefer_ipv4 = prefer_ipv4;
        self
    }
}
