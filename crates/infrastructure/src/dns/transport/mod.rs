pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use geodns_domain::{DomainError, UpstreamConfig, UpstreamProtocol};
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

/// Result of a raw DNS transport operation
#[derive(Debug)]
pub struct TransportResponse {
    /// Raw DNS response bytes (wire format)
    pub bytes: Vec<u8>,
    /// Which protocol was used
    pub protocol_used: &'static str,
}

/// Per-call timeouts for the three phases of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportTimeouts {
    pub dial: Duration,
    pub write: Duration,
    pub read: Duration,
}

impl TransportTimeouts {
    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self {
            dial: config.dial_timeout(),
            write: config.write_timeout(),
            read: config.read_timeout(),
        }
    }
}

impl Default for TransportTimeouts {
    fn default() -> Self {
        Self::from_config(&UpstreamConfig::default())
    }
}

/// Trait for sending raw DNS messages over the wire
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(&self, message_bytes: &[u8]) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

/// Enum-dispatched transport
pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub fn new(protocol: UpstreamProtocol, addr: SocketAddr, timeouts: TransportTimeouts) -> Self {
        match protocol {
            UpstreamProtocol::Udp => Self::Udp(udp::UdpTransport::new(addr, timeouts)),
            UpstreamProtocol::Tcp => Self::Tcp(tcp::TcpTransport::new(addr, timeouts)),
        }
    }

    /// Send a DNS query via the appropriate protocol (static dispatch).
    pub async fn send(&self, message_bytes: &[u8]) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes).await,
        }
    }

    /// Protocol name for logging.
    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            Self::Tcp(_) => "TCP",
        }
    }
}

/// Runs one I/O phase under `limit`, mapping both failure modes.
pub(crate) async fn with_timeout<T, F>(
    limit: Duration,
    phase: &str,
    server: SocketAddr,
    fut: F,
) -> Result<T, DomainError>
where
    F: Future<Output = std::io::Result<T>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| {
            DomainError::TransportTimeout(format!("{} timed out for {}", phase, server))
        })?
        .map_err(|e| DomainError::Transport(format!("{} failed for {}: {}", phase, server, e)))
}
