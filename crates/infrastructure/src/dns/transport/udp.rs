use super::{with_timeout, DnsTransport, TransportResponse, TransportTimeouts};
use async_trait::async_trait;
use geodns_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP, one connected socket per query.
pub struct UdpTransport {
    server_addr: SocketAddr,
    timeouts: TransportTimeouts,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr, timeouts: TransportTimeouts) -> Self {
        Self {
            server_addr,
            timeouts,
        }
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(&self, message_bytes: &[u8]) -> Result<TransportResponse, DomainError> {
        let server = self.server_addr;

        // Connecting filters out datagrams from other sources.
        let socket = with_timeout(self.timeouts.dial, "UDP dial", server, async {
            let socket = UdpSocket::bind(self.bind_addr()).await?;
            socket.connect(server).await?;
            Ok::<_, std::io::Error>(socket)
        })
        .await?;

        let bytes_sent = with_timeout(
            self.timeouts.write,
            "UDP write",
            server,
            socket.send(message_bytes),
        )
        .await?;
        debug!(server = %server, bytes_sent = bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let bytes_received = with_timeout(
            self.timeouts.read,
            "UDP read",
            server,
            socket.recv(&mut recv_buf),
        )
        .await?;
        recv_buf.truncate(bytes_received);

        debug!(
            server = %server,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(TransportResponse {
            bytes: recv_buf,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
