use super::{with_timeout, DnsTransport, TransportResponse, TransportTimeouts};
use async_trait::async_trait;
use geodns_domain::DomainError;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP with the two-byte length prefix (RFC 1035 §4.2.2).
pub struct TcpTransport {
    server_addr: SocketAddr,
    timeouts: TransportTimeouts,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr, timeouts: TransportTimeouts) -> Self {
        Self {
            server_addr,
            timeouts,
        }
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(&self, message_bytes: &[u8]) -> Result<TransportResponse, DomainError> {
        let server = self.server_addr;
        let length = u16::try_from(message_bytes.len()).map_err(|_| {
            DomainError::BadParam(format!(
                "DNS message of {} bytes is too large for TCP",
                message_bytes.len()
            ))
        })?;

        let mut stream = with_timeout(
            self.timeouts.dial,
            "TCP dial",
            server,
            TcpStream::connect(server),
        )
        .await?;

        let mut framed = Vec::with_capacity(message_bytes.len() + 2);
        framed.extend_from_slice(&length.to_be_bytes());
        framed.extend_from_slice(message_bytes);
        with_timeout(
            self.timeouts.write,
            "TCP write",
            server,
            stream.write_all(&framed),
        )
        .await?;
        debug!(server = %server, bytes_sent = framed.len(), "TCP query sent");

        let bytes = with_timeout(self.timeouts.read, "TCP read", server, async {
            let response_len = stream.read_u16().await?;
            let mut buf = vec![0u8; usize::from(response_len)];
            stream.read_exact(&mut buf).await?;
            Ok::<_, std::io::Error>(buf)
        })
        .await?;

        debug!(
            server = %server,
            bytes_received = bytes.len(),
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes,
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}
