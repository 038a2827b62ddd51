use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use crate::dns::transport::{Transport, TransportTimeouts};
use async_trait::async_trait;
use geodns_application::ports::{DnsExchange, UpstreamQuery, UpstreamResponse};
use geodns_domain::{DomainError, UpstreamConfig, UpstreamProtocol};
use std::net::{IpAddr, SocketAddr};
use tracing::{debug, instrument};

const DEFAULT_DNS_PORT: u16 = 53;

/// Upstream exchange over hickory-proto messages and the UDP/TCP transports.
pub struct HickoryExchange {
    protocol: UpstreamProtocol,
    timeouts: TransportTimeouts,
}

impl HickoryExchange {
    pub fn new(protocol: UpstreamProtocol, timeouts: TransportTimeouts) -> Self {
        Self { protocol, timeouts }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(config.protocol, TransportTimeouts::from_config(config))
    }

    async fn send_once(
        &self,
        protocol: UpstreamProtocol,
        addr: SocketAddr,
        query_id: u16,
        bytes: &[u8],
    ) -> Result<UpstreamResponse, DomainError> {
        let transport = Transport::new(protocol, addr, self.timeouts);
        let raw = transport.send(bytes).await?;
        let response = ResponseParser::parse(&raw.bytes)?;

        if response.id != query_id {
            return Err(DomainError::Transport(format!(
                "{} answered with id {} instead of {}",
                addr, response.id, query_id
            )));
        }
        if response.is_server_error() {
            return Err(DomainError::Transport(format!(
                "{} answered {}",
                addr,
                ResponseParser::rcode_to_status(response.rcode)
            )));
        }

        debug!(
            server = %addr,
            protocol = transport.protocol_name(),
            rcode = ResponseParser::rcode_to_status(response.rcode),
            "Upstream exchange complete"
        );
        Ok(response.upstream)
    }
}

#[async_trait]
impl DnsExchange for HickoryExchange {
    #[instrument(skip(self, query), fields(name = %query.name, record_type = %query.record_type))]
    async fn exchange(
        &self,
        query: &UpstreamQuery,
        server: &str,
    ) -> Result<UpstreamResponse, DomainError> {
        let addr = resolve_server_addr(server).await?;
        let (query_id, bytes) = MessageBuilder::build_query(query)?;

        let response = self.send_once(self.protocol, addr, query_id, &bytes).await?;
        if response.truncated && self.protocol == UpstreamProtocol::Udp {
            debug!(server = %addr, "Truncated UDP answer, retrying over TCP");
            return self
                .send_once(UpstreamProtocol::Tcp, addr, query_id, &bytes)
                .await;
        }

        Ok(response)
    }
}

/// Turns "ip", "ip:port", "host" or "host:port" into a socket address.
/// Host names go through the system resolver; the port defaults to 53.
pub async fn resolve_server_addr(server: &str) -> Result<SocketAddr, DomainError> {
    let server = server.trim();
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = server.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_DNS_PORT));
    }

    let (host, port) = match server.rsplit_once(':') {
        Some((host, port)) => {
            let port = port.parse::<u16>().map_err(|_| {
                DomainError::BadParam(format!("invalid port in server address {}", server))
            })?;
            (host, port)
        }
        None => (server, DEFAULT_DNS_PORT),
    };
    let host = host.trim_end_matches('.');
    if host.is_empty() {
        return Err(DomainError::BadParam(format!(
            "empty host in server address {}",
            server
        )));
    }

    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| DomainError::Transport(format!("cannot resolve {}: {}", host, e)))?
        .collect();
    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| DomainError::Transport(format!("{} has no addresses", host)))
}
