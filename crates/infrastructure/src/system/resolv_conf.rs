use geodns_domain::DomainError;
use std::net::IpAddr;
use std::path::Path;
use tracing::{debug, warn};

/// Name servers listed in a resolv.conf file, in file order.
pub async fn read_resolv_conf(path: impl AsRef<Path>) -> Result<Vec<String>, DomainError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "Cannot read resolv.conf");
        DomainError::NotFound(format!("{}: {}", path.display(), e))
    })?;

    let servers = parse_resolv_conf(&content);
    debug!(path = %path.display(), count = servers.len(), "Loaded system resolvers");
    Ok(servers)
}

/// Addresses from the `nameserver` lines of resolv.conf content.
/// Zone-scoped IPv6 addresses and anything that is not an IP are skipped.
pub fn parse_resolv_conf(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split(['#', ';']).next().unwrap_or_default())
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some("nameserver"), Some(addr)) => addr.parse::<IpAddr>().ok(),
                _ => None,
            }
        })
        .map(|addr| addr.to_string())
        .collect()
}
