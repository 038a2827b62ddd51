use geodns_domain::UpstreamConfig;
use geodns_infrastructure::system::read_resolv_conf;
use tracing::{info, warn};

/// Recursive resolvers used for zone discovery: the configured list, or
/// the system's resolv.conf when none are configured.
pub async fn discover_resolvers(upstream: &UpstreamConfig) -> Vec<String> {
    if !upstream.resolvers.is_empty() {
        return upstream.resolvers.clone();
    }

    match read_resolv_conf(&upstream.resolv_conf).await {
        Ok(servers) if !servers.is_empty() => {
            info!(path = %upstream.resolv_conf, resolvers = ?servers, "Using system resolvers");
            servers
        }
        Ok(_) => {
            warn!(path = %upstream.resolv_conf, "No nameserver entries found");
            Vec::new()
        }
        Err(e) => {
            warn!(error = %e, "System resolvers unavailable");
            Vec::new()
        }
    }
}
