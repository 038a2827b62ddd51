use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resolution engine tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Maximum number of CNAME hops followed by `resolve_a`
    #[serde(default = "default_cname_chain_length")]
    pub cname_chain_length: usize,

    /// Label limit for `resolve_ns`
    #[serde(default = "default_max_domain_labels")]
    pub max_domain_labels: usize,

    /// Source prefix sent in the EDNS0 client-subnet option
    #[serde(default = "default_edns_source_mask")]
    pub edns_source_mask: u8,

    /// Scope prefix sent in the EDNS0 client-subnet option
    #[serde(default)]
    pub edns_source_scope: u8,

    /// Refresh fires this many seconds before the record TTL runs out
    #[serde(default = "default_refresh_margin_secs")]
    pub refresh_margin_secs: u64,

    /// Floor for the refresh delay
    #[serde(default = "default_min_refresh_secs")]
    pub min_refresh_secs: u64,

    /// How often background population looks for its domain entry
    #[serde(default = "default_populate_retry_attempts")]
    pub populate_retry_attempts: u32,

    #[serde(default = "default_populate_retry_interval_ms")]
    pub populate_retry_interval_ms: u64,
}

impl ResolverConfig {
    /// Delay before a record with `ttl` seconds gets refetched.
    pub fn refresh_delay(&self, ttl: u32) -> Duration {
        let secs = u64::from(ttl)
            .saturating_sub(self.refresh_margin_secs)
            .max(self.min_refresh_secs);
        Duration::from_secs(secs)
    }

    pub fn populate_retry_interval(&self) -> Duration {
        Duration::from_millis(self.populate_retry_interval_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cname_chain_length: default_cname_chain_length(),
            max_domain_labels: default_max_domain_labels(),
            edns_source_mask: default_edns_source_mask(),
            edns_source_scope: 0,
            refresh_margin_secs: default_refresh_margin_secs(),
            min_refresh_secs: default_min_refresh_secs(),
            populate_retry_attempts: default_populate_retry_attempts(),
            populate_retry_interval_ms: default_populate_retry_interval_ms(),
        }
    }
}

fn default_cname_chain_length() -> usize {
    10
}

fn default_max_domain_labels() -> usize {
    16
}

fn default_edns_source_mask() -> u8 {
    24
}

fn default_refresh_margin_secs() -> u64 {
    5
}

fn default_min_refresh_secs() -> u64 {
    1
}

fn default_populate_retry_attempts() -> u32 {
    5
}

fn default_populate_retry_interval_ms() -> u64 {
    1000
}
