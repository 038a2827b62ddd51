use crate::domain_name::is_subdomain_of;
use serde::{Deserialize, Serialize};

/// Relational backend selection
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Zones answered from the relational store instead of upstream DNS.
    /// A rule matches the zone itself and every name below it.
    #[serde(default)]
    pub local_domains: Vec<String>,

    /// SQLite database file; empty disables the relational backend
    #[serde(default)]
    pub database_path: String,
}

impl BackendConfig {
    pub fn is_enabled(&self) -> bool {
        !self.database_path.is_empty()
    }

    /// True when `domain` is served by the relational store.
    pub fn is_local(&self, domain: &str) -> bool {
        self.local_zone_for(domain).is_some()
    }

    /// The configured zone that `domain` falls under, if any.
    pub fn local_zone_for(&self, domain: &str) -> Option<&str> {
        self.local_domains
            .iter()
            .map(String::as_str)
            .filter(|rule| !rule.trim_end_matches('.').is_empty())
            .find(|rule| is_subdomain_of(domain, rule))
    }
}
