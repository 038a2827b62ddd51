use super::core::ResolverCore;
use crate::dns::cache::DomainEntry;
use geodns_application::ports::UpstreamQuery;
use geodns_domain::domain_name::{canonical, fqdn, split_labels};
use geodns_domain::{DelegationRecord, DomainError, NameServerRef, RecordType};
use std::sync::Arc;
use tracing::{debug, error, info};

impl ResolverCore {
    /// Delegation of the zone `domain` belongs to.
    ///
    /// Served from the indices when the domain is known; otherwise learned
    /// from the recursive resolvers and written back in the background.
    pub(crate) async fn soa_record(
        self: &Arc<Self>,
        domain: &str,
    ) -> Result<Arc<DelegationRecord>, DomainError> {
        let name = canonical(domain)?;

        if let Ok(entry) = self.domains.get(&name) {
            match self.delegations.get(&entry.zone_key) {
                Ok(record) => return Ok(record),
                Err(e) => debug!(domain = %name, zone = %entry.zone_key, error = %e, "Delegation not cached"),
            }
        }

        let record = Arc::new(self.discover_zone(&name).await?);
        self.spawn_store_delegation(name, Arc::clone(&record));
        Ok(record)
    }

    /// SOA query for `domain`, then NS query for the SOA owner.
    async fn discover_zone(&self, domain: &str) -> Result<DelegationRecord, DomainError> {
        let response = self
            .exchange_recursive(&UpstreamQuery::new(domain, RecordType::SOA))
            .await?;

        let soa_record = response
            .soa_record()
            .ok_or_else(|| DomainError::NoResult(format!("no SOA record for {}", domain)))?;
        let soa = soa_record
            .soa_info()
            .cloned()
            .ok_or_else(|| DomainError::TypeMismatch(format!("SOA answer for {} has no SOA data", domain)))?;
        let zone_key = canonical(&soa_record.name)?;

        let name_servers = self.query_ns(&zone_key).await?;
        if name_servers.is_empty() {
            return Err(DomainError::NoResult(format!("no NS records for zone {}", zone_key)));
        }

        info!(domain = %domain, zone = %zone_key, name_servers = name_servers.len(), "Zone discovered");
        Ok(DelegationRecord::new(zone_key, name_servers, soa))
    }

    async fn query_ns(&self, zone: &str) -> Result<Vec<NameServerRef>, DomainError> {
        let response = self
            .exchange_recursive(&UpstreamQuery::new(zone, RecordType::NS))
            .await?;

        Ok(response
            .ns_records()
            .iter()
            .filter_map(|r| r.ns_host().map(|host| NameServerRef::new(fqdn(host), r.ttl)))
            .collect())
    }

    fn spawn_store_delegation(self: &Arc<Self>, domain: String, record: Arc<DelegationRecord>) {
        let core = Arc::clone(self);
        tokio::spawn(async move {
            let zone_key = Arc::clone(&record.zone_key);
            let ttl = record.soa.expire;

            if let Err(e) = core.delegations.store(DelegationRecord::clone(&record)) {
                error!(zone = %zone_key, error = %e, "Failed to cache delegation");
                return;
            }

            let entry = match DomainEntry::new(&domain, zone_key, ttl) {
                Ok(entry) => entry,
                Err(e) => {
                    error!(domain = %domain, error = %e, "Invalid domain entry");
                    return;
                }
            };
            let stored = if core.domains.get(&domain).is_ok() {
                core.domains.update_delegation(entry)
            } else {
                core.domains.store(entry)
            };
            if let Err(e) = stored {
                error!(domain = %domain, error = %e, "Failed to cache domain");
            }
        });
    }

    /// NS set for `domain`, stripping leftmost labels until some zone
    /// answers with name servers.
    pub(crate) async fn resolve_ns(
        self: &Arc<Self>,
        domain: &str,
    ) -> Result<Vec<NameServerRef>, DomainError> {
        let name = canonical(domain)?;
        let labels = split_labels(&name);
        if labels.len() > self.settings.max_domain_labels {
            return Err(DomainError::BadParam(format!(
                "{} has more than {} labels",
                name, self.settings.max_domain_labels
            )));
        }

        if let Ok(record) = self.delegations.get_by_domain_name(&name) {
            return Ok(record.name_servers.to_vec());
        }

        let mut remaining = labels.as_slice();
        while remaining.len() > 1 {
            let candidate = fqdn(&remaining.join("."));
            match self.query_ns(&candidate).await {
                Ok(servers) if !servers.is_empty() => return Ok(servers),
                Ok(_) => debug!(zone = %candidate, "No NS records, trying parent"),
                Err(e) if e.is_miss() => {
                    debug!(zone = %candidate, error = %e, "NS lookup missed, trying parent")
                }
                Err(e) => return Err(e),
            }
            remaining = &remaining[1..];
        }

        Err(DomainError::NoResult(format!("no name servers found for {}", name)))
    }
}
