use async_trait::async_trait;
use geodns_domain::{DelegationRecord, DomainError, NameServerRef, ResourceRecord};

#[async_trait]
pub trait GeoDnsResolver: Send + Sync {
    /// A records for `domain` as seen from `client_ip`, following CNAMEs.
    async fn resolve_a(
        &self,
        domain: &str,
        client_ip: &str,
    ) -> Result<Vec<ResourceRecord>, DomainError>;

    /// NS records of the closest enclosing zone.
    async fn resolve_ns(&self, domain: &str) -> Result<Vec<NameServerRef>, DomainError>;

    /// Delegation (SOA plus NS set) of the zone holding `domain`.
    async fn soa_record(&self, domain: &str) -> Result<DelegationRecord, DomainError>;
}
