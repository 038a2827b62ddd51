use async_trait::async_trait;
use geodns_domain::{DomainError, RecordType};
use std::sync::Arc;

/// Identifier of the default region used when a client's region has no
/// records of its own.
pub const DEFAULT_REGION_ID: i64 = 0;

/// IPv4 range of one region, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredRegion {
    pub region_id: i64,
    pub ip_start: u32,
    pub ip_end: u32,
}

/// Records of one (domain, region) pair. Type, class and TTL are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecordSet {
    pub record_type: RecordType,
    pub class: u16,
    pub ttl: u32,
    pub targets: Vec<Arc<str>>,
}

/// Relational source of geo-routed records.
///
/// Every lookup returns `DomainError::NoResult` when nothing matches.
#[async_trait]
pub trait GeoRecordStore: Send + Sync {
    async fn domain_id(&self, name: &str) -> Result<i64, DomainError>;

    async fn region_for_ip(&self, addr: u32) -> Result<StoredRegion, DomainError>;

    async fn records(
        &self,
        domain_id: i64,
        region_id: i64,
    ) -> Result<StoredRecordSet, DomainError>;
}
