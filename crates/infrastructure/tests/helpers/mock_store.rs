use async_trait::async_trait;
use geodns_application::ports::{GeoRecordStore, StoredRecordSet, StoredRegion};
use geodns_domain::{DomainError, RecordType, CLASS_IN};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Mock GeoRecordStore
// ============================================================================

#[derive(Clone, Default)]
pub struct MockGeoRecordStore {
    domains: Arc<RwLock<HashMap<String, i64>>>,
    regions: Arc<RwLock<Vec<StoredRegion>>>,
    records: Arc<RwLock<HashMap<(i64, i64), StoredRecordSet>>>,
    record_lookups: Arc<RwLock<Vec<(i64, i64)>>>,
}

impl MockGeoRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_domain(&self, name: &str, id: i64) {
        let name = name.trim_end_matches('.').to_ascii_lowercase();
        self.domains.write().await.insert(name, id);
    }

    pub async fn add_region(&self, region_id: i64, start: &str, end: &str) {
        let ip_start = u32::from(start.parse::<std::net::Ipv4Addr>().unwrap());
        let ip_end = u32::from(end.parse::<std::net::Ipv4Addr>().unwrap());
        self.regions.write().await.push(StoredRegion {
            region_id,
            ip_start,
            ip_end,
        });
    }

    pub async fn add_records(
        &self,
        domain_id: i64,
        region_id: i64,
        record_type: RecordType,
        ttl: u32,
        targets: &[&str],
    ) {
        self.records.write().await.insert(
            (domain_id, region_id),
            StoredRecordSet {
                record_type,
                class: CLASS_IN,
                ttl,
                targets: targets.iter().map(|t| Arc::from(*t)).collect(),
            },
        );
    }

    /// (domain_id, region_id) pairs asked for, in order.
    pub async fn record_lookups(&self) -> Vec<(i64, i64)> {
        self.record_lookups.read().await.clone()
    }
}

#[async_trait]
impl GeoRecordStore for MockGeoRecordStore {
    async fn domain_id(&self, name: &str) -> Result<i64, DomainError> {
        let name = name.trim_end_matches('.').to_ascii_lowercase();
        self.domains
            .read()
            .await
            .get(&name)
            .copied()
            .ok_or_else(|| DomainError::NoResult(format!("unknown domain {}", name)))
    }

    async fn region_for_ip(&self, addr: u32) -> Result<StoredRegion, DomainError> {
        self.regions
            .read()
            .await
            .iter()
            .filter(|r| r.ip_start <= addr && addr <= r.ip_end)
            .min_by_key(|r| r.ip_end - r.ip_start)
            .copied()
            .ok_or_else(|| DomainError::NoResult(format!("no region for {}", addr)))
    }

    async fn records(
        &self,
        domain_id: i64,
        region_id: i64,
    ) -> Result<StoredRecordSet, DomainError> {
        self.record_lookups.write().await.push((domain_id, region_id));
        self.records
            .read()
            .await
            .get(&(domain_id, region_id))
            .cloned()
            .ok_or_else(|| DomainError::NoResult("no records".to_string()))
    }
}
