use geodns_domain::domain_name::canonical;
use geodns_domain::{DelegationRecord, DomainError};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Zone key -> NS set and SOA metadata, shared by every domain in the zone.
#[derive(Default)]
pub struct DelegationCache {
    records: RwLock<BTreeMap<Arc<str>, Arc<DelegationRecord>>>,
}

impl DelegationCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<Arc<str>, Arc<DelegationRecord>>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<Arc<str>, Arc<DelegationRecord>>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, zone_key: &str) -> Result<Arc<DelegationRecord>, DomainError> {
        self.read()
            .get(zone_key)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("zone {} not cached", zone_key)))
    }

    /// Looks a zone up by name after FQDN canonicalisation.
    pub fn get_by_domain_name(
        &self,
        domain_name: &str,
    ) -> Result<Arc<DelegationRecord>, DomainError> {
        let name = canonical(domain_name)?;
        self.get(&name)
    }

    /// Inserts the record unless its zone is already cached.
    /// Returns true when inserted.
    pub fn store(&self, record: DelegationRecord) -> Result<bool, DomainError> {
        if self.get(&record.zone_key).is_ok() {
            return Ok(false);
        }

        let mut records = self.write();
        if records.contains_key(record.zone_key.as_ref()) {
            return Ok(false);
        }

        debug!(
            zone = %record.zone_key,
            name_servers = record.name_servers.len(),
            "Delegation cached"
        );
        records.insert(Arc::clone(&record.zone_key), Arc::new(record));
        Ok(true)
    }

    pub fn delete(&self, zone_key: &str) -> Result<(), DomainError> {
        self.write()
            .remove(zone_key)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("zone {} not cached", zone_key)))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
