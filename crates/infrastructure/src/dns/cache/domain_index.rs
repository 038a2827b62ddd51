use super::region_index::RegionIndex;
use geodns_domain::domain_name::canonical;
use geodns_domain::DomainError;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// A known domain: the zone it belongs to and its region data.
///
/// The region index is created on first need. Every copy of an entry that
/// went through [`DomainIndex`] shares the same slot, so a delegation
/// refresh never drops learned regions.
#[derive(Debug, Clone)]
pub struct DomainEntry {
    pub domain_name: Arc<str>,
    pub zone_key: Arc<str>,
    pub ttl: u32,
    regions: Arc<OnceLock<Arc<RegionIndex>>>,
}

impl DomainEntry {
    pub fn new(
        domain_name: &str,
        zone_key: impl Into<Arc<str>>,
        ttl: u32,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            domain_name: Arc::from(canonical(domain_name)?),
            zone_key: zone_key.into(),
            ttl,
            regions: Arc::new(OnceLock::new()),
        })
    }

    pub fn region_index(&self) -> Option<Arc<RegionIndex>> {
        self.regions.get().cloned()
    }

    pub fn ensure_region_index(&self) -> Arc<RegionIndex> {
        Arc::clone(self.regions.get_or_init(|| Arc::new(RegionIndex::new())))
    }

    fn adopt_regions(&mut self, existing: &DomainEntry) {
        self.regions = Arc::clone(&existing.regions);
    }
}

/// Name-ordered index of domain entries.
#[derive(Default)]
pub struct DomainIndex {
    entries: RwLock<BTreeMap<Arc<str>, Arc<DomainEntry>>>,
}

impl DomainIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<Arc<str>, Arc<DomainEntry>>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<Arc<str>, Arc<DomainEntry>>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, domain_name: &str) -> Result<Arc<DomainEntry>, DomainError> {
        let name = canonical(domain_name)?;
        self.read()
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("domain {} not cached", name)))
    }

    /// Inserts `entry` unless the name is already known.
    ///
    /// Returns true when a new entry was inserted. An existing entry is
    /// kept as is, region index included.
    pub fn store(&self, mut entry: DomainEntry) -> Result<bool, DomainError> {
        match self.get(&entry.domain_name) {
            Ok(existing) => {
                entry.adopt_regions(&existing);
                debug!(domain = %entry.domain_name, "Domain already cached");
                return Ok(false);
            }
            Err(e) if e.is_miss() => {}
            Err(e) => return Err(e),
        }

        // Another writer may have inserted between the check and here.
        let mut entries = self.write();
        match entries.entry(Arc::clone(&entry.domain_name)) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                debug!(domain = %entry.domain_name, zone = %entry.zone_key, "Domain cached");
                slot.insert(Arc::new(entry));
                Ok(true)
            }
        }
    }

    /// Replaces the delegation data of an existing entry, keeping its
    /// region index.
    pub fn update_delegation(&self, mut entry: DomainEntry) -> Result<bool, DomainError> {
        let mut entries = self.write();
        let existing = entries.get(entry.domain_name.as_ref()).ok_or_else(|| {
            DomainError::NotFound(format!("domain {} not cached", entry.domain_name))
        })?;

        entry.adopt_regions(existing);
        entries.insert(Arc::clone(&entry.domain_name), Arc::new(entry));
        Ok(true)
    }

    pub fn delete(&self, domain_name: &str) -> Result<(), DomainError> {
        let name = canonical(domain_name)?;
        self.write()
            .remove(name.as_str())
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("domain {} not cached", name)))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn domain_names(&self) -> Vec<Arc<str>> {
        self.read().keys().cloned().collect()
    }
}
