use crate::dns_record::SoaInfo;
use std::sync::Arc;

/// One authoritative name server of a zone, as learned from an NS record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameServerRef {
    pub host: Arc<str>,
    pub ttl: u32,
}

impl NameServerRef {
    pub fn new(host: impl Into<Arc<str>>, ttl: u32) -> Self {
        Self {
            host: host.into(),
            ttl,
        }
    }
}

/// NS set plus SOA metadata for a zone.
///
/// `zone_key` is the owner name of the SOA answer, not the queried domain;
/// every domain under the zone shares one record. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationRecord {
    pub zone_key: Arc<str>,
    pub name_servers: Arc<[NameServerRef]>,
    pub soa: SoaInfo,
}

impl DelegationRecord {
    pub fn new(
        zone_key: impl Into<Arc<str>>,
        name_servers: Vec<NameServerRef>,
        soa: SoaInfo,
    ) -> Self {
        Self {
            zone_key: zone_key.into(),
            name_servers: Arc::from(name_servers),
            soa,
        }
    }

    pub fn name_server_hosts(&self) -> impl Iterator<Item = &str> {
        self.name_servers.iter().map(|ns| ns.host.as_ref())
    }
}
