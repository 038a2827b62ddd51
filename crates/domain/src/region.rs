use crate::dns_record::{RecordType, ResourceRecord};
use crate::errors::DomainError;
use crate::ipv4;
use chrono::{DateTime, Utc};
use ipnetwork::Ipv4Network;
use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Exact key of a region inside one domain's region index.
///
/// The network address is always stored masked to `prefix_len` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionKey {
    pub network: u32,
    pub prefix_len: u8,
}

impl RegionKey {
    /// Key that covers every client address.
    pub const CATCH_ALL: RegionKey = RegionKey {
        network: 0,
        prefix_len: 0,
    };

    pub fn new(addr: u32, prefix_len: u8) -> Result<Self, DomainError> {
        if prefix_len > 32 {
            return Err(DomainError::BadParam(format!(
                "prefix length {} exceeds 32",
                prefix_len
            )));
        }
        Ok(Self {
            network: ipv4::network_address(addr, prefix_len),
            prefix_len,
        })
    }

    pub fn is_catch_all(&self) -> bool {
        self.prefix_len == 0
    }

    pub fn contains(&self, addr: u32) -> bool {
        ipv4::network_address(addr, self.prefix_len) == self.network
    }

    pub fn to_network(&self) -> Result<Ipv4Network, DomainError> {
        Ipv4Network::new(Ipv4Addr::from(self.network), self.prefix_len)
            .map_err(|e| DomainError::BadParam(e.to_string()))
    }
}

impl From<Ipv4Network> for RegionKey {
    fn from(net: Ipv4Network) -> Self {
        Self {
            network: u32::from(net.network()),
            prefix_len: net.prefix(),
        }
    }
}

impl std::str::FromStr for RegionKey {
    type Err = DomainError;

    /// Accepts "a.b.c.d/len" or a bare address (treated as /32).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let net: Ipv4Network = s
            .trim()
            .parse()
            .map_err(|_| DomainError::BadParam(format!("{} is not an IPv4 network", s)))?;
        Ok(net.into())
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", Ipv4Addr::from(self.network), self.prefix_len)
    }
}

/// Records judged appropriate for clients inside one network prefix.
///
/// `records` is never empty; type and TTL come from the first record.
/// Entries are replaced whole, never patched in place.
#[derive(Debug, Clone)]
pub struct RegionEntry {
    pub key: RegionKey,
    pub records: Arc<[ResourceRecord]>,
    pub record_type: RecordType,
    pub ttl: u32,
    pub last_updated: DateTime<Utc>,
}

impl RegionEntry {
    pub fn new(
        records: Vec<ResourceRecord>,
        network: u32,
        prefix_len: u8,
    ) -> Result<Self, DomainError> {
        let first = records.first().ok_or_else(|| {
            DomainError::BadParam("region entry needs at least one record".to_string())
        })?;
        let record_type = first.record_type();
        let ttl = first.ttl;

        Ok(Self {
            key: RegionKey::new(network, prefix_len)?,
            records: Arc::from(records),
            record_type,
            ttl,
            last_updated: Utc::now(),
        })
    }

    pub fn catch_all(records: Vec<ResourceRecord>) -> Result<Self, DomainError> {
        Self::new(records, RegionKey::CATCH_ALL.network, RegionKey::CATCH_ALL.prefix_len)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Target of the first CNAME record, if this is an alias entry.
    pub fn cname_target(&self) -> Option<&str> {
        self.records.first().and_then(|r| r.cname_target())
    }
}
