use crate::errors::DomainError;
use crate::ipv4;
use crate::region::RegionKey;
use std::net::Ipv4Addr;

/// Address family number for IPv4 in the client-subnet option (RFC 7871).
pub const FAMILY_IPV4: u16 = 1;

/// EDNS0 client-subnet payload, IPv4 only.
///
/// The address is kept masked to `source_prefix` bits, which is what goes
/// on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSubnet {
    pub address: Ipv4Addr,
    pub source_prefix: u8,
    pub scope_prefix: u8,
}

impl ClientSubnet {
    pub fn new(
        address: Ipv4Addr,
        source_prefix: u8,
        scope_prefix: u8,
    ) -> Result<Self, DomainError> {
        if source_prefix > 32 || scope_prefix > 32 {
            return Err(DomainError::BadParam(format!(
                "client subnet prefix out of range: source {} scope {}",
                source_prefix, scope_prefix
            )));
        }

        let masked = ipv4::network_address(ipv4::to_u32(address), source_prefix);
        Ok(Self {
            address: ipv4::from_u32(masked),
            source_prefix,
            scope_prefix,
        })
    }

    /// Region key for caching an answer that carried this option back to
    /// `client`.
    ///
    /// The server's scope decides how wide the answer is valid; a zero
    /// scope collapses to the catch-all key. The echoed address is masked
    /// to the source prefix, so a scope wider than the source is applied to
    /// the client's own address to keep the key covering it.
    pub fn region_key(&self, client: Ipv4Addr) -> RegionKey {
        let scope = self.scope_prefix.min(32);
        RegionKey {
            network: ipv4::network_address(ipv4::to_u32(client), scope),
            prefix_len: scope,
        }
    }

    /// RFC 7871 option payload: family, prefixes, truncated address.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(8);
        data.extend_from_slice(&FAMILY_IPV4.to_be_bytes());
        data.push(self.source_prefix);
        data.push(self.scope_prefix);

        let byte_len = usize::from(self.source_prefix).div_ceil(8);
        data.extend_from_slice(&self.address.octets()[..byte_len]);
        data
    }

    /// Parses an RFC 7871 option payload. Non-IPv4 families are rejected.
    pub fn from_wire(data: &[u8]) -> Result<Self, DomainError> {
        if data.len() < 4 {
            return Err(DomainError::BadParam(
                "client subnet option shorter than 4 bytes".to_string(),
            ));
        }

        let family = u16::from_be_bytes([data[0], data[1]]);
        if family != FAMILY_IPV4 {
            return Err(DomainError::BadParam(format!(
                "unsupported client subnet family {}",
                family
            )));
        }

        let source_prefix = data[2];
        let scope_prefix = data[3];
        let byte_len = usize::from(source_prefix.min(32)).div_ceil(8);
        let addr_bytes = &data[4..];
        if addr_bytes.len() < byte_len {
            return Err(DomainError::BadParam(
                "client subnet address truncated".to_string(),
            ));
        }

        let mut octets = [0u8; 4];
        octets[..byte_len].copy_from_slice(&addr_bytes[..byte_len]);
        Self::new(Ipv4Addr::from(octets), source_prefix, scope_prefix)
    }
}
