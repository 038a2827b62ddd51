use super::core::ResolverCore;
use geodns_domain::{DomainError, RecordType, ResourceRecord};
use std::net::Ipv4Addr;
use tracing::debug;

/// Full-length mask: ask the region index for the most specific match.
const SEARCH_MASK: u8 = 32;

impl ResolverCore {
    /// Cached A records of `domain` for `client`.
    ///
    /// A cached alias comes back as `CnameRedirect` carrying the target.
    /// `NotFound` means nothing is cached for this client yet; an entry of
    /// any other type is a `TypeMismatch`.
    pub(crate) fn probe_cache(
        &self,
        domain: &str,
        client: Ipv4Addr,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let entry = self.domains.get(domain)?;

        let Some(regions) = entry.region_index() else {
            entry.ensure_region_index();
            debug!(domain = %domain, "Domain cached without region data");
            return Err(DomainError::NotFound(format!(
                "{} has no region data yet",
                domain
            )));
        };

        let region = regions.find(u32::from(client), SEARCH_MASK)?;

        match (region.record_type, region.cname_target()) {
            (RecordType::A, _) => Ok(region.records.to_vec()),
            (RecordType::CNAME, Some(target)) => {
                Err(DomainError::CnameRedirect(target.to_string()))
            }
            (other, _) => Err(DomainError::TypeMismatch(format!(
                "region {} of {} holds {} records",
                region.key, domain, other
            ))),
        }
    }
}
