use super::core::{BackendAnswer, ResolverCore};
use crate::dns::cache::DomainEntry;
use crate::dns::refresh_scheduler::BackendSource;
use geodns_application::ports::geo_record_store::DEFAULT_REGION_ID;
use geodns_application::ports::{GeoRecordStore, StoredRecordSet};
use geodns_domain::domain_name::fqdn;
use geodns_domain::ipv4::{cidr_prefix_for_range, parse_ipv4};
use geodns_domain::{DomainError, ErrorKind, RecordType, RegionKey, ResourceRecord};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::debug;

impl ResolverCore {
    /// Domain, then the client's region, then the records of that pair.
    /// A region without records of its own falls back to the default region.
    pub(crate) async fn fetch_from_store(
        self: &Arc<Self>,
        domain: &str,
        client: Ipv4Addr,
    ) -> Result<BackendAnswer, DomainError> {
        let store: &Arc<dyn GeoRecordStore> = self.store.as_ref().ok_or_else(|| {
            DomainError::Unknown(format!("no record store configured for {}", domain))
        })?;

        let domain_id = store.domain_id(domain).await?;
        let region = store.region_for_ip(u32::from(client)).await?;

        let set = match store.records(domain_id, region.region_id).await {
            Ok(set) => set,
            Err(e) if e.kind() == ErrorKind::NoResult && region.region_id != DEFAULT_REGION_ID => {
                debug!(domain = %domain, region_id = region.region_id, "No region records, using default region");
                store.records(domain_id, DEFAULT_REGION_ID).await?
            }
            Err(e) => return Err(e),
        };

        let records = to_resource_records(domain, &set)?;
        let key = RegionKey::new(
            region.ip_start,
            cidr_prefix_for_range(region.ip_start, region.ip_end),
        )?;

        let zone_key = self
            .backend
            .local_zone_for(domain)
            .map(fqdn)
            .unwrap_or_else(|| fqdn(domain));
        let owner = DomainEntry::new(domain, zone_key, set.ttl)?;

        self.spawn_populate(
            Arc::from(domain),
            client,
            key,
            records.clone(),
            BackendSource::RecordStore,
            Some(owner),
        );

        Ok(BackendAnswer {
            records,
            record_type: set.record_type,
        })
    }
}

fn to_resource_records(
    domain: &str,
    set: &StoredRecordSet,
) -> Result<Vec<ResourceRecord>, DomainError> {
    let records = set
        .targets
        .iter()
        .map(|target| -> Result<ResourceRecord, DomainError> {
            let record = match set.record_type {
                RecordType::A => ResourceRecord::a(domain, set.ttl, parse_ipv4(target)?),
                RecordType::CNAME => ResourceRecord::cname(domain, set.ttl, fqdn(target)),
                other => {
                    return Err(DomainError::TypeMismatch(format!(
                        "stored {} record for {} cannot answer an A lookup",
                        other, domain
                    )))
                }
            };
            Ok(record.with_class(set.class))
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    if records.is_empty() {
        return Err(DomainError::NoResult(format!("empty record set for {}", domain)));
    }
    Ok(records)
}
