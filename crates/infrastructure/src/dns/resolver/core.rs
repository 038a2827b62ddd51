use super::builder::GeoResolverBuilder;
use crate::dns::cache::{DelegationCache, DomainIndex};
use crate::dns::refresh_scheduler::{BackendSource, RefreshScheduler};
use async_trait::async_trait;
use geodns_application::ports::{DnsExchange, GeoDnsResolver, GeoRecordStore};
use geodns_domain::domain_name::canonical;
use geodns_domain::ipv4::parse_ipv4;
use geodns_domain::{
    BackendConfig, DelegationRecord, DomainError, ErrorKind, NameServerRef, RecordType,
    ResolverConfig, ResourceRecord,
};
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// State shared by the resolver, its background tasks and its refreshes.
pub(crate) struct ResolverCore {
    pub(crate) domains: Arc<DomainIndex>,
    pub(crate) delegations: Arc<DelegationCache>,
    pub(crate) exchange: Arc<dyn DnsExchange>,
    pub(crate) store: Option<Arc<dyn GeoRecordStore>>,
    pub(crate) settings: ResolverConfig,
    pub(crate) backend: BackendConfig,
    pub(crate) recursive_resolvers: Vec<String>,
    pub(crate) name_server_port: u16,
    pub(crate) refresh: RefreshScheduler,
}

/// Records one backend produced for one name, all of one type.
#[derive(Debug, Clone)]
pub(crate) struct BackendAnswer {
    pub(crate) records: Vec<ResourceRecord>,
    pub(crate) record_type: RecordType,
}

impl BackendAnswer {
    /// The A records, or `NotValid` with the alias target when the backend
    /// answered with a CNAME.
    fn into_addresses(self) -> Result<Vec<ResourceRecord>, DomainError> {
        match self.record_type {
            RecordType::CNAME => {
                let target = self
                    .records
                    .first()
                    .and_then(|r| r.cname_target())
                    .ok_or_else(|| DomainError::NoResult("CNAME answer without target".into()))?;
                Err(DomainError::NotValid(target.to_string()))
            }
            _ => Ok(self.records),
        }
    }
}

impl ResolverCore {
    pub(crate) fn source_for(&self, domain: &str) -> BackendSource {
        if self.store.is_some() && self.backend.is_local(domain) {
            BackendSource::RecordStore
        } else {
            BackendSource::Upstream
        }
    }

    pub(crate) async fn fetch(
        self: &Arc<Self>,
        source: BackendSource,
        domain: &str,
        client: std::net::Ipv4Addr,
    ) -> Result<BackendAnswer, DomainError> {
        match source {
            BackendSource::RecordStore => self.fetch_from_store(domain, client).await,
            BackendSource::Upstream => self.fetch_from_upstream(domain, client).await,
        }
    }

    /// Walks the CNAME chain from `domain` until an A answer, one hop per
    /// iteration. `cname_chain_length` hops are followed at most; a backend
    /// miss retries the same name within that budget.
    pub(crate) async fn resolve_a(
        self: &Arc<Self>,
        domain: &str,
        client_ip: &str,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let client = parse_ipv4(client_ip)?;
        let mut dst = canonical(domain)?;
        let max_hops = self.settings.cname_chain_length;
        let mut last_miss = None;

        for hop in 0..=max_hops {
            match self.probe_cache(&dst, client) {
                Ok(records) => {
                    debug!(domain = %dst, hop, "Region cache hit");
                    return Ok(records);
                }
                Err(DomainError::CnameRedirect(target)) => {
                    debug!(domain = %dst, target = %target, hop, "Following cached CNAME");
                    dst = canonical(&target)?;
                    last_miss = None;
                    continue;
                }
                Err(e) if e.is_miss() => {
                    debug!(domain = %dst, client = %client, error = %e, "Region cache miss");
                }
                Err(e) => {
                    error!(domain = %dst, kind = %e.kind(), error = %e, "Unusable cache entry, treating as miss");
                }
            }

            let source = self.source_for(&dst);
            debug!(domain = %dst, client = %client, source = ?source, "Querying backend");

            match self
                .fetch(source, &dst, client)
                .await
                .and_then(BackendAnswer::into_addresses)
            {
                Ok(records) => return Ok(records),
                Err(DomainError::NotValid(target)) => {
                    debug!(domain = %dst, target = %target, hop, "Following CNAME");
                    dst = canonical(&target)?;
                    last_miss = None;
                }
                Err(e) if e.kind() == ErrorKind::NoResult => {
                    debug!(domain = %dst, error = %e, "Backend had no usable result");
                    last_miss = Some(e);
                }
                Err(e) => {
                    if e.kind() != ErrorKind::BadParam {
                        error!(domain = %dst, error = %e, "Resolution failed");
                    }
                    return Err(e);
                }
            }
        }

        // A chain that ends on a backend miss reports the miss itself.
        Err(last_miss.unwrap_or(DomainError::ChainTooLong(max_hops)))
    }
}

/// Geo-aware resolver over the domain, region and delegation indices.
#[derive(Clone)]
pub struct GeoResolver {
    pub(crate) core: Arc<ResolverCore>,
}

impl GeoResolver {
    pub fn builder(exchange: Arc<dyn DnsExchange>) -> GeoResolverBuilder {
        GeoResolverBuilder::new(exchange)
    }

    pub fn domains(&self) -> &Arc<DomainIndex> {
        &self.core.domains
    }

    pub fn delegations(&self) -> &Arc<DelegationCache> {
        &self.core.delegations
    }

    /// A records for `domain` as seen by `client_ip`.
    ///
    /// Intermediate CNAME hops are never returned; the answer is either a
    /// non-empty A record set or one error.
    #[instrument(skip(self))]
    pub async fn resolve_a(
        &self,
        domain: &str,
        client_ip: &str,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        self.core.resolve_a(domain, client_ip).await
    }

    /// NS set of the closest enclosing zone, stripping leftmost labels
    /// until a zone answers.
    #[instrument(skip(self))]
    pub async fn resolve_ns(&self, domain: &str) -> Result<Vec<NameServerRef>, DomainError> {
        self.core.resolve_ns(domain).await
    }

    #[instrument(skip(self))]
    pub async fn soa_record(&self, domain: &str) -> Result<Arc<DelegationRecord>, DomainError> {
        self.core.soa_record(domain).await
    }
}

#[async_trait]
impl GeoDnsResolver for GeoResolver {
    async fn resolve_a(
        &self,
        domain: &str,
        client_ip: &str,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        GeoResolver::resolve_a(self, domain, client_ip).await
    }

    async fn resolve_ns(&self, domain: &str) -> Result<Vec<NameServerRef>, DomainError> {
        GeoResolver::resolve_ns(self, domain).await
    }

    async fn soa_record(&self, domain: &str) -> Result<DelegationRecord, DomainError> {
        let record = GeoResolver::soa_record(self, domain).await?;
        Ok(DelegationRecord::clone(&record))
    }
}
