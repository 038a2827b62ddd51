use super::core::{BackendAnswer, ResolverCore};
use crate::dns::refresh_scheduler::BackendSource;
use geodns_application::ports::{UpstreamQuery, UpstreamResponse};
use geodns_domain::{
    ClientSubnet, DelegationRecord, DomainError, ErrorKind, RecordType, RegionKey,
};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, warn};

impl ResolverCore {
    /// A query against the zone's name servers, tagged with the client's
    /// subnet. The answer is cached under the scope the server echoed back.
    pub(crate) async fn fetch_from_upstream(
        self: &Arc<Self>,
        domain: &str,
        client: Ipv4Addr,
    ) -> Result<BackendAnswer, DomainError> {
        let delegation = self.soa_record(domain).await.map_err(|e| match e.kind() {
            ErrorKind::BadParam => e,
            _ => DomainError::Unknown(format!("no delegation for {}: {}", domain, e)),
        })?;

        let subnet = ClientSubnet::new(
            client,
            self.settings.edns_source_mask,
            self.settings.edns_source_scope,
        )?;
        let query = UpstreamQuery::new(domain, RecordType::A).with_client_subnet(subnet);
        let response = self.exchange_authoritative(&delegation, &query).await?;

        let (records, record_type) = {
            let addresses = response.a_records(domain);
            if !addresses.is_empty() {
                (addresses, RecordType::A)
            } else {
                let aliases = response.cname_records(domain);
                if aliases.is_empty() {
                    return Err(DomainError::NoResult(format!(
                        "no A or CNAME answer for {}",
                        domain
                    )));
                }
                (aliases, RecordType::CNAME)
            }
        };

        let key = response
            .client_subnet
            .map(|echoed| echoed.region_key(client))
            .unwrap_or(RegionKey::CATCH_ALL);

        self.spawn_populate(
            Arc::from(domain),
            client,
            key,
            records.clone(),
            BackendSource::Upstream,
            None,
        );

        Ok(BackendAnswer {
            records,
            record_type,
        })
    }

    /// Sends `query` to each name server of the zone in turn until one
    /// answers. Only transport failures move on to the next server.
    pub(crate) async fn exchange_authoritative(
        &self,
        delegation: &DelegationRecord,
        query: &UpstreamQuery,
    ) -> Result<UpstreamResponse, DomainError> {
        let mut last_error = None;

        for host in delegation.name_server_hosts() {
            let server = format!("{}:{}", host.trim_end_matches('.'), self.name_server_port);
            match self.exchange.exchange(query, &server).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transport() || e.kind() == ErrorKind::Unknown => {
                    warn!(server = %server, zone = %delegation.zone_key, error = %e, "Name server failed");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            DomainError::NoResult(format!("zone {} has no name servers", delegation.zone_key))
        }))
    }

    /// Sends `query` to the recursive resolvers in order until one answers.
    pub(crate) async fn exchange_recursive(
        &self,
        query: &UpstreamQuery,
    ) -> Result<UpstreamResponse, DomainError> {
        let mut last_error = None;

        for server in &self.recursive_resolvers {
            match self.exchange.exchange(query, server).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transport() || e.kind() == ErrorKind::Unknown => {
                    debug!(server = %server, error = %e, "Recursive resolver failed");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            DomainError::Unknown("no recursive resolvers configured".to_string())
        }))
    }
}
