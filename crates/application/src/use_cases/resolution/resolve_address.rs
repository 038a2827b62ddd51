use geodns_domain::ipv4::parse_ipv4;
use geodns_domain::{DomainError, ResourceRecord};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::GeoDnsResolver;

pub struct ResolveAddressUseCase {
    resolver: Arc<dyn GeoDnsResolver>,
}

impl ResolveAddressUseCase {
    pub fn new(resolver: Arc<dyn GeoDnsResolver>) -> Self {
        Self { resolver }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        domain: &str,
        client_ip: &str,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        parse_ipv4(client_ip)?;
        let records = self.resolver.resolve_a(domain, client_ip).await?;
        debug!(domain = %domain, count = records.len(), "Resolved A records");
        Ok(records)
    }

    /// Same as `execute`, reduced to the addresses.
    pub async fn addresses(
        &self,
        domain: &str,
        client_ip: &str,
    ) -> Result<Vec<Ipv4Addr>, DomainError> {
        let records = self.execute(domain, client_ip).await?;
        Ok(records.iter().filter_map(|r| r.ipv4()).collect())
    }
}
