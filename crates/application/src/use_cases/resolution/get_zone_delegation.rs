use geodns_domain::{DelegationRecord, DomainError};
use std::sync::Arc;
use tracing::instrument;

use crate::ports::GeoDnsResolver;

pub struct GetZoneDelegationUseCase {
    resolver: Arc<dyn GeoDnsResolver>,
}

impl GetZoneDelegationUseCase {
    pub fn new(resolver: Arc<dyn GeoDnsResolver>) -> Self {
        Self { resolver }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<DelegationRecord, DomainError> {
        self.resolver.soa_record(domain).await
    }
}
