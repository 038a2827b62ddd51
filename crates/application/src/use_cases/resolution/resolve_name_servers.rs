use geodns_domain::{DomainError, NameServerRef};
use std::sync::Arc;
use tracing::instrument;

use crate::ports::GeoDnsResolver;

pub struct ResolveNameServersUseCase {
    resolver: Arc<dyn GeoDnsResolver>,
}

impl ResolveNameServersUseCase {
    pub fn new(resolver: Arc<dyn GeoDnsResolver>) -> Self {
        Self { resolver }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<Vec<NameServerRef>, DomainError> {
        self.resolver.resolve_ns(domain).await
    }
}
