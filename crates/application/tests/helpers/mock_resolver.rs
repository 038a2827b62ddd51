use async_trait::async_trait;
use geodns_application::ports::GeoDnsResolver;
use geodns_domain::{DelegationRecord, DomainError, NameServerRef, ResourceRecord};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Mock GeoDnsResolver
// ============================================================================

#[derive(Clone, Default)]
pub struct MockGeoDnsResolver {
    a_answers: Arc<RwLock<HashMap<String, Vec<ResourceRecord>>>>,
    ns_answers: Arc<RwLock<HashMap<String, Vec<NameServerRef>>>>,
    delegations: Arc<RwLock<HashMap<String, DelegationRecord>>>,
    calls: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockGeoDnsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_a(&self, domain: &str, records: Vec<ResourceRecord>) {
        self.a_answers
            .write()
            .await
            .insert(domain.to_string(), records);
    }

    pub async fn set_ns(&self, domain: &str, records: Vec<NameServerRef>) {
        self.ns_answers
            .write()
            .await
            .insert(domain.to_string(), records);
    }

    pub async fn set_delegation(&self, domain: &str, delegation: DelegationRecord) {
        self.delegations
            .write()
            .await
            .insert(domain.to_string(), delegation);
    }

    pub async fn calls(&self) -> Vec<(String, String)> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl GeoDnsResolver for MockGeoDnsResolver {
    async fn resolve_a(
        &self,
        domain: &str,
        client_ip: &str,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        self.calls
            .write()
            .await
            .push((domain.to_string(), client_ip.to_string()));

        self.a_answers
            .read()
            .await
            .get(domain)
            .cloned()
            .ok_or_else(|| DomainError::Unknown(format!("no answer for {}", domain)))
    }

    async fn resolve_ns(&self, domain: &str) -> Result<Vec<NameServerRef>, DomainError> {
        self.ns_answers
            .read()
            .await
            .get(domain)
            .cloned()
            .ok_or_else(|| DomainError::NoResult(domain.to_string()))
    }

    async fn soa_record(&self, domain: &str) -> Result<DelegationRecord, DomainError> {
        self.delegations
            .read()
            .await
            .get(domain)
            .cloned()
            .ok_or_else(|| DomainError::NoResult(domain.to_string()))
    }
}
