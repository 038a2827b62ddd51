use async_trait::async_trait;
use geodns_application::ports::{DnsExchange, UpstreamQuery, UpstreamResponse};
use geodns_domain::{ClientSubnet, DomainError, RecordType};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Mock DnsExchange
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeCall {
    pub name: String,
    pub record_type: RecordType,
    pub server: String,
    pub client_subnet: Option<ClientSubnet>,
}

/// Answers by (name, type). Unknown questions get an empty answer, the way
/// a real server answers NOERROR/NODATA.
#[derive(Clone, Default)]
pub struct MockDnsExchange {
    answers: Arc<RwLock<HashMap<(String, RecordType), UpstreamResponse>>>,
    failing_servers: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<ExchangeCall>>>,
}

fn key(name: &str, record_type: RecordType) -> (String, RecordType) {
    let name = name.trim_end_matches('.').to_ascii_lowercase();
    (format!("{}.", name), record_type)
}

impl MockDnsExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_answer(&self, name: &str, record_type: RecordType, response: UpstreamResponse) {
        self.answers
            .write()
            .await
            .insert(key(name, record_type), response);
    }

    pub async fn fail_server(&self, server: &str) {
        self.failing_servers.write().await.insert(server.to_string());
    }

    pub async fn calls(&self) -> Vec<ExchangeCall> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    pub async fn calls_of(&self, record_type: RecordType) -> Vec<ExchangeCall> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.record_type == record_type)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DnsExchange for MockDnsExchange {
    async fn exchange(
        &self,
        query: &UpstreamQuery,
        server: &str,
    ) -> Result<UpstreamResponse, DomainError> {
        self.calls.write().await.push(ExchangeCall {
            name: query.name.to_string(),
            record_type: query.record_type,
            server: server.to_string(),
            client_subnet: query.client_subnet,
        });

        if self.failing_servers.read().await.contains(server) {
            return Err(DomainError::TransportTimeout(format!("{} timed out", server)));
        }

        Ok(self
            .answers
            .read()
            .await
            .get(&key(&query.name, query.record_type))
            .cloned()
            .unwrap_or_default())
    }
}
