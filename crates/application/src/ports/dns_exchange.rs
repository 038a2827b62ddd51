use async_trait::async_trait;
use geodns_domain::domain_name::same_name;
use geodns_domain::{ClientSubnet, DomainError, RecordType, ResourceRecord};
use std::net::Ipv4Addr;
use std::sync::Arc;

/// One question sent to an upstream server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamQuery {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub client_subnet: Option<ClientSubnet>,
}

impl UpstreamQuery {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            client_subnet: None,
        }
    }

    pub fn with_client_subnet(mut self, subnet: ClientSubnet) -> Self {
        self.client_subnet = Some(subnet);
        self
    }
}

/// Parsed upstream answer, limited to the record types this engine uses.
#[derive(Debug, Clone, Default)]
pub struct UpstreamResponse {
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    /// Client-subnet option echoed back by the server, if any.
    pub client_subnet: Option<ClientSubnet>,
    pub truncated: bool,
}

impl UpstreamResponse {
    /// A records owned by `name`.
    pub fn a_records(&self, name: &str) -> Vec<ResourceRecord> {
        self.answers_for(name, RecordType::A)
    }

    /// CNAME records owned by `name`.
    pub fn cname_records(&self, name: &str) -> Vec<ResourceRecord> {
        self.answers_for(name, RecordType::CNAME)
    }

    pub fn addresses(&self, name: &str) -> Vec<Ipv4Addr> {
        self.a_records(name)
            .iter()
            .filter_map(|r| r.ipv4())
            .collect()
    }

    /// NS records from the answer section, whatever their owner.
    pub fn ns_records(&self) -> Vec<ResourceRecord> {
        self.answers
            .iter()
            .filter(|r| r.record_type() == RecordType::NS)
            .cloned()
            .collect()
    }

    /// First SOA record, looked up in answers then authority.
    pub fn soa_record(&self) -> Option<&ResourceRecord> {
        self.answers
            .iter()
            .chain(self.authority.iter())
            .find(|r| r.record_type() == RecordType::SOA)
    }

    fn answers_for(&self, name: &str, record_type: RecordType) -> Vec<ResourceRecord> {
        self.answers
            .iter()
            .filter(|r| r.record_type() == record_type && same_name(&r.name, name))
            .cloned()
            .collect()
    }
}

/// Sends one query to one server and returns the parsed answer.
///
/// `server` is "host", "host:port" or "ip:port"; host names are resolved
/// by the implementation.
#[async_trait]
pub trait DnsExchange: Send + Sync {
    async fn exchange(
        &self,
        query: &UpstreamQuery,
        server: &str,
    ) -> Result<UpstreamResponse, DomainError>;
}
