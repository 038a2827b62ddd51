//! GeoDNS Domain Layer
pub mod client_subnet;
pub mod config;
pub mod delegation;
pub mod dns_record;
pub mod domain_name;
pub mod errors;
pub mod ipv4;
pub mod region;

pub use client_subnet::ClientSubnet;
pub use config::{
    BackendConfig, Config, ConfigError, LoggingConfig, ResolverConfig, UpstreamConfig,
    UpstreamProtocol,
};
pub use delegation::{DelegationRecord, NameServerRef};
pub use dns_record::{RecordData, RecordType, ResourceRecord, SoaInfo, CLASS_IN};
pub use errors::{DomainError, ErrorKind};
pub use region::{RegionEntry, RegionKey};
