pub mod dns_exchange;
pub mod geo_dns_resolver;
pub mod geo_record_store;

pub use dns_exchange::{DnsExchange, UpstreamQuery, UpstreamResponse};
pub use geo_dns_resolver::GeoDnsResolver;
pub use geo_record_store::{GeoRecordStore, StoredRecordSet, StoredRegion};
