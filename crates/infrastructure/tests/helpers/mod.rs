#![allow(dead_code)]

mod builders;
mod dns_server_mock;
mod mock_exchange;
mod mock_store;

pub use builders::*;
pub use dns_server_mock::{MockDnsServer, UdpMode};
pub use mock_exchange::{ExchangeCall, MockDnsExchange};
pub use mock_store::MockGeoRecordStore;
