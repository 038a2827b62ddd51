pub mod client_subnet_codec;
pub mod exchange;
pub mod message_builder;
pub mod record_type_map;
pub mod response_parser;

pub use client_subnet_codec::ClientSubnetCodec;
pub use exchange::HickoryExchange;
pub use message_builder::MessageBuilder;
pub use record_type_map::RecordTypeMapper;
pub use response_parser::{DnsResponse, ResponseParser};
