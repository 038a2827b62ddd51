//! DNS Message Builder
//!
//! Constructs upstream query messages in wire format using `hickory-proto`.

use super::client_subnet_codec::ClientSubnetCodec;
use super::record_type_map::RecordTypeMapper;
use geodns_application::ports::UpstreamQuery;
use geodns_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::Name;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a query message and return its ID together with the bytes
    ///
    /// Every query has:
    /// - Random ID for request/response matching
    /// - RD and AD flags set
    /// - Single question of class IN
    /// - An OPT record when the query carries a client subnet
    pub fn build_query(query: &UpstreamQuery) -> Result<(u16, Vec<u8>), DomainError> {
        let message = Self::build_message(query)?;
        let bytes = Self::serialize_message(&message)?;
        Ok((message.id(), bytes))
    }

    pub fn build_message(query: &UpstreamQuery) -> Result<Message, DomainError> {
        let name = Name::from_str(&query.name).map_err(|e| {
            DomainError::BadParam(format!("Invalid domain '{}': {}", query.name, e))
        })?;

        let mut message = Message::new();
        message
            .set_id(fastrand::u16(..))
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true)
            .set_authentic_data(true);
        message.add_query(Query::query(
            name,
            RecordTypeMapper::to_hickory(query.record_type),
        ));

        if let Some(subnet) = &query.client_subnet {
            *message.extensions_mut() = Some(ClientSubnetCodec::pack(subnet));
        }

        Ok(message)
    }

    /// Serialize a Message to wire format bytes
    pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::Unknown(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
