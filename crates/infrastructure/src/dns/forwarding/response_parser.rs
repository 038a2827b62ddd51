use super::client_subnet_codec::ClientSubnetCodec;
use geodns_application::ports::UpstreamResponse;
use geodns_domain::{DomainError, ResourceRecord, SoaInfo};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub upstream: UpstreamResponse,
}

impl DnsResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail
                | ResponseCode::Refused
                | ResponseCode::NotImp
                | ResponseCode::FormErr
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::Transport(format!("Failed to parse DNS response: {}", e))
        })?;
        Ok(Self::from_message(&message))
    }

    pub fn from_message(message: &Message) -> DnsResponse {
        let answers: Vec<ResourceRecord> =
            message.answers().iter().filter_map(Self::convert).collect();
        let authority: Vec<ResourceRecord> = message
            .name_servers()
            .iter()
            .filter_map(Self::convert)
            .collect();
        let client_subnet = message
            .extensions()
            .as_ref()
            .and_then(ClientSubnetCodec::unpack);

        debug!(
            rcode = ?message.response_code(),
            answers = answers.len(),
            authority = authority.len(),
            truncated = message.truncated(),
            client_subnet = client_subnet.is_some(),
            "DNS response parsed"
        );

        DnsResponse {
            id: message.id(),
            rcode: message.response_code(),
            upstream: UpstreamResponse {
                answers,
                authority,
                client_subnet,
                truncated: message.truncated(),
            },
        }
    }

    /// Converts the record types the engine understands; others are dropped.
    pub fn convert(record: &Record) -> Option<ResourceRecord> {
        let name = record.name().to_utf8();
        let ttl = record.ttl();
        let class = u16::from(record.dns_class());

        let converted = match record.data() {
            RData::A(a) => ResourceRecord::a(name, ttl, a.0),
            RData::CNAME(cname) => ResourceRecord::cname(name, ttl, cname.0.to_utf8()),
            RData::NS(ns) => ResourceRecord::ns(name, ttl, ns.0.to_utf8()),
            RData::SOA(soa) => ResourceRecord::soa(
                name,
                ttl,
                SoaInfo {
                    mname: Arc::from(soa.mname().to_utf8()),
                    rname: Arc::from(soa.rname().to_utf8()),
                    serial: soa.serial(),
                    refresh: u32::try_from(soa.refresh()).unwrap_or_default(),
                    retry: u32::try_from(soa.retry()).unwrap_or_default(),
                    expire: u32::try_from(soa.expire()).unwrap_or_default(),
                    minimum: soa.minimum(),
                },
            ),
            _ => return None,
        };

        Some(converted.with_class(class))
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
