//! EDNS0 client-subnet option (RFC 7871) packing and unpacking.
//!
//! Outgoing queries use the assigned code point. Responses are scanned for
//! the assigned code first, then for the pre-standard draft code some
//! servers still send.

use geodns_domain::ClientSubnet;
use hickory_proto::op::Edns;
use hickory_proto::rr::rdata::opt::{ClientSubnet as HickoryClientSubnet, EdnsCode, EdnsOption};
use std::net::IpAddr;
use tracing::debug;

pub const EDNS_SUBNET_CODE: u16 = 8;
pub const EDNS_SUBNET_DRAFT_CODE: u16 = 0x50fa;

/// Advertised UDP payload size.
pub const EDNS_MAX_PAYLOAD: u16 = 4096;

pub struct ClientSubnetCodec;

impl ClientSubnetCodec {
    /// OPT record carrying `subnet`.
    pub fn pack(subnet: &ClientSubnet) -> Edns {
        let mut edns = Edns::new();
        edns.set_max_payload(EDNS_MAX_PAYLOAD);
        edns.options_mut()
            .insert(EdnsOption::Subnet(HickoryClientSubnet::new(
                IpAddr::V4(subnet.address),
                subnet.source_prefix,
                subnet.scope_prefix,
            )));
        edns
    }

    /// First IPv4 client-subnet option found in `edns`.
    pub fn unpack(edns: &Edns) -> Option<ClientSubnet> {
        if let Some(EdnsOption::Subnet(subnet)) = edns.option(EdnsCode::Subnet) {
            match subnet.addr() {
                IpAddr::V4(addr) => {
                    match ClientSubnet::new(addr, subnet.source_prefix(), subnet.scope_prefix()) {
                        Ok(parsed) => return Some(parsed),
                        Err(e) => debug!(error = %e, "Ignoring malformed client subnet"),
                    }
                }
                IpAddr::V6(_) => debug!("Ignoring IPv6 client subnet"),
            }
        }

        match edns.option(EdnsCode::from(EDNS_SUBNET_DRAFT_CODE)) {
            Some(EdnsOption::Unknown(_, payload)) => match ClientSubnet::from_wire(payload) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    debug!(error = %e, "Ignoring malformed draft client subnet");
                    None
                }
            },
            _ => None,
        }
    }
}
