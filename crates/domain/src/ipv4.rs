//! IPv4 helpers used for region keys and client-subnet math.

use crate::errors::DomainError;
use std::net::Ipv4Addr;

pub fn parse_ipv4(s: &str) -> Result<Ipv4Addr, DomainError> {
    s.trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| DomainError::BadParam(format!("{} is not an IPv4 address", s)))
}

pub fn to_u32(addr: Ipv4Addr) -> u32 {
    u32::from(addr)
}

pub fn from_u32(addr: u32) -> Ipv4Addr {
    Ipv4Addr::from(addr)
}

/// Netmask with the top `prefix_len` bits set; values above 32 saturate.
pub fn prefix_mask(prefix_len: u8) -> u32 {
    match prefix_len {
        0 => 0,
        p if p >= 32 => u32::MAX,
        p => u32::MAX << (32 - u32::from(p)),
    }
}

pub fn network_address(addr: u32, prefix_len: u8) -> u32 {
    addr & prefix_mask(prefix_len)
}

/// Longest prefix whose block starting at `start` still contains `end`.
pub fn cidr_prefix_for_range(start: u32, end: u32) -> u8 {
    // leading_zeros of a u32 is at most 32
    (start ^ end).leading_zeros() as u8
}

/// Bit at `index` counting from the most significant bit.
pub fn bit_at(addr: u32, index: u8) -> usize {
    ((addr >> (31 - u32::from(index))) & 1) as usize
}
