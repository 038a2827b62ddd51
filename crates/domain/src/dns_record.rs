use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::Arc;

/// DNS class IN (RFC 1035).
pub const CLASS_IN: u16 = 1;

/// Record types the resolution engine distinguishes.
///
/// A and CNAME are served to clients; NS and SOA only travel through the
/// delegation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    NS,
    CNAME,
    SOA,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::NS => "NS",
            RecordType::CNAME => "CNAME",
            RecordType::SOA => "SOA",
        }
    }

    /// Convert from wire format number (RFC 1035).
    ///
    /// Returns `None` for types the engine does not handle.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(RecordType::A),
            2 => Some(RecordType::NS),
            5 => Some(RecordType::CNAME),
            6 => Some(RecordType::SOA),
            _ => None,
        }
    }

    /// Convert to wire format number
    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "NS" => Ok(RecordType::NS),
            "CNAME" => Ok(RecordType::CNAME),
            "SOA" => Ok(RecordType::SOA),
            _ => Err(format!("Unsupported record type: {}", s)),
        }
    }
}

/// SOA metadata kept alongside a zone's delegation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaInfo {
    pub mname: Arc<str>,
    pub rname: Arc<str>,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

/// Payload of a resource record, discriminated by tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Cname(Arc<str>),
    Ns(Arc<str>),
    Soa(SoaInfo),
}

/// A resource record as produced by a backend (relational store or upstream
/// DNS). Passed through without reinterpretation beyond its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: Arc<str>,
    pub class: u16,
    pub ttl: u32,
    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(name: impl Into<Arc<str>>, ttl: u32, data: RecordData) -> Self {
        Self {
            name: name.into(),
            class: CLASS_IN,
            ttl,
            data,
        }
    }

    pub fn a(name: impl Into<Arc<str>>, ttl: u32, addr: Ipv4Addr) -> Self {
        Self::new(name, ttl, RecordData::A(addr))
    }

    pub fn cname(name: impl Into<Arc<str>>, ttl: u32, target: impl Into<Arc<str>>) -> Self {
        Self::new(name, ttl, RecordData::Cname(target.into()))
    }

    pub fn ns(name: impl Into<Arc<str>>, ttl: u32, host: impl Into<Arc<str>>) -> Self {
        Self::new(name, ttl, RecordData::Ns(host.into()))
    }

    pub fn soa(name: impl Into<Arc<str>>, ttl: u32, soa: SoaInfo) -> Self {
        Self::new(name, ttl, RecordData::Soa(soa))
    }

    pub fn with_class(mut self, class: u16) -> Self {
        self.class = class;
        self
    }

    pub fn record_type(&self) -> RecordType {
        match self.data {
            RecordData::A(_) => RecordType::A,
            RecordData::Cname(_) => RecordType::CNAME,
            RecordData::Ns(_) => RecordType::NS,
            RecordData::Soa(_) => RecordType::SOA,
        }
    }

    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        match self.data {
            RecordData::A(addr) => Some(addr),
            _ => None,
        }
    }

    pub fn cname_target(&self) -> Option<&str> {
        match &self.data {
            RecordData::Cname(target) => Some(target),
            _ => None,
        }
    }

    pub fn ns_host(&self) -> Option<&str> {
        match &self.data {
            RecordData::Ns(host) => Some(host),
            _ => None,
        }
    }

    pub fn soa_info(&self) -> Option<&SoaInfo> {
        match &self.data {
            RecordData::Soa(soa) => Some(soa),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            RecordData::A(addr) => write!(f, "{} {} IN A {}", self.name, self.ttl, addr),
            RecordData::Cname(target) => {
                write!(f, "{} {} IN CNAME {}", self.name, self.ttl, target)
            }
            RecordData::Ns(host) => write!(f, "{} {} IN NS {}", self.name, self.ttl, host),
            RecordData::Soa(soa) => write!(
                f,
                "{} {} IN SOA {} {} {} {} {} {} {}",
                self.name,
                self.ttl,
                soa.mname,
                soa.rname,
                soa.serial,
                soa.refresh,
                soa.retry,
                soa.expire,
                soa.minimum
            ),
        }
    }
}
