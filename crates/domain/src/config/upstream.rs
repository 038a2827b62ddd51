use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Wire transport used for upstream queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamProtocol {
    #[default]
    Udp,
    Tcp,
}

impl fmt::Display for UpstreamProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamProtocol::Udp => write!(f, "udp"),
            UpstreamProtocol::Tcp => write!(f, "tcp"),
        }
    }
}

/// Upstream DNS settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Recursive resolvers used for SOA/NS discovery (e.g. "8.8.8.8:53").
    /// Empty means read `resolv_conf`.
    #[serde(default)]
    pub resolvers: Vec<String>,

    #[serde(default = "default_resolv_conf")]
    pub resolv_conf: String,

    /// Port used when querying authoritative name servers
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub protocol: UpstreamProtocol,

    #[serde(default = "default_dial_timeout_ms")]
    pub dial_timeout_ms: u64,

    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,

    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl UpstreamConfig {
    pub fn dial_timeout(&self) -> Duration {
        Duration::from_millis(self.dial_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            resolvers: vec![],
            resolv_conf: default_resolv_conf(),
            port: default_port(),
            protocol: UpstreamProtocol::Udp,
            dial_timeout_ms: default_dial_timeout_ms(),
            write_timeout_ms: default_write_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

fn default_resolv_conf() -> String {
    "/etc/resolv.conf".to_string()
}

fn default_port() -> u16 {
    53
}

fn default_dial_timeout_ms() -> u64 {
    8000
}

fn default_write_timeout_ms() -> u64 {
    8000
}

fn default_read_timeout_ms() -> u64 {
    60000
}
