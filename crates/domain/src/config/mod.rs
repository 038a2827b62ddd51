//! Configuration for the GeoDNS engine
//!
//! - `root`: top-level configuration, loading and validation
//! - `resolver`: CNAME chain, EDNS defaults, refresh and population timing
//! - `upstream`: recursive resolvers, authoritative port, transport timeouts
//! - `backend`: relational backend selection
//! - `logging`: logging settings
//! - `errors`: configuration errors

pub mod backend;
pub mod errors;
pub mod logging;
pub mod resolver;
pub mod root;
pub mod upstream;

pub use backend::BackendConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolver::ResolverConfig;
pub use root::Config;
pub use upstream::{UpstreamConfig, UpstreamProtocol};
