//! Geo-aware resolution engine
//!
//! - `builder`: wiring of indices, backends and settings
//! - `core`: shared state and the CNAME-chain walk
//! - `cache_probe`: lookups against the domain and region indices
//! - `upstream_backend`: authoritative queries with client subnet
//! - `store_backend`: relational store lookups
//! - `zone_discovery`: SOA/NS discovery and the NS label walk
//! - `population`: background write-back and refresh

pub mod builder;
mod cache_probe;
mod core;
mod population;
mod store_backend;
mod upstream_backend;
mod zone_discovery;

pub use builder::GeoResolverBuilder;
pub use core::GeoResolver;
