pub mod delegation_cache;
pub mod domain_index;
pub mod region_index;

pub use delegation_cache::DelegationCache;
pub use domain_index::{DomainEntry, DomainIndex};
pub use region_index::RegionIndex;
