pub mod cache;
pub mod forwarding;
pub mod refresh_scheduler;
pub mod resolver;
pub mod transport;

pub use cache::{DelegationCache, DomainEntry, DomainIndex, RegionIndex};
pub use forwarding::HickoryExchange;
pub use refresh_scheduler::{BackendSource, RefreshJob, RefreshScheduler};
pub use resolver::{GeoResolver, GeoResolverBuilder};
