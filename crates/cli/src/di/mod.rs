use geodns_application::ports::{DnsExchange, GeoDnsResolver, GeoRecordStore};
use geodns_application::use_cases::{
    GetZoneDelegationUseCase, ResolveAddressUseCase, ResolveNameServersUseCase,
};
use geodns_domain::Config;
use geodns_infrastructure::dns::{GeoResolver, HickoryExchange};
use std::sync::Arc;

pub struct UseCases {
    pub resolve_address: ResolveAddressUseCase,
    pub resolve_name_servers: ResolveNameServersUseCase,
    pub get_zone_delegation: GetZoneDelegationUseCase,
}

impl UseCases {
    pub fn new(resolver: Arc<dyn GeoDnsResolver>) -> Self {
        Self {
            resolve_address: ResolveAddressUseCase::new(Arc::clone(&resolver)),
            resolve_name_servers: ResolveNameServersUseCase::new(Arc::clone(&resolver)),
            get_zone_delegation: GetZoneDelegationUseCase::new(resolver),
        }
    }
}

/// Wires the resolution engine: wire client, optional relational store,
/// and fresh indices.
pub fn build_resolver(
    config: &Config,
    store: Option<Arc<dyn GeoRecordStore>>,
    recursive_resolvers: Vec<String>,
) -> GeoResolver {
    let exchange: Arc<dyn DnsExchange> = Arc::new(HickoryExchange::from_config(&config.upstream));

    let builder = GeoResolver::builder(exchange)
        .with_config(config)
        .with_recursive_resolvers(recursive_resolvers);

    match store {
        Some(store) => builder.with_store(store).build(),
        None => builder.build(),
    }
}
