use super::core::{GeoResolver, ResolverCore};
use crate::dns::cache::{DelegationCache, DomainIndex};
use crate::dns::refresh_scheduler::RefreshScheduler;
use geodns_application::ports::{DnsExchange, GeoRecordStore};
use geodns_domain::{BackendConfig, Config, ResolverConfig, UpstreamConfig};
use std::sync::{Arc, Weak};
use tracing::info;

pub struct GeoResolverBuilder {
    exchange: Arc<dyn DnsExchange>,
    store: Option<Arc<dyn GeoRecordStore>>,
    domains: Option<Arc<DomainIndex>>,
    delegations: Option<Arc<DelegationCache>>,
    settings: ResolverConfig,
    backend: BackendConfig,
    recursive_resolvers: Vec<String>,
    name_server_port: u16,
}

impl GeoResolverBuilder {
    pub fn new(exchange: Arc<dyn DnsExchange>) -> Self {
        Self {
            exchange,
            store: None,
            domains: None,
            delegations: None,
            settings: ResolverConfig::default(),
            backend: BackendConfig::default(),
            recursive_resolvers: Vec::new(),
            name_server_port: UpstreamConfig::default().port,
        }
    }

    /// Applies every section of a loaded configuration.
    pub fn with_config(self, config: &Config) -> Self {
        self.with_resolver_config(config.resolver.clone())
            .with_backend_config(config.backend.clone())
            .with_upstream_config(&config.upstream)
    }

    pub fn with_resolver_config(mut self, settings: ResolverConfig) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_backend_config(mut self, backend: BackendConfig) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_upstream_config(mut self, upstream: &UpstreamConfig) -> Self {
        self.name_server_port = upstream.port;
        if !upstream.resolvers.is_empty() {
            self.recursive_resolvers = upstream.resolvers.clone();
        }
        self
    }

    pub fn with_recursive_resolvers(mut self, resolvers: Vec<String>) -> Self {
        self.recursive_resolvers = resolvers;
        self
    }

    pub fn with_name_server_port(mut self, port: u16) -> Self {
        self.name_server_port = port;
        self
    }

    pub fn with_store(mut self, store: Arc<dyn GeoRecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Shares existing indices instead of creating fresh ones.
    pub fn with_indices(
        mut self,
        domains: Arc<DomainIndex>,
        delegations: Arc<DelegationCache>,
    ) -> Self {
        self.domains = Some(domains);
        self.delegations = Some(delegations);
        self
    }

    /// Builds the resolver and starts its refresh scheduler.
    /// Must be called inside a Tokio runtime.
    pub fn build(self) -> GeoResolver {
        info!(
            recursive_resolvers = self.recursive_resolvers.len(),
            local_domains = self.backend.local_domains.len(),
            record_store = self.store.is_some(),
            cname_chain_length = self.settings.cname_chain_length,
            "Building geo resolver"
        );

        let core = Arc::new_cyclic(|weak: &Weak<ResolverCore>| {
            let weak = Weak::clone(weak);
            let refresh = RefreshScheduler::spawn(move |job| {
                if let Some(core) = weak.upgrade() {
                    tokio::spawn(async move { core.run_refresh(job).await });
                }
            });

            ResolverCore {
                domains: self.domains.unwrap_or_default(),
                delegations: self.delegations.unwrap_or_default(),
                exchange: self.exchange,
                store: self.store,
                settings: self.settings,
                backend: self.backend,
                recursive_resolvers: self.recursive_resolvers,
                name_server_port: self.name_server_port,
                refresh,
            }
        });

        GeoResolver { core }
    }
}
