use super::core::ResolverCore;
use crate::dns::cache::{DomainEntry, RegionIndex};
use crate::dns::refresh_scheduler::{BackendSource, RefreshJob};
use geodns_domain::{RegionEntry, RegionKey, ResourceRecord};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, info, warn};

impl ResolverCore {
    /// Writes a fresh answer into the domain's region index in the
    /// background, then schedules its refresh. The caller never waits.
    pub(crate) fn spawn_populate(
        self: &Arc<Self>,
        domain: Arc<str>,
        client: Ipv4Addr,
        key: RegionKey,
        records: Vec<ResourceRecord>,
        source: BackendSource,
        owner: Option<DomainEntry>,
    ) {
        let core = Arc::clone(self);
        tokio::spawn(async move {
            core.populate(domain, client, key, records, source, owner)
                .await
        });
    }

    async fn populate(
        &self,
        domain: Arc<str>,
        client: Ipv4Addr,
        key: RegionKey,
        records: Vec<ResourceRecord>,
        source: BackendSource,
        owner: Option<DomainEntry>,
    ) {
        if let Some(entry) = owner {
            if let Err(e) = self.domains.store(entry) {
                warn!(domain = %domain, error = %e, "Failed to cache domain");
                return;
            }
        }

        let Some(regions) = self.wait_for_regions(&domain).await else {
            warn!(
                domain = %domain,
                attempts = self.settings.populate_retry_attempts,
                "Domain never appeared in the index, dropping region update"
            );
            return;
        };

        let entry = match RegionEntry::new(records, key.network, key.prefix_len) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(domain = %domain, region = %key, error = %e, "Unusable region data");
                return;
            }
        };
        let ttl = entry.ttl;

        match regions.update(entry) {
            Ok(replaced) => debug!(domain = %domain, region = %key, replaced, "Region cached"),
            Err(e) => {
                warn!(domain = %domain, region = %key, error = %e, "Failed to cache region");
                return;
            }
        }

        self.refresh.schedule(RefreshJob {
            domain,
            region: key,
            client,
            source,
            delay: self.settings.refresh_delay(ttl),
        });
    }

    /// Polls the domain index until the entry written by zone discovery
    /// shows up, giving up after the configured number of attempts.
    async fn wait_for_regions(&self, domain: &str) -> Option<Arc<RegionIndex>> {
        let attempts = self.settings.populate_retry_attempts.max(1);

        for attempt in 1..=attempts {
            if let Ok(entry) = self.domains.get(domain) {
                return Some(entry.ensure_region_index());
            }
            if attempt < attempts {
                debug!(domain = %domain, attempt, "Domain not cached yet, retrying");
                tokio::time::sleep(self.settings.populate_retry_interval()).await;
            }
        }
        None
    }

    /// Refetches (domain, client) from the backend that produced it. The
    /// fetch repopulates the region and schedules the next refresh.
    pub(crate) async fn run_refresh(self: Arc<Self>, job: RefreshJob) {
        info!(domain = %job.domain, client = %job.client, source = ?job.source, "Refreshing region");

        if let Err(e) = self.fetch(job.source, &job.domain, job.client).await {
            warn!(domain = %job.domain, client = %job.client, error = %e, "Refresh failed, keeping cached region");
        }
    }
}
