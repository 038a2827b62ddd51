use futures::StreamExt;
use geodns_domain::RegionKey;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::time::{delay_queue, DelayQueue};
use tracing::{debug, info};

/// Where a region entry came from, and so where a refresh refetches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendSource {
    RecordStore,
    Upstream,
}

/// One pending refetch of the region `region` of `domain`, fetched as seen
/// from `client`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshJob {
    pub domain: Arc<str>,
    pub region: RegionKey,
    pub client: Ipv4Addr,
    pub source: BackendSource,
    pub delay: Duration,
}

/// Fires refresh jobs after their delay from a single delay queue.
///
/// At most one job per (domain, region) is pending. Scheduling a region
/// that is already queued resets its delay instead of queuing a second job.
///
/// Dropping the scheduler closes its channel and ends the background task;
/// jobs still queued at that point are discarded.
pub struct RefreshScheduler {
    tx: mpsc::UnboundedSender<RefreshJob>,
}

impl RefreshScheduler {
    /// Starts the queue task. Must be called inside a Tokio runtime.
    pub fn spawn<F>(on_due: F) -> Self
    where
        F: Fn(RefreshJob) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(Self::run(rx, on_due));
        Self { tx }
    }

    pub fn schedule(&self, job: RefreshJob) {
        debug!(
            domain = %job.domain,
            region = %job.region,
            client = %job.client,
            delay_secs = job.delay.as_secs(),
            "Refresh scheduled"
        );
        if self.tx.send(job).is_err() {
            debug!("Refresh scheduler stopped, job dropped");
        }
    }

    async fn run<F>(mut rx: mpsc::UnboundedReceiver<RefreshJob>, on_due: F)
    where
        F: Fn(RefreshJob) + Send + 'static,
    {
        let mut queue: DelayQueue<RefreshJob> = DelayQueue::new();
        let mut pending: HashMap<(Arc<str>, RegionKey), delay_queue::Key> = HashMap::new();
        info!("Refresh scheduler started");

        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Some(job) => {
                        let slot = (Arc::clone(&job.domain), job.region);
                        match pending.get(&slot) {
                            Some(key) => {
                                debug!(domain = %job.domain, region = %job.region, "Refresh already queued, delay reset");
                                queue.reset(key, job.delay);
                            }
                            None => {
                                let delay = job.delay;
                                let key = queue.insert(job, delay);
                                pending.insert(slot, key);
                            }
                        }
                    }
                    None => break,
                },
                Some(expired) = queue.next(), if !queue.is_empty() => {
                    let job = expired.into_inner();
                    pending.remove(&(Arc::clone(&job.domain), job.region));
                    on_due(job);
                }
            }
        }

        info!(pending = queue.len(), "Refresh scheduler stopped");
    }
}
