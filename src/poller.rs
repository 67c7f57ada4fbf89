use crate::error::Result;
use crate::metrics::registry::MetricsRegistry;
use crate::state::map_state;
use crate::upstream::{FetchOutcome, UpstreamClient};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tracing::{debug, error, info, instrument};

/// Fixed-period poll loop: fetch from upstream, map states, write gauges.
///
/// Every failure inside a cycle is logged and swallowed; the loop only exits
/// when the shutdown channel fires.
pub struct Poller {
    client: UpstreamClient,
    registry: Arc<MetricsRegistry>,
    poll_interval: Duration,
}

impl Poller {
    pub fn new(
        client: UpstreamClient,
        registry: Arc<MetricsRegistry>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            client,
            registry,
            poll_interval,
        }
    }

    #[instrument(skip(self, shutdown))]
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        info!(poll_interval = ?self.poll_interval, "Starting poll loop");

        let mut interval = tokio::time::interval(self.poll_interval);
        self.registry.set_healthy(true);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.poll_once().await {
                        error!(error = %e, "Poll failed, skipping cycle");
                    }
                }
                _ = shutdown.recv() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        info!("Poll loop stopped");
    }

    /// One fetch-decode-map-set cycle. On error the registry is left
    /// untouched so the scrape output is unchanged from the previous cycle.
    pub async fn poll_once(&self) -> Result<()> {
        let start = Instant::now();

        match self.client.fetch().await? {
            FetchOutcome::Groups(records) => {
                debug!(groups = records.len(), "Updating group gauges");
                for record in &records {
                    self.registry.set_lag(&record.group_id, record.lag);
                    self.registry
                        .set_health(&record.group_id, map_state(&record.state));
                }
            }
            FetchOutcome::TotalLag(lag) => {
                debug!(lag, "Updating aggregate lag gauge");
                self.registry.set_total_lag(lag);
            }
        }

        self.registry
            .set_poll_duration_ms(start.elapsed().as_millis() as u64);
        self.registry.mark_polled();
        Ok(())
    }
}
