use ferrous_pathstore_application::ports::PathStoreMaintenancePort;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Periodically drops expired candidates from every destination store, so
/// stores that are never queried do not hold dead segments.
pub struct ExpirySweepJob {
    maintenance: Arc<dyn PathStoreMaintenancePort>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl ExpirySweepJob {
    pub fn new(maintenance: Arc<dyn PathStoreMaintenancePort>) -> Self {
        Self {
            maintenance,
            interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            "Starting expiry sweep background job"
        );

        let job = Arc::clone(&self);
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(job.interval_secs));
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        info!("ExpirySweepJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match job.maintenance.run_expiry_cycle().await {
                            Ok(outcome) => {
                                if outcome.expired > 0 || outcome.reaped > 0 {
                                    info!(
                                        stores = outcome.stores,
                                        expired = outcome.expired,
                                        live = outcome.live,
                                        reaped = outcome.reaped,
                                        "Expiry sweep completed"
                                    );
                                } else {
                                    debug!(
                                        stores = outcome.stores,
                                        live = outcome.live,
                                        "Expiry sweep found nothing"
                                    );
                                }
                            }
                            Err(e) => {
                                error!(error = %e, "Expiry sweep failed");
                            }
                        }
                    }
                }
            }
        });
    }
}
