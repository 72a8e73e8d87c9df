use super::store::{validate_policy, CandidateStore};
use super::worker::{PathStoreHandle, PathStoreWorker};
use async_trait::async_trait;
use dashmap::DashMap;
use ferrous_pathstore_application::ports::{
    Admission, Clock, ExpiryOutcome, PathStoreMaintenancePort, PathStorePort, PathStoreStats,
};
use ferrous_pathstore_domain::{ConfigError, DomainError, IsdAs, PathPolicy, PathSegment, SegmentId};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One [`CandidateStore`] per destination, each behind its own worker task.
///
/// Stores are created on the first admission for a destination; reads for an
/// unknown destination answer empty without creating one.
pub struct PathStoreRegistry<S: PathSegment> {
    policy: Arc<PathPolicy>,
    clock: Arc<dyn Clock>,
    queue_depth: usize,
    stores: DashMap<IsdAs, PathStoreHandle<S>>,
}

impl<S: PathSegment> PathStoreRegistry<S> {
    pub fn new(
        policy: PathPolicy,
        clock: Arc<dyn Clock>,
        queue_depth: usize,
    ) -> Result<Self, ConfigError> {
        validate_policy(&policy)?;
        if queue_depth == 0 {
            return Err(ConfigError::Validation(
                "worker_queue_depth cannot be 0".to_string(),
            ));
        }

        info!(
            best_set_size = policy.best_set_size,
            candidates_set_size = policy.candidates_set_size,
            history_limit = policy.history_limit,
            "PathStoreRegistry: initialized"
        );

        Ok(Self {
            policy: Arc::new(policy),
            clock,
            queue_depth,
            stores: DashMap::new(),
        })
    }

    pub fn policy(&self) -> &PathPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn destinations(&self) -> Vec<IsdAs> {
        let mut destinations: Vec<IsdAs> = self.stores.iter().map(|entry| *entry.key()).collect();
        destinations.sort();
        destinations
    }

    /// Drops every handle; workers stop once their queues drain.
    pub fn shutdown(&self) {
        let stores = self.stores.len();
        self.stores.clear();
        info!(stores, "PathStoreRegistry: shut down");
    }

    fn spawn_store(&self, destination: IsdAs) -> PathStoreHandle<S> {
        let store = CandidateStore::with_validated_policy(self.policy.clone(), self.clock.clone());
        debug!(destination = %destination, "PathStoreRegistry: spawning store worker");
        PathStoreWorker::new(destination, store).spawn(self.queue_depth)
    }

    /// Handle for `destination`, spawning a worker if none is running.
    fn handle_for(&self, destination: IsdAs) -> PathStoreHandle<S> {
        let mut entry = self
            .stores
            .entry(destination)
            .or_insert_with(|| self.spawn_store(destination));

        if entry.is_closed() {
            warn!(destination = %destination, "PathStoreRegistry: store worker gone, respawning");
            *entry = self.spawn_store(destination);
        }
        entry.value().clone()
    }

    /// Drops the store for `destination` if it is still empty and nobody else
    /// holds its handle. The check runs under the map's entry lock, so no new
    /// handle can be taken out meanwhile.
    fn reap(&self, destination: IsdAs) -> bool {
        let reaped = self
            .stores
            .remove_if(&destination, |_, handle| handle.is_reapable())
            .is_some();
        if reaped {
            debug!(destination = %destination, "PathStoreRegistry: empty store dropped");
        }
        reaped
    }

    fn existing(&self, destination: IsdAs) -> Option<PathStoreHandle<S>> {
        self.stores.get(&destination).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl<S: PathSegment> PathStorePort<S> for PathStoreRegistry<S> {
    async fn add_segment(&self, destination: IsdAs, segment: S) -> Result<Admission, DomainError> {
        let handle = self.handle_for(destination);
        handle.add_segment(segment).await
    }

    async fn remove_segments(
        &self,
        destination: IsdAs,
        ids: Vec<SegmentId>,
    ) -> Result<usize, DomainError> {
        match self.existing(destination) {
            Some(handle) => handle.remove_segments(ids).await,
            None => Ok(0),
        }
    }

    async fn get_best_segments(
        &self,
        destination: IsdAs,
        k: Option<usize>,
        mark_sent: bool,
    ) -> Result<Vec<Arc<S>>, DomainError> {
        match self.existing(destination) {
            Some(handle) => handle.get_best_segments(k, mark_sent).await,
            None => Ok(Vec::new()),
        }
    }

    async fn get_latest_history_snapshot(
        &self,
        destination: IsdAs,
        k: Option<usize>,
    ) -> Result<Vec<Arc<S>>, DomainError> {
        match self.existing(destination) {
            Some(handle) => handle.get_latest_history_snapshot(k).await,
            None => Ok(Vec::new()),
        }
    }

    async fn get_segment(
        &self,
        destination: IsdAs,
        id: SegmentId,
    ) -> Result<Option<Arc<S>>, DomainError> {
        match self.existing(destination) {
            Some(handle) => handle.get_segment(id).await,
            None => Ok(None),
        }
    }

    async fn stats(&self, destination: IsdAs) -> Result<Option<PathStoreStats>, DomainError> {
        match self.existing(destination) {
            Some(handle) => handle.stats().await.map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl<S: PathSegment> PathStoreMaintenancePort for PathStoreRegistry<S> {
    async fn run_expiry_cycle(&self) -> Result<ExpiryOutcome, DomainError> {
        let handles: Vec<PathStoreHandle<S>> =
            self.stores.iter().map(|entry| entry.value().clone()).collect();

        let mut outcome = ExpiryOutcome::default();
        let mut drained = Vec::new();
        for handle in handles {
            match handle.expire().await {
                Ok(summary) => {
                    outcome.stores += 1;
                    outcome.expired += summary.expired;
                    outcome.live += summary.live;
                    if summary.live == 0 {
                        drained.push(handle.destination());
                    }
                }
                Err(e) => {
                    warn!(
                        destination = %handle.destination(),
                        error = %e,
                        "PathStoreRegistry: expiry sweep skipped store"
                    );
                }
            }
        }

        for destination in drained {
            if self.reap(destination) {
                outcome.reaped += 1;
            }
        }

        if outcome.expired > 0 || outcome.reaped > 0 {
            info!(
                stores = outcome.stores,
                expired = outcome.expired,
                live = outcome.live,
                reaped = outcome.reaped,
                "PathStoreRegistry: expiry sweep completed"
            );
        }
        Ok(outcome)
    }
}
