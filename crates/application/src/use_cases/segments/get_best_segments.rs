use crate::ports::PathStorePort;
use ferrous_pathstore_domain::{DomainError, IsdAs, PathSegment};
use std::sync::Arc;
use tracing::debug;

/// Use case: serve the best segments towards a destination
///
/// Falls back to the latest history snapshot when no live candidate is left,
/// so callers keep getting the last known good selection.
pub struct GetBestSegmentsUseCase<S: PathSegment> {
    store: Arc<dyn PathStorePort<S>>,
}

impl<S: PathSegment> GetBestSegmentsUseCase<S> {
    pub fn new(store: Arc<dyn PathStorePort<S>>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        destination: IsdAs,
        k: Option<usize>,
    ) -> Result<Vec<Arc<S>>, DomainError> {
        let best = self.store.get_best_segments(destination, k, true).await?;
        if !best.is_empty() {
            return Ok(best);
        }

        let snapshot = self
            .store
            .get_latest_history_snapshot(destination, k)
            .await?;
        debug!(
            destination = %destination,
            served = snapshot.len(),
            "No live candidates, serving latest history snapshot"
        );
        Ok(snapshot)
    }
}
