use crate::ports::PathStorePort;
use ferrous_pathstore_domain::{DomainError, IsdAs, PathSegment, SegmentId};
use std::sync::Arc;
use tracing::info;

/// Use case: withdraw segments from a destination store (e.g. revoked paths)
pub struct RemoveSegmentsUseCase<S: PathSegment> {
    store: Arc<dyn PathStorePort<S>>,
}

impl<S: PathSegment> RemoveSegmentsUseCase<S> {
    pub fn new(store: Arc<dyn PathStorePort<S>>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        destination: IsdAs,
        ids: Vec<SegmentId>,
    ) -> Result<usize, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let requested = ids.len();
        let removed = self.store.remove_segments(destination, ids).await?;
        info!(destination = %destination, requested, removed, "Segments removed");
        Ok(removed)
    }
}
