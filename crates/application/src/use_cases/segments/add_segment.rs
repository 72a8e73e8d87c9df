use crate::ports::{Admission, Clock, PathStorePort};
use crate::services::PropagationCadence;
use ferrous_pathstore_domain::{DomainError, IsdAs, PathPolicy, PathSegment};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddSegmentOutcome {
    pub admission: Admission,
    /// The caller should start a propagation round.
    pub propagation_due: bool,
}

/// Use case: offer an incoming segment to its destination store
pub struct AddSegmentUseCase<S: PathSegment> {
    store: Arc<dyn PathStorePort<S>>,
    clock: Arc<dyn Clock>,
    cadence: PropagationCadence,
}

impl<S: PathSegment> AddSegmentUseCase<S> {
    pub fn new(store: Arc<dyn PathStorePort<S>>, clock: Arc<dyn Clock>, policy: &PathPolicy) -> Self {
        let cadence = PropagationCadence::new(
            policy.update_after_number,
            policy.update_after_time,
            clock.now_secs(),
        );
        Self {
            store,
            clock,
            cadence,
        }
    }

    pub async fn execute(
        &self,
        destination: IsdAs,
        segment: S,
    ) -> Result<AddSegmentOutcome, DomainError> {
        let description = segment.short_description();
        let admission = self.store.add_segment(destination, segment).await?;
        let now = self.clock.now_secs();

        let propagation_due = if admission.is_admitted() {
            self.cadence.record_admission(now)
        } else {
            self.cadence.is_due(now)
        };

        debug!(
            destination = %destination,
            segment = %description,
            admission = admission.as_str(),
            propagation_due,
            "Segment offered to path store"
        );

        Ok(AddSegmentOutcome {
            admission,
            propagation_due,
        })
    }

    /// Records that the caller finished a propagation round.
    pub fn mark_propagated(&self) {
        self.cadence.reset(self.clock.now_secs());
    }
}
