use async_trait::async_trait;
use ferrous_pathstore_domain::{DomainError, IsdAs, PathSegment, SegmentId};
use std::sync::Arc;

/// Result of offering a segment to a destination store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Failed the path policy filters; the store is unchanged.
    Rejected,
    /// Matched a live candidate, which was refreshed in place.
    Refreshed,
    /// Added as a new candidate, possibly evicting the lowest-fidelity one.
    Inserted { evicted: Option<SegmentId> },
    /// Added, then dropped by the expiry phase of the same trim; the store
    /// holds no copy of it.
    Expired,
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Refreshed | Self::Inserted { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rejected => "rejected",
            Self::Refreshed => "refreshed",
            Self::Inserted { .. } => "inserted",
            Self::Expired => "expired",
        }
    }
}

/// Snapshot of one destination store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathStoreStats {
    pub live_candidates: usize,
    pub history_depth: usize,
    pub inserted: u64,
    pub refreshed: u64,
    pub rejected: u64,
    pub evicted: u64,
    pub expired: u64,
    pub removed: u64,
    pub retrievals: u64,
}

/// Service boundary of the candidate-path cache, keyed by destination.
#[async_trait]
pub trait PathStorePort<S: PathSegment>: Send + Sync {
    async fn add_segment(&self, destination: IsdAs, segment: S) -> Result<Admission, DomainError>;

    /// Returns how many of `ids` were live and got removed.
    async fn remove_segments(
        &self,
        destination: IsdAs,
        ids: Vec<SegmentId>,
    ) -> Result<usize, DomainError>;

    /// Best `k` segments (policy `best_set_size` when `None`), best first.
    async fn get_best_segments(
        &self,
        destination: IsdAs,
        k: Option<usize>,
        mark_sent: bool,
    ) -> Result<Vec<Arc<S>>, DomainError>;

    async fn get_latest_history_snapshot(
        &self,
        destination: IsdAs,
        k: Option<usize>,
    ) -> Result<Vec<Arc<S>>, DomainError>;

    async fn get_segment(
        &self,
        destination: IsdAs,
        id: SegmentId,
    ) -> Result<Option<Arc<S>>, DomainError>;

    /// `None` when no store exists yet for `destination`.
    async fn stats(&self, destination: IsdAs) -> Result<Option<PathStoreStats>, DomainError>;
}
