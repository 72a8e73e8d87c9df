pub mod clock;
pub mod disjointness;
pub mod fidelity;
pub mod history;
pub mod metrics;
pub mod record;
pub mod registry;
pub mod store;
pub mod worker;

pub use clock::{ManualClock, SystemClock};
pub use disjointness::{disjointness_keys, normalize_overlaps, DisjointnessKey, DisjointnessTracker};
pub use fidelity::{compute_fidelity, floor_div, FidelityInputs, FidelityWeights};
pub use history::SnapshotHistory;
pub use metrics::StoreCounters;
pub use record::{CandidateRecord, DEFAULT_LAST_SENT_OFFSET_SECS};
pub use registry::PathStoreRegistry;
pub use store::{validate_policy, CandidateStore};
pub use worker::{ExpirySummary, PathStoreHandle, PathStoreWorker};
