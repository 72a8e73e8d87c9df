use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid ISD-AS identifier: {0}")]
    InvalidIsdAs(String),

    #[error("Segment identity mismatch: record {expected}, segment {actual}")]
    SegmentMismatch { expected: String, actual: String },

    #[error("Path store unavailable for destination {0}")]
    StoreUnavailable(String),
}
