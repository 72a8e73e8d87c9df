pub mod segments;

// Re-export use cases
pub use segments::{
    AddSegmentOutcome, AddSegmentUseCase, GetBestSegmentsUseCase, RemoveSegmentsUseCase,
};
