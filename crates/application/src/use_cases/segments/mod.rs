pub mod add_segment;
pub mod get_best_segments;
pub mod remove_segments;

pub use add_segment::{AddSegmentOutcome, AddSegmentUseCase};
pub use get_best_segments::GetBestSegmentsUseCase;
pub use remove_segments::RemoveSegmentsUseCase;
