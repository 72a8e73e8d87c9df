pub mod expiry_sweep;
pub mod runner;

pub use expiry_sweep::ExpirySweepJob;
pub use runner::{JobRunner, SpawnableJob};
