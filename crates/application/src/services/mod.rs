pub mod propagation_cadence;

pub use propagation_cadence::PropagationCadence;
