//! Ferrous PathStore Domain Layer
pub mod beacon;
pub mod config;
pub mod errors;
pub mod isd_as;
pub mod path_policy;
pub mod path_segment;

pub use beacon::Beacon;
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use isd_as::IsdAs;
pub use path_policy::{
    PathPolicy, PathPolicyDocument, PathProperty, PropertyRange, PLACEHOLDER_BANDWIDTH,
};
pub use path_segment::{AsEntry, HopMarking, PathSegment, SegmentId};
