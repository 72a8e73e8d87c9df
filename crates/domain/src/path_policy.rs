mod document;
mod property;

pub use document::PathPolicyDocument;
pub use property::{PathProperty, PropertyRange};

use crate::config::ConfigError;
use crate::isd_as::IsdAs;
use crate::path_segment::PathSegment;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{error, info, warn};

/// Bandwidth is not measured yet; range checks compare against this value.
pub const PLACEHOLDER_BANDWIDTH: i64 = 10;

const DEFAULT_BEST_SET_SIZE: usize = 5;
const DEFAULT_CANDIDATES_SET_SIZE: usize = 20;

/// Why a segment failed admission. Only ever logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FilterRejection {
    UnwantedAs(IsdAs),
    PropertyRanges(Vec<String>),
    UnknownRemoteInterface(IsdAs),
}

/// Admission policy for one path store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPolicy {
    pub best_set_size: usize,
    pub candidates_set_size: usize,
    pub history_limit: usize,
    pub update_after_number: u64,
    pub update_after_time: u64,
    pub unwanted_ases: BTreeSet<IsdAs>,
    pub property_ranges: BTreeMap<String, PropertyRange>,
    pub property_weights: BTreeMap<String, i64>,
}

impl Default for PathPolicy {
    fn default() -> Self {
        Self {
            best_set_size: DEFAULT_BEST_SET_SIZE,
            candidates_set_size: DEFAULT_CANDIDATES_SET_SIZE,
            history_limit: 0,
            update_after_number: 0,
            update_after_time: 0,
            unwanted_ases: BTreeSet::new(),
            property_ranges: BTreeMap::new(),
            property_weights: BTreeMap::new(),
        }
    }
}

impl PathPolicy {
    pub fn from_document(document: &PathPolicyDocument) -> Result<Self, ConfigError> {
        let mut policy = Self::default();
        policy.parse_document(document)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let document: PathPolicyDocument =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_document(&document)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    /// Overwrites this policy with the values of `document`.
    pub fn parse_document(&mut self, document: &PathPolicyDocument) -> Result<(), ConfigError> {
        self.best_set_size = document.best_set_size;
        self.candidates_set_size = document.candidates_set_size;
        self.history_limit = document.history_limit;
        self.update_after_number = document.update_after_number;
        self.update_after_time = document.update_after_time;

        self.unwanted_ases = document
            .unwanted_ases
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<IsdAs>()
                    .map_err(|_| ConfigError::InvalidIsdAs(token.to_string()))
            })
            .collect::<Result<_, _>>()?;

        self.property_ranges = document
            .property_ranges
            .iter()
            .map(|(name, raw)| Ok((name.clone(), PropertyRange::parse(name, raw)?)))
            .collect::<Result<_, ConfigError>>()?;

        self.property_weights = document.property_weights.clone();
        Ok(())
    }

    pub fn to_document(&self) -> PathPolicyDocument {
        PathPolicyDocument {
            best_set_size: self.best_set_size,
            candidates_set_size: self.candidates_set_size,
            history_limit: self.history_limit,
            update_after_number: self.update_after_number,
            update_after_time: self.update_after_time,
            unwanted_ases: self
                .unwanted_ases
                .iter()
                .map(IsdAs::to_string)
                .collect::<Vec<_>>()
                .join(","),
            property_ranges: self
                .property_ranges
                .iter()
                .map(|(name, range)| (name.clone(), range.to_string()))
                .collect(),
            property_weights: self.property_weights.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.candidates_set_size == 0 {
            return Err(ConfigError::Validation(
                "CandidatesSetSize must be at least 1".to_string(),
            ));
        }
        for (name, range) in &self.property_ranges {
            if range.min > range.max {
                return Err(ConfigError::InvalidRange {
                    property: name.clone(),
                    value: range.to_string(),
                });
            }
        }
        Ok(())
    }

    /// True when every ranged property has a configured bound.
    pub fn valid_ranges(&self) -> bool {
        PathProperty::RANGED
            .iter()
            .all(|property| self.property_ranges.contains_key(property.as_str()))
    }

    pub fn range(&self, property: PathProperty) -> Option<&PropertyRange> {
        self.property_ranges.get(property.as_str())
    }

    /// Configured weight, 0 when the policy leaves it out.
    pub fn weight(&self, property: PathProperty) -> i64 {
        self.property_weights
            .get(property.as_str())
            .copied()
            .unwrap_or(0)
    }

    /// Runs the admission filters against `segment` at time `now`.
    ///
    /// Checks run in order (unwanted ASes, property ranges, remote interface
    /// ids) and stop at the first failure, which is logged.
    pub fn check_filters<S: PathSegment>(&self, segment: &S, now: u64) -> bool {
        match self.first_rejection(segment, now) {
            None => true,
            Some(FilterRejection::UnwantedAs(isd_as)) => {
                warn!(
                    unwanted_as = %isd_as,
                    segment = %segment.short_description(),
                    "PathStore: segment discarded, unwanted AS"
                );
                false
            }
            Some(FilterRejection::PropertyRanges(reasons)) => {
                info!(
                    reasons = %reasons.join(", "),
                    segment = %segment.short_description(),
                    "PathStore: segment discarded, property out of range"
                );
                false
            }
            Some(FilterRejection::UnknownRemoteInterface(isd_as)) => {
                error!(
                    neighbor = %isd_as,
                    segment = %segment.short_description(),
                    "PathStore: segment discarded, remote interface unknown"
                );
                false
            }
        }
    }

    pub(crate) fn first_rejection<S: PathSegment>(
        &self,
        segment: &S,
        now: u64,
    ) -> Option<FilterRejection> {
        if let Some(isd_as) = self.find_unwanted_as(segment) {
            return Some(FilterRejection::UnwantedAs(isd_as));
        }

        let reasons = self.range_violations(segment, now);
        if !reasons.is_empty() {
            return Some(FilterRejection::PropertyRanges(reasons));
        }

        find_unknown_remote_interface(segment).map(FilterRejection::UnknownRemoteInterface)
    }

    fn find_unwanted_as<S: PathSegment>(&self, segment: &S) -> Option<IsdAs> {
        segment
            .as_entries()
            .iter()
            .map(|entry| entry.isd_as)
            .find(|isd_as| self.unwanted_ases.contains(isd_as))
    }

    fn range_violations<S: PathSegment>(&self, segment: &S, now: u64) -> Vec<String> {
        let delay = now as i64 - segment.creation_timestamp() as i64;
        let observed = [
            (PathProperty::PeerLinks, segment.peer_link_count() as i64),
            (PathProperty::HopsLength, segment.hop_count() as i64),
            (PathProperty::DelayTime, delay),
            (PathProperty::GuaranteedBandwidth, PLACEHOLDER_BANDWIDTH),
            (PathProperty::AvailableBandwidth, PLACEHOLDER_BANDWIDTH),
            (PathProperty::TotalBandwidth, PLACEHOLDER_BANDWIDTH),
        ];

        let mut reasons = Vec::new();
        for (property, actual) in observed {
            let Some(range) = self.range(property) else {
                continue;
            };
            if !range.contains(actual) {
                reasons.push(format!(
                    "{}: {} <= {} <= {}",
                    property, range.min, actual, range.max
                ));
            }
        }
        reasons
    }
}

fn find_unknown_remote_interface<S: PathSegment>(segment: &S) -> Option<IsdAs> {
    segment
        .hop_markings()
        .find_map(|marking| marking.unknown_remote_interface())
}

impl fmt::Display for PathPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = toml::to_string_pretty(&self.to_document()).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}
