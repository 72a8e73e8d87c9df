use crate::config::ConfigError;
use std::fmt;

/// Named path properties used as range and weight keys in a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathProperty {
    PeerLinks,
    HopsLength,
    DelayTime,
    GuaranteedBandwidth,
    AvailableBandwidth,
    TotalBandwidth,
    Disjointness,
    LastSentTime,
    LastSeenTime,
    ExpirationTime,
}

impl PathProperty {
    /// Properties that carry a `[min, max]` admission range.
    pub const RANGED: [PathProperty; 6] = [
        Self::PeerLinks,
        Self::HopsLength,
        Self::DelayTime,
        Self::GuaranteedBandwidth,
        Self::AvailableBandwidth,
        Self::TotalBandwidth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PeerLinks => "PeerLinks",
            Self::HopsLength => "HopsLength",
            Self::DelayTime => "DelayTime",
            Self::GuaranteedBandwidth => "GuaranteedBandwidth",
            Self::AvailableBandwidth => "AvailableBandwidth",
            Self::TotalBandwidth => "TotalBandwidth",
            Self::Disjointness => "Disjointness",
            Self::LastSentTime => "LastSentTime",
            Self::LastSeenTime => "LastSeenTime",
            Self::ExpirationTime => "ExpirationTime",
        }
    }
}

impl fmt::Display for PathProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive `[min, max]` bound, written `"min-max"` in policy files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyRange {
    pub min: i64,
    pub max: i64,
}

impl PropertyRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, actual: i64) -> bool {
        actual >= self.min && actual <= self.max
    }

    /// Parses `"min-max"`, reporting failures against `property`.
    pub fn parse(property: &str, raw: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRange {
            property: property.to_string(),
            value: raw.to_string(),
        };

        let (min, max) = raw.split_once('-').ok_or_else(invalid)?;
        let min: i64 = min.trim().parse().map_err(|_| invalid())?;
        let max: i64 = max.trim().parse().map_err(|_| invalid())?;
        Ok(Self { min, max })
    }
}

impl fmt::Display for PropertyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
