use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest AS number written in plain decimal (the BGP range).
const MAX_BGP_AS: u64 = (1 << 32) - 1;
/// AS numbers are 48 bits wide.
const MAX_AS: u64 = (1 << 48) - 1;
const AS_GROUP_BITS: u32 = 16;

/// Hierarchical domain identifier: an isolation domain (ISD) plus an AS number.
///
/// Textual form is `ISD-AS`, where the AS is either decimal (`1-64512`) or
/// three colon-separated 16-bit hex groups (`1-ff00:0:110`). `0-0` is the
/// unset identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IsdAs {
    isd: u16,
    asn: u64,
}

impl IsdAs {
    pub const UNSET: IsdAs = IsdAs { isd: 0, asn: 0 };

    pub fn new(isd: u16, asn: u64) -> Result<Self, DomainError> {
        if asn > MAX_AS {
            return Err(DomainError::InvalidIsdAs(format!(
                "AS number {} exceeds 48 bits",
                asn
            )));
        }
        Ok(Self { isd, asn })
    }

    pub fn isd(&self) -> u16 {
        self.isd
    }

    pub fn asn(&self) -> u64 {
        self.asn
    }

    /// Packs the identifier into one integer (ISD in the top 16 bits).
    pub fn to_int(&self) -> u64 {
        ((self.isd as u64) << 48) | self.asn
    }

    pub fn is_unset(&self) -> bool {
        self.to_int() == 0
    }

    fn parse_asn(raw: &str) -> Result<u64, DomainError> {
        let invalid = || DomainError::InvalidIsdAs(raw.to_string());

        if !raw.contains(':') {
            let asn: u64 = raw.parse().map_err(|_| invalid())?;
            if asn > MAX_BGP_AS {
                return Err(invalid());
            }
            return Ok(asn);
        }

        let groups: Vec<&str> = raw.split(':').collect();
        if groups.len() != 3 {
            return Err(invalid());
        }

        let mut asn = 0u64;
        for group in groups {
            if group.is_empty() || group.len() > 4 {
                return Err(invalid());
            }
            let value = u64::from_str_radix(group, 16).map_err(|_| invalid())?;
            asn = (asn << AS_GROUP_BITS) | value;
        }
        Ok(asn)
    }
}

impl FromStr for IsdAs {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (isd, asn) = trimmed
            .split_once('-')
            .ok_or_else(|| DomainError::InvalidIsdAs(trimmed.to_string()))?;

        let isd: u16 = isd
            .parse()
            .map_err(|_| DomainError::InvalidIsdAs(trimmed.to_string()))?;
        let asn = Self::parse_asn(asn)?;

        Self::new(isd, asn)
    }
}

impl fmt::Display for IsdAs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.asn <= MAX_BGP_AS {
            return write!(f, "{}-{}", self.isd, self.asn);
        }
        write!(
            f,
            "{}-{:x}:{:x}:{:x}",
            self.isd,
            (self.asn >> 32) & 0xffff,
            (self.asn >> 16) & 0xffff,
            self.asn & 0xffff
        )
    }
}

impl TryFrom<String> for IsdAs {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IsdAs> for String {
    fn from(value: IsdAs) -> Self {
        value.to_string()
    }
}
