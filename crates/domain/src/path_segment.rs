use crate::isd_as::IsdAs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SEGMENT_ID_LEN: usize = 32;

/// Identity of a path segment: a digest over its domain-hop sequence.
///
/// Two announcements of the same route share a `SegmentId` even when their
/// timestamps differ, which is what lets the store refresh instead of duplicate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId([u8; SEGMENT_ID_LEN]);

impl SegmentId {
    pub const fn from_bytes(bytes: [u8; SEGMENT_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SEGMENT_ID_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// First 8 bytes in hex, enough to tell segments apart in logs.
    pub fn short(&self) -> String {
        self.0[..8].iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for SegmentId {
    type Err = String;

    /// Parses the 64-digit hex form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != SEGMENT_ID_LEN * 2 || !s.is_ascii() {
            return Err(format!("Invalid segment id: {}", s));
        }
        let mut bytes = [0u8; SEGMENT_ID_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| format!("Invalid segment id: {}", s))?;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Debug for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegmentId({})", self.short())
    }
}

/// Per-domain hop metadata carried in a segment.
///
/// A zero interface id means the remote side of the link was not yet known
/// when the marking was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HopMarking {
    #[serde(default)]
    pub neighbor_in: IsdAs,
    #[serde(default)]
    pub neighbor_out: IsdAs,
    #[serde(default)]
    pub interface_in: u64,
    #[serde(default)]
    pub interface_out: u64,
    pub egress_interface: u64,
}

impl HopMarking {
    /// Returns the neighbor whose interface id on this marking is unset, if any.
    pub fn unknown_remote_interface(&self) -> Option<IsdAs> {
        if !self.neighbor_in.is_unset() && self.interface_in == 0 {
            return Some(self.neighbor_in);
        }
        if !self.neighbor_out.is_unset() && self.interface_out == 0 {
            return Some(self.neighbor_out);
        }
        None
    }
}

/// One domain on the segment's hop chain.
///
/// The first marking describes the hop itself; any further markings are
/// peering links offered by that domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsEntry {
    pub isd_as: IsdAs,
    pub markings: Vec<HopMarking>,
}

impl AsEntry {
    pub fn primary(&self) -> Option<&HopMarking> {
        self.markings.first()
    }

    pub fn peer_links(&self) -> usize {
        self.markings.len().saturating_sub(1)
    }
}

/// Read-only view of an already-validated path segment.
///
/// The store never mutates a segment it is handed; it keeps its own copy.
pub trait PathSegment: Clone + Send + Sync + 'static {
    fn identity_hash(&self) -> SegmentId;

    fn peer_link_count(&self) -> usize;

    fn hop_count(&self) -> usize;

    /// Creation time, Unix seconds.
    fn creation_timestamp(&self) -> u64;

    /// Expiration time, Unix seconds.
    fn expiration_time(&self) -> u64;

    fn as_entries(&self) -> &[AsEntry];

    fn short_description(&self) -> String;

    fn hop_markings(&self) -> Box<dyn Iterator<Item = &HopMarking> + '_> {
        Box::new(self.as_entries().iter().flat_map(|entry| entry.markings.iter()))
    }
}
