use crate::path_segment::{AsEntry, PathSegment, SegmentId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Serde-backed path segment used by tooling and tests.
///
/// Identity covers the hop chain only (each domain plus the ingress and
/// egress interface of its primary marking), never the timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beacon {
    pub timestamp: u64,
    pub expiration_time: u64,
    pub as_entries: Vec<AsEntry>,
}

impl Beacon {
    pub fn new(timestamp: u64, expiration_time: u64, as_entries: Vec<AsEntry>) -> Self {
        Self {
            timestamp,
            expiration_time,
            as_entries,
        }
    }
}

impl PathSegment for Beacon {
    fn identity_hash(&self) -> SegmentId {
        let mut hasher = Sha256::new();
        for entry in &self.as_entries {
            hasher.update(entry.isd_as.to_int().to_be_bytes());
            if let Some(hop) = entry.primary() {
                hasher.update(hop.interface_in.to_be_bytes());
                hasher.update(hop.egress_interface.to_be_bytes());
            }
        }
        SegmentId::from_bytes(hasher.finalize().into())
    }

    fn peer_link_count(&self) -> usize {
        self.as_entries.iter().map(AsEntry::peer_links).sum()
    }

    fn hop_count(&self) -> usize {
        self.as_entries.len()
    }

    fn creation_timestamp(&self) -> u64 {
        self.timestamp
    }

    fn expiration_time(&self) -> u64 {
        self.expiration_time
    }

    fn as_entries(&self) -> &[AsEntry] {
        &self.as_entries
    }

    fn short_description(&self) -> String {
        let hops: Vec<String> = self
            .as_entries
            .iter()
            .map(|entry| match entry.primary() {
                Some(hop) => format!("{}#{}", entry.isd_as, hop.egress_interface),
                None => entry.isd_as.to_string(),
            })
            .collect();
        format!(
            "Beacon[ts={} exp={} hops={}]",
            self.timestamp,
            self.expiration_time,
            hops.join(">")
        )
    }
}
