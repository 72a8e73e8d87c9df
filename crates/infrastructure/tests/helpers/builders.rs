#![allow(dead_code)]
use ferrous_pathstore_domain::{
    AsEntry, Beacon, HopMarking, IsdAs, PathPolicy, PathPolicyDocument,
};
use ferrous_pathstore_infrastructure::path_store::{CandidateStore, ManualClock};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Clock reading every store starts from.
pub const NOW: u64 = 5_000;

pub fn ia(raw: &str) -> IsdAs {
    raw.parse().unwrap()
}

pub struct BeaconBuilder {
    timestamp: u64,
    expiration_time: u64,
    entries: Vec<AsEntry>,
}

impl BeaconBuilder {
    pub fn new() -> Self {
        Self {
            timestamp: 4_000,
            expiration_time: 100_000,
            entries: Vec::new(),
        }
    }

    /// Appends a domain whose primary marking links it to the previous hop.
    pub fn hop(mut self, isd_as: &str, egress: u64) -> Self {
        let ingress = self.entries.last().map(|_| egress + 100).unwrap_or(0);
        let neighbor_in = self.entries.last().map(|e| e.isd_as).unwrap_or_default();
        self.entries.push(AsEntry {
            isd_as: ia(isd_as),
            markings: vec![HopMarking {
                neighbor_in,
                neighbor_out: IsdAs::UNSET,
                interface_in: ingress,
                interface_out: 0,
                egress_interface: egress,
            }],
        });
        self
    }

    pub fn peer(mut self, peer: &str, interface: u64) -> Self {
        if let Some(entry) = self.entries.last_mut() {
            entry.markings.push(HopMarking {
                neighbor_in: ia(peer),
                neighbor_out: IsdAs::UNSET,
                interface_in: interface,
                interface_out: 0,
                egress_interface: interface,
            });
        }
        self
    }

    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn expires_at(mut self, expiration_time: u64) -> Self {
        self.expiration_time = expiration_time;
        self
    }

    pub fn build(self) -> Beacon {
        Beacon::new(self.timestamp, self.expiration_time, self.entries)
    }
}

/// Route through `hops`, egress interfaces numbered from 1.
pub fn route(hops: &[&str]) -> Beacon {
    hops.iter()
        .enumerate()
        .fold(BeaconBuilder::new(), |builder, (i, hop)| {
            builder.hop(hop, i as u64 + 1)
        })
        .build()
}

pub fn policy_document() -> PathPolicyDocument {
    let ranges = [
        ("PeerLinks", "0-1"),
        ("HopsLength", "0-8"),
        ("DelayTime", "0-3600"),
        ("GuaranteedBandwidth", "0-20"),
        ("AvailableBandwidth", "0-20"),
        ("TotalBandwidth", "0-20"),
    ];
    let weights = [
        ("HopsLength", 10),
        ("DelayTime", 1),
        ("Disjointness", 5),
        ("LastSentTime", 1),
        ("LastSeenTime", 1),
        ("ExpirationTime", 1),
    ];

    PathPolicyDocument {
        best_set_size: 5,
        candidates_set_size: 20,
        history_limit: 3,
        update_after_number: 0,
        update_after_time: 0,
        unwanted_ases: "2-20".to_string(),
        property_ranges: ranges
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
        property_weights: weights
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<BTreeMap<_, _>>(),
    }
}

pub fn policy(candidates_set_size: usize, best_set_size: usize, history_limit: usize) -> PathPolicy {
    let mut document = policy_document();
    document.candidates_set_size = candidates_set_size;
    document.best_set_size = best_set_size;
    document.history_limit = history_limit;
    PathPolicy::from_document(&document).unwrap()
}

pub fn store_with(policy: PathPolicy) -> (CandidateStore<Beacon>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(NOW));
    let store = CandidateStore::<Beacon>::new(Arc::new(policy), clock.clone()).unwrap();
    (store, clock)
}
