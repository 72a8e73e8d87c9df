#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_pathstore_application::ports::{Admission, Clock, PathStorePort, PathStoreStats};
use ferrous_pathstore_domain::{
    AsEntry, Beacon, DomainError, HopMarking, IsdAs, PathSegment, SegmentId,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub fn ia(raw: &str) -> IsdAs {
    raw.parse().unwrap()
}

/// Single-hop beacon whose identity is determined by `egress`.
pub fn beacon(egress: u64) -> Beacon {
    Beacon::new(
        1_000,
        10_000,
        vec![AsEntry {
            isd_as: ia("1-10"),
            markings: vec![HopMarking {
                egress_interface: egress,
                ..HopMarking::default()
            }],
        }],
    )
}

pub struct FixedClock {
    now: AtomicU64,
}

impl FixedClock {
    pub fn new(now: u64) -> Self {
        Self {
            now: AtomicU64::new(now),
        }
    }

    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now_secs(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

#[derive(Default)]
struct Destination {
    live: Vec<Beacon>,
    history: Vec<Arc<Beacon>>,
}

/// In-memory stand-in for the path store: keeps insertion order, no scoring.
#[derive(Clone, Default)]
pub struct MockPathStore {
    destinations: Arc<RwLock<HashMap<IsdAs, Destination>>>,
    reject_all: Arc<AtomicBool>,
    should_fail: Arc<AtomicBool>,
}

impl MockPathStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reject_all(&self, reject: bool) {
        self.reject_all.store(reject, Ordering::Relaxed);
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }

    pub async fn set_history(&self, destination: IsdAs, history: Vec<Beacon>) {
        let mut destinations = self.destinations.write().await;
        destinations.entry(destination).or_default().history =
            history.into_iter().map(Arc::new).collect();
    }

    pub async fn live_count(&self, destination: IsdAs) -> usize {
        self.destinations
            .read()
            .await
            .get(&destination)
            .map(|d| d.live.len())
            .unwrap_or(0)
    }

    fn check_available(&self, destination: IsdAs) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::StoreUnavailable(destination.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PathStorePort<Beacon> for MockPathStore {
    async fn add_segment(&self, destination: IsdAs, segment: Beacon) -> Result<Admission, DomainError> {
        self.check_available(destination)?;
        if self.reject_all.load(Ordering::Relaxed) {
            return Ok(Admission::Rejected);
        }

        let mut destinations = self.destinations.write().await;
        let entry = destinations.entry(destination).or_default();
        let id = segment.identity_hash();
        if let Some(existing) = entry.live.iter_mut().find(|s| s.identity_hash() == id) {
            *existing = segment;
            return Ok(Admission::Refreshed);
        }
        entry.live.push(segment);
        Ok(Admission::Inserted { evicted: None })
    }

    async fn remove_segments(
        &self,
        destination: IsdAs,
        ids: Vec<SegmentId>,
    ) -> Result<usize, DomainError> {
        self.check_available(destination)?;
        let mut destinations = self.destinations.write().await;
        let Some(entry) = destinations.get_mut(&destination) else {
            return Ok(0);
        };
        let before = entry.live.len();
        entry.live.retain(|s| !ids.contains(&s.identity_hash()));
        Ok(before - entry.live.len())
    }

    async fn get_best_segments(
        &self,
        destination: IsdAs,
        k: Option<usize>,
        _mark_sent: bool,
    ) -> Result<Vec<Arc<Beacon>>, DomainError> {
        self.check_available(destination)?;
        let destinations = self.destinations.read().await;
        Ok(destinations
            .get(&destination)
            .map(|d| {
                d.live
                    .iter()
                    .take(k.unwrap_or(5))
                    .cloned()
                    .map(Arc::new)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_latest_history_snapshot(
        &self,
        destination: IsdAs,
        k: Option<usize>,
    ) -> Result<Vec<Arc<Beacon>>, DomainError> {
        self.check_available(destination)?;
        let destinations = self.destinations.read().await;
        Ok(destinations
            .get(&destination)
            .map(|d| d.history.iter().take(k.unwrap_or(5)).cloned().collect())
            .unwrap_or_default())
    }

    async fn get_segment(
        &self,
        destination: IsdAs,
        id: SegmentId,
    ) -> Result<Option<Arc<Beacon>>, DomainError> {
        self.check_available(destination)?;
        let destinations = self.destinations.read().await;
        Ok(destinations.get(&destination).and_then(|d| {
            d.live
                .iter()
                .find(|s| s.identity_hash() == id)
                .cloned()
                .map(Arc::new)
        }))
    }

    async fn stats(&self, destination: IsdAs) -> Result<Option<PathStoreStats>, DomainError> {
        self.check_available(destination)?;
        let destinations = self.destinations.read().await;
        Ok(destinations.get(&destination).map(|d| PathStoreStats {
            live_candidates: d.live.len(),
            history_depth: d.history.len(),
            ..PathStoreStats::default()
        }))
    }
}
