use super::disjointness::{disjointness_keys, DisjointnessKey};
use super::fidelity::{compute_fidelity, FidelityInputs, FidelityWeights};
use ferrous_pathstore_domain::{DomainError, PathSegment, SegmentId};
use std::sync::Arc;

/// How far back a new candidate's "last sent" time is placed: one week.
pub const DEFAULT_LAST_SENT_OFFSET_SECS: u64 = 7 * 24 * 3600;

/// One candidate path held by a store.
#[derive(Debug, Clone)]
pub struct CandidateRecord<S: PathSegment> {
    pub id: SegmentId,
    segment: Arc<S>,
    keys: Vec<DisjointnessKey>,
    pub peer_links: usize,
    pub hops_length: usize,
    /// Creation time of the latest announcement, Unix seconds.
    pub timestamp: u64,
    pub last_sent_time: u64,
    pub last_seen_time: u64,
    /// Raw `last_seen_time - timestamp` until a scoring pass normalizes it.
    pub delay_time: f64,
    pub expiration_time: u64,
    pub guaranteed_bandwidth: i64,
    pub available_bandwidth: i64,
    pub total_bandwidth: i64,
    pub disjointness: f64,
    pub fidelity: f64,
}

impl<S: PathSegment> CandidateRecord<S> {
    pub fn new(segment: S, now: u64) -> Self {
        let id = segment.identity_hash();
        let keys = disjointness_keys(id, &segment);
        let timestamp = segment.creation_timestamp();

        Self {
            id,
            peer_links: segment.peer_link_count(),
            hops_length: segment.hop_count(),
            timestamp,
            last_sent_time: now.saturating_sub(DEFAULT_LAST_SENT_OFFSET_SECS),
            last_seen_time: now,
            delay_time: raw_delay(now, timestamp),
            expiration_time: segment.expiration_time(),
            guaranteed_bandwidth: 0,
            available_bandwidth: 0,
            total_bandwidth: 0,
            disjointness: 0.0,
            fidelity: 0.0,
            segment: Arc::new(segment),
            keys,
        }
    }

    pub fn segment(&self) -> &Arc<S> {
        &self.segment
    }

    pub fn disjointness_keys(&self) -> &[DisjointnessKey] {
        &self.keys
    }

    /// Replaces the stored announcement with a newer copy of the same route.
    pub fn update(&mut self, segment: S, now: u64) -> Result<(), DomainError> {
        let actual = segment.identity_hash();
        if actual != self.id {
            return Err(DomainError::SegmentMismatch {
                expected: self.id.to_string(),
                actual: actual.to_string(),
            });
        }

        self.timestamp = segment.creation_timestamp();
        self.last_seen_time = now;
        self.delay_time = raw_delay(now, self.timestamp);
        self.expiration_time = segment.expiration_time();
        self.keys = disjointness_keys(actual, &segment);
        self.segment = Arc::new(segment);
        Ok(())
    }

    pub fn sending(&mut self, now: u64) {
        self.last_sent_time = now;
    }

    #[inline]
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expiration_time <= now
    }

    /// Delay used by the normalization pass, at least one second.
    pub(crate) fn raw_delay(&self) -> f64 {
        raw_delay(self.last_seen_time, self.timestamp)
    }

    pub fn update_fidelity(&mut self, weights: &FidelityWeights, now: u64) {
        self.fidelity = compute_fidelity(weights, &self.fidelity_inputs(), now);
    }

    fn fidelity_inputs(&self) -> FidelityInputs {
        FidelityInputs {
            peer_links: self.peer_links as f64,
            hops_length: self.hops_length as f64,
            disjointness: self.disjointness,
            last_sent_time: self.last_sent_time as f64,
            last_seen_time: self.last_seen_time as f64,
            delay_time: self.delay_time,
            expiration_time: self.expiration_time as f64,
            guaranteed_bandwidth: self.guaranteed_bandwidth as f64,
            available_bandwidth: self.available_bandwidth as f64,
            total_bandwidth: self.total_bandwidth as f64,
        }
    }
}

fn raw_delay(seen: u64, created: u64) -> f64 {
    (seen as i64 - created as i64 + 1).max(1) as f64
}
