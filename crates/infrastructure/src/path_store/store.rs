use super::disjointness::{normalize_overlaps, DisjointnessTracker};
use super::fidelity::FidelityWeights;
use super::history::SnapshotHistory;
use super::metrics::StoreCounters;
use super::record::CandidateRecord;
use ferrous_pathstore_application::ports::{Admission, Clock, PathStoreStats};
use ferrous_pathstore_domain::{ConfigError, PathPolicy, PathSegment, SegmentId};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Checks that `policy` can back a store: consistent bounds and a range for
/// every ranged property.
pub fn validate_policy(policy: &PathPolicy) -> Result<(), ConfigError> {
    policy.validate()?;
    if !policy.valid_ranges() {
        return Err(ConfigError::Validation(
            "path policy must define a range for every ranged property".to_string(),
        ));
    }
    Ok(())
}

/// Bounded, scored candidate set for one destination.
///
/// Candidates are kept in insertion order; ranking happens at read time with a
/// stable sort, so equal fidelities resolve to the earlier insertion. Not
/// synchronized: one owner mutates it at a time.
pub struct CandidateStore<S: PathSegment> {
    policy: Arc<PathPolicy>,
    weights: FidelityWeights,
    clock: Arc<dyn Clock>,
    candidates: Vec<CandidateRecord<S>>,
    history: SnapshotHistory<S>,
    disjointness: DisjointnessTracker,
    counters: StoreCounters,
}

impl<S: PathSegment> CandidateStore<S> {
    pub fn new(policy: Arc<PathPolicy>, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        validate_policy(&policy)?;
        Ok(Self::with_validated_policy(policy, clock))
    }

    pub(crate) fn with_validated_policy(policy: Arc<PathPolicy>, clock: Arc<dyn Clock>) -> Self {
        Self {
            weights: FidelityWeights::from_policy(&policy),
            history: SnapshotHistory::new(policy.history_limit),
            candidates: Vec::with_capacity(policy.candidates_set_size + 1),
            disjointness: DisjointnessTracker::new(),
            counters: StoreCounters::default(),
            policy,
            clock,
        }
    }

    pub fn policy(&self) -> &PathPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Live candidates in insertion order, with the scores of the last pass.
    pub fn candidates(&self) -> &[CandidateRecord<S>] {
        &self.candidates
    }

    pub fn disjointness(&self) -> &DisjointnessTracker {
        &self.disjointness
    }

    pub fn check_filters(&self, segment: &S) -> bool {
        self.policy.check_filters(segment, self.clock.now_secs())
    }

    pub fn add_segment(&mut self, segment: S) -> Admission {
        let now = self.clock.now_secs();
        if !self.policy.check_filters(&segment, now) {
            self.counters.rejected += 1;
            return Admission::Rejected;
        }

        let id = segment.identity_hash();
        if let Some(record) = self.candidates.iter_mut().find(|record| record.id == id) {
            return match record.update(segment, now) {
                Ok(()) => {
                    self.counters.refreshed += 1;
                    debug!(segment = %id.short(), "PathStore: candidate refreshed");
                    Admission::Refreshed
                }
                Err(e) => {
                    warn!(error = %e, "PathStore: candidate refresh failed");
                    self.counters.rejected += 1;
                    Admission::Rejected
                }
            };
        }

        self.candidates.push(CandidateRecord::new(segment, now));
        self.counters.inserted += 1;
        debug!(
            segment = %id.short(),
            candidates = self.candidates.len(),
            "PathStore: candidate inserted"
        );

        let evicted = self.trim_at(now);
        if evicted.is_none() && !self.candidates.iter().any(|record| record.id == id) {
            return Admission::Expired;
        }
        Admission::Inserted { evicted }
    }

    /// Brings the store back under `candidates_set_size`.
    ///
    /// Expired candidates go first; if that is not enough, one full scoring
    /// pass runs and the single lowest-fidelity candidate is dropped, the
    /// latest-inserted one on a tie. Returns the evicted id.
    pub fn trim(&mut self) -> Option<SegmentId> {
        let now = self.clock.now_secs();
        self.trim_at(now)
    }

    fn trim_at(&mut self, now: u64) -> Option<SegmentId> {
        let cap = self.policy.candidates_set_size;
        if self.candidates.len() <= cap {
            return None;
        }

        self.remove_expired(now);
        if self.candidates.len() <= cap {
            return None;
        }

        self.update_all_fidelity(now);
        let victim = self.lowest_fidelity_index()?;
        let record = self.candidates.remove(victim);
        self.counters.evicted += 1;
        info!(
            segment = %record.id.short(),
            fidelity = record.fidelity,
            "PathStore: lowest-fidelity candidate evicted"
        );
        Some(record.id)
    }

    fn lowest_fidelity_index(&self) -> Option<usize> {
        self.candidates
            .iter()
            .enumerate()
            .min_by(|(ia, a), (ib, b)| {
                a.fidelity
                    .total_cmp(&b.fidelity)
                    .then_with(|| ib.cmp(ia))
            })
            .map(|(index, _)| index)
    }

    /// Drops every candidate whose id is in `ids`, then rescores the rest.
    pub fn remove_segments(&mut self, ids: &[SegmentId]) -> usize {
        let now = self.clock.now_secs();
        let before = self.candidates.len();
        self.candidates.retain(|record| !ids.contains(&record.id));
        let removed = before - self.candidates.len();
        self.counters.removed += removed as u64;

        if removed > 0 {
            debug!(removed, "PathStore: candidates removed");
        }
        if !self.candidates.is_empty() {
            self.update_all_fidelity(now);
        }
        removed
    }

    /// Drops expired candidates and returns how many went.
    pub fn expire(&mut self) -> usize {
        let now = self.clock.now_secs();
        self.remove_expired(now)
    }

    fn remove_expired(&mut self, now: u64) -> usize {
        let before = self.candidates.len();
        self.candidates.retain(|record| !record.is_expired_at(now));
        let expired = before - self.candidates.len();
        if expired > 0 {
            self.counters.expired += expired as u64;
            debug!(expired, now, "PathStore: expired candidates dropped");
        }
        expired
    }

    /// Top `k` live segments by descending fidelity (`best_set_size` when
    /// `None`).
    ///
    /// With `mark_sent`, each returned record is stamped as sent and counted
    /// by the disjointness tracker. A non-empty answer is also pushed into the
    /// snapshot history.
    pub fn get_best_segments(&mut self, k: Option<usize>, mark_sent: bool) -> Vec<Arc<S>> {
        let now = self.clock.now_secs();
        let k = k.unwrap_or(self.policy.best_set_size);
        self.counters.retrievals += 1;

        self.remove_expired(now);
        if self.candidates.is_empty() || k == 0 {
            return Vec::new();
        }

        self.update_all_fidelity(now);
        let selected: Vec<usize> = self.ranked_indices().into_iter().take(k).collect();

        let mut segments = Vec::with_capacity(selected.len());
        for index in selected {
            let record = &mut self.candidates[index];
            if mark_sent {
                record.sending(now);
                self.disjointness.record_sent(record.disjointness_keys());
            }
            segments.push(Arc::clone(record.segment()));
        }

        self.history.push(segments.clone());
        segments
    }

    pub fn get_latest_history_snapshot(&self, k: Option<usize>) -> Vec<Arc<S>> {
        let k = k.unwrap_or(self.policy.best_set_size);
        self.history
            .latest()
            .map(|snapshot| snapshot.iter().take(k).cloned().collect())
            .unwrap_or_default()
    }

    pub fn get_segment(&self, id: &SegmentId) -> Option<Arc<S>> {
        self.candidates
            .iter()
            .find(|record| record.id == *id)
            .map(|record| Arc::clone(record.segment()))
    }

    pub fn stats(&self) -> PathStoreStats {
        self.counters
            .snapshot(self.candidates.len(), self.history.len())
    }

    /// Candidate indices by descending fidelity; ties keep insertion order.
    fn ranked_indices(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.candidates.len()).collect();
        order.sort_by(|&a, &b| {
            self.candidates[b]
                .fidelity
                .total_cmp(&self.candidates[a].fidelity)
        });
        order
    }

    /// Full scoring pass: decay and redistribute disjointness, normalize
    /// delay, recompute every fidelity.
    fn update_all_fidelity(&mut self, now: u64) {
        self.update_disjointness(now);
        self.update_delay();
        for record in &mut self.candidates {
            record.update_fidelity(&self.weights, now);
        }
    }

    fn update_disjointness(&mut self, now: u64) {
        self.disjointness.decay_and_touch(now as f64);
        let raw: Vec<f64> = self
            .candidates
            .iter()
            .map(|record| self.disjointness.overlap(record.disjointness_keys()))
            .collect();

        for (record, score) in self.candidates.iter_mut().zip(normalize_overlaps(&raw)) {
            record.disjointness = score;
        }
    }

    fn update_delay(&mut self) {
        let max = self
            .candidates
            .iter()
            .map(|record| record.raw_delay())
            .fold(1.0_f64, f64::max);

        for record in &mut self.candidates {
            record.delay_time = record.raw_delay() / max;
        }
    }
}

impl<S: PathSegment> fmt::Display for CandidateStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PathStore:")?;
        for record in &self.candidates {
            writeln!(
                f,
                "  Candidate: ID: {} Fidelity: {:.3}",
                record.id.short(),
                record.fidelity
            )?;
        }
        Ok(())
    }
}
