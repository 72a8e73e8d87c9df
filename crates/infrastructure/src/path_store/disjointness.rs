use ferrous_pathstore_domain::{IsdAs, PathSegment, SegmentId};
use std::collections::HashMap;

/// Decayed entries below this are dropped.
const PRUNE_THRESHOLD: f64 = 1e-9;

/// Item a sent segment is counted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisjointnessKey {
    Path(SegmentId),
    Domain(IsdAs),
    /// Domain plus the egress interface of its primary hop marking.
    Interface(IsdAs, u64),
}

/// Keys a segment contributes: its identity, every domain on the hop chain
/// and every (domain, egress interface) pair.
pub fn disjointness_keys<S: PathSegment>(id: SegmentId, segment: &S) -> Vec<DisjointnessKey> {
    let entries = segment.as_entries();
    let mut keys = Vec::with_capacity(1 + entries.len() * 2);
    keys.push(DisjointnessKey::Path(id));
    for entry in entries {
        keys.push(DisjointnessKey::Domain(entry.isd_as));
        if let Some(marking) = entry.primary() {
            keys.push(DisjointnessKey::Interface(
                entry.isd_as,
                marking.egress_interface,
            ));
        }
    }
    keys
}

/// Exponentially decayed usage weights over paths, domains and interfaces.
///
/// Weights only grow through [`record_sent`](Self::record_sent) and shrink by
/// `e^-(elapsed seconds)` on every [`decay_and_touch`](Self::decay_and_touch).
#[derive(Debug, Default)]
pub struct DisjointnessTracker {
    weights: HashMap<DisjointnessKey, f64>,
    last_update_time: f64,
}

impl DisjointnessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiplies every weight by `exp(last_update_time - now)` and moves the
    /// reference time to `now`. A clock that went backwards leaves the tracker
    /// untouched.
    pub fn decay_and_touch(&mut self, now: f64) {
        if now <= self.last_update_time {
            return;
        }
        let factor = (self.last_update_time - now).exp();
        self.weights.retain(|_, weight| {
            *weight *= factor;
            *weight >= PRUNE_THRESHOLD
        });
        self.last_update_time = now;
    }

    pub fn add(&mut self, key: DisjointnessKey, amount: f64) {
        *self.weights.entry(key).or_insert(0.0) += amount;
    }

    pub fn get(&self, key: &DisjointnessKey) -> f64 {
        self.weights.get(key).copied().unwrap_or(0.0)
    }

    /// Counts one more use of every key of a segment that went out.
    pub fn record_sent<'a>(&mut self, keys: impl IntoIterator<Item = &'a DisjointnessKey>) {
        for key in keys {
            self.add(*key, 1.0);
        }
    }

    /// Sum of the current weights of `keys`.
    pub fn overlap<'a>(&self, keys: impl IntoIterator<Item = &'a DisjointnessKey>) -> f64 {
        keys.into_iter().map(|key| self.get(key)).sum()
    }

    pub fn last_update_time(&self) -> f64 {
        self.last_update_time
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Turns raw overlaps into scores in [0, 1]: the most-used candidate gets 0,
/// a candidate sharing nothing with sent traffic gets 1.
pub fn normalize_overlaps(raw: &[f64]) -> Vec<f64> {
    let max = raw.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return vec![1.0; raw.len()];
    }
    raw.iter().map(|overlap| 1.0 - overlap / max).collect()
}
