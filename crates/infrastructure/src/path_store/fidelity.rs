use ferrous_pathstore_domain::{PathPolicy, PathProperty};

/// Property weights resolved once from the policy, so scoring passes do not
/// hit the weight map per candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FidelityWeights {
    pub peer_links: f64,
    pub hops_length: f64,
    pub disjointness: f64,
    pub last_sent_time: f64,
    pub last_seen_time: f64,
    pub delay_time: f64,
    pub expiration_time: f64,
    pub guaranteed_bandwidth: f64,
    pub available_bandwidth: f64,
    pub total_bandwidth: f64,
}

impl FidelityWeights {
    pub fn from_policy(policy: &PathPolicy) -> Self {
        let w = |property| policy.weight(property) as f64;
        Self {
            peer_links: w(PathProperty::PeerLinks),
            hops_length: w(PathProperty::HopsLength),
            disjointness: w(PathProperty::Disjointness),
            last_sent_time: w(PathProperty::LastSentTime),
            last_seen_time: w(PathProperty::LastSeenTime),
            delay_time: w(PathProperty::DelayTime),
            expiration_time: w(PathProperty::ExpirationTime),
            guaranteed_bandwidth: w(PathProperty::GuaranteedBandwidth),
            available_bandwidth: w(PathProperty::AvailableBandwidth),
            total_bandwidth: w(PathProperty::TotalBandwidth),
        }
    }
}

/// Inputs of one fidelity evaluation. Times are Unix seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FidelityInputs {
    pub peer_links: f64,
    pub hops_length: f64,
    pub disjointness: f64,
    pub last_sent_time: f64,
    pub last_seen_time: f64,
    /// Normalized delay, in (0, 1] after a scoring pass.
    pub delay_time: f64,
    pub expiration_time: f64,
    pub guaranteed_bandwidth: f64,
    pub available_bandwidth: f64,
    pub total_bandwidth: f64,
}

/// Floor division; a zero or negative divisor is replaced by 1.
#[inline]
pub fn floor_div(numerator: f64, divisor: f64) -> f64 {
    let divisor = if divisor > 0.0 { divisor } else { 1.0 };
    (numerator / divisor).floor()
}

/// Weighted sum over the candidate's properties.
///
/// Counts and bandwidths are rewarded multiplicatively; hop count and delay
/// are inverse costs; the freshness terms are scaled by `now` so weights stay
/// comparable across query times.
pub fn compute_fidelity(weights: &FidelityWeights, inputs: &FidelityInputs, now: u64) -> f64 {
    let now = now as f64;
    let mut fidelity = 0.0;

    fidelity += weights.peer_links * inputs.peer_links;
    fidelity += floor_div(weights.hops_length, inputs.hops_length);
    fidelity += weights.disjointness * inputs.disjointness;
    if now != 0.0 {
        fidelity += floor_div(weights.last_sent_time * (now - inputs.last_sent_time), now);
        fidelity += floor_div(weights.last_seen_time * inputs.last_seen_time, now);
    }
    fidelity += floor_div(weights.delay_time, inputs.delay_time);
    fidelity += floor_div(
        weights.expiration_time * (inputs.expiration_time - now),
        inputs.expiration_time,
    );
    fidelity += weights.guaranteed_bandwidth * inputs.guaranteed_bandwidth;
    fidelity += weights.available_bandwidth * inputs.available_bandwidth;
    fidelity += weights.total_bandwidth * inputs.total_bandwidth;

    fidelity
}
