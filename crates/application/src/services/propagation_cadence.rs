use std::sync::Mutex;

#[derive(Debug)]
struct CadenceState {
    admitted: u64,
    round_started_at: u64,
}

/// Tracks when the caller should run its next propagation round.
///
/// A round is due after `update_after_number` admissions or once
/// `update_after_time` seconds have passed since the last round; a zero
/// threshold disables that trigger.
#[derive(Debug)]
pub struct PropagationCadence {
    update_after_number: u64,
    update_after_time: u64,
    state: Mutex<CadenceState>,
}

impl PropagationCadence {
    pub fn new(update_after_number: u64, update_after_time: u64, now: u64) -> Self {
        Self {
            update_after_number,
            update_after_time,
            state: Mutex::new(CadenceState {
                admitted: 0,
                round_started_at: now,
            }),
        }
    }

    /// Counts one admitted segment and reports whether a round is due.
    pub fn record_admission(&self, now: u64) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.admitted += 1;
        self.is_due_locked(&state, now)
    }

    pub fn is_due(&self, now: u64) -> bool {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        self.is_due_locked(&state, now)
    }

    /// Starts a new round at `now`.
    pub fn reset(&self, now: u64) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.admitted = 0;
        state.round_started_at = now;
    }

    pub fn admitted_since_reset(&self) -> u64 {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).admitted
    }

    fn is_due_locked(&self, state: &CadenceState, now: u64) -> bool {
        let by_count = self.update_after_number > 0 && state.admitted >= self.update_after_number;
        let by_time = self.update_after_time > 0
            && now.saturating_sub(state.round_started_at) >= self.update_after_time;
        by_count || by_time
    }
}
