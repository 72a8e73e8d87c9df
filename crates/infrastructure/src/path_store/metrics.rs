use ferrous_pathstore_application::ports::PathStoreStats;

/// Lifetime counters of one store. Only its worker touches them.
#[derive(Debug, Default, Clone)]
pub struct StoreCounters {
    pub inserted: u64,
    pub refreshed: u64,
    pub rejected: u64,
    pub evicted: u64,
    pub expired: u64,
    pub removed: u64,
    pub retrievals: u64,
}

impl StoreCounters {
    pub fn snapshot(&self, live_candidates: usize, history_depth: usize) -> PathStoreStats {
        PathStoreStats {
            live_candidates,
            history_depth,
            inserted: self.inserted,
            refreshed: self.refreshed,
            rejected: self.rejected,
            evicted: self.evicted,
            expired: self.expired,
            removed: self.removed,
            retrievals: self.retrievals,
        }
    }
}
