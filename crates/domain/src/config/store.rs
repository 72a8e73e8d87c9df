use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Commands buffered per destination worker before senders wait.
    #[serde(default = "default_worker_queue_depth")]
    pub worker_queue_depth: usize,

    #[serde(default = "default_expiry_sweep_interval_secs")]
    pub expiry_sweep_interval_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            worker_queue_depth: default_worker_queue_depth(),
            expiry_sweep_interval_secs: default_expiry_sweep_interval_secs(),
        }
    }
}

fn default_worker_queue_depth() -> usize {
    1024
}

fn default_expiry_sweep_interval_secs() -> u64 {
    60
}
