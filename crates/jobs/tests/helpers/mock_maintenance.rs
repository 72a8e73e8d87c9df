#![allow(dead_code)]
use async_trait::async_trait;
use ferrous_pathstore_application::ports::{ExpiryOutcome, PathStoreMaintenancePort};
use ferrous_pathstore_domain::DomainError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct MockPathStoreMaintenancePort {
    call_count: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
    outcome: Arc<RwLock<ExpiryOutcome>>,
}

impl MockPathStoreMaintenancePort {
    pub fn new() -> Self {
        Self {
            call_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
            outcome: Arc::new(RwLock::new(ExpiryOutcome::default())),
        }
    }

    pub fn with_outcome(mut self, outcome: ExpiryOutcome) -> Self {
        self.outcome = Arc::new(RwLock::new(outcome));
        self
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PathStoreMaintenancePort for MockPathStoreMaintenancePort {
    async fn run_expiry_cycle(&self) -> Result<ExpiryOutcome, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if *self.should_fail.read().await {
            return Err(DomainError::StoreUnavailable("mock".to_string()));
        }
        Ok(self.outcome.read().await.clone())
    }
}
