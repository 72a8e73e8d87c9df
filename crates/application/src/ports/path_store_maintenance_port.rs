use async_trait::async_trait;
use ferrous_pathstore_domain::DomainError;

/// Outcome of one expiry sweep across all destination stores.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpiryOutcome {
    pub stores: usize,
    pub expired: usize,
    pub live: usize,
    /// Stores left without live candidates and dropped from the registry.
    pub reaped: usize,
}

/// Port for background maintenance of the path stores.
#[async_trait]
pub trait PathStoreMaintenancePort: Send + Sync {
    /// Drop expired candidates from every store, then drop stores left empty.
    async fn run_expiry_cycle(&self) -> Result<ExpiryOutcome, DomainError>;
}
