use ferrous_pathstore_jobs::{ExpirySweepJob, JobRunner};
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::MockPathStoreMaintenancePort;

#[tokio::test]
async fn test_job_runner_empty_starts_cleanly() {
    JobRunner::new().start().await;
}

#[tokio::test]
async fn test_job_runner_starts_expiry_sweep() {
    let mock = Arc::new(MockPathStoreMaintenancePort::new());
    let job = ExpirySweepJob::new(mock.clone()).with_interval(3600);

    JobRunner::new().with_expiry_sweep(job).start().await;
    sleep(Duration::from_millis(50)).await;

    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_job_runner_shutdown_token_reaches_jobs() {
    let mock = Arc::new(MockPathStoreMaintenancePort::new());
    let token = CancellationToken::new();
    let job = ExpirySweepJob::new(mock.clone()).with_interval(1);

    JobRunner::new()
        .with_expiry_sweep(job)
        .with_shutdown_token(token.clone())
        .start()
        .await;
    sleep(Duration::from_millis(50)).await;
    token.cancel();
    sleep(Duration::from_millis(50)).await;
    let after_cancel = mock.call_count();

    sleep(Duration::from_millis(1200)).await;

    assert_eq!(mock.call_count(), after_cancel);
}
