use ferrous_pathstore_application::ports::{Clock, PathStorePort};
use ferrous_pathstore_application::use_cases::{
    AddSegmentUseCase, GetBestSegmentsUseCase, RemoveSegmentsUseCase,
};
use ferrous_pathstore_domain::{Beacon, Config};
use ferrous_pathstore_infrastructure::path_store::PathStoreRegistry;
use std::sync::Arc;
use tracing::info;

pub struct PathStoreServices {
    pub registry: Arc<PathStoreRegistry<Beacon>>,
    pub add_segment: Arc<AddSegmentUseCase<Beacon>>,
    pub get_best_segments: Arc<GetBestSegmentsUseCase<Beacon>>,
    pub remove_segments: Arc<RemoveSegmentsUseCase<Beacon>>,
}

impl PathStoreServices {
    pub fn new(config: &Config, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let policy = config.path_policy()?;
        let registry = Arc::new(PathStoreRegistry::new(
            policy.clone(),
            clock.clone(),
            config.store.worker_queue_depth,
        )?);
        let store: Arc<dyn PathStorePort<Beacon>> = registry.clone();

        info!(
            queue_depth = config.store.worker_queue_depth,
            "Path store services ready"
        );

        Ok(Self {
            add_segment: Arc::new(AddSegmentUseCase::new(store.clone(), clock, &policy)),
            get_best_segments: Arc::new(GetBestSegmentsUseCase::new(store.clone())),
            remove_segments: Arc::new(RemoveSegmentsUseCase::new(store)),
            registry,
        })
    }
}
