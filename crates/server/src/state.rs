use std::sync::Arc;

use configs::StorageConfig;
use prometheus::Registry;
use service::bucket::{BucketOperations, InstrumentedBucketStorage, MemoryBucketStorage, StorageMetrics};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub buckets: BucketOperations,
}

impl AppState {
    pub fn new(buckets: BucketOperations) -> Self {
        Self { buckets }
    }

    /// In-memory storage reporting into `registry`.
    pub fn instrumented(storage: &StorageConfig, registry: &Registry) -> prometheus::Result<Self> {
        let metrics = StorageMetrics::with_registry(registry)?;
        let storage_impl = InstrumentedBucketStorage::with_metrics(MemoryBucketStorage::new(), metrics);
        let buckets = BucketOperations::new(Arc::new(storage_impl)).with_default_ttl(storage.default_ttl());
        Ok(Self::new(buckets))
    }
}
