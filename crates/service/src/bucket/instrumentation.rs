//! Prometheus instrumentation for any [`BucketStorage`].
//!
//! [`InstrumentedBucketStorage`] forwards every call unchanged. Mutating calls
//! count into `update_*`, document reads into `read_*`; the live gauges move
//! only after the wrapped call succeeds.

use std::time::Duration;

use async_trait::async_trait;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntGauge, Registry};

use super::{BucketStorage, Ncco, NccoId, NccoMap};
use crate::errors::StorageError;

const LATENCY_BUCKETS: &[f64] = &[0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0];

#[derive(Clone)]
pub struct StorageMetrics {
    pub live_buckets: IntGauge,
    pub live_nccos: IntGauge,
    pub update_count: IntCounter,
    pub update_error: IntCounter,
    pub update_time: Histogram,
    pub read_count: IntCounter,
    pub read_error: IntCounter,
    pub read_time: Histogram,
}

impl StorageMetrics {
    /// Build an unregistered metric set.
    pub fn new() -> prometheus::Result<Self> {
        Ok(Self {
            live_buckets: IntGauge::new("nccostorage_live_buckets", "number of live buckets in storage")?,
            live_nccos: IntGauge::new("nccostorage_live_nccos", "number of live nccos in storage")?,
            update_count: IntCounter::new("nccostorage_update_count", "storage update method call rate")?,
            update_error: IntCounter::new("nccostorage_update_error", "storage update error rate")?,
            update_time: Histogram::with_opts(
                HistogramOpts::new("nccostorage_update_time", "storage update request latency (in seconds)")
                    .buckets(LATENCY_BUCKETS.to_vec()),
            )?,
            read_count: IntCounter::new("nccostorage_read_count", "storage read method call rate")?,
            read_error: IntCounter::new("nccostorage_read_error", "storage read error rate")?,
            read_time: Histogram::with_opts(
                HistogramOpts::new("nccostorage_read_time", "storage read request latency (in seconds)")
                    .buckets(LATENCY_BUCKETS.to_vec()),
            )?,
        })
    }

    /// Build the set and register it; fails if the names are already taken.
    pub fn with_registry(registry: &Registry) -> prometheus::Result<Self> {
        let metrics = Self::new()?;
        metrics.register(registry)?;
        Ok(metrics)
    }

    pub fn register(&self, registry: &Registry) -> prometheus::Result<()> {
        registry.register(Box::new(self.live_buckets.clone()))?;
        registry.register(Box::new(self.live_nccos.clone()))?;
        registry.register(Box::new(self.update_count.clone()))?;
        registry.register(Box::new(self.update_error.clone()))?;
        registry.register(Box::new(self.update_time.clone()))?;
        registry.register(Box::new(self.read_count.clone()))?;
        registry.register(Box::new(self.read_error.clone()))?;
        registry.register(Box::new(self.read_time.clone()))?;
        Ok(())
    }
}

pub struct InstrumentedBucketStorage<S> {
    inner: S,
    metrics: StorageMetrics,
}

impl<S: BucketStorage> InstrumentedBucketStorage<S> {
    pub fn with_metrics(inner: S, metrics: StorageMetrics) -> Self {
        Self { inner, metrics }
    }

    pub fn metrics(&self) -> &StorageMetrics {
        &self.metrics
    }

    fn count_update<T>(&self, result: Result<T, StorageError>) -> Result<T, StorageError> {
        if result.is_err() {
            self.metrics.update_error.inc();
        }
        result
    }
}

#[async_trait]
impl<S: BucketStorage> BucketStorage for InstrumentedBucketStorage<S> {
    async fn create_bucket(&self, name: &str, ttl: Option<Duration>) -> Result<String, StorageError> {
        self.metrics.update_count.inc();
        let _timer = self.metrics.update_time.start_timer();
        let name = self.count_update(self.inner.create_bucket(name, ttl).await)?;
        self.metrics.live_buckets.inc();
        Ok(name)
    }

    async fn bucket_exists(&self, name: &str) -> bool {
        self.inner.bucket_exists(name).await
    }

    async fn remove_bucket(&self, name: &str) -> Option<NccoMap> {
        self.metrics.update_count.inc();
        let _timer = self.metrics.update_time.start_timer();
        let removed = self.inner.remove_bucket(name).await;
        if let Some(nccos) = &removed {
            self.metrics.live_buckets.dec();
            self.metrics.live_nccos.sub(nccos.len() as i64);
        }
        removed
    }

    async fn add_ncco(&self, bucket: &str, ncco: Ncco) -> Result<NccoId, StorageError> {
        self.metrics.update_count.inc();
        let _timer = self.metrics.update_time.start_timer();
        let id = self.count_update(self.inner.add_ncco(bucket, ncco).await)?;
        self.metrics.live_nccos.inc();
        Ok(id)
    }

    async fn get_ncco(&self, bucket: &str, id: &NccoId) -> Result<Option<Ncco>, StorageError> {
        self.metrics.read_count.inc();
        let _timer = self.metrics.read_time.start_timer();
        let result = self.inner.get_ncco(bucket, id).await;
        if result.is_err() {
            self.metrics.read_error.inc();
        }
        result
    }

    async fn remove_ncco(&self, bucket: &str, id: &NccoId) -> Result<Option<Ncco>, StorageError> {
        self.metrics.update_count.inc();
        let _timer = self.metrics.update_time.start_timer();
        let removed = self.count_update(self.inner.remove_ncco(bucket, id).await)?;
        if removed.is_some() {
            self.metrics.live_nccos.dec();
        }
        Ok(removed)
    }
}
