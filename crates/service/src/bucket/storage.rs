use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::{Ncco, NccoId, NccoMap, DEFAULT_TTL};
use crate::errors::StorageError;

/// Storage contract for buckets and their documents.
///
/// Every operation is atomic with respect to every other operation on the
/// same storage. Values handed out are copies.
#[async_trait]
pub trait BucketStorage: Send + Sync {
    /// Create an empty bucket. Fails without mutating state if `name` exists.
    ///
    /// `ttl` is accepted but has no runtime effect.
    async fn create_bucket(&self, name: &str, ttl: Option<Duration>) -> Result<String, StorageError>;

    async fn bucket_exists(&self, name: &str) -> bool;

    /// Detach a bucket and return all of its documents, or `None` if absent.
    async fn remove_bucket(&self, name: &str) -> Option<NccoMap>;

    /// Store `ncco` under a freshly generated id.
    async fn add_ncco(&self, bucket: &str, ncco: Ncco) -> Result<NccoId, StorageError>;

    /// `Ok(None)` when the bucket exists but the id does not.
    async fn get_ncco(&self, bucket: &str, id: &NccoId) -> Result<Option<Ncco>, StorageError>;

    /// `Ok(None)` when the bucket exists but the id does not.
    async fn remove_ncco(&self, bucket: &str, id: &NccoId) -> Result<Option<Ncco>, StorageError>;
}

/// In-memory storage guarded by a single lock over the whole bucket map.
///
/// Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct MemoryBucketStorage {
    inner: Arc<Mutex<HashMap<String, NccoMap>>>,
}

impl MemoryBucketStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BucketStorage for MemoryBucketStorage {
    async fn create_bucket(&self, name: &str, ttl: Option<Duration>) -> Result<String, StorageError> {
        let ttl = ttl.unwrap_or(DEFAULT_TTL);

        let mut buckets = self.inner.lock().await;
        if buckets.contains_key(name) {
            return Err(StorageError::DuplicateBucket(name.to_string()));
        }
        buckets.insert(name.to_string(), NccoMap::new());
        drop(buckets);

        debug!(bucket = %name, ttl_secs = ttl.as_secs(), "bucket created");
        Ok(name.to_string())
    }

    async fn bucket_exists(&self, name: &str) -> bool {
        self.inner.lock().await.contains_key(name)
    }

    async fn remove_bucket(&self, name: &str) -> Option<NccoMap> {
        let removed = self.inner.lock().await.remove(name);
        if let Some(nccos) = &removed {
            debug!(bucket = %name, nccos = nccos.len(), "bucket removed");
        }
        removed
    }

    async fn add_ncco(&self, bucket: &str, ncco: Ncco) -> Result<NccoId, StorageError> {
        let mut buckets = self.inner.lock().await;
        let nccos = buckets
            .get_mut(bucket)
            .ok_or_else(|| StorageError::bucket_not_found(bucket))?;

        let mut id = Uuid::new_v4();
        while nccos.contains_key(&id) {
            id = Uuid::new_v4();
        }
        nccos.insert(id, ncco);
        drop(buckets);

        debug!(%bucket, ncco_id = %id, "ncco added");
        Ok(id)
    }

    async fn get_ncco(&self, bucket: &str, id: &NccoId) -> Result<Option<Ncco>, StorageError> {
        let buckets = self.inner.lock().await;
        let nccos = buckets
            .get(bucket)
            .ok_or_else(|| StorageError::bucket_not_found(bucket))?;
        Ok(nccos.get(id).cloned())
    }

    async fn remove_ncco(&self, bucket: &str, id: &NccoId) -> Result<Option<Ncco>, StorageError> {
        let mut buckets = self.inner.lock().await;
        let nccos = buckets
            .get_mut(bucket)
            .ok_or_else(|| StorageError::bucket_not_found(bucket))?;
        let removed = nccos.remove(id);
        drop(buckets);

        if removed.is_some() {
            debug!(%bucket, ncco_id = %id, "ncco removed");
        }
        Ok(removed)
    }
}
