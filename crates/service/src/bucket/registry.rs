use std::{fmt, sync::Arc, time::Duration};

use super::{BucketStorage, Ncco, NccoId, NccoMap, DEFAULT_TTL};
use crate::errors::StorageError;

/// Entry point for bucket creation, lookup and removal.
#[derive(Clone)]
pub struct BucketOperations {
    storage: Arc<dyn BucketStorage>,
    default_ttl: Duration,
}

impl BucketOperations {
    pub fn new(storage: Arc<dyn BucketStorage>) -> Self {
        Self { storage, default_ttl: DEFAULT_TTL }
    }

    /// TTL passed down when `create` is called without one.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub async fn create(&self, name: &str, ttl: Option<Duration>) -> Result<Bucket, StorageError> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let name = self.storage.create_bucket(name, Some(ttl)).await?;
        Ok(Bucket::new(name, Arc::clone(&self.storage)))
    }

    /// A handle if the bucket exists right now.
    ///
    /// The handle is not pinned to the bucket: if the bucket is removed later,
    /// handle calls fail with [`StorageError::BucketNotFound`].
    pub async fn lookup(&self, name: &str) -> Option<Bucket> {
        if self.storage.bucket_exists(name).await {
            return Some(Bucket::new(name.to_string(), Arc::clone(&self.storage)));
        }
        None
    }

    pub async fn remove(&self, name: &str) -> Option<BucketInfo> {
        let nccos = self.storage.remove_bucket(name).await?;
        Some(BucketInfo { name: name.to_string(), nccos })
    }
}

/// Handle bound to one bucket name. Holds no bucket state of its own.
#[derive(Clone)]
pub struct Bucket {
    name: String,
    storage: Arc<dyn BucketStorage>,
}

impl Bucket {
    fn new(name: String, storage: Arc<dyn BucketStorage>) -> Self {
        Self { name, storage }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn add(&self, ncco: Ncco) -> Result<NccoId, StorageError> {
        self.storage.add_ncco(&self.name, ncco).await
    }

    pub async fn lookup(&self, id: &NccoId) -> Result<Option<Ncco>, StorageError> {
        self.storage.get_ncco(&self.name, id).await
    }

    pub async fn remove(&self, id: &NccoId) -> Result<Option<Ncco>, StorageError> {
        self.storage.remove_ncco(&self.name, id).await
    }
}

impl fmt::Debug for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Summary of a removed bucket, owning the documents it held.
#[derive(Debug, Clone)]
pub struct BucketInfo {
    name: String,
    nccos: NccoMap,
}

impl BucketInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.nccos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nccos.is_empty()
    }

    pub fn into_nccos(self) -> NccoMap {
        self.nccos
    }
}
