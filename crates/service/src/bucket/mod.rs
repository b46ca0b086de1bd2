//! Bucket storage
//!
//! Callers go through [`BucketOperations`] to obtain [`Bucket`] handles; every
//! handle call is delegated to a shared [`BucketStorage`] implementation.

use std::{collections::HashMap, time::Duration};

use uuid::Uuid;

pub mod storage;
pub mod registry;
pub mod instrumentation;

pub use instrumentation::{InstrumentedBucketStorage, StorageMetrics};
pub use registry::{Bucket, BucketInfo, BucketOperations};
pub use storage::{BucketStorage, MemoryBucketStorage};

/// An opaque, already validated call-control document.
pub type Ncco = serde_json::Value;

/// Identifier assigned to a document when it is added to a bucket.
pub type NccoId = Uuid;

/// Documents held by one bucket, keyed by id.
pub type NccoMap = HashMap<NccoId, Ncco>;

/// Time-to-live used when a bucket is created without one. Never enforced.
pub const DEFAULT_TTL: Duration = Duration::from_secs(configs::DEFAULT_TTL_SECS);
