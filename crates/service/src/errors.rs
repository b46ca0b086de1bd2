use thiserror::Error;

/// Failures raised by the bucket storage layer.
///
/// A missing document is not an error; operations report it as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("duplicate bucket {0}")]
    DuplicateBucket(String),
    #[error("non-existing bucket {0}")]
    BucketNotFound(String),
}

impl StorageError {
    pub fn bucket_not_found(name: &str) -> Self { Self::BucketNotFound(name.to_string()) }
}
