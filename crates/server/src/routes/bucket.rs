use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBucketRequest {
    pub id: Option<String>,
    /// Seconds. Accepted and passed down, never enforced.
    pub ttl: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct RemovedBucket {
    pub id: String,
    pub nccos: usize,
}

pub async fn create_bucket(
    State(state): State<AppState>,
    payload: Result<Json<CreateBucketRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = payload.map_err(|_| ApiError::InvalidJson)?;
    let name = req.id.ok_or(ApiError::MissingBucketId)?;

    let bucket = state.buckets.create(&name, req.ttl.map(Duration::from_secs)).await?;
    info!(bucket = %bucket.name(), "bucket created");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_bucket(
    State(state): State<AppState>,
    Path(bucket_id): Path<String>,
) -> Result<Json<RemovedBucket>, ApiError> {
    let info = state
        .buckets
        .remove(&bucket_id)
        .await
        .ok_or_else(|| ApiError::BucketNotFound(bucket_id.clone()))?;
    info!(bucket = %info.name(), nccos = info.len(), "bucket removed");
    Ok(Json(RemovedBucket { id: bucket_id, nccos: info.len() }))
}
