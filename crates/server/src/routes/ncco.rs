use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use service::bucket::{Bucket, NccoId};
use service::ncco::validate;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct NccoResponse {
    pub ncco_id: NccoId,
    pub ncco: Value,
}

async fn find_bucket(state: &AppState, bucket_id: &str) -> Result<Bucket, ApiError> {
    state
        .buckets
        .lookup(bucket_id)
        .await
        .ok_or_else(|| ApiError::BucketNotFound(bucket_id.to_string()))
}

/// The bucket is looked up before the body is parsed.
pub async fn add_ncco(
    State(state): State<AppState>,
    Path(bucket_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<NccoResponse>), ApiError> {
    let bucket = find_bucket(&state, &bucket_id).await?;

    let ncco: Value = serde_json::from_slice(&body).map_err(|_| ApiError::InvalidJson)?;
    let ncco = validate(ncco)?;

    let ncco_id = bucket.add(ncco.clone()).await?;
    Ok((StatusCode::CREATED, Json(NccoResponse { ncco_id, ncco })))
}

pub async fn lookup_ncco(
    State(state): State<AppState>,
    Path((bucket_id, ncco_id)): Path<(String, String)>,
) -> Result<Json<NccoResponse>, ApiError> {
    let bucket = find_bucket(&state, &bucket_id).await?;

    let not_found = || ApiError::NccoNotFound(ncco_id.clone());
    let id = NccoId::parse_str(&ncco_id).map_err(|_| not_found())?;
    let ncco = bucket.lookup(&id).await?.ok_or_else(not_found)?;
    Ok(Json(NccoResponse { ncco_id: id, ncco }))
}

/// Succeeds whether or not the document existed.
pub async fn remove_ncco(
    State(state): State<AppState>,
    Path((bucket_id, ncco_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let bucket = find_bucket(&state, &bucket_id).await?;

    if let Ok(id) = NccoId::parse_str(&ncco_id) {
        bucket.remove(&id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
