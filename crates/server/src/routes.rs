use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub mod bucket;
pub mod ncco;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: bucket and ncco routes plus health.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let buckets = Router::new()
        .route("/bucket", post(bucket::create_bucket))
        .route("/bucket/:bucket_id", delete(bucket::remove_bucket));

    let nccos = Router::new()
        .route("/bucket/:bucket_id/ncco", post(ncco::add_ncco))
        .route(
            "/bucket/:bucket_id/ncco/:ncco_id",
            get(ncco::lookup_ncco).delete(ncco::remove_ncco),
        );

    Router::new()
        .route("/health", get(health))
        .merge(buckets)
        .merge(nccos)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use service::bucket::{BucketOperations, MemoryBucketStorage};
    use tower::ServiceExt;

    fn app() -> Router {
        let buckets = BucketOperations::new(Arc::new(MemoryBucketStorage::new()));
        build_router(AppState::new(buckets), CorsLayer::very_permissive())
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(res: axum::response::Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let res = app().oneshot(empty_request(Method::GET, "/health")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["status"], "ok");
    }

    #[tokio::test]
    async fn create_bucket_statuses() {
        let app = app();
        let res = app.clone().oneshot(json_request(Method::POST, "/bucket", json!({"id": "b1"}))).await.unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = app.clone().oneshot(json_request(Method::POST, "/bucket", json!({"id": "b1"}))).await.unwrap();
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body = body_json(res).await;
        assert_eq!(body["status"], "error");

        let res = app.clone().oneshot(json_request(Method::POST, "/bucket", json!({"name": "b2"}))).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["text"], "missing 'id' in request body");

        let res = app.oneshot(json_request(Method::POST, "/bucket", json!({"id": ""}))).await.unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn create_bucket_requires_json() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/bucket")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("id=b1"))
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["text"], "request body must be json");
    }

    #[tokio::test]
    async fn ncco_round_trip() {
        let app = app();
        app.clone().oneshot(json_request(Method::POST, "/bucket", json!({"id": "b1"}))).await.unwrap();

        let ncco = json!({"action": "talk", "text": "hi"});
        let res = app.clone().oneshot(json_request(Method::POST, "/bucket/b1/ncco", ncco.clone())).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let created = body_json(res).await;
        assert_eq!(created["ncco"], ncco);
        let id = created["ncco_id"].as_str().unwrap().to_string();

        let uri = format!("/bucket/b1/ncco/{id}");
        let res = app.clone().oneshot(empty_request(Method::GET, &uri)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await, json!({"ncco_id": id, "ncco": ncco}));

        let res = app.clone().oneshot(empty_request(Method::DELETE, &uri)).await.unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let res = app.clone().oneshot(empty_request(Method::DELETE, &uri)).await.unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = app.oneshot(empty_request(Method::GET, &uri)).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_bucket_wins_over_bad_body() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/bucket/ghost/ncco")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res).await["text"], "bucket with id ghost not found");
    }

    #[tokio::test]
    async fn invalid_nccos_are_rejected() {
        let app = app();
        app.clone().oneshot(json_request(Method::POST, "/bucket", json!({"id": "b1"}))).await.unwrap();

        let req = Request::builder()
            .method(Method::POST)
            .uri("/bucket/b1/ncco")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = app
            .oneshot(json_request(Method::POST, "/bucket/b1/ncco", json!({"action": "dance"})))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_bucket_and_malformed_ids() {
        let app = app();
        let res = app.clone().oneshot(empty_request(Method::GET, "/bucket/ghost/ncco/abc")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let res = app.clone().oneshot(empty_request(Method::DELETE, "/bucket/ghost/ncco/abc")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        app.clone().oneshot(json_request(Method::POST, "/bucket", json!({"id": "b1"}))).await.unwrap();
        let res = app.clone().oneshot(empty_request(Method::GET, "/bucket/b1/ncco/not-a-uuid")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let res = app.oneshot(empty_request(Method::DELETE, "/bucket/b1/ncco/not-a-uuid")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn remove_bucket_reports_count() {
        let app = app();
        app.clone().oneshot(json_request(Method::POST, "/bucket", json!({"id": "b1", "ttl": 60}))).await.unwrap();
        for text in ["a", "b", "c"] {
            let res = app
                .clone()
                .oneshot(json_request(Method::POST, "/bucket/b1/ncco", json!({"action": "talk", "text": text})))
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::CREATED);
        }

        let res = app.clone().oneshot(empty_request(Method::DELETE, "/bucket/b1")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await, json!({"id": "b1", "nccos": 3}));

        let res = app.oneshot(empty_request(Method::DELETE, "/bucket/b1")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
