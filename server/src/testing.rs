use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::Value;
use tower::ServiceExt;

use crate::{config::AppConfig, http::AppState};

pub async fn memory_state() -> AppState {
    let pool = Database::connect("sqlite::memory:").await.unwrap();
    platform_db::ensure_schema(&pool).await.unwrap();
    AppState::new(pool, AppConfig::default())
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
