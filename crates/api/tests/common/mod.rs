//! Shared helpers for HTTP-level integration tests.
//!
//! Requests are sent straight to the router with `tower::ServiceExt`, so no
//! TCP listener or database is needed: the app runs on [`MemoryMovieStore`].

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use movies_api::config::{ServerConfig, StoreBackend};
use movies_api::router::build_app_router;
use movies_api::state::AppState;
use movies_db::{MemoryMovieStore, MovieStore};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".parse().unwrap()],
        store: StoreBackend::Memory,
        mongo: None,
    }
}

/// Build the full application router over the given store.
pub fn build_test_app(store: Arc<dyn MovieStore>) -> Router {
    build_app_router(AppState { store }, &test_config())
}

/// Build the app over a fresh, empty in-memory store.
pub fn fresh_app() -> (Router, Arc<MemoryMovieStore>) {
    let store = Arc::new(MemoryMovieStore::new());
    (build_test_app(store.clone()), store)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn with_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    with_json(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    with_json(app, Method::PATCH, uri, body).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A valid create payload.
pub fn dune() -> serde_json::Value {
    serde_json::json!({
        "title": "Dune",
        "year": 2021,
        "genre": ["Sci-Fi"],
        "director": "Villeneuve",
        "duration": 155
    })
}

/// Create a movie through the API and return its identifier.
pub async fn create_movie(app: Router, body: serde_json::Value) -> String {
    let response = post_json(app, "/movies", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["_id"]
        .as_str()
        .expect("created movie should carry an _id")
        .to_string()
}
