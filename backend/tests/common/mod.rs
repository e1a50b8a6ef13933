//! Common test utilities for integration tests
//!
//! Every `TestApp` runs against a fresh in-memory store and the bundled
//! catalog, so tests never share records.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use liftwise_backend::{
    config::AppConfig, repositories::MemoryStore, routes, services::CatalogService,
    state::AppState,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let catalog = CatalogService::load(None).expect("bundled catalog");
        let state = AppState::new(store.clone(), catalog, AppConfig::default());
        let app = routes::create_router(state);

        Self { app, store }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.send(json_request("POST", path, body)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.send(json_request("PUT", path, body)).await
    }

    /// GET and parse the body, asserting 200
    pub async fn get_json(&self, path: &str) -> Value {
        let (status, body) = self.get(path).await;
        assert_eq!(status, StatusCode::OK, "GET {} -> {}", path, body);
        serde_json::from_str(&body).unwrap()
    }

    /// Save a pain-free intermediate profile and three-day settings
    pub async fn onboard(&self) {
        let (status, body) = self.put("/api/v1/profile", &profile_body().to_string()).await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        let settings = json!({"workouts_per_week": 3});
        let (status, body) = self.put("/api/v1/settings", &settings.to_string()).await;
        assert_eq!(status, StatusCode::OK, "{}", body);
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}

fn json_request(method: &str, path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn profile_body() -> Value {
    json!({
        "gender": "female",
        "date_of_birth": "1992-04-18",
        "height": 168.0,
        "height_unit": "cm",
        "weight": 64.0,
        "weight_unit": "kg",
        "experience": "intermediate",
        "pain_status": "no_pain",
        "squat_comfort": "yes"
    })
}
