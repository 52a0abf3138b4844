// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use cafebean_api::config::Config;
use cafebean_api::db::{FirestoreDb, MemoryStore, StoreError, UserStore};
use cafebean_api::middleware::identity::resolver_from_config;
use cafebean_api::models::StoredUser;
use cafebean_api::routes::create_router;
use cafebean_api::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Store whose lookups find nothing and whose inserts always fail.
#[allow(dead_code)]
pub struct FailingInsertStore {
    pub message: String,
}

#[async_trait]
impl UserStore for FailingInsertStore {
    async fn find_user_by_email(&self, _email: &str) -> Result<Option<StoredUser>, StoreError> {
        Ok(None)
    }

    async fn insert_user(&self, _user: &StoredUser) -> Result<String, StoreError> {
        Err(StoreError::Backend(self.message.clone()))
    }
}

/// Create a test app over `store` with the given config.
#[allow(dead_code)]
pub fn create_app_with(config: Config, store: Arc<dyn UserStore>) -> axum::Router {
    let identity = resolver_from_config(&config).expect("identity resolver");
    create_router(Arc::new(AppState::new(config, store, identity)))
}

/// Create a test app with an in-memory store.
/// Returns the router and the store, for inspecting writes.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, MemoryStore) {
    let store = MemoryStore::new();
    let app = create_app_with(Config::test_default(), Arc::new(store.clone()));
    (app, store)
}

#[allow(dead_code)]
pub fn get_profile_request(email: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/api/profile")
        .header("X-User-Email", email)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn create_profile_request(email: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/profile")
        .header("X-User-Email", email)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
