// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running and
//! FIRESTORE_EMULATOR_HOST to point at it.

use cafebean_api::db::UserStore;
use cafebean_api::models::StoredUser;
use cafebean_api::services::ProfileService;
use std::sync::Arc;

mod common;
use common::test_db;

/// Generate a unique email for test isolation.
fn unique_email() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("user{}@example.com", nanos)
}

fn test_user(email: &str) -> StoredUser {
    StoredUser {
        email: email.to_string(),
        username: "Test".to_string(),
        photo: "https://example.com/pic.jpg".to_string(),
    }
}

#[tokio::test]
async fn test_insert_and_find_by_email() {
    require_emulator!();

    let db = test_db().await;
    let email = unique_email();

    let before = db.find_user_by_email(&email).await.unwrap();
    assert!(before.is_none(), "User should not exist before creation");

    let id = db.insert_user(&test_user(&email)).await.unwrap();
    assert!(!id.is_empty());

    let after = db.find_user_by_email(&email).await.unwrap();
    assert_eq!(after, Some(test_user(&email)));
}

#[tokio::test]
async fn test_find_ignores_other_emails() {
    require_emulator!();

    let db = test_db().await;
    let email = unique_email();
    db.insert_user(&test_user(&email)).await.unwrap();

    let other = db.find_user_by_email(&unique_email()).await.unwrap();
    assert!(other.is_none());
}

#[tokio::test]
async fn test_profile_service_rejects_second_create() {
    require_emulator!();

    let service = ProfileService::new(Arc::new(test_db().await));
    let email = unique_email();

    service
        .create_profile(&email, test_user(&email))
        .await
        .unwrap();
    let err = service
        .create_profile(&email, test_user(&email))
        .await
        .unwrap_err();

    assert!(matches!(err, cafebean_api::error::AppError::BadRequest(_)));
}
