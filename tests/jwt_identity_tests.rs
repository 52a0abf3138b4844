// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile routes with verified JWT identity instead of the trusted header.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use cafebean_api::config::{Config, IdentityMode};
use cafebean_api::db::MemoryStore;
use cafebean_api::middleware::identity::create_jwt;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

mod common;

fn jwt_config() -> Config {
    Config {
        identity_mode: IdentityMode::Jwt,
        ..Config::test_default()
    }
}

fn signing_key(config: &Config) -> Vec<u8> {
    config.jwt_signing_key.clone().unwrap()
}

#[tokio::test]
async fn test_create_and_get_with_bearer_token() {
    let config = jwt_config();
    let token = create_jwt("a@x.com", &signing_key(&config), 3600).unwrap();
    let app = common::create_app_with(config, Arc::new(MemoryStore::new()));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/profile")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"email": "a@x.com", "username": "alice", "photo": "http://p/1.png"})
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/profile")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn test_trusted_header_is_ignored_in_jwt_mode() {
    let app = common::create_app_with(jwt_config(), Arc::new(MemoryStore::new()));

    let response = app
        .oneshot(common::get_profile_request("a@x.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_key_is_rejected() {
    let token = create_jwt("a@x.com", b"some_other_key_of_decent_length", 3600).unwrap();
    let app = common::create_app_with(jwt_config(), Arc::new(MemoryStore::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/profile")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
