// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile routes. The identity middleware is applied in routes/mod.rs.

use crate::error::{AppError, Result};
use crate::middleware::identity::CallerIdentity;
use crate::models::{PublicUser, StoredUser};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/profile", get(get_profile).post(create_profile))
}

/// The caller's own profile, email included.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub user: StoredUser,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreateProfileResponse {
    pub user: PublicUser,
}

/// Get the caller's profile.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<CallerIdentity>,
) -> Result<Json<ProfileResponse>> {
    tracing::debug!(email = %caller.email, "Fetching profile");

    let user = state.profiles.get_profile(&caller.email).await?;

    Ok(Json(ProfileResponse { user }))
}

/// Create the caller's profile from the identity-bootstrap payload.
async fn create_profile(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<CallerIdentity>,
    body: Bytes,
) -> Result<Json<CreateProfileResponse>> {
    // The bootstrap caller does not always send a JSON content type.
    let request: StoredUser = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Malformed profile payload");
        AppError::BadRequest("error handling request".to_string())
    })?;

    let user = state.profiles.create_profile(&caller.email, request).await?;

    Ok(Json(CreateProfileResponse { user }))
}
