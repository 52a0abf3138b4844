// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile read/create flow.
//!
//! A profile is created once, from the payload the identity-bootstrap flow
//! sends after the first login, and read back by its owner afterwards.

use crate::db::{StoreError, UserStore};
use crate::error::{AppError, Result};
use crate::models::{PublicUser, StoredUser};
use std::sync::Arc;

/// Behavior switches for [`ProfileService`].
#[derive(Debug, Clone, Default)]
pub struct ProfileOptions {
    /// Create a default profile when a lookup finds nothing, instead of
    /// reporting not found.
    pub create_on_miss: bool,
    /// Photo URL given to profiles created on miss.
    pub default_photo_url: String,
}

/// Profile operations over a [`UserStore`].
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn UserStore>,
    options: ProfileOptions,
}

impl ProfileService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self::with_options(store, ProfileOptions::default())
    }

    pub fn with_options(store: Arc<dyn UserStore>, options: ProfileOptions) -> Self {
        Self { store, options }
    }

    /// Fetch the caller's stored profile.
    ///
    /// Lookup and decode failures are reported as bad requests. A missing
    /// profile is `NotFound` unless `create_on_miss` is set.
    pub async fn get_profile(&self, email: &str) -> Result<StoredUser> {
        if email.is_empty() {
            return Err(AppError::BadRequest("missing caller email".to_string()));
        }

        match self.store.find_user_by_email(email).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) if self.options.create_on_miss => self.create_default(email).await,
            Ok(None) => Err(AppError::NotFound("user not found".to_string())),
            Err(e) => {
                tracing::warn!(email, error = %e, "Profile lookup failed");
                Err(AppError::BadRequest(e.to_string()))
            }
        }
    }

    /// Create the caller's profile from the bootstrap payload.
    ///
    /// `request.email` must match the caller. An existing profile for the
    /// email is rejected before anything is written.
    pub async fn create_profile(&self, caller: &str, request: StoredUser) -> Result<PublicUser> {
        if caller.is_empty() || request.email != caller {
            return Err(AppError::BadRequest(
                "only the user can create their profile".to_string(),
            ));
        }

        let existing = self
            .store
            .find_user_by_email(caller)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        if existing.is_some() {
            return Err(already_exists());
        }

        let new_user = StoredUser {
            email: request.email,
            username: request.username,
            photo: request.photo,
        };
        let id = self.insert(&new_user).await?;

        tracing::info!(id = %id, updated_by = %caller, "User added");

        Ok(PublicUser::from(new_user))
    }

    async fn create_default(&self, email: &str) -> Result<StoredUser> {
        let user = StoredUser::default_for(email, &self.options.default_photo_url);

        match self.insert(&user).await {
            Ok(id) => {
                tracing::info!(id = %id, updated_by = %email, "User added (default profile)");
                Ok(user)
            }
            // Lost a race with a concurrent create; return what won.
            Err(AppError::BadRequest(_)) => self
                .store
                .find_user_by_email(email)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
                .ok_or_else(|| AppError::NotFound("user not found".to_string())),
            Err(e) => Err(e),
        }
    }

    async fn insert(&self, user: &StoredUser) -> Result<String> {
        self.store.insert_user(user).await.map_err(|e| match e {
            StoreError::Conflict(_) => already_exists(),
            other => AppError::Database(other.to_string()),
        })
    }
}

fn already_exists() -> AppError {
    AppError::BadRequest("user already exists".to_string())
}
