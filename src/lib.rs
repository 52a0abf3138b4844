// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cafebean API: user profile backend
//!
//! Stores one profile per email address in Firestore and serves it to the
//! caller identified by the upstream identity provider.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::UserStore;
use middleware::identity::IdentityResolver;
use services::{ProfileOptions, ProfileService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub profiles: ProfileService,
    pub identity: Arc<dyn IdentityResolver>,
}

impl AppState {
    /// Wire the profile service over already-built collaborators.
    pub fn new(
        config: Config,
        store: Arc<dyn UserStore>,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        let profiles = ProfileService::with_options(
            store,
            ProfileOptions {
                create_on_miss: config.create_on_miss,
                default_photo_url: config.default_photo_url.clone(),
            },
        );

        Self {
            config,
            profiles,
            identity,
        }
    }
}
