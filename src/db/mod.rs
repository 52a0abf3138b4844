// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! Handlers talk to a [`UserStore`]; Firestore backs it in production and
//! [`MemoryStore`] backs local runs and tests.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::models::StoredUser;
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
}

/// Failures reported by a user store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// A document was found but could not be materialized as a user.
    #[error("failed to decode user document: {0}")]
    Decode(String),

    /// The store refused a write because the record already exists.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Backend(String),
}

/// Query-by-email and insert over the `users` collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the first user whose `email` field equals `email`.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, StoreError>;

    /// Insert a new user document and return its generated identifier.
    async fn insert_user(&self, user: &StoredUser) -> Result<String, StoreError>;
}
