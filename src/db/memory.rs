// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process user store.

use crate::db::{StoreError, UserStore};
use crate::models::StoredUser;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct StoredDoc {
    id: String,
    user: StoredUser,
}

/// User store held in memory, keyed by email.
///
/// Unlike Firestore, the existence check and insert happen under one shard
/// lock, so concurrent creates for the same email cannot both succeed.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<String, StoredDoc>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Identifier of the document stored for `email`, if any.
    pub fn document_id(&self, email: &str) -> Option<String> {
        self.users.get(email).map(|doc| doc.id.clone())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, StoreError> {
        Ok(self.users.get(email).map(|doc| doc.user.clone()))
    }

    async fn insert_user(&self, user: &StoredUser) -> Result<String, StoreError> {
        match self.users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(format!(
                "user {} already exists",
                user.email
            ))),
            Entry::Vacant(slot) => {
                let id = uuid::Uuid::new_v4().to_string();
                slot.insert(StoredDoc {
                    id: id.clone(),
                    user: user.clone(),
                });
                Ok(id)
            }
        }
    }
}
