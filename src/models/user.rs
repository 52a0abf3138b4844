// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User profile stored in the `users` collection.
///
/// Exactly one document exists per email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StoredUser {
    /// Email address (unique key, never updated)
    pub email: String,
    /// Display name
    pub username: String,
    /// Profile picture URL
    pub photo: String,
}

/// Public projection of a profile. Never carries the email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PublicUser {
    pub username: String,
    pub photo: String,
}

impl From<StoredUser> for PublicUser {
    fn from(user: StoredUser) -> Self {
        Self {
            username: user.username,
            photo: user.photo,
        }
    }
}

impl StoredUser {
    /// Default profile for an email that has none yet.
    ///
    /// The username is the local part of the address, or the whole address
    /// when the local part is empty.
    pub fn default_for(email: &str, photo: &str) -> Self {
        let username = match email.split('@').next() {
            Some(local) if !local.is_empty() => local,
            _ => email,
        }
        .to_string();
        Self {
            email: email.to_string(),
            username,
            photo: photo.to_string(),
        }
    }
}
