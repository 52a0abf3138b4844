// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Caller identity resolution.
//!
//! Profile routes act on behalf of exactly one email address. How that
//! address is established is pluggable: the upstream gateway may inject a
//! trusted header, or the caller may present a signed JWT.

use crate::config::{Config, IdentityMode};
use crate::error::AppError;
use crate::AppState;
use anyhow::Context;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Email of the caller, resolved before the handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("no caller identity present")]
    Missing,

    #[error("invalid token: {0}")]
    InvalidToken(String),
}

/// Resolves the caller identity from request headers.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> Result<CallerIdentity, IdentityError>;
}

/// Reads the caller email from a header set by the fronting gateway.
///
/// Nothing is verified. Only deploy this behind a gateway that strips the
/// header from client requests.
pub struct TrustedHeaderIdentity {
    header: HeaderName,
}

impl TrustedHeaderIdentity {
    pub fn new(header: &str) -> anyhow::Result<Self> {
        let header = HeaderName::try_from(header)
            .with_context(|| format!("invalid identity header name {:?}", header))?;
        Ok(Self { header })
    }
}

impl IdentityResolver for TrustedHeaderIdentity {
    fn resolve(&self, headers: &HeaderMap) -> Result<CallerIdentity, IdentityError> {
        let email = headers
            .get(&self.header)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(IdentityError::Missing)?;

        Ok(CallerIdentity {
            email: email.to_string(),
        })
    }
}

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (identity provider user id)
    pub sub: String,
    /// Verified email of the subject
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Verifies an HS256 bearer token and takes the caller email from its claims.
pub struct JwtIdentity {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentity {
    pub fn new(signing_key: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(signing_key),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl IdentityResolver for JwtIdentity {
    fn resolve(&self, headers: &HeaderMap) -> Result<CallerIdentity, IdentityError> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(IdentityError::Missing)?;

        let token_data = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))?;

        let email = token_data.claims.email.trim();
        if email.is_empty() {
            return Err(IdentityError::InvalidToken("empty email claim".to_string()));
        }

        Ok(CallerIdentity {
            email: email.to_string(),
        })
    }
}

/// Build the resolver selected by configuration.
pub fn resolver_from_config(config: &Config) -> anyhow::Result<Arc<dyn IdentityResolver>> {
    match config.identity_mode {
        IdentityMode::TrustedHeader => {
            tracing::warn!(
                header = %config.identity_header,
                "Caller identity is taken from an unverified header; \
                 this is only safe behind a gateway that sets it"
            );
            Ok(Arc::new(TrustedHeaderIdentity::new(&config.identity_header)?))
        }
        IdentityMode::Jwt => {
            let key = config
                .jwt_signing_key
                .as_deref()
                .context("JWT_SIGNING_KEY is required for jwt identity mode")?;
            Ok(Arc::new(JwtIdentity::new(key)))
        }
    }
}

/// Middleware that requires a resolvable caller identity.
pub async fn require_identity(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = state.identity.resolve(request.headers()).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request without caller identity");
        AppError::Unauthorized
    })?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Create a JWT asserting `email`, valid for `ttl_secs`.
pub fn create_jwt(email: &str, signing_key: &[u8], ttl_secs: usize) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: email.to_string(),
        email: email.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}
