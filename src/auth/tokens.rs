// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Token issuing and verification (HS256, pre-shared secret).
//!
//! Tokens are stateless: there is no server-side revocation list, so a
//! compromised token remains valid until its natural expiry.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::AuthSettings;
use crate::models::User;

use super::claims::Claims;
use super::error::AuthError;

/// Issue a signed token for an account.
///
/// The embedded role list reflects the account's roles at issuance time;
/// verification re-derives roles from the account record, so this list is
/// informational for clients only.
pub fn issue(auth: &AuthSettings, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.email.clone(),
        roles: user.roles.iter().map(|r| r.to_string()).collect(),
        iat: now,
        exp: now + auth.token_ttl_secs,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.secret.as_bytes()),
    )
}

/// Verify a token and extract its claims.
///
/// Zero clock-skew leeway: a token whose expiry is at or before now is
/// rejected as expired even with a valid signature.
pub fn verify(auth: &AuthSettings, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::MalformedToken,
    })?;

    Ok(token_data.claims)
}
