// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! The authentication gate, applied to the whole `/api` router.
//!
//! One evaluation per request, side-effect free: classify the path, verify
//! the bearer token, resolve the principal from the account record, enforce
//! the admin-subtree rule, and attach the principal to request extensions.
//! Any failure terminates the request with a JSON error response; nothing
//! propagates into handler code.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

use super::claims::Principal;
use super::error::AuthError;
use super::policy::Access;
use super::{resolver, tokens};

/// Gate middleware. Public paths pass through untouched; protected paths
/// require a verified token and a resolved, enabled principal.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let method = request.method().clone();

    if state.policy.classify(&path, &method) == Access::Public {
        return next.run(request).await;
    }

    match admit(&state, request.headers(), &path).await {
        Ok(principal) => {
            tracing::debug!(user = %principal.email, %method, %path, "request authenticated");
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!(%method, %path, error = %err, "request denied");
            err.into_response()
        }
    }
}

/// Single-pass admission decision for a protected request.
async fn admit(state: &AppState, headers: &HeaderMap, path: &str) -> Result<Principal, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }

    let claims = tokens::verify(&state.auth, token).inspect_err(|err| {
        // Log a truncated fragment only; tokens are credentials.
        let fragment: String = token.chars().take(12).collect();
        tracing::warn!(error = %err, token_fragment = %fragment, "token verification failed");
    })?;

    let principal = {
        let store = state.store.read().await;
        resolver::resolve(&store, &state.auth, &claims.sub)?
    };

    if !principal.enabled {
        return Err(AuthError::AccountDisabled);
    }

    if state.policy.requires_admin(path) && !principal.is_admin() {
        return Err(AuthError::InsufficientRole);
    }

    Ok(principal)
}
