// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Axum extractors for the resolved principal.
//!
//! Handlers read the caller that the gate attached to request extensions;
//! they never re-verify the token themselves.
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is the resolved Principal
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::state::AppState;

use super::claims::Principal;
use super::error::AuthError;

/// Extractor for the authenticated caller.
///
/// Rejects with 401 if the gate did not attach a principal, which only
/// happens when a protected handler is mounted outside the gate.
pub struct Auth(pub Principal);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(Auth)
            .ok_or(AuthError::MissingAuthHeader)
    }
}

/// Extractor that additionally requires the admin role.
///
/// The gate already enforces this for the `/api/admin` subtree; this is the
/// in-handler belt for admin-only operations mounted elsewhere.
pub struct AdminOnly(pub Principal);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(principal) = Auth::from_request_parts(parts, state).await?;
        if !principal.is_admin() {
            return Err(AuthError::InsufficientRole);
        }
        Ok(AdminOnly(principal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::roles::Role;
    use crate::config::AuthSettings;
    use crate::store::BlogStore;
    use axum::http::Request;

    fn test_state() -> AppState {
        AppState::new(
            BlogStore::new(),
            AuthSettings {
                secret: "test-secret".to_string(),
                token_ttl_secs: 3600,
                seed_admin_email: "admin@example.com".to_string(),
                seed_admin_password: "admin123".to_string(),
            },
        )
    }

    fn principal(roles: Vec<Role>) -> Principal {
        Principal {
            user_id: 1,
            email: "alice@example.com".to_string(),
            username: "alice".to_string(),
            roles,
            enabled: true,
        }
    }

    #[tokio::test]
    async fn auth_rejects_without_principal() {
        let state = test_state();
        let mut parts = Request::builder()
            .uri("/api/users/me")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn auth_reads_principal_from_extensions() {
        let state = test_state();
        let mut parts = Request::builder()
            .uri("/api/users/me")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        parts.extensions.insert(principal(vec![Role::Member]));

        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn admin_only_rejects_member() {
        let state = test_state();
        let mut parts = Request::builder()
            .uri("/api/admin/users")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        parts.extensions.insert(principal(vec![Role::Member]));

        let result = AdminOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InsufficientRole)));
    }

    #[tokio::test]
    async fn admin_only_accepts_admin() {
        let state = test_state();
        let mut parts = Request::builder()
            .uri("/api/admin/users")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        parts.extensions.insert(principal(vec![Role::Member, Role::Admin]));

        let result = AdminOnly::from_request_parts(&mut parts, &state).await;
        assert!(result.is_ok());
    }
}
