// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! User profile endpoints.
//!
//! `GET /api/users/{id}` is public for numeric ids; `/api/users/me` and
//! `/api/users/posts` require authentication (the route policy carves the
//! former out of the public GET list explicitly).

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::{PostResponse, UserResponse};
use crate::state::AppState;
use crate::store::BlogStore;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Display name of an account, tolerating deleted authors.
pub(crate) fn author_name(store: &BlogStore, user_id: u64) -> String {
    store
        .user_by_id(user_id)
        .map(|u| u.username.clone())
        .unwrap_or_else(|| "[deleted]".to_string())
}

/// Current caller's profile.
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current profile", body = UserResponse),
        (status = 401, description = "Not authenticated"),
    )
)]
pub async fn get_me(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<Json<UserResponse>, ApiError> {
    let store = state.store.read().await;
    let user = store
        .user_by_id(principal.user_id)
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the current caller's profile.
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "Users",
    security(("bearer" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 409, description = "Username already taken"),
    )
)]
pub async fn update_me(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let mut store = state.store.write().await;
    let user = store.update_profile(
        principal.user_id,
        request.username,
        request.avatar,
        request.bio,
    )?;
    Ok(Json(UserResponse::from(&user)))
}

/// Public profile of an account.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = "Users",
    params(("user_id" = u64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 404, description = "No such user"),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> Result<Json<UserResponse>, ApiError> {
    let store = state.store.read().await;
    let user = store
        .user_by_id(user_id)
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(UserResponse::from(user)))
}

/// Posts written by the current caller.
#[utoipa::path(
    get,
    path = "/api/users/posts",
    tag = "Users",
    security(("bearer" = [])),
    responses((status = 200, description = "Own posts", body = [PostResponse]))
)]
pub async fn my_posts(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Json<Vec<PostResponse>> {
    let store = state.store.read().await;
    let posts = store
        .posts_by_user(principal.user_id)
        .iter()
        .map(|p| PostResponse::new(p, &principal.username))
        .collect();
    Json(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Principal, Role};
    use crate::config::AuthSettings;

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

    async fn seed_alice(state: &AppState) -> Principal {
        let mut store = state.store.write().await;
        let user = store
            .create_user("alice".into(), "alice@example.com".into(), "hash".into(), None)
            .unwrap();
        Principal {
            user_id: user.user_id,
            email: user.email,
            username: user.username,
            roles: vec![Role::Member],
            enabled: true,
        }
    }

    #[tokio::test]
    async fn get_me_returns_fresh_profile() {
        let state = test_state();
        let principal = seed_alice(&state).await;

        let Json(profile) = get_me(State(state.clone()), Auth(principal))
            .await
            .unwrap();
        assert_eq!(profile.username, "alice");
        assert_eq!(profile.roles, vec![Role::Member]);
    }

    #[tokio::test]
    async fn update_me_changes_bio_and_keeps_username() {
        let state = test_state();
        let principal = seed_alice(&state).await;

        let Json(profile) = update_me(
            State(state.clone()),
            Auth(principal),
            Json(UpdateProfileRequest {
                username: None,
                avatar: Some("avatar.png".to_string()),
                bio: Some("writer".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(profile.username, "alice");
        assert_eq!(profile.bio.as_deref(), Some("writer"));
        assert_eq!(profile.avatar.as_deref(), Some("avatar.png"));
    }

    #[tokio::test]
    async fn update_me_rejects_taken_username() {
        let state = test_state();
        let principal = seed_alice(&state).await;
        {
            let mut store = state.store.write().await;
            store
                .create_user("bob".into(), "bob@example.com".into(), "hash".into(), None)
                .unwrap();
        }

        let err = update_me(
            State(state),
            Auth(principal),
            Json(UpdateProfileRequest {
                username: Some("bob".to_string()),
                avatar: None,
                bio: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn get_user_404_for_unknown_id() {
        let state = test_state();
        let err = get_user(State(state), Path(999)).await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
    }
}
