// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Notification endpoints. Notifications are produced by the store when
//! someone comments on or favorites another user's post.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::Notification;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCount {
    pub count: usize,
}

/// The caller's unread notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/messages/unread",
    tag = "Messages",
    security(("bearer" = [])),
    responses((status = 200, description = "Unread notifications", body = [Notification]))
)]
pub async fn unread_messages(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Json<Vec<Notification>> {
    let store = state.store.read().await;
    Json(store.notifications_for(principal.user_id, true))
}

/// All of the caller's notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "Messages",
    security(("bearer" = [])),
    responses((status = 200, description = "All notifications", body = [Notification]))
)]
pub async fn all_messages(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Json<Vec<Notification>> {
    let store = state.store.read().await;
    Json(store.notifications_for(principal.user_id, false))
}

/// Number of unread notifications.
#[utoipa::path(
    get,
    path = "/api/messages/unread/count",
    tag = "Messages",
    security(("bearer" = [])),
    responses((status = 200, description = "Unread count", body = UnreadCount))
)]
pub async fn unread_count(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Json<UnreadCount> {
    let store = state.store.read().await;
    Json(UnreadCount {
        count: store.unread_count(principal.user_id),
    })
}

/// Mark one notification read. Only the recipient may do so.
#[utoipa::path(
    put,
    path = "/api/messages/{message_id}/read",
    tag = "Messages",
    security(("bearer" = [])),
    params(("message_id" = u64, Path, description = "Notification id")),
    responses(
        (status = 204, description = "Marked read"),
        (status = 403, description = "Not the recipient"),
        (status = 404, description = "No such notification"),
    )
)]
pub async fn mark_read(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(message_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.mark_read(principal.user_id, message_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mark all of the caller's notifications read.
#[utoipa::path(
    put,
    path = "/api/messages/read-all",
    tag = "Messages",
    security(("bearer" = [])),
    responses((status = 204, description = "All marked read"))
)]
pub async fn mark_all_read(State(state): State<AppState>, Auth(principal): Auth) -> StatusCode {
    let mut store = state.store.write().await;
    store.mark_all_read(principal.user_id);
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Principal, Role};
    use crate::config::AuthSettings;
    use crate::store::BlogStore;

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

    async fn seed_user(state: &AppState, name: &str) -> Principal {
        let mut store = state.store.write().await;
        let user = store
            .create_user(name.to_string(), format!("{name}@example.com"), "hash".into(), None)
            .unwrap();
        Principal {
            user_id: user.user_id,
            email: user.email,
            username: user.username,
            roles: vec![Role::Member],
            enabled: true,
        }
    }

    /// Bob comments on Alice's post, leaving Alice one unread notification.
    async fn seed_notification(state: &AppState, alice_id: u64, bob_id: u64) -> u64 {
        let mut store = state.store.write().await;
        let post = store.create_post(alice_id, "t".into(), "c".into(), None, vec![]);
        store.create_comment(bob_id, post.post_id, "nice".into()).unwrap();
        store.notifications_for(alice_id, true)[0].message_id
    }

    #[tokio::test]
    async fn unread_flow() {
        let state = test_state();
        let alice = seed_user(&state, "alice").await;
        let bob = seed_user(&state, "bob").await;
        let message_id = seed_notification(&state, alice.user_id, bob.user_id).await;

        let Json(count) = unread_count(State(state.clone()), Auth(alice.clone())).await;
        assert_eq!(count.count, 1);

        let status = mark_read(State(state.clone()), Auth(alice.clone()), Path(message_id))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let Json(unread) = unread_messages(State(state.clone()), Auth(alice.clone())).await;
        assert!(unread.is_empty());
        let Json(all) = all_messages(State(state), Auth(alice)).await;
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn mark_read_of_anothers_notification_is_forbidden() {
        let state = test_state();
        let alice = seed_user(&state, "alice").await;
        let bob = seed_user(&state, "bob").await;
        let message_id = seed_notification(&state, alice.user_id, bob.user_id).await;

        let err = mark_read(State(state), Auth(bob), Path(message_id))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn mark_all_read_clears_the_count() {
        let state = test_state();
        let alice = seed_user(&state, "alice").await;
        let bob = seed_user(&state, "bob").await;
        seed_notification(&state, alice.user_id, bob.user_id).await;

        let status = mark_all_read(State(state.clone()), Auth(alice.clone())).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let Json(count) = unread_count(State(state), Auth(alice)).await;
        assert_eq!(count.count, 0);
    }
}
