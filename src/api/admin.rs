// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Admin panel endpoints.
//!
//! Every handler here takes the `AdminOnly` extractor. The route policy
//! already blocks non-admins from `/api/admin/**` in the middleware, so the
//! extractor is a second line of defense that also documents intent at the
//! handler signature.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::AdminOnly;
use crate::error::ApiError;
use crate::models::{CommentResponse, PageQuery, PostResponse, UserResponse};
use crate::state::AppState;

use super::comments::CommentListResponse;
use super::posts::PostListResponse;
use super::users::author_name;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub items: Vec<UserResponse>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminRoleCheck {
    pub is_admin: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_posts: usize,
    pub total_comments: usize,
    pub today_visits: usize,
}

// ----------------------------------------------------------------------------
// Users
// ----------------------------------------------------------------------------

/// Paginated user listing with optional keyword filter.
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    security(("bearer" = [])),
    params(PageQuery),
    responses((status = 200, description = "Page of users", body = UserListResponse))
)]
pub async fn list_users(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Query(query): Query<PageQuery>,
) -> Json<UserListResponse> {
    let store = state.store.read().await;
    let (users, total) = store.list_users(query.keyword.as_deref(), query.page, query.size);
    let items = users.iter().map(UserResponse::from).collect();
    Json(UserListResponse { items, total })
}

/// Grant the admin role. Idempotent.
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/promote",
    tag = "Admin",
    security(("bearer" = [])),
    params(("user_id" = u64, Path, description = "Account id")),
    responses(
        (status = 204, description = "Promoted"),
        (status = 404, description = "No such user"),
    )
)]
pub async fn promote_user(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(user_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.grant_admin(user_id)?;
    tracing::info!(user_id, "admin role granted");
    Ok(StatusCode::NO_CONTENT)
}

/// Revoke the admin role. Idempotent.
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/demote",
    tag = "Admin",
    security(("bearer" = [])),
    params(("user_id" = u64, Path, description = "Account id")),
    responses(
        (status = 204, description = "Demoted"),
        (status = 404, description = "No such user"),
    )
)]
pub async fn demote_user(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(user_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.revoke_admin(user_id)?;
    tracing::info!(user_id, "admin role revoked");
    Ok(StatusCode::NO_CONTENT)
}

/// Disable an account. Admins cannot disable themselves.
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/disable",
    tag = "Admin",
    security(("bearer" = [])),
    params(("user_id" = u64, Path, description = "Account id")),
    responses(
        (status = 204, description = "Disabled"),
        (status = 400, description = "Attempted self-disable"),
        (status = 404, description = "No such user"),
    )
)]
pub async fn disable_user(
    State(state): State<AppState>,
    AdminOnly(admin): AdminOnly,
    Path(user_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    if user_id == admin.user_id {
        return Err(ApiError::bad_request("Cannot disable your own account"));
    }
    let mut store = state.store.write().await;
    store.set_enabled(user_id, false)?;
    tracing::info!(user_id, "account disabled");
    Ok(StatusCode::NO_CONTENT)
}

/// Re-enable an account.
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/enable",
    tag = "Admin",
    security(("bearer" = [])),
    params(("user_id" = u64, Path, description = "Account id")),
    responses(
        (status = 204, description = "Enabled"),
        (status = 404, description = "No such user"),
    )
)]
pub async fn enable_user(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(user_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.set_enabled(user_id, true)?;
    tracing::info!(user_id, "account enabled");
    Ok(StatusCode::NO_CONTENT)
}

// ----------------------------------------------------------------------------
// Posts
// ----------------------------------------------------------------------------

/// Paginated post listing, including hidden posts.
#[utoipa::path(
    get,
    path = "/api/admin/posts",
    tag = "Admin",
    security(("bearer" = [])),
    params(PageQuery),
    responses((status = 200, description = "Page of posts", body = PostListResponse))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Query(query): Query<PageQuery>,
) -> Json<PostListResponse> {
    let store = state.store.read().await;
    let (posts, total) = store.list_all_posts(query.page, query.size);
    let items = posts
        .iter()
        .map(|p| PostResponse::new(p, &author_name(&store, p.user_id)))
        .collect();
    Json(PostListResponse { items, total })
}

/// Delete any post.
#[utoipa::path(
    delete,
    path = "/api/admin/posts/{post_id}",
    tag = "Admin",
    security(("bearer" = [])),
    params(("post_id" = u64, Path, description = "Post id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such post"),
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(post_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete_post(post_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Hide a post from public listings.
#[utoipa::path(
    put,
    path = "/api/admin/posts/{post_id}/hide",
    tag = "Admin",
    security(("bearer" = [])),
    params(("post_id" = u64, Path, description = "Post id")),
    responses(
        (status = 204, description = "Hidden"),
        (status = 404, description = "No such post"),
    )
)]
pub async fn hide_post(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(post_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.set_post_hidden(post_id, true)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Restore a hidden post.
#[utoipa::path(
    put,
    path = "/api/admin/posts/{post_id}/show",
    tag = "Admin",
    security(("bearer" = [])),
    params(("post_id" = u64, Path, description = "Post id")),
    responses(
        (status = 204, description = "Visible again"),
        (status = 404, description = "No such post"),
    )
)]
pub async fn show_post(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(post_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.set_post_hidden(post_id, false)?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------------------------------------------------------------------
// Comments
// ----------------------------------------------------------------------------

/// Paginated comment listing, including hidden comments.
#[utoipa::path(
    get,
    path = "/api/admin/comments",
    tag = "Admin",
    security(("bearer" = [])),
    params(PageQuery),
    responses((status = 200, description = "Page of comments", body = CommentListResponse))
)]
pub async fn list_comments(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Query(query): Query<PageQuery>,
) -> Json<CommentListResponse> {
    let store = state.store.read().await;
    let (comments, total) = store.list_all_comments(query.page, query.size);
    let items = comments
        .iter()
        .map(|c| CommentResponse::new(c, &author_name(&store, c.user_id)))
        .collect();
    Json(CommentListResponse { items, total })
}

/// Delete any comment.
#[utoipa::path(
    delete,
    path = "/api/admin/comments/{comment_id}",
    tag = "Admin",
    security(("bearer" = [])),
    params(("comment_id" = u64, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such comment"),
    )
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(comment_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete_comment(comment_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Hide a comment.
#[utoipa::path(
    put,
    path = "/api/admin/comments/{comment_id}/hide",
    tag = "Admin",
    security(("bearer" = [])),
    params(("comment_id" = u64, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Hidden"),
        (status = 404, description = "No such comment"),
    )
)]
pub async fn hide_comment(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(comment_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.set_comment_hidden(comment_id, true)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Restore a hidden comment.
#[utoipa::path(
    put,
    path = "/api/admin/comments/{comment_id}/show",
    tag = "Admin",
    security(("bearer" = [])),
    params(("comment_id" = u64, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Visible again"),
        (status = 404, description = "No such comment"),
    )
)]
pub async fn show_comment(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
    Path(comment_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.set_comment_hidden(comment_id, false)?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------------------------------------------------------------------
// Misc
// ----------------------------------------------------------------------------

/// Whether the caller holds the admin role. Reaching this handler at all
/// implies yes; clients use it as a cheap capability probe.
#[utoipa::path(
    get,
    path = "/api/admin/check-role",
    tag = "Admin",
    security(("bearer" = [])),
    responses((status = 200, description = "Role check", body = AdminRoleCheck))
)]
pub async fn check_admin_role(AdminOnly(_admin): AdminOnly) -> Json<AdminRoleCheck> {
    Json(AdminRoleCheck { is_admin: true })
}

/// Dashboard totals. Visit tracking is not implemented, so `today_visits`
/// is always zero.
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    security(("bearer" = [])),
    responses((status = 200, description = "Dashboard totals", body = DashboardStats))
)]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    AdminOnly(_admin): AdminOnly,
) -> Json<DashboardStats> {
    let store = state.store.read().await;
    Json(DashboardStats {
        total_users: store.user_count(),
        total_posts: store.post_count(),
        total_comments: store.comment_count(),
        today_visits: 0,
    })
}
