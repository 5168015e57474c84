// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Comment endpoints that are not nested under a post.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::CommentResponse;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentListResponse {
    pub items: Vec<CommentResponse>,
    pub total: usize,
}

/// Comments written by the current caller, newest first.
#[utoipa::path(
    get,
    path = "/api/comments/my",
    tag = "Comments",
    security(("bearer" = [])),
    responses((status = 200, description = "Own comments", body = [CommentResponse]))
)]
pub async fn my_comments(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Json<Vec<CommentResponse>> {
    let store = state.store.read().await;
    let comments = store
        .comments_by_user(principal.user_id)
        .iter()
        .map(|c| CommentResponse::new(c, &principal.username))
        .collect();
    Json(comments)
}

/// Delete a comment. The comment author, the post author, or an admin may
/// delete.
#[utoipa::path(
    delete,
    path = "/api/comments/{comment_id}",
    tag = "Comments",
    security(("bearer" = [])),
    params(("comment_id" = u64, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not allowed to delete this comment"),
        (status = 404, description = "No such comment"),
    )
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(comment_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    let comment = store
        .comment_by_id(comment_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;

    let post_author = store.post_by_id(comment.post_id).map(|p| p.user_id);
    let allowed = comment.user_id == principal.user_id
        || post_author == Some(principal.user_id)
        || principal.is_admin();
    if !allowed {
        return Err(ApiError::forbidden("Not allowed to delete this comment"));
    }

    store.delete_comment(comment_id)?;
    Ok(StatusCode::NO_CONTENT)
}
