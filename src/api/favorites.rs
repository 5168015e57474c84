// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Favorite endpoints.
//!
//! `GET /api/users/favorites` lives under the users prefix but requires
//! authentication; the route policy carves it out of the public GET list
//! ahead of the numeric-id profile route.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::PostResponse;
use crate::state::AppState;

use super::users::author_name;

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteCheck {
    pub favorited: bool,
}

/// Add a post to the caller's favorites.
#[utoipa::path(
    post,
    path = "/api/favorites/{post_id}",
    tag = "Favorites",
    security(("bearer" = [])),
    params(("post_id" = u64, Path, description = "Post id")),
    responses(
        (status = 201, description = "Added"),
        (status = 404, description = "No such post"),
        (status = 409, description = "Already favorited"),
    )
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(post_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.add_favorite(principal.user_id, post_id)?;
    Ok(StatusCode::CREATED)
}

/// Remove a post from the caller's favorites.
#[utoipa::path(
    delete,
    path = "/api/favorites/{post_id}",
    tag = "Favorites",
    security(("bearer" = [])),
    params(("post_id" = u64, Path, description = "Post id")),
    responses(
        (status = 204, description = "Removed"),
        (status = 404, description = "Not in favorites"),
    )
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(post_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.remove_favorite(principal.user_id, post_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Whether the caller has favorited a post.
#[utoipa::path(
    get,
    path = "/api/favorites/{post_id}/check",
    tag = "Favorites",
    security(("bearer" = [])),
    params(("post_id" = u64, Path, description = "Post id")),
    responses((status = 200, description = "Check result", body = FavoriteCheck))
)]
pub async fn check_favorite(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(post_id): Path<u64>,
) -> Json<FavoriteCheck> {
    let store = state.store.read().await;
    Json(FavoriteCheck {
        favorited: store.is_favorited(principal.user_id, post_id),
    })
}

/// The caller's favorited posts, most recently favorited first. Posts hidden
/// or deleted since they were favorited are dropped from the listing.
#[utoipa::path(
    get,
    path = "/api/users/favorites",
    tag = "Favorites",
    security(("bearer" = [])),
    responses((status = 200, description = "Favorited posts", body = [PostResponse]))
)]
pub async fn list_my_favorites(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Json<Vec<PostResponse>> {
    let store = state.store.read().await;
    let posts = store
        .favorites_of_user(principal.user_id)
        .iter()
        .filter_map(|f| store.visible_post(f.post_id).ok())
        .map(|p| PostResponse::new(&p, &author_name(&store, p.user_id)))
        .collect();
    Json(posts)
}
