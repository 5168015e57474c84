// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Post endpoints: CRUD, tag listing/filtering, and comments nested under a
//! post. Listing and single-post reads are public for GET per the route
//! policy; everything else requires authentication.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::{CommentResponse, PageQuery, PostResponse};
use crate::state::AppState;

use super::users::author_name;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TagQuery {
    /// Comma-separated tag list, e.g. `rust,web`.
    pub tags: String,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct PostListResponse {
    pub items: Vec<PostResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewCommentBody {
    pub content: String,
}

/// Create a post.
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Posts",
    security(("bearer" = [])),
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Missing title or content"),
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    if request.title.trim().is_empty() || request.content.trim().is_empty() {
        return Err(ApiError::bad_request("Title and content are required"));
    }

    let mut store = state.store.write().await;
    let post = store.create_post(
        principal.user_id,
        request.title,
        request.content,
        request.summary,
        request.tags,
    );
    Ok((
        StatusCode::CREATED,
        Json(PostResponse::new(&post, &principal.username)),
    ))
}

/// Paginated list of visible posts, newest first.
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "Posts",
    params(PageQuery),
    responses((status = 200, description = "Page of posts", body = PostListResponse))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<PostListResponse> {
    let store = state.store.read().await;
    let (posts, total) = store.list_posts(query.page, query.size);
    let items = posts
        .iter()
        .map(|p| PostResponse::new(p, &author_name(&store, p.user_id)))
        .collect();
    Json(PostListResponse { items, total })
}

/// A single visible post.
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}",
    tag = "Posts",
    params(("post_id" = u64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = PostResponse),
        (status = 404, description = "No such post"),
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<u64>,
) -> Result<Json<PostResponse>, ApiError> {
    let store = state.store.read().await;
    let post = store.visible_post(post_id)?;
    let author = author_name(&store, post.user_id);
    Ok(Json(PostResponse::new(&post, &author)))
}

/// Update a post. Only the author may update.
#[utoipa::path(
    put,
    path = "/api/posts/{post_id}",
    tag = "Posts",
    security(("bearer" = [])),
    params(("post_id" = u64, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 403, description = "Not the author"),
        (status = 404, description = "No such post"),
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(post_id): Path<u64>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let mut store = state.store.write().await;
    let owner = store.visible_post(post_id)?.user_id;
    if owner != principal.user_id {
        return Err(ApiError::forbidden("Only the author may edit this post"));
    }

    let post = store.update_post(
        post_id,
        request.title,
        request.content,
        request.summary,
        request.tags,
    )?;
    Ok(Json(PostResponse::new(&post, &principal.username)))
}

/// Delete a post. The author or an admin may delete.
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}",
    tag = "Posts",
    security(("bearer" = [])),
    params(("post_id" = u64, Path, description = "Post id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Neither author nor admin"),
        (status = 404, description = "No such post"),
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(post_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    let owner = store.visible_post(post_id)?.user_id;
    if owner != principal.user_id && !principal.is_admin() {
        return Err(ApiError::forbidden("Only the author or an admin may delete this post"));
    }
    store.delete_post(post_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Distinct tags across visible posts.
#[utoipa::path(
    get,
    path = "/api/posts/tags",
    tag = "Posts",
    responses((status = 200, description = "Tag list", body = [String]))
)]
pub async fn list_tags(State(state): State<AppState>) -> Json<Vec<String>> {
    let store = state.store.read().await;
    Json(store.all_tags())
}

/// Posts carrying at least one of the requested tags.
#[utoipa::path(
    get,
    path = "/api/posts/bytags",
    tag = "Posts",
    params(TagQuery),
    responses((status = 200, description = "Matching posts", body = [PostResponse]))
)]
pub async fn posts_by_tags(
    State(state): State<AppState>,
    Query(query): Query<TagQuery>,
) -> Json<Vec<PostResponse>> {
    let tags: Vec<String> = query
        .tags
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let store = state.store.read().await;
    let posts = store
        .posts_by_tags(&tags)
        .iter()
        .map(|p| PostResponse::new(p, &author_name(&store, p.user_id)))
        .collect();
    Json(posts)
}

/// Visible posts of a given author.
#[utoipa::path(
    get,
    path = "/api/posts/user/{user_id}",
    tag = "Posts",
    security(("bearer" = [])),
    params(("user_id" = u64, Path, description = "Author account id")),
    responses((status = 200, description = "Author's posts", body = [PostResponse]))
)]
pub async fn posts_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> Json<Vec<PostResponse>> {
    let store = state.store.read().await;
    let author = author_name(&store, user_id);
    let posts = store
        .posts_by_user(user_id)
        .iter()
        .map(|p| PostResponse::new(p, &author))
        .collect();
    Json(posts)
}

/// Comment on a post.
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/comments",
    tag = "Posts",
    security(("bearer" = [])),
    params(("post_id" = u64, Path, description = "Post id")),
    request_body = NewCommentBody,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 404, description = "No such post"),
    )
)]
pub async fn create_post_comment(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(post_id): Path<u64>,
    Json(body): Json<NewCommentBody>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    if body.content.trim().is_empty() {
        return Err(ApiError::bad_request("Comment content is required"));
    }

    let mut store = state.store.write().await;
    let comment = store.create_comment(principal.user_id, post_id, body.content)?;
    Ok((
        StatusCode::CREATED,
        Json(CommentResponse::new(&comment, &principal.username)),
    ))
}

/// Visible comments on a post, oldest first.
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}/comments",
    tag = "Posts",
    security(("bearer" = [])),
    params(("post_id" = u64, Path, description = "Post id")),
    responses((status = 200, description = "Comments", body = [CommentResponse]))
)]
pub async fn list_post_comments(
    State(state): State<AppState>,
    Path(post_id): Path<u64>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let store = state.store.read().await;
    store.visible_post(post_id)?;
    let comments = store
        .comments_for_post(post_id)
        .iter()
        .map(|c| CommentResponse::new(c, &author_name(&store, c.user_id)))
        .collect();
    Ok(Json(comments))
}
