// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Domain entities and shared request/response types.
//!
//! Entities are owned by the store; response types never expose password
//! hashes. Endpoint-specific request/response types live next to their
//! handlers in `api`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

// ============================================================================
// Entities
// ============================================================================

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: u64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    /// Stored role assignments (multi-role). May be empty; the role resolver
    /// substitutes the baseline member role at authentication time.
    pub roles: Vec<Role>,
    /// Disabled accounts authenticate but are rejected at enforcement.
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        user_id: u64,
        username: String,
        email: String,
        password_hash: String,
        bio: Option<String>,
        roles: Vec<Role>,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            username,
            email,
            password_hash,
            avatar: None,
            bio,
            roles,
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A blog post.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Post {
    pub post_id: u64,
    /// Author account id
    pub user_id: u64,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    /// Hidden posts are only visible through the admin panel.
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment on a post.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Comment {
    pub comment_id: u64,
    pub post_id: u64,
    pub user_id: u64,
    pub content: String,
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
}

/// A favorite marker linking a user to a post.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Favorite {
    pub favorite_id: u64,
    pub user_id: u64,
    pub post_id: u64,
    pub created_at: DateTime<Utc>,
}

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Comment,
    Favorite,
}

/// A notification delivered to a post author when someone comments on or
/// favorites one of their posts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Notification {
    pub message_id: u64,
    /// Recipient account id
    pub user_id: u64,
    /// Account that triggered the notification
    pub actor_id: u64,
    pub post_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<u64>,
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of a user's AI-chat history.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatMessage {
    pub message_id: u64,
    pub user_id: u64,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Shared response types
// ============================================================================

/// Public view of an account.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub user_id: u64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub roles: Vec<Role>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
            roles: user.roles.clone(),
            enabled: user.enabled,
            created_at: user.created_at,
        }
    }
}

/// A post together with its author's display name.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostResponse {
    pub post_id: u64,
    pub user_id: u64,
    pub author: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn new(post: &Post, author: &str) -> Self {
        Self {
            post_id: post.post_id,
            user_id: post.user_id,
            author: author.to_string(),
            title: post.title.clone(),
            content: post.content.clone(),
            summary: post.summary.clone(),
            tags: post.tags.clone(),
            hidden: post.hidden,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// A comment together with its author's display name.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentResponse {
    pub comment_id: u64,
    pub post_id: u64,
    pub user_id: u64,
    pub author: String,
    pub content: String,
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn new(comment: &Comment, author: &str) -> Self {
        Self {
            comment_id: comment.comment_id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            author: author.to_string(),
            content: comment.content.clone(),
            hidden: comment.hidden,
            created_at: comment.created_at,
        }
    }
}

// ============================================================================
// Shared request types
// ============================================================================

/// Pagination query, 1-based page numbering.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct PageQuery {
    /// Page number, starting at 1.
    #[serde(default = "default_page")]
    pub page: usize,
    /// Page size.
    #[serde(default = "default_size")]
    pub size: usize,
    /// Optional keyword filter (username or email for user lists).
    pub keyword: Option<String>,
}

fn default_page() -> usize {
    1
}

fn default_size() -> usize {
    10
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
            keyword: None,
        }
    }
}
