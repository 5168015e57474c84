// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! In-memory data store for all blog entities.
//!
//! The store is a plain struct guarded by one `tokio::sync::RwLock` in
//! `AppState`. Ids are allocated from a single monotonic counter, so id
//! order doubles as creation order for sorting.

use std::collections::HashMap;

use chrono::Utc;

use crate::auth::Role;
use crate::error::ApiError;
use crate::models::{
    ChatMessage, ChatRole, Comment, Favorite, Notification, NotificationKind, Post, User,
};

#[derive(Default)]
pub struct BlogStore {
    users: HashMap<u64, User>,
    posts: HashMap<u64, Post>,
    comments: HashMap<u64, Comment>,
    favorites: HashMap<u64, Favorite>,
    notifications: HashMap<u64, Notification>,
    chat_messages: HashMap<u64, ChatMessage>,
    next_id: u64,
}

/// Slice a sorted list into a 1-based page.
fn page_of<T: Clone>(items: &[T], page: usize, size: usize) -> Vec<T> {
    let offset = page.saturating_sub(1).saturating_mul(size);
    items.iter().skip(offset).take(size).cloned().collect()
}

impl BlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub fn create_user(
        &mut self,
        username: String,
        email: String,
        password_hash: String,
        bio: Option<String>,
    ) -> Result<User, ApiError> {
        if self.users.values().any(|u| u.username == username) {
            return Err(ApiError::conflict("Username is already taken"));
        }
        if self.users.values().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(ApiError::conflict("Email is already registered"));
        }

        let user_id = self.alloc_id();
        let user = User::new(user_id, username, email, password_hash, bio, vec![Role::Member]);
        self.users.insert(user_id, user.clone());
        Ok(user)
    }

    pub fn user_by_id(&self, user_id: u64) -> Option<&User> {
        self.users.get(&user_id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email.eq_ignore_ascii_case(email))
    }

    pub fn update_profile(
        &mut self,
        user_id: u64,
        username: Option<String>,
        avatar: Option<String>,
        bio: Option<String>,
    ) -> Result<User, ApiError> {
        if let Some(ref name) = username {
            if self
                .users
                .values()
                .any(|u| u.user_id != user_id && &u.username == name)
            {
                return Err(ApiError::conflict("Username is already taken"));
            }
        }

        let user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        if let Some(name) = username {
            user.username = name;
        }
        if avatar.is_some() {
            user.avatar = avatar;
        }
        if bio.is_some() {
            user.bio = bio;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    /// List users newest-first, optionally filtered by a keyword matched
    /// against username and email. Returns the page and the filtered total.
    pub fn list_users(&self, keyword: Option<&str>, page: usize, size: usize) -> (Vec<User>, usize) {
        let mut users: Vec<User> = self
            .users
            .values()
            .filter(|u| match keyword {
                Some(k) => {
                    let k = k.to_ascii_lowercase();
                    u.username.to_ascii_lowercase().contains(&k)
                        || u.email.to_ascii_lowercase().contains(&k)
                }
                None => true,
            })
            .cloned()
            .collect();
        users.sort_by(|a, b| b.user_id.cmp(&a.user_id));
        let total = users.len();
        (page_of(&users, page, size), total)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn set_roles(&mut self, user_id: u64, roles: Vec<Role>) -> Result<(), ApiError> {
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| ApiError::not_found("User not found"))?;
        user.roles = roles;
        user.updated_at = Utc::now();
        Ok(())
    }

    pub fn grant_admin(&mut self, user_id: u64) -> Result<(), ApiError> {
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| ApiError::not_found("User not found"))?;
        if !user.roles.contains(&Role::Admin) {
            user.roles.push(Role::Admin);
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    pub fn revoke_admin(&mut self, user_id: u64) -> Result<(), ApiError> {
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| ApiError::not_found("User not found"))?;
        user.roles.retain(|r| *r != Role::Admin);
        user.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_enabled(&mut self, user_id: u64, enabled: bool) -> Result<(), ApiError> {
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| ApiError::not_found("User not found"))?;
        user.enabled = enabled;
        user.updated_at = Utc::now();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Posts
    // ------------------------------------------------------------------

    pub fn create_post(
        &mut self,
        user_id: u64,
        title: String,
        content: String,
        summary: Option<String>,
        tags: Vec<String>,
    ) -> Post {
        let post_id = self.alloc_id();
        let now = Utc::now();
        let post = Post {
            post_id,
            user_id,
            title,
            content,
            summary,
            tags,
            hidden: false,
            created_at: now,
            updated_at: now,
        };
        self.posts.insert(post_id, post.clone());
        post
    }

    pub fn post_by_id(&self, post_id: u64) -> Option<&Post> {
        self.posts.get(&post_id)
    }

    /// A post as seen by non-admin callers: hidden posts read as absent.
    pub fn visible_post(&self, post_id: u64) -> Result<Post, ApiError> {
        self.posts
            .get(&post_id)
            .filter(|p| !p.hidden)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Post not found"))
    }

    fn sorted_posts(&self, include_hidden: bool) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .values()
            .filter(|p| include_hidden || !p.hidden)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.post_id.cmp(&a.post_id));
        posts
    }

    pub fn list_posts(&self, page: usize, size: usize) -> (Vec<Post>, usize) {
        let posts = self.sorted_posts(false);
        let total = posts.len();
        (page_of(&posts, page, size), total)
    }

    /// Admin view: includes hidden posts.
    pub fn list_all_posts(&self, page: usize, size: usize) -> (Vec<Post>, usize) {
        let posts = self.sorted_posts(true);
        let total = posts.len();
        (page_of(&posts, page, size), total)
    }

    pub fn posts_by_user(&self, user_id: u64) -> Vec<Post> {
        self.sorted_posts(false)
            .into_iter()
            .filter(|p| p.user_id == user_id)
            .collect()
    }

    /// Posts carrying at least one of the given tags.
    pub fn posts_by_tags(&self, tags: &[String]) -> Vec<Post> {
        self.sorted_posts(false)
            .into_iter()
            .filter(|p| p.tags.iter().any(|t| tags.contains(t)))
            .collect()
    }

    /// Distinct tags across visible posts, sorted.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .posts
            .values()
            .filter(|p| !p.hidden)
            .flat_map(|p| p.tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    pub fn update_post(
        &mut self,
        post_id: u64,
        title: Option<String>,
        content: Option<String>,
        summary: Option<String>,
        tags: Option<Vec<String>>,
    ) -> Result<Post, ApiError> {
        let post = self
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| ApiError::not_found("Post not found"))?;

        if let Some(title) = title {
            post.title = title;
        }
        if let Some(content) = content {
            post.content = content;
        }
        if summary.is_some() {
            post.summary = summary;
        }
        if let Some(tags) = tags {
            post.tags = tags;
        }
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    /// Delete a post and cascade to its comments, favorites and notifications.
    pub fn delete_post(&mut self, post_id: u64) -> Result<(), ApiError> {
        self.posts
            .remove(&post_id)
            .ok_or_else(|| ApiError::not_found("Post not found"))?;
        self.comments.retain(|_, c| c.post_id != post_id);
        self.favorites.retain(|_, f| f.post_id != post_id);
        self.notifications.retain(|_, n| n.post_id != post_id);
        Ok(())
    }

    pub fn set_post_hidden(&mut self, post_id: u64, hidden: bool) -> Result<(), ApiError> {
        let post = self
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| ApiError::not_found("Post not found"))?;
        post.hidden = hidden;
        post.updated_at = Utc::now();
        Ok(())
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// Create a comment; notifies the post author unless they commented on
    /// their own post.
    pub fn create_comment(
        &mut self,
        user_id: u64,
        post_id: u64,
        content: String,
    ) -> Result<Comment, ApiError> {
        let post_author = self
            .posts
            .get(&post_id)
            .filter(|p| !p.hidden)
            .map(|p| p.user_id)
            .ok_or_else(|| ApiError::not_found("Post not found"))?;

        let comment_id = self.alloc_id();
        let comment = Comment {
            comment_id,
            post_id,
            user_id,
            content,
            hidden: false,
            created_at: Utc::now(),
        };
        self.comments.insert(comment_id, comment.clone());

        if post_author != user_id {
            self.push_notification(post_author, user_id, post_id, Some(comment_id), NotificationKind::Comment);
        }
        Ok(comment)
    }

    pub fn comment_by_id(&self, comment_id: u64) -> Option<&Comment> {
        self.comments.get(&comment_id)
    }

    /// Visible comments on a post, oldest first.
    pub fn comments_for_post(&self, post_id: u64) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .values()
            .filter(|c| c.post_id == post_id && !c.hidden)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.comment_id.cmp(&b.comment_id));
        comments
    }

    pub fn comments_by_user(&self, user_id: u64) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .values()
            .filter(|c| c.user_id == user_id && !c.hidden)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.comment_id.cmp(&a.comment_id));
        comments
    }

    /// Admin view: all comments, newest first.
    pub fn list_all_comments(&self, page: usize, size: usize) -> (Vec<Comment>, usize) {
        let mut comments: Vec<Comment> = self.comments.values().cloned().collect();
        comments.sort_by(|a, b| b.comment_id.cmp(&a.comment_id));
        let total = comments.len();
        (page_of(&comments, page, size), total)
    }

    pub fn delete_comment(&mut self, comment_id: u64) -> Result<(), ApiError> {
        self.comments
            .remove(&comment_id)
            .ok_or_else(|| ApiError::not_found("Comment not found"))?;
        self.notifications.retain(|_, n| n.comment_id != Some(comment_id));
        Ok(())
    }

    pub fn set_comment_hidden(&mut self, comment_id: u64, hidden: bool) -> Result<(), ApiError> {
        let comment = self
            .comments
            .get_mut(&comment_id)
            .ok_or_else(|| ApiError::not_found("Comment not found"))?;
        comment.hidden = hidden;
        Ok(())
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    /// Mark a post as a favorite; notifies the post author.
    pub fn add_favorite(&mut self, user_id: u64, post_id: u64) -> Result<Favorite, ApiError> {
        let post_author = self
            .posts
            .get(&post_id)
            .filter(|p| !p.hidden)
            .map(|p| p.user_id)
            .ok_or_else(|| ApiError::not_found("Post not found"))?;

        if self.is_favorited(user_id, post_id) {
            return Err(ApiError::conflict("Post is already in favorites"));
        }

        let favorite_id = self.alloc_id();
        let favorite = Favorite {
            favorite_id,
            user_id,
            post_id,
            created_at: Utc::now(),
        };
        self.favorites.insert(favorite_id, favorite.clone());

        if post_author != user_id {
            self.push_notification(post_author, user_id, post_id, None, NotificationKind::Favorite);
        }
        Ok(favorite)
    }

    pub fn remove_favorite(&mut self, user_id: u64, post_id: u64) -> Result<(), ApiError> {
        let favorite_id = self
            .favorites
            .values()
            .find(|f| f.user_id == user_id && f.post_id == post_id)
            .map(|f| f.favorite_id)
            .ok_or_else(|| ApiError::not_found("Favorite not found"))?;
        self.favorites.remove(&favorite_id);
        Ok(())
    }

    pub fn favorites_of_user(&self, user_id: u64) -> Vec<Favorite> {
        let mut favorites: Vec<Favorite> = self
            .favorites
            .values()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        favorites.sort_by(|a, b| b.favorite_id.cmp(&a.favorite_id));
        favorites
    }

    pub fn is_favorited(&self, user_id: u64, post_id: u64) -> bool {
        self.favorites
            .values()
            .any(|f| f.user_id == user_id && f.post_id == post_id)
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    fn push_notification(
        &mut self,
        user_id: u64,
        actor_id: u64,
        post_id: u64,
        comment_id: Option<u64>,
        kind: NotificationKind,
    ) {
        let message_id = self.alloc_id();
        self.notifications.insert(
            message_id,
            Notification {
                message_id,
                user_id,
                actor_id,
                post_id,
                comment_id,
                kind,
                read: false,
                created_at: Utc::now(),
            },
        );
    }

    pub fn notifications_for(&self, user_id: u64, only_unread: bool) -> Vec<Notification> {
        let mut notifications: Vec<Notification> = self
            .notifications
            .values()
            .filter(|n| n.user_id == user_id && (!only_unread || !n.read))
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.message_id.cmp(&a.message_id));
        notifications
    }

    /// Mark one notification read. Only the recipient may do so.
    pub fn mark_read(&mut self, user_id: u64, message_id: u64) -> Result<(), ApiError> {
        let notification = self
            .notifications
            .get_mut(&message_id)
            .ok_or_else(|| ApiError::not_found("Notification not found"))?;
        if notification.user_id != user_id {
            return Err(ApiError::forbidden("Not your notification"));
        }
        notification.read = true;
        Ok(())
    }

    pub fn mark_all_read(&mut self, user_id: u64) {
        for notification in self.notifications.values_mut() {
            if notification.user_id == user_id {
                notification.read = true;
            }
        }
    }

    pub fn unread_count(&self, user_id: u64) -> usize {
        self.notifications
            .values()
            .filter(|n| n.user_id == user_id && !n.read)
            .count()
    }

    // ------------------------------------------------------------------
    // AI chat history
    // ------------------------------------------------------------------

    pub fn append_chat(&mut self, user_id: u64, role: ChatRole, content: String) -> ChatMessage {
        let message_id = self.alloc_id();
        let message = ChatMessage {
            message_id,
            user_id,
            role,
            content,
            created_at: Utc::now(),
        };
        self.chat_messages.insert(message_id, message.clone());
        message
    }

    /// A user's chat history, oldest first.
    pub fn chat_history(&self, user_id: u64) -> Vec<ChatMessage> {
        let mut messages: Vec<ChatMessage> = self
            .chat_messages
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.message_id.cmp(&b.message_id));
        messages
    }

    pub fn clear_chat(&mut self, user_id: u64) {
        self.chat_messages.retain(|_, m| m.user_id != user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_two_users() -> (BlogStore, u64, u64) {
        let mut store = BlogStore::new();
        let alice = store
            .create_user("alice".into(), "alice@example.com".into(), "hash".into(), None)
            .unwrap();
        let bob = store
            .create_user("bob".into(), "bob@example.com".into(), "hash".into(), None)
            .unwrap();
        (store, alice.user_id, bob.user_id)
    }

    #[test]
    fn duplicate_username_and_email_are_rejected() {
        let (mut store, _, _) = store_with_two_users();
        let err = store
            .create_user("alice".into(), "other@example.com".into(), "hash".into(), None)
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::CONFLICT);

        let err = store
            .create_user("carol".into(), "ALICE@example.com".into(), "hash".into(), None)
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::CONFLICT);
    }

    #[test]
    fn new_users_get_the_member_role() {
        let (store, alice, _) = store_with_two_users();
        assert_eq!(store.user_by_id(alice).unwrap().roles, vec![Role::Member]);
    }

    #[test]
    fn promote_and_demote_are_idempotent() {
        let (mut store, alice, _) = store_with_two_users();
        store.grant_admin(alice).unwrap();
        store.grant_admin(alice).unwrap();
        assert_eq!(
            store.user_by_id(alice).unwrap().roles,
            vec![Role::Member, Role::Admin]
        );
        store.revoke_admin(alice).unwrap();
        assert_eq!(store.user_by_id(alice).unwrap().roles, vec![Role::Member]);
    }

    #[test]
    fn hidden_posts_are_invisible_outside_admin() {
        let (mut store, alice, _) = store_with_two_users();
        let post = store.create_post(alice, "t".into(), "c".into(), None, vec!["rust".into()]);
        store.set_post_hidden(post.post_id, true).unwrap();

        assert!(store.visible_post(post.post_id).is_err());
        let (visible, total) = store.list_posts(1, 10);
        assert!(visible.is_empty());
        assert_eq!(total, 0);

        let (all, total) = store.list_all_posts(1, 10);
        assert_eq!(all.len(), 1);
        assert_eq!(total, 1);
        assert!(store.all_tags().is_empty());
    }

    #[test]
    fn commenting_on_anothers_post_notifies_the_author() {
        let (mut store, alice, bob) = store_with_two_users();
        let post = store.create_post(alice, "t".into(), "c".into(), None, vec![]);
        store.create_comment(bob, post.post_id, "nice".into()).unwrap();

        assert_eq!(store.unread_count(alice), 1);
        let notifications = store.notifications_for(alice, true);
        assert_eq!(notifications[0].kind, NotificationKind::Comment);
        assert_eq!(notifications[0].actor_id, bob);
    }

    #[test]
    fn own_comment_does_not_notify() {
        let (mut store, alice, _) = store_with_two_users();
        let post = store.create_post(alice, "t".into(), "c".into(), None, vec![]);
        store.create_comment(alice, post.post_id, "self".into()).unwrap();
        assert_eq!(store.unread_count(alice), 0);
    }

    #[test]
    fn favorite_twice_is_a_conflict() {
        let (mut store, alice, bob) = store_with_two_users();
        let post = store.create_post(alice, "t".into(), "c".into(), None, vec![]);
        store.add_favorite(bob, post.post_id).unwrap();
        let err = store.add_favorite(bob, post.post_id).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::CONFLICT);
        assert!(store.is_favorited(bob, post.post_id));
    }

    #[test]
    fn deleting_a_post_cascades() {
        let (mut store, alice, bob) = store_with_two_users();
        let post = store.create_post(alice, "t".into(), "c".into(), None, vec![]);
        store.create_comment(bob, post.post_id, "nice".into()).unwrap();
        store.add_favorite(bob, post.post_id).unwrap();

        store.delete_post(post.post_id).unwrap();
        assert_eq!(store.comment_count(), 0);
        assert!(!store.is_favorited(bob, post.post_id));
        assert_eq!(store.unread_count(alice), 0);
    }

    #[test]
    fn mark_read_enforces_ownership() {
        let (mut store, alice, bob) = store_with_two_users();
        let post = store.create_post(alice, "t".into(), "c".into(), None, vec![]);
        store.create_comment(bob, post.post_id, "nice".into()).unwrap();

        let message_id = store.notifications_for(alice, true)[0].message_id;
        let err = store.mark_read(bob, message_id).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);

        store.mark_read(alice, message_id).unwrap();
        assert_eq!(store.unread_count(alice), 0);
    }

    #[test]
    fn keyword_filters_user_listing() {
        let (store, _, _) = store_with_two_users();
        let (users, total) = store.list_users(Some("ali"), 1, 10);
        assert_eq!(total, 1);
        assert_eq!(users[0].username, "alice");

        let (users, total) = store.list_users(None, 1, 1);
        assert_eq!(total, 2);
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn tags_filter_and_listing() {
        let (mut store, alice, _) = store_with_two_users();
        store.create_post(alice, "a".into(), "c".into(), None, vec!["rust".into(), "web".into()]);
        store.create_post(alice, "b".into(), "c".into(), None, vec!["rust".into()]);
        store.create_post(alice, "c".into(), "c".into(), None, vec!["life".into()]);

        assert_eq!(store.all_tags(), vec!["life", "rust", "web"]);
        assert_eq!(store.posts_by_tags(&["rust".to_string()]).len(), 2);
    }

    #[test]
    fn chat_history_is_per_user_and_ordered() {
        let (mut store, alice, bob) = store_with_two_users();
        store.append_chat(alice, ChatRole::User, "hi".into());
        store.append_chat(alice, ChatRole::Assistant, "hello".into());
        store.append_chat(bob, ChatRole::User, "other".into());

        let history = store.chat_history(alice);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, ChatRole::User);
        assert_eq!(history[1].role, ChatRole::Assistant);

        store.clear_chat(alice);
        assert!(store.chat_history(alice).is_empty());
        assert_eq!(store.chat_history(bob).len(), 1);
    }
}
