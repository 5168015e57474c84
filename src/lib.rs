// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Inkpost - Blog Platform Backend
//!
//! HTTP backend for a conventional blog platform: accounts, posts, comments,
//! favorites, notifications, an admin panel, and a thin AI-chat passthrough
//! to a DeepSeek-compatible chat-completions API.
//!
//! Every request under `/api` passes through a single authentication and
//! authorization gate before reaching a handler. The gate classifies the
//! path, verifies the bearer token, resolves the caller's roles from the
//! account record, and attaches the resulting principal to the request.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Authentication and authorization gate (JWT, HS256)
//! - `providers` - Upstream AI chat client
//! - `store` - In-memory data store

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod state;
pub mod store;
