// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! User roles for authorization.
//!
//! Roles are a closed enumeration. Role strings only exist on the wire
//! (token claims and JSON bodies, via serde and `Display`); everything
//! inside the gate compares enum values.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Permission tier of an account.
///
/// - `Admin` - full access, including the `/api/admin` subtree
/// - `Member` - normal user; owns posts, comments, and favorites
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Normal member account
    Member,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Member => write!(f, "member"),
        }
    }
}
