// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Token claims and the per-request principal.

use serde::{Deserialize, Serialize};

use super::roles::Role;

/// Claims embedded in an issued bearer token.
///
/// The subject is the account's email address. The embedded role list is
/// informational for clients; the gate re-derives authoritative roles from
/// the account record on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: account email address
    pub sub: String,
    /// Role labels at issuance time (may be empty)
    #[serde(default)]
    pub roles: Vec<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// The authenticated caller, constructed per-request by the gate and
/// attached to request extensions. Never persisted.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: u64,
    pub email: String,
    pub username: String,
    /// Resolved role set; never empty.
    pub roles: Vec<Role>,
    /// Whether the underlying account is enabled. Disabled accounts are
    /// rejected at enforcement, after identity is established.
    pub enabled: bool,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}
