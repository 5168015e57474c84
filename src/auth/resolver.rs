// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Role resolution: turn a verified token subject into an authoritative
//! principal for the current request.
//!
//! Roles come from the account record, not from the token's embedded role
//! list, so promotions and demotions take effect on the next request rather
//! than at the next token issuance.

use crate::config::AuthSettings;
use crate::store::BlogStore;

use super::claims::Principal;
use super::error::AuthError;
use super::roles::Role;

/// Resolve a token subject against the account store.
///
/// The seed-admin rule lives here and only here: the configured bootstrap
/// account is granted the admin role on every request, even when its stored
/// role assignment is empty, so the system can never be left without an
/// administrator. An empty role set resolves to the baseline member role.
///
/// Disabled accounts still resolve; the enforcement step rejects them with a
/// distinguishable error.
pub fn resolve(store: &BlogStore, auth: &AuthSettings, subject: &str) -> Result<Principal, AuthError> {
    let user = store
        .user_by_email(subject)
        .ok_or(AuthError::AccountNotFound)?;

    let mut roles = user.roles.clone();

    if subject.eq_ignore_ascii_case(&auth.seed_admin_email) && !roles.contains(&Role::Admin) {
        roles.push(Role::Admin);
    }

    if roles.is_empty() {
        roles.push(Role::Member);
    }

    Ok(Principal {
        user_id: user.user_id,
        email: user.email.clone(),
        username: user.username.clone(),
        roles,
        enabled: user.enabled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> AuthSettings {
        AuthSettings {
            secret: "test-secret".to_string(),
            token_ttl_secs: 3600,
            seed_admin_email: "admin@example.com".to_string(),
            seed_admin_password: "admin123".to_string(),
        }
    }

    fn store_with_users() -> BlogStore {
        let mut store = BlogStore::new();
        store
            .create_user("alice".to_string(), "alice@example.com".to_string(), "hash".to_string(), None)
            .unwrap();
        store
            .create_user("admin".to_string(), "admin@example.com".to_string(), "hash".to_string(), None)
            .unwrap();
        store
    }

    #[test]
    fn unknown_subject_is_account_not_found() {
        let store = BlogStore::new();
        let result = resolve(&store, &settings(), "ghost@example.com");
        assert_eq!(result.unwrap_err(), AuthError::AccountNotFound);
    }

    #[test]
    fn member_resolves_with_stored_roles() {
        let store = store_with_users();
        let principal = resolve(&store, &settings(), "alice@example.com").unwrap();
        assert_eq!(principal.roles, vec![Role::Member]);
        assert!(!principal.is_admin());
        assert!(principal.enabled);
    }

    #[test]
    fn seed_admin_is_always_granted_admin() {
        let mut store = store_with_users();
        // Wipe the stored role assignment entirely.
        let admin_id = store.user_by_email("admin@example.com").unwrap().user_id;
        store.set_roles(admin_id, Vec::new()).unwrap();

        let principal = resolve(&store, &settings(), "admin@example.com").unwrap();
        assert!(principal.is_admin());
    }

    #[test]
    fn empty_role_set_defaults_to_member() {
        let mut store = store_with_users();
        let alice_id = store.user_by_email("alice@example.com").unwrap().user_id;
        store.set_roles(alice_id, Vec::new()).unwrap();

        let principal = resolve(&store, &settings(), "alice@example.com").unwrap();
        assert_eq!(principal.roles, vec![Role::Member]);
        assert!(!principal.is_admin());
    }

    #[test]
    fn disabled_account_still_resolves() {
        let mut store = store_with_users();
        let alice_id = store.user_by_email("alice@example.com").unwrap().user_id;
        store.set_enabled(alice_id, false).unwrap();

        let principal = resolve(&store, &settings(), "alice@example.com").unwrap();
        assert!(!principal.enabled);
    }
}
