// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Path classification: which requests require authentication at all.
//!
//! The policy is a static table built once at startup. Evaluation order is
//! deterministic: OPTIONS first, then the fully-public list, then (for GET)
//! the authenticated carve-outs BEFORE the public GET list. The carve-outs
//! are textual sub-cases of patterns in the GET list (`/api/users/me` vs
//! `/api/users/{id}`), so reversing the order would leak them.

use axum::http::Method;

/// Outcome of path classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No credential required.
    Public,
    /// A verified bearer token is required.
    Protected,
}

/// One segment of a path pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    /// Exact segment text
    Literal(&'static str),
    /// A single all-digit segment (`{id}`); never matches literals like `me`
    Numeric,
    /// Any single segment (`*`)
    Any,
    /// Zero or more trailing segments (`**`)
    Rest,
}

/// A compiled path pattern, e.g. `/api/posts/*` or `/api/users/{id}`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    fn new(pattern: &'static str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s {
                "**" => Segment::Rest,
                "*" => Segment::Any,
                "{id}" => Segment::Numeric,
                literal => Segment::Literal(literal),
            })
            .collect();
        Self { segments }
    }

    /// Match a request path against this pattern.
    ///
    /// Trailing slashes and empty segments are ignored, so `/api/posts/`
    /// classifies the same as `/api/posts`.
    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let mut i = 0;
        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::Literal(lit) => {
                    if parts.get(i) != Some(lit) {
                        return false;
                    }
                }
                Segment::Numeric => match parts.get(i) {
                    Some(p) if !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) => {}
                    _ => return false,
                },
                Segment::Any => {
                    if parts.get(i).is_none() {
                        return false;
                    }
                }
            }
            i += 1;
        }

        i == parts.len()
    }
}

/// The route policy table: which paths are exempt from authentication and
/// which subtree additionally requires the admin role.
///
/// Statically defined at startup, immutable thereafter.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    /// Public for any method.
    public: Vec<PathPattern>,
    /// Public for GET only.
    public_get: Vec<PathPattern>,
    /// Always authenticated, even under GET; checked before `public_get`.
    authenticated_get: Vec<PathPattern>,
    /// Paths additionally requiring the admin role.
    admin: Vec<PathPattern>,
}

impl RoutePolicy {
    /// Classify a request: does it require authentication at all?
    pub fn classify(&self, path: &str, method: &Method) -> Access {
        // Pre-flight requests are always public.
        if method == Method::OPTIONS {
            return Access::Public;
        }

        if self.public.iter().any(|p| p.matches(path)) {
            return Access::Public;
        }

        if method == Method::GET {
            if self.authenticated_get.iter().any(|p| p.matches(path)) {
                return Access::Protected;
            }
            if self.public_get.iter().any(|p| p.matches(path)) {
                return Access::Public;
            }
        }

        Access::Protected
    }

    /// Whether the path falls under the administrative subtree.
    pub fn requires_admin(&self, path: &str) -> bool {
        self.admin.iter().any(|p| p.matches(path))
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            public: vec![PathPattern::new("/api/auth/**")],
            public_get: vec![
                PathPattern::new("/api/posts"),
                PathPattern::new("/api/posts/tags"),
                PathPattern::new("/api/posts/bytags/**"),
                PathPattern::new("/api/posts/*"),
                PathPattern::new("/api/tags/**"),
                PathPattern::new("/api/users/{id}"),
            ],
            authenticated_get: vec![
                PathPattern::new("/api/users/me"),
                PathPattern::new("/api/users/favorites"),
            ],
            admin: vec![PathPattern::new("/api/admin/**")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RoutePolicy {
        RoutePolicy::default()
    }

    #[test]
    fn options_is_always_public() {
        let p = policy();
        assert_eq!(p.classify("/api/admin/users", &Method::OPTIONS), Access::Public);
        assert_eq!(p.classify("/api/users/me", &Method::OPTIONS), Access::Public);
        assert_eq!(p.classify("/anything", &Method::OPTIONS), Access::Public);
    }

    #[test]
    fn auth_endpoints_are_public_for_any_method() {
        let p = policy();
        assert_eq!(p.classify("/api/auth/login", &Method::POST), Access::Public);
        assert_eq!(p.classify("/api/auth/register", &Method::POST), Access::Public);
        assert_eq!(p.classify("/api/auth/validate-token", &Method::GET), Access::Public);
        assert_eq!(p.classify("/api/auth", &Method::POST), Access::Public);
    }

    #[test]
    fn post_listing_is_public_for_get_only() {
        let p = policy();
        assert_eq!(p.classify("/api/posts", &Method::GET), Access::Public);
        assert_eq!(p.classify("/api/posts/42", &Method::GET), Access::Public);
        assert_eq!(p.classify("/api/posts/tags", &Method::GET), Access::Public);
        assert_eq!(p.classify("/api/posts/bytags", &Method::GET), Access::Public);
        assert_eq!(p.classify("/api/posts", &Method::POST), Access::Protected);
        assert_eq!(p.classify("/api/posts/42", &Method::PUT), Access::Protected);
        assert_eq!(p.classify("/api/posts/42", &Method::DELETE), Access::Protected);
    }

    #[test]
    fn nested_post_resources_require_auth() {
        // `/api/posts/*` is a single-segment wildcard.
        let p = policy();
        assert_eq!(p.classify("/api/posts/42/comments", &Method::GET), Access::Protected);
    }

    #[test]
    fn current_user_paths_require_auth_despite_get() {
        let p = policy();
        assert_eq!(p.classify("/api/users/me", &Method::GET), Access::Protected);
        assert_eq!(p.classify("/api/users/favorites", &Method::GET), Access::Protected);
        // Sibling numeric-id profile lookups stay public.
        assert_eq!(p.classify("/api/users/17", &Method::GET), Access::Public);
    }

    #[test]
    fn numeric_pattern_rejects_literal_segments() {
        let p = policy();
        // "me" must never match the numeric {id} pattern.
        assert_eq!(p.classify("/api/users/posts", &Method::GET), Access::Protected);
        let pattern = PathPattern::new("/api/users/{id}");
        assert!(pattern.matches("/api/users/123"));
        assert!(!pattern.matches("/api/users/me"));
        assert!(!pattern.matches("/api/users/12a"));
    }

    #[test]
    fn trailing_slashes_do_not_change_classification() {
        let p = policy();
        assert_eq!(p.classify("/api/posts/", &Method::GET), Access::Public);
        assert_eq!(p.classify("/api/users/me/", &Method::GET), Access::Protected);
        assert_eq!(p.classify("/api/admin/users/", &Method::GET), Access::Protected);
    }

    #[test]
    fn admin_subtree_is_protected_and_flagged() {
        let p = policy();
        assert_eq!(p.classify("/api/admin/users", &Method::GET), Access::Protected);
        assert!(p.requires_admin("/api/admin/users"));
        assert!(p.requires_admin("/api/admin"));
        assert!(p.requires_admin("/api/admin/dashboard/stats"));
        assert!(!p.requires_admin("/api/posts"));
        // A public GET list must not shadow the stricter admin rule.
        assert_eq!(p.classify("/api/admin/posts", &Method::GET), Access::Protected);
    }

    #[test]
    fn rest_pattern_matches_zero_or_more_segments() {
        let pattern = PathPattern::new("/api/auth/**");
        assert!(pattern.matches("/api/auth"));
        assert!(pattern.matches("/api/auth/login"));
        assert!(pattern.matches("/api/auth/a/b/c"));
        assert!(!pattern.matches("/api/posts"));
    }
}
