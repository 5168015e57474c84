// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! # Authentication Module
//!
//! JWT authentication and authorization gate for the Inkpost API.
//!
//! ## Request Flow
//!
//! 1. Client logs in (or registers) and receives an HS256-signed token
//!    embedding subject (account email), role labels, `iat` and `exp`.
//! 2. Client sends `Authorization: Bearer <token>` on subsequent requests.
//! 3. The gate middleware, layered over the whole `/api` router:
//!    - classifies the path (`policy`) - public paths skip all of the below
//!    - verifies the token (`tokens`) - signature and expiry, zero leeway
//!    - resolves the principal (`resolver`) - roles re-derived from the
//!      account record, seed-admin override, member fallback
//!    - enforces the admin subtree rule and attaches the `Principal`
//! 4. Handlers read the caller through the `Auth` extractor.
//!
//! ## Security
//!
//! - Tokens are stateless; there is no server-side revocation list
//! - Failed verification logs at most a truncated token fragment
//! - Denials always carry a JSON `{"message": ...}` body (401 or 403)

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod policy;
pub mod resolver;
pub mod roles;
pub mod tokens;

pub use claims::{Claims, Principal};
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth};
pub use policy::{Access, RoutePolicy};
pub use roles::Role;
