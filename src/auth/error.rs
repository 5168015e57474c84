// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Authentication and authorization errors.
//!
//! All variants are terminal for the current request: the gate converts them
//! directly into an HTTP status plus a JSON `{"message": ...}` body, and
//! nothing propagates past the gate into handler code.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Error taxonomy of the authentication gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No Authorization header on a protected path
    #[error("Authorization header is required")]
    MissingAuthHeader,
    /// Header present but not in "Bearer <token>" shape
    #[error("Invalid authorization header format (expected 'Bearer <token>')")]
    InvalidAuthHeader,
    /// Token cannot be parsed at all
    #[error("Token is malformed")]
    MalformedToken,
    /// Token fails cryptographic verification
    #[error("Token signature is invalid")]
    InvalidSignature,
    /// Token expiry has passed
    #[error("Token has expired")]
    TokenExpired,
    /// Token subject does not resolve to a known account
    #[error("Account does not exist")]
    AccountNotFound,
    /// Account resolves but is flagged disabled
    #[error("Account has been disabled")]
    AccountDisabled,
    /// Valid principal, required role absent
    #[error("Administrator access is required")]
    InsufficientRole,
}

impl AuthError {
    /// HTTP status for this error: 403 for a role failure, 401 otherwise.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InsufficientRole => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "message": self.to_string() }).to_string();
        (
            self.status_code(),
            [(header::CONTENT_TYPE, "application/json;charset=UTF-8")],
            body,
        )
            .into_response()
    }
}
