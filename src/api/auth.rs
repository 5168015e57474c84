// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Registration, login and token validation endpoints.
//!
//! These paths are fully public in the route policy; they are where bearer
//! tokens come from in the first place.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::tokens;
use crate::error::ApiError;
use crate::models::{User, UserResponse};
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the profile it belongs to.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Response for GET /api/auth/validate-token.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

fn issue_response(state: &AppState, user: &User) -> Result<AuthResponse, ApiError> {
    let token = tokens::issue(&state.auth, user).map_err(|err| {
        tracing::error!(error = %err, "failed to issue token");
        ApiError::internal("Failed to issue token")
    })?;
    Ok(AuthResponse {
        token,
        user: UserResponse::from(user),
    })
}

/// Register a new account and log it in.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Username or email already taken"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if request.username.trim().is_empty() || request.email.trim().is_empty() {
        return Err(ApiError::bad_request("Username and email are required"));
    }
    if request.password.len() < 6 {
        return Err(ApiError::bad_request("Password must be at least 6 characters"));
    }

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
        .map_err(|_| ApiError::internal("Failed to hash password"))?;

    let mut store = state.store.write().await;
    let user = store.create_user(
        request.username.trim().to_string(),
        request.email.trim().to_string(),
        password_hash,
        request.bio,
    )?;
    drop(store);

    tracing::info!(user = %user.email, "account registered");
    Ok((StatusCode::CREATED, Json(issue_response(&state, &user)?)))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Bad credentials or disabled account"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let store = state.store.read().await;
    // One generic message for unknown email and wrong password alike.
    let user = store
        .user_by_email(&request.email)
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;
    drop(store);

    let matches = bcrypt::verify(&request.password, &user.password_hash)
        .map_err(|_| ApiError::internal("Failed to verify password"))?;
    if !matches {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }
    if !user.enabled {
        return Err(ApiError::unauthorized("Account has been disabled"));
    }

    tracing::info!(user = %user.email, "login succeeded");
    Ok(Json(issue_response(&state, &user)?))
}

/// Report whether the presented token is currently valid.
///
/// Public by policy; never denies, even with no header at all.
#[utoipa::path(
    get,
    path = "/api/auth/validate-token",
    tag = "Auth",
    responses(
        (status = 200, description = "Validation result", body = TokenValidationResponse),
    )
)]
pub async fn validate_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<TokenValidationResponse> {
    let claims = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .and_then(|token| tokens::verify(&state.auth, token.trim()).ok());

    Json(TokenValidationResponse {
        valid: claims.is_some(),
        subject: claims.map(|c| c.sub),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthSettings;
    use crate::store::BlogStore;

    fn test_state() -> AppState {
        AppState::new(
            BlogStore::new(),
            AuthSettings {
                secret: "test-secret".to_string(),
                token_ttl_secs: 3600,
                seed_admin_email: "admin@example.com".to_string(),
                seed_admin_password: "admin123".to_string(),
            },
        )
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "password123".to_string(),
            bio: None,
        }
    }

    #[tokio::test]
    async fn register_returns_token_and_profile() {
        let state = test_state();
        let (status, Json(response)) = register(State(state.clone()), Json(register_request()))
            .await
            .expect("registration succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert!(!response.token.is_empty());
        assert_eq!(response.user.username, "alice");

        let claims = tokens::verify(&state.auth, &response.token).unwrap();
        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.roles, vec!["member"]);
    }

    #[tokio::test]
    async fn register_rejects_short_password() {
        let state = test_state();
        let mut request = register_request();
        request.password = "short".to_string();
        let err = register(State(state), Json(request)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_roundtrip() {
        let state = test_state();
        register(State(state.clone()), Json(register_request())).await.unwrap();

        let Json(response) = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "password123".to_string(),
            }),
        )
        .await
        .expect("login succeeds");
        assert_eq!(response.user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_401() {
        let state = test_state();
        register(State(state.clone()), Json(register_request())).await.unwrap();

        let err = login(
            State(state),
            Json(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "wrong-password".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_of_disabled_account_is_401_with_distinct_message() {
        let state = test_state();
        register(State(state.clone()), Json(register_request())).await.unwrap();
        {
            let mut store = state.store.write().await;
            let id = store.user_by_email("alice@example.com").unwrap().user_id;
            store.set_enabled(id, false).unwrap();
        }

        let err = login(
            State(state),
            Json(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "password123".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Account has been disabled");
    }

    #[tokio::test]
    async fn validate_token_reports_validity() {
        let state = test_state();
        let (_, Json(response)) = register(State(state.clone()), Json(register_request()))
            .await
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, format!("Bearer {}", response.token).parse().unwrap());
        let Json(result) = validate_token(State(state.clone()), headers).await;
        assert!(result.valid);
        assert_eq!(result.subject.as_deref(), Some("alice@example.com"));

        let Json(result) = validate_token(State(state), HeaderMap::new()).await;
        assert!(!result.valid);
    }
}
