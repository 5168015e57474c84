// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | HS256 signing secret for bearer tokens | dev-only fallback |
//! | `JWT_TTL_SECS` | Token lifetime in seconds | `86400` (24h) |
//! | `SEED_ADMIN_EMAIL` | Bootstrap admin account, always granted the admin role | `admin@example.com` |
//! | `SEED_ADMIN_PASSWORD` | Initial password for the bootstrap admin account | `admin123` |
//! | `DEEPSEEK_API_KEY` | Upstream chat API key; chat endpoints return 503 if unset | unset |
//! | `DEEPSEEK_API_URL` | Upstream chat API base URL | `https://api.deepseek.com/v1` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

/// Fallback signing secret. Only acceptable for local development.
const DEV_JWT_SECRET: &str = "inkpost-dev-secret-change-in-production";

/// Default lifetime for issued tokens (24 hours).
const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

/// Default upstream chat API base URL.
const DEFAULT_DEEPSEEK_API_URL: &str = "https://api.deepseek.com/v1";

/// Settings for the authentication gate and token issuer.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// HS256 signing secret shared by issuer and verifier.
    pub secret: String,
    /// Lifetime of issued tokens in seconds.
    pub token_ttl_secs: i64,
    /// Account that is always granted the admin role, regardless of stored
    /// role assignments. Guarantees the system is never left without an
    /// administrator.
    pub seed_admin_email: String,
    /// Initial password for the seed admin account, used only when the
    /// account does not exist yet at startup.
    pub seed_admin_password: String,
}

/// Settings for the upstream AI chat API.
#[derive(Debug, Clone)]
pub struct AssistantSettings {
    pub api_key: String,
    pub api_url: String,
}

/// Full application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub log_json: bool,
    pub auth: AuthSettings,
    pub assistant: Option<AssistantSettings>,
}

impl Settings {
    /// Load settings from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string());

        let token_ttl_secs = env::var("JWT_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        let assistant = env::var("DEEPSEEK_API_KEY").ok().map(|api_key| AssistantSettings {
            api_key,
            api_url: env::var("DEEPSEEK_API_URL")
                .unwrap_or_else(|_| DEFAULT_DEEPSEEK_API_URL.to_string()),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            log_json: env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false),
            auth: AuthSettings {
                secret,
                token_ttl_secs,
                seed_admin_email: env::var("SEED_ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@example.com".to_string()),
                seed_admin_password: env::var("SEED_ADMIN_PASSWORD")
                    .unwrap_or_else(|_| "admin123".to_string()),
            },
            assistant,
        }
    }

    /// True when no `JWT_SECRET` was provided and the development fallback
    /// is in use. Callers should log a warning once logging is up.
    pub fn dev_secret_in_use(&self) -> bool {
        self.auth.secret == DEV_JWT_SECRET
    }
}
