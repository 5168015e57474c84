// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use inkpost::api::router;
use inkpost::config::Settings;
use inkpost::providers::DeepSeekClient;
use inkpost::state::AppState;
use inkpost::store::BlogStore;

#[tokio::main]
async fn main() {
    let settings = Settings::from_env();
    init_tracing(settings.log_json);

    if settings.dev_secret_in_use() {
        tracing::warn!("JWT_SECRET not set, using development fallback secret");
    }

    // Bootstrap the seed admin account so the system is never without an
    // administrator. The role resolver also forces the admin role for this
    // email on every request, so a pre-existing account needs no fixup here.
    let mut store = BlogStore::new();
    match bcrypt::hash(&settings.auth.seed_admin_password, bcrypt::DEFAULT_COST) {
        Ok(password_hash) => {
            match store.create_user(
                "admin".to_string(),
                settings.auth.seed_admin_email.clone(),
                password_hash,
                None,
            ) {
                Ok(admin) => {
                    if let Err(err) = store.grant_admin(admin.user_id) {
                        tracing::error!(error = %err.message, "failed to grant seed admin role");
                    }
                    tracing::info!(email = %admin.email, "seed admin account created");
                }
                Err(err) => tracing::error!(error = %err.message, "failed to seed admin account"),
            }
        }
        Err(err) => tracing::error!(error = %err, "failed to hash seed admin password"),
    }

    let mut state = AppState::new(store, settings.auth.clone());
    if let Some(assistant) = &settings.assistant {
        state = state.with_assistant(DeepSeekClient::new(assistant));
        tracing::info!("AI assistant configured");
    } else {
        tracing::info!("no DEEPSEEK_API_KEY set, chat endpoints will answer 503");
    }

    let app = router(state);

    let addr: SocketAddr = match format!("{}:{}", settings.host, settings.port).parse() {
        Ok(addr) => addr,
        Err(err) => {
            tracing::error!(error = %err, "invalid bind address");
            std::process::exit(1);
        }
    };

    tracing::info!("Inkpost server listening on http://{addr} (docs at /docs)");

    let handle = axum_server::Handle::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    if let Err(err) = axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!(error = %err, "server failed");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_on_ctrl_c(handle: axum_server::Handle<SocketAddr>) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
        handle.graceful_shutdown(Some(std::time::Duration::from_secs(10)));
    }
}
