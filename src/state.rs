// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::RoutePolicy;
use crate::config::AuthSettings;
use crate::providers::DeepSeekClient;
use crate::store::BlogStore;

/// Shared application state, cloned into every handler.
///
/// The route policy is built once and immutable; the store is the only
/// mutable piece and sits behind a single RwLock.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<BlogStore>>,
    pub auth: Arc<AuthSettings>,
    pub policy: Arc<RoutePolicy>,
    /// Upstream AI chat client; `None` when no API key is configured.
    pub assistant: Option<Arc<DeepSeekClient>>,
}

impl AppState {
    pub fn new(store: BlogStore, auth: AuthSettings) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            auth: Arc::new(auth),
            policy: Arc::new(RoutePolicy::default()),
            assistant: None,
        }
    }

    pub fn with_assistant(mut self, client: DeepSeekClient) -> Self {
        self.assistant = Some(Arc::new(client));
        self
    }
}
