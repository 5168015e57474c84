// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! AI writing-assistant endpoints.
//!
//! The assistant is optional: without an API key in the environment these
//! endpoints answer 503 rather than failing at startup.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::{ChatMessage, ChatRole};
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatReply {
    pub reply: String,
}

/// Send a prompt to the assistant and record both sides of the exchange.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    security(("bearer" = [])),
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatReply),
        (status = 502, description = "Upstream failure"),
        (status = 503, description = "Assistant not configured"),
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("Message is required"));
    }
    let client = state
        .assistant
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Assistant is not configured"))?;

    {
        let mut store = state.store.write().await;
        store.append_chat(principal.user_id, ChatRole::User, request.message.clone());
    }

    let reply = client.complete(&request.message).await?;

    let mut store = state.store.write().await;
    store.append_chat(principal.user_id, ChatRole::Assistant, reply.clone());
    Ok(Json(ChatReply { reply }))
}

/// The caller's chat history, oldest first.
#[utoipa::path(
    get,
    path = "/api/chat/history",
    tag = "Chat",
    security(("bearer" = [])),
    responses((status = 200, description = "Chat history", body = [ChatMessage]))
)]
pub async fn chat_history(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Json<Vec<ChatMessage>> {
    let store = state.store.read().await;
    Json(store.chat_history(principal.user_id))
}

/// Forget the caller's chat history.
#[utoipa::path(
    delete,
    path = "/api/chat/history",
    tag = "Chat",
    security(("bearer" = [])),
    responses((status = 204, description = "History cleared"))
)]
pub async fn clear_history(State(state): State<AppState>, Auth(principal): Auth) -> StatusCode {
    let mut store = state.store.write().await;
    store.clear_chat(principal.user_id);
    StatusCode::NO_CONTENT
}
