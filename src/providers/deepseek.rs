// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Client for a DeepSeek-compatible chat-completions API.
//!
//! One blocking call per request, no retry and no streaming. A failing
//! upstream surfaces as 502 to the caller; the raw upstream error is logged
//! server-side only.

use serde::Deserialize;

use crate::config::AssistantSettings;
use crate::error::ApiError;

/// System message sent ahead of every user prompt.
const SYSTEM_PROMPT: &str = "You are a professional writing assistant. You help users improve \
     the quality of their articles, offer writing advice, and answer questions about writing.";

const MODEL: &str = "deepseek-chat";

pub struct DeepSeekClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl DeepSeekClient {
    pub fn new(settings: &AssistantSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        }
    }

    /// Forward a prompt to the upstream model and return the reply text.
    pub async fn complete(&self, prompt: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({
            "model": MODEL,
            "temperature": 0.7,
            "max_tokens": 2000,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "chat upstream request failed");
                ApiError::bad_gateway("Assistant is currently unavailable")
            })?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "chat upstream returned an error");
            return Err(ApiError::bad_gateway("Assistant is currently unavailable"));
        }

        let completion: ChatCompletion = response.json().await.map_err(|err| {
            tracing::error!(error = %err, "chat upstream returned an unreadable body");
            ApiError::bad_gateway("Assistant returned an unreadable response")
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ApiError::bad_gateway("Assistant returned no reply"))
    }
}
