use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ChatMessage, ChatModel};
use crate::consts::DEFAULT_MODEL;

const API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// A chat model served by the OpenRouter chat-completions API.
pub struct OpenRouterChat {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenRouterChat {
    pub fn new(api_key: String, model: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build OpenRouter HTTP client")?;
        Ok(Self {
            client,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Pull the completion text out of a decoded response.
    fn extract_text(resp: ApiResponse) -> Result<String> {
        let text = resp
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            bail!("OpenRouter API returned empty completion");
        }
        Ok(text)
    }
}

#[async_trait]
impl ChatModel for OpenRouterChat {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = ApiRequest {
            model: &self.model,
            messages,
        };

        let resp = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            bail!("OpenRouter API error ({}): {}", status, text);
        }

        let api_resp: ApiResponse = resp.json().await?;

        if let Some(usage) = &api_resp.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion usage"
            );
        }

        Self::extract_text(api_resp)
    }
}

// --- API types ---

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}
