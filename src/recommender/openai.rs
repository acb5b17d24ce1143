//! OpenAI互換 chat/completions クライアント
//!
//! テキスト+画像（data URI）を1メッセージで送り、JSONモードで応答させる

use super::InferenceBackend;
use crate::config::Config;
use crate::error::{AuraError, Result};
use aura_threads_common::ImagePayload;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// APIリクエスト
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    response_format: ResponseFormat,
    stream: bool,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// APIレスポンス
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// 資格情報を持つクライアント
///
/// 起動時に1回だけ組み立て、以降は読み取り専用で各操作に渡す
#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, model: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(http, api_key, base_url, model))
    }

    pub fn with_http_client(http: Client, api_key: String, base_url: String, model: String) -> Self {
        Self {
            http,
            api_key,
            base_url,
            model,
        }
    }

    pub fn from_config(config: &Config, api_key: String) -> Result<Self> {
        Self::new(
            api_key,
            config.api_base_url.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl InferenceBackend for OpenAiClient {
    async fn complete(&self, prompt: &str, image: &ImagePayload) -> Result<Option<String>> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.to_data_uri(),
                        },
                    },
                ],
            }],
            response_format: ResponseFormat { kind: "json_object" },
            stream: false,
        };

        let url = self.endpoint();
        tracing::debug!(%url, model = %self.model, "sending chat completion request");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(AuraError::ApiStatus {
                status,
                body: truncate_body(&body, 512),
            });
        }

        let body: ChatResponse = resp
            .json()
            .await
            .map_err(|e| AuraError::ApiCall(format!("unexpected response body: {}", e)))?;

        Ok(body.choices.into_iter().next().and_then(|c| c.message.content))
    }
}

fn truncate_body(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        body.to_string()
    } else {
        let head: String = body.chars().take(max_chars).collect();
        format!("{}…", head)
    }
}
