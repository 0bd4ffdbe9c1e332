use crate::core::{ConfigProvider, Endpoint};
use crate::utils::error::{ProxyError, Result};
use crate::utils::json_extract::extract_json_object;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const SYSTEM_PROMPT: &str = r#"You are a high-tech Truth Scanner. Search web. Return JSON only. Schema: {"verdict": "REAL/FAKE", "confidence": "99%", "reasoning": "concise", "sources": [{"title": "X", "url": "Y"}]}"#;

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ReplyMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyMessage {
    pub content: Option<String>,
}

pub struct AnalyzeEndpoint<C: ConfigProvider> {
    config: Arc<C>,
    client: Client,
}

impl<C: ConfigProvider> AnalyzeEndpoint<C> {
    pub fn new(config: Arc<C>, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl<C: ConfigProvider> Endpoint for AnalyzeEndpoint<C> {
    type Input = Option<String>;
    type Raw = String;
    type Output = Value;

    fn name(&self) -> &'static str {
        "analyze"
    }

    async fn extract(&self, text: Option<String>) -> Result<String> {
        let text = text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProxyError::invalid_request("text is required"))?;

        let api_key = self
            .config
            .ai_api_key()
            .ok_or_else(|| ProxyError::MissingConfigError {
                field: "PERPLEXITY_API_KEY".to_string(),
            })?;

        let url = format!(
            "{}/chat/completions",
            self.config.ai_api_url().trim_end_matches('/')
        );
        let request = ChatRequest {
            model: self.config.ai_model(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &text,
                },
            ],
        };

        tracing::debug!("📡 Sending claim ({} chars) to {}", text.len(), url);
        let response: ChatResponse = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProxyError::malformed("completion has no message content"))
    }

    fn transform(&self, reply: String) -> Result<Value> {
        extract_json_object(&reply).ok_or_else(|| ProxyError::malformed("Invalid AI JSON"))
    }
}
