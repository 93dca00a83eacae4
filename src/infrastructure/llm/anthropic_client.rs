use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{RewriteClient, RewriteError};
use crate::domain::PolicyDocument;

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: usize,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: usize,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicClient {
    pub fn new(api_key: String, model: String, base_url: Option<String>, max_tokens: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.anthropic.com".to_string()),
            model,
            max_tokens,
        }
    }
}

#[async_trait]
impl RewriteClient for AnthropicClient {
    async fn rewrite(&self, text: &str, policy: &PolicyDocument) -> Result<String, RewriteError> {
        let request_body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: policy.text(),
            messages: vec![Message {
                role: "user",
                content: text,
            }],
        };

        tracing::debug!(model = %self.model, chars = text.len(), "Sending transcript to Claude");

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| RewriteError::ApiRequestFailed(format!("request: {}", e)))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RewriteError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RewriteError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: MessagesResponse = response
            .json()
            .await
            .map_err(|e| RewriteError::InvalidResponse(format!("parse response: {}", e)))?;

        let improved = result
            .content
            .iter()
            .find_map(|block| block.text.as_deref())
            .ok_or_else(|| RewriteError::InvalidResponse("no text block in response".to_string()))?;

        tracing::info!(chars = improved.len(), "Claude rewrite completed");

        Ok(improved.trim().to_string())
    }
}
