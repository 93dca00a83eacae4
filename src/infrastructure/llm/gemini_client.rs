use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{RewriteClient, RewriteError};
use crate::domain::PolicyDocument;

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string()),
            model,
        }
    }
}

#[async_trait]
impl RewriteClient for GeminiClient {
    async fn rewrite(&self, text: &str, policy: &PolicyDocument) -> Result<String, RewriteError> {
        let request_body = GenerateContentRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: policy.text(),
                }],
            },
            contents: vec![Content {
                parts: vec![Part { text }],
            }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        tracing::debug!(model = %self.model, chars = text.len(), "Sending transcript to Gemini");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
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

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| RewriteError::InvalidResponse(format!("parse response: {}", e)))?;

        let improved = result
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RewriteError::InvalidResponse("no candidate text".to_string()))?;

        tracing::info!(chars = improved.len(), "Gemini rewrite completed");

        Ok(improved.trim().to_string())
    }
}
