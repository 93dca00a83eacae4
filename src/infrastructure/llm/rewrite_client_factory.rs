use std::str::FromStr;
use std::sync::Arc;

use crate::application::ports::RewriteClient;

use super::anthropic_client::AnthropicClient;
use super::gemini_client::GeminiClient;

/// The closed set of rewrite backends. Selected once at startup; a single
/// invocation uses exactly one backend for its lifetime, with no fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteProvider {
    Claude,
    Gemini,
}

impl FromStr for RewriteProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "claude" | "anthropic" => Ok(Self::Claude),
            "gemini" => Ok(Self::Gemini),
            other => Err(format!(
                "Invalid rewrite provider: {}. Expected: claude or gemini",
                other
            )),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RewriteClientFactoryError {
    #[error("API key required for {0}")]
    MissingApiKey(&'static str),
}

pub struct RewriteClientFactory;

impl RewriteClientFactory {
    pub fn create(
        provider: RewriteProvider,
        model: &str,
        api_key: Option<String>,
        base_url: Option<String>,
        max_tokens: usize,
    ) -> Result<Arc<dyn RewriteClient>, RewriteClientFactoryError> {
        match provider {
            RewriteProvider::Claude => {
                let key = api_key.ok_or(RewriteClientFactoryError::MissingApiKey("Claude"))?;
                Ok(Arc::new(AnthropicClient::new(
                    key,
                    model.to_string(),
                    base_url,
                    max_tokens,
                )))
            }
            RewriteProvider::Gemini => {
                let key = api_key.ok_or(RewriteClientFactoryError::MissingApiKey("Gemini"))?;
                Ok(Arc::new(GeminiClient::new(key, model.to_string(), base_url)))
            }
        }
    }
}
