mod anthropic_client;
mod gemini_client;
mod rewrite_client_factory;

pub use anthropic_client::AnthropicClient;
pub use gemini_client::GeminiClient;
pub use rewrite_client_factory::{RewriteClientFactory, RewriteClientFactoryError, RewriteProvider};
