use async_trait::async_trait;

use crate::domain::PolicyDocument;

/// Rewrites a raw transcript through a remote language model under the
/// fixed editorial policy. One synchronous request/response per call; the
/// remote service's failure is surfaced unmodified, never retried and
/// never redirected to another backend.
#[async_trait]
pub trait RewriteClient: Send + Sync {
    async fn rewrite(&self, text: &str, policy: &PolicyDocument) -> Result<String, RewriteError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
