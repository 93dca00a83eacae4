use async_trait::async_trait;

use crate::domain::NormalizedAudio;

/// Turns normalized audio into raw text. Implementations are long-lived
/// services constructed once at process start (model weights stay in
/// memory) and shared read-only across all invocations; a failed
/// construction is fatal to the process, not recoverable per request.
///
/// The returned transcript is whitespace-trimmed. An empty result means
/// the engine found no speech; the caller decides what that implies.
#[async_trait]
pub trait RecognitionEngine: Send + Sync {
    async fn recognize(&self, audio: &NormalizedAudio) -> Result<String, RecognitionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}
