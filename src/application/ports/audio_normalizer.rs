use async_trait::async_trait;

use crate::domain::{AudioBlob, NormalizedAudio};

/// Converts an arbitrary uploaded container into the fixed mono 16 kHz
/// 16-bit PCM format the recognition engines require. Any temporary
/// artifacts the implementation creates must be released on every exit
/// path, success or failure.
#[async_trait]
pub trait AudioNormalizer: Send + Sync {
    async fn normalize(&self, blob: &AudioBlob) -> Result<NormalizedAudio, PreprocessingError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PreprocessingError {
    #[error("transcoder unavailable: {0}")]
    ToolUnavailable(String),
    #[error("transcoding failed: {0}")]
    ToolFailed(String),
    #[error("invalid transcoder output: {0}")]
    InvalidOutput(String),
}
