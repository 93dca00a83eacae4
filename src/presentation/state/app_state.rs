use std::sync::Arc;

use crate::application::ports::{AudioNormalizer, RecognitionEngine, RewriteClient, TermRuleSource};
use crate::application::services::TranscriptionService;

pub struct AppState<N, R, W, S>
where
    N: AudioNormalizer + ?Sized,
    R: RecognitionEngine + ?Sized,
    W: RewriteClient + ?Sized,
    S: TermRuleSource + ?Sized,
{
    pub transcription_service: Arc<TranscriptionService<N, R, W, S>>,
    pub rule_source: Arc<S>,
}

impl<N, R, W, S> Clone for AppState<N, R, W, S>
where
    N: AudioNormalizer + ?Sized,
    R: RecognitionEngine + ?Sized,
    W: RewriteClient + ?Sized,
    S: TermRuleSource + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            transcription_service: Arc::clone(&self.transcription_service),
            rule_source: Arc::clone(&self.rule_source),
        }
    }
}
