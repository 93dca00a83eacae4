use std::sync::Arc;

use crate::application::ports::{
    AudioNormalizer, PreprocessingError, RecognitionEngine, RecognitionError, RewriteClient,
    RewriteError, TermRuleSource,
};
use crate::domain::{AudioBlob, PolicyDocument, TranscriptionResult, UserId};

/// Orchestrates one transcription invocation:
/// normalize -> recognize -> rewrite -> substitute terms.
///
/// Normalization and recognition run to completion before any rewrite
/// call is attempted, so an empty transcript never costs a remote call.
/// There are no internal retries; any stage failure terminates the
/// invocation and callers may retry the whole pipeline.
pub struct TranscriptionService<N, R, W, S>
where
    N: AudioNormalizer + ?Sized,
    R: RecognitionEngine + ?Sized,
    W: RewriteClient + ?Sized,
    S: TermRuleSource + ?Sized,
{
    normalizer: Arc<N>,
    recognition: Arc<R>,
    rewriter: Arc<W>,
    rule_source: Arc<S>,
    policy: PolicyDocument,
}

impl<N, R, W, S> TranscriptionService<N, R, W, S>
where
    N: AudioNormalizer + ?Sized,
    R: RecognitionEngine + ?Sized,
    W: RewriteClient + ?Sized,
    S: TermRuleSource + ?Sized,
{
    pub fn new(
        normalizer: Arc<N>,
        recognition: Arc<R>,
        rewriter: Arc<W>,
        rule_source: Arc<S>,
        policy: PolicyDocument,
    ) -> Self {
        Self {
            normalizer,
            recognition,
            rewriter,
            rule_source,
            policy,
        }
    }

    pub async fn run(
        &self,
        blob: AudioBlob,
        user: &UserId,
    ) -> Result<TranscriptionOutcome, PipelineError> {
        let audio = self.normalizer.normalize(&blob).await?;
        drop(blob);

        tracing::debug!(
            duration_secs = audio.duration_secs(),
            "Audio normalized to 16kHz mono PCM"
        );

        let raw = self.recognition.recognize(&audio).await?.trim().to_string();
        if raw.is_empty() {
            tracing::info!(user = %user, "No speech detected in recording");
            return Ok(TranscriptionOutcome::NoSpeech);
        }

        let improved = self.rewriter.rewrite(&raw, &self.policy).await?;

        // Loaded fresh every invocation so edits take effect immediately,
        // and applied to the rewritten text only, never the raw transcript.
        let ruleset = self.rule_source.load(user).await;
        let improved = ruleset.apply(&improved);

        tracing::info!(
            user = %user,
            raw_chars = raw.len(),
            improved_chars = improved.len(),
            rules = ruleset.len(),
            "Transcription pipeline completed"
        );

        Ok(TranscriptionOutcome::Completed(TranscriptionResult {
            raw,
            improved,
        }))
    }
}

/// Success-shaped pipeline outcomes. `NoSpeech` is a normal, user-visible
/// terminal, not an error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionOutcome {
    Completed(TranscriptionResult),
    NoSpeech,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("audio preprocessing failed: {0}")]
    Preprocessing(#[from] PreprocessingError),
    #[error("recognition failed: {0}")]
    Recognition(#[from] RecognitionError),
    #[error("rewrite failed: {0}")]
    Rewrite(#[from] RewriteError),
}
