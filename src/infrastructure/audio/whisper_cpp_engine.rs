use async_trait::async_trait;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::application::ports::{RecognitionEngine, RecognitionError};
use crate::domain::NormalizedAudio;

/// Local whisper.cpp batch engine. The model is loaded once at
/// construction and kept in memory for the life of the process; each call
/// creates its own inference state, so concurrent invocations do not
/// contend on a lock.
pub struct WhisperCppEngine {
    ctx: WhisperContext,
    language: Option<String>,
    temperature: f32,
    initial_prompt: Option<String>,
    n_threads: i32,
}

impl WhisperCppEngine {
    pub fn new(
        model_path: &str,
        language: Option<String>,
        temperature: f32,
        initial_prompt: Option<String>,
    ) -> Result<Self, RecognitionError> {
        tracing::info!(model = model_path, "Loading whisper.cpp model");

        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .map_err(|e| RecognitionError::ModelLoadFailed(format!("{}: {}", model_path, e)))?;

        let n_threads = std::thread::available_parallelism()
            .map(|p| p.get() as i32)
            .unwrap_or(4);

        tracing::info!(
            threads = n_threads,
            language = language.as_deref().unwrap_or("auto"),
            "whisper.cpp model loaded"
        );

        Ok(Self {
            ctx,
            language,
            temperature,
            initial_prompt,
            n_threads,
        })
    }
}

#[async_trait]
impl RecognitionEngine for WhisperCppEngine {
    async fn recognize(&self, audio: &NormalizedAudio) -> Result<String, RecognitionError> {
        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_n_threads(self.n_threads);
        params.set_temperature(self.temperature);
        match &self.language {
            Some(lang) => params.set_language(Some(lang)),
            None => params.set_language(Some("auto")),
        }
        if let Some(prompt) = &self.initial_prompt {
            params.set_initial_prompt(prompt);
        }
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_print_special(false);

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| RecognitionError::InferenceFailed(format!("create state: {}", e)))?;

        state
            .full(params, audio.samples())
            .map_err(|e| RecognitionError::InferenceFailed(format!("inference: {}", e)))?;

        let num_segments = state
            .full_n_segments()
            .map_err(|e| RecognitionError::InferenceFailed(format!("segment count: {}", e)))?;

        let mut text = String::new();
        for i in 0..num_segments {
            let segment = state
                .full_get_segment_text(i)
                .map_err(|e| RecognitionError::InferenceFailed(format!("segment {}: {}", i, e)))?;
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(segment);
        }

        tracing::info!(
            segments = num_segments,
            chars = text.len(),
            "whisper.cpp transcription completed"
        );

        Ok(text.trim().to_string())
    }
}
