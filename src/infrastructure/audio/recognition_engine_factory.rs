use std::str::FromStr;
use std::sync::Arc;

use crate::application::ports::{RecognitionEngine, RecognitionError};

use super::candle_whisper_engine::CandleWhisperEngine;
use super::whisper_cpp_engine::WhisperCppEngine;

/// The closed set of recognition backends. Selected once at startup from
/// configuration; a running process never switches engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionProvider {
    WhisperCpp,
    Candle,
}

impl FromStr for RecognitionProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whisper-cpp" | "whisper_cpp" | "whisper" => Ok(Self::WhisperCpp),
            "candle" => Ok(Self::Candle),
            other => Err(format!(
                "Invalid recognition provider: {}. Expected: whisper-cpp or candle",
                other
            )),
        }
    }
}

/// Backend-dependent tuning, resolved once at startup. Fields not
/// understood by the selected backend are ignored: whisper.cpp consumes
/// `temperature` and `initial_prompt`, the candle engine `batch_size`.
#[derive(Debug, Clone, Default)]
pub struct RecognitionConfig {
    /// ISO language code; `None` means auto-detect.
    pub language: Option<String>,
    pub temperature: f32,
    pub initial_prompt: Option<String>,
    pub batch_size: usize,
}

pub struct RecognitionEngineFactory;

impl RecognitionEngineFactory {
    pub fn create(
        provider: RecognitionProvider,
        model: &str,
        config: RecognitionConfig,
    ) -> Result<Arc<dyn RecognitionEngine>, RecognitionError> {
        match provider {
            RecognitionProvider::WhisperCpp => {
                let engine = WhisperCppEngine::new(
                    model,
                    config.language,
                    config.temperature,
                    config.initial_prompt,
                )?;
                Ok(Arc::new(engine))
            }
            RecognitionProvider::Candle => {
                let engine =
                    CandleWhisperEngine::new(model, config.language.as_deref(), config.batch_size)?;
                Ok(Arc::new(engine))
            }
        }
    }
}
