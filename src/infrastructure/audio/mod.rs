pub mod wav;

mod candle_whisper_engine;
mod ffmpeg_normalizer;
mod recognition_engine_factory;
mod whisper_cpp_engine;

pub use candle_whisper_engine::CandleWhisperEngine;
pub use ffmpeg_normalizer::FfmpegNormalizer;
pub use recognition_engine_factory::{
    RecognitionConfig, RecognitionEngineFactory, RecognitionProvider,
};
pub use whisper_cpp_engine::WhisperCppEngine;
