use std::io::Cursor;

use hound::{SampleFormat, WavReader};

use crate::application::ports::PreprocessingError;
use crate::domain::TARGET_SAMPLE_RATE;

/// Reads the transcoder's output WAV, checks it really carries the format
/// the engines expect, and converts the samples to f32 in [-1.0, 1.0].
pub fn parse_normalized_wav(bytes: &[u8]) -> Result<Vec<f32>, PreprocessingError> {
    let reader = WavReader::new(Cursor::new(bytes))
        .map_err(|e| PreprocessingError::InvalidOutput(format!("wav header: {}", e)))?;

    let spec = reader.spec();
    if spec.channels != 1
        || spec.sample_rate != TARGET_SAMPLE_RATE
        || spec.bits_per_sample != 16
        || spec.sample_format != SampleFormat::Int
    {
        return Err(PreprocessingError::InvalidOutput(format!(
            "expected mono 16kHz s16 WAV, got {} channel(s) at {} Hz, {} bit",
            spec.channels, spec.sample_rate, spec.bits_per_sample
        )));
    }

    reader
        .into_samples::<i16>()
        .map(|s| s.map(|v| v as f32 / 32768.0))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PreprocessingError::InvalidOutput(format!("wav samples: {}", e)))
}
