use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioNormalizer, PreprocessingError};
use crate::domain::{AudioBlob, NormalizedAudio};

use super::wav::parse_normalized_wav;

/// Normalizes uploads by shelling out to ffmpeg with fixed target
/// parameters (mono, 16 kHz, signed 16-bit PCM). The source container is
/// untrusted and arbitrary; ffmpeg probes it itself.
pub struct FfmpegNormalizer {
    program: String,
    temp_dir: PathBuf,
}

impl FfmpegNormalizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Places temporary artifacts in `temp_dir` instead of the system
    /// default.
    pub fn with_temp_dir(program: impl Into<String>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            temp_dir: temp_dir.into(),
        }
    }
}

#[async_trait]
impl AudioNormalizer for FfmpegNormalizer {
    async fn normalize(&self, blob: &AudioBlob) -> Result<NormalizedAudio, PreprocessingError> {
        // Both temp files are owned handles removed on drop, so every exit
        // path out of this function releases them.
        let input = tempfile::Builder::new()
            .prefix("vocalis-in-")
            .suffix(blob.file_suffix())
            .tempfile_in(&self.temp_dir)
            .map_err(|e| PreprocessingError::ToolFailed(format!("input temp file: {}", e)))?;
        let output = tempfile::Builder::new()
            .prefix("vocalis-out-")
            .suffix(".wav")
            .tempfile_in(&self.temp_dir)
            .map_err(|e| PreprocessingError::ToolFailed(format!("output temp file: {}", e)))?;

        tokio::fs::write(input.path(), &blob.data)
            .await
            .map_err(|e| PreprocessingError::ToolFailed(format!("write input: {}", e)))?;

        tracing::debug!(
            bytes = blob.data.len(),
            content_type = %blob.content_type,
            "Transcoding upload to 16kHz mono WAV"
        );

        let result = Command::new(&self.program)
            .arg("-y")
            .arg("-i")
            .arg(input.path())
            .args(["-ar", "16000", "-ac", "1", "-sample_fmt", "s16"])
            .arg(output.path())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    PreprocessingError::ToolUnavailable(format!("{}: {}", self.program, e))
                } else {
                    PreprocessingError::ToolFailed(format!("spawn {}: {}", self.program, e))
                }
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(PreprocessingError::ToolFailed(format!(
                "{} exited with {}: {}",
                self.program,
                result.status,
                stderr.trim()
            )));
        }

        let wav_bytes = tokio::fs::read(output.path())
            .await
            .map_err(|e| PreprocessingError::InvalidOutput(format!("read output: {}", e)))?;

        let samples = parse_normalized_wav(&wav_bytes)?;
        Ok(NormalizedAudio::new(samples))
    }
}
