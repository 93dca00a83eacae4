/// Sample rate every recognition backend expects.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// An uploaded recording exactly as received: opaque bytes plus the
/// container hint the client declared. Owned by a single pipeline
/// invocation and dropped once normalization has run.
#[derive(Debug, Clone)]
pub struct AudioBlob {
    pub data: Vec<u8>,
    pub content_type: String,
}

impl AudioBlob {
    pub fn new(data: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            data,
            content_type: content_type.into(),
        }
    }

    /// File suffix for the temporary copy handed to the transcoder. The
    /// transcoder probes the actual container, so this is a hint only.
    pub fn file_suffix(&self) -> &'static str {
        let mime = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        match mime {
            "audio/webm" | "video/webm" => ".webm",
            "audio/ogg" | "application/ogg" => ".ogg",
            "audio/mpeg" | "audio/mp3" => ".mp3",
            "audio/wav" | "audio/x-wav" | "audio/wave" => ".wav",
            "audio/mp4" | "audio/x-m4a" | "audio/aac" => ".m4a",
            "audio/flac" | "audio/x-flac" => ".flac",
            _ => ".bin",
        }
    }
}

/// Mono 16 kHz PCM decoded to f32 samples, the one format recognition
/// engines accept. Exists only as an intermediate artifact of one
/// invocation and is never persisted.
#[derive(Debug, Clone)]
pub struct NormalizedAudio {
    samples: Vec<f32>,
}

impl NormalizedAudio {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / TARGET_SAMPLE_RATE as f32
    }
}
