use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{RecognitionEngine, RecognitionError};
use crate::domain::NormalizedAudio;

const MAX_DECODE_TOKENS: usize = 224;

/// Local multilingual whisper engine on candle. Weights are fetched from
/// the Hugging Face hub at construction and held in memory for the life
/// of the process. Decoding holds a mutex on the model, so `batch_size`
/// controls how many 30-second windows are decoded per lock acquisition.
pub struct CandleWhisperEngine {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
    language_token: Option<u32>,
    batch_size: usize,
}

impl CandleWhisperEngine {
    pub fn new(
        model_id: &str,
        language: Option<&str>,
        batch_size: usize,
    ) -> Result<Self, RecognitionError> {
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = model_id,
            language = language.unwrap_or("auto"),
            "Initializing candle whisper engine"
        );

        let api = Api::new().map_err(|e| RecognitionError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| RecognitionError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| RecognitionError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| RecognitionError::ModelLoadFailed(format!("model.safetensors: {}", e)))?;

        let mel_repo = api.repo(Repo::new(
            "FL33TW00D-HF/whisper-base".to_string(),
            RepoType::Model,
        ));
        let mel_bytes_path = mel_repo
            .get("melfilters.bytes")
            .map_err(|e| RecognitionError::ModelLoadFailed(format!("melfilters.bytes: {}", e)))?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| RecognitionError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| RecognitionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| RecognitionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| RecognitionError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = load_mel_filters(&mel_bytes, &config)?;

        // A fixed language pins the decoder to that language's token; with
        // none set the model detects the language per window.
        let language_token = match language {
            Some(lang) => Some(lookup_token(&tokenizer, &format!("<|{}|>", lang)).map_err(
                |_| RecognitionError::ModelLoadFailed(format!("unsupported language: {}", lang)),
            )?),
            None => None,
        };

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| RecognitionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| RecognitionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!("Candle whisper engine loaded successfully");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            mel_filters,
            language_token,
            batch_size: batch_size.max(1),
        })
    }

    fn window_to_mel(&self, window: &[f32]) -> Result<Tensor, RecognitionError> {
        let samples = if window.len() < m::N_SAMPLES {
            let mut padded = window.to_vec();
            padded.resize(m::N_SAMPLES, 0.0);
            padded
        } else {
            window.to_vec()
        };

        let mel_data = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
        let n_mel = self.config.num_mel_bins;
        let n_frames = mel_data.len() / n_mel;

        Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
            .map_err(|e| RecognitionError::InferenceFailed(format!("mel tensor: {}", e)))
    }
}

#[async_trait]
impl RecognitionEngine for CandleWhisperEngine {
    async fn recognize(&self, audio: &NormalizedAudio) -> Result<String, RecognitionError> {
        let mut mel_windows = Vec::new();
        for window in audio.samples().chunks(m::N_SAMPLES) {
            mel_windows.push(self.window_to_mel(window)?);
        }

        let mut segments: Vec<String> = Vec::new();

        for batch in mel_windows.chunks(self.batch_size) {
            let mut model = self.model.lock().await;
            for mel in batch {
                let text = decode_window(
                    &mut model,
                    &self.tokenizer,
                    &self.device,
                    mel,
                    self.language_token,
                )?;
                if !text.is_empty() {
                    segments.push(text);
                }
            }
        }

        let transcript = segments.join(" ");

        tracing::info!(
            windows = segments.len(),
            chars = transcript.len(),
            "Candle whisper transcription completed"
        );

        Ok(transcript.trim().to_string())
    }
}

fn decode_window(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    mel: &Tensor,
    language_token: Option<u32>,
) -> Result<String, RecognitionError> {
    let sot_token = lookup_token(tokenizer, m::SOT_TOKEN)?;
    let transcribe_token = lookup_token(tokenizer, m::TRANSCRIBE_TOKEN)?;
    let no_timestamps_token = lookup_token(tokenizer, m::NO_TIMESTAMPS_TOKEN)?;
    let eot_token = lookup_token(tokenizer, m::EOT_TOKEN)?;

    let audio_features = model
        .encoder
        .forward(mel, true)
        .map_err(|e| RecognitionError::InferenceFailed(format!("encoder: {}", e)))?;

    let mut tokens = vec![sot_token];
    if let Some(lang) = language_token {
        tokens.push(lang);
    }
    tokens.push(transcribe_token);
    tokens.push(no_timestamps_token);
    let prompt_len = tokens.len();

    let mut decoded_text = String::new();

    for _ in 0..MAX_DECODE_TOKENS {
        let token_tensor = Tensor::new(tokens.as_slice(), device)
            .map_err(|e| RecognitionError::InferenceFailed(e.to_string()))?
            .unsqueeze(0)
            .map_err(|e| RecognitionError::InferenceFailed(e.to_string()))?;

        let decoder_output = model
            .decoder
            .forward(&token_tensor, &audio_features, tokens.len() == prompt_len)
            .map_err(|e| RecognitionError::InferenceFailed(format!("decoder: {}", e)))?;

        let logits = model
            .decoder
            .final_linear(
                &decoder_output
                    .squeeze(0)
                    .map_err(|e| RecognitionError::InferenceFailed(e.to_string()))?,
            )
            .map_err(|e| RecognitionError::InferenceFailed(format!("linear: {}", e)))?;

        let seq_len = logits
            .dim(0)
            .map_err(|e| RecognitionError::InferenceFailed(e.to_string()))?;
        let last_logits = logits
            .get(seq_len - 1)
            .map_err(|e| RecognitionError::InferenceFailed(e.to_string()))?;

        let next_token = last_logits
            .argmax(0)
            .map_err(|e| RecognitionError::InferenceFailed(e.to_string()))?
            .to_scalar::<u32>()
            .map_err(|e| RecognitionError::InferenceFailed(e.to_string()))?;

        if next_token == eot_token {
            break;
        }

        tokens.push(next_token);

        if let Some(text) = tokenizer.id_to_token(next_token) {
            let text = text.replace("Ġ", " ").replace("▁", " ");
            decoded_text.push_str(&text);
        }
    }

    model.reset_kv_cache();

    Ok(decoded_text.trim().to_string())
}

fn lookup_token(tokenizer: &Tokenizer, token: &str) -> Result<u32, RecognitionError> {
    tokenizer
        .token_to_id(token)
        .ok_or_else(|| RecognitionError::InferenceFailed(format!("token not found: {}", token)))
}

fn load_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, RecognitionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(RecognitionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    let filters: Vec<f32> = bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(filters)
}
