use std::path::PathBuf;

use crate::infrastructure::audio::RecognitionProvider;
use crate::infrastructure::llm::RewriteProvider;

/// Process configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub recognition: RecognitionSettings,
    pub rewrite: RewriteSettings,
    pub terms: TermSettings,
    pub policy_path: PathBuf,
    pub ffmpeg_path: String,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct RecognitionSettings {
    pub provider: RecognitionProvider,
    /// Path to a ggml model file (whisper-cpp) or a Hugging Face model id
    /// (candle), depending on the provider.
    pub model: String,
    /// ISO language code; `None` means auto-detect.
    pub language: Option<String>,
    pub temperature: f32,
    pub initial_prompt: Option<String>,
    pub batch_size: usize,
}

#[derive(Debug, Clone)]
pub struct RewriteSettings {
    pub provider: RewriteProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: usize,
}

#[derive(Debug, Clone)]
pub struct TermSettings {
    pub dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let recognition_provider: RecognitionProvider =
            parse_var("RECOGNITION_PROVIDER", "whisper-cpp")?;
        let rewrite_provider: RewriteProvider = parse_var("REWRITE_PROVIDER", "claude")?;

        let recognition_model = match recognition_provider {
            RecognitionProvider::WhisperCpp => {
                env_or("WHISPER_MODEL", "models/ggml-base.bin")
            }
            RecognitionProvider::Candle => {
                env_or("CANDLE_WHISPER_MODEL", "openai/whisper-base")
            }
        };

        let (rewrite_model, api_key) = match rewrite_provider {
            RewriteProvider::Claude => (
                env_or("CLAUDE_MODEL", "claude-sonnet-4-5-20250929"),
                std::env::var("ANTHROPIC_API_KEY").ok(),
            ),
            RewriteProvider::Gemini => (
                env_or("GEMINI_MODEL", "gemini-2.0-flash"),
                std::env::var("GEMINI_API_KEY").ok(),
            ),
        };

        Ok(Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: parse_var("SERVER_PORT", "5000")?,
            },
            recognition: RecognitionSettings {
                provider: recognition_provider,
                model: recognition_model,
                language: non_empty(std::env::var("RECOGNITION_LANG").ok()),
                temperature: parse_var("RECOGNITION_TEMPERATURE", "0")?,
                initial_prompt: non_empty(std::env::var("RECOGNITION_PROMPT").ok()),
                batch_size: parse_var("RECOGNITION_BATCH_SIZE", "1")?,
            },
            rewrite: RewriteSettings {
                provider: rewrite_provider,
                model: rewrite_model,
                api_key,
                base_url: non_empty(std::env::var("REWRITE_BASE_URL").ok()),
                max_tokens: parse_var("REWRITE_MAX_TOKENS", "4096")?,
            },
            terms: TermSettings {
                dir: PathBuf::from(env_or("USER_TERM_DIR", "user_term")),
            },
            policy_path: PathBuf::from(env_or("SYSTEM_PROMPT_FILE", "prompts/default.txt")),
            ffmpeg_path: env_or("FFMPEG_PATH", "ffmpeg"),
        })
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_var<T>(var: &'static str, default: &str) -> Result<T, SettingsError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env_or(var, default);
    raw.parse().map_err(|e: T::Err| SettingsError::Invalid {
        var,
        message: format!("{}: {}", raw, e),
    })
}
