use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use vocalis::application::services::TranscriptionService;
use vocalis::domain::PolicyDocument;
use vocalis::infrastructure::audio::{FfmpegNormalizer, RecognitionConfig, RecognitionEngineFactory};
use vocalis::infrastructure::llm::RewriteClientFactory;
use vocalis::infrastructure::observability::{TracingConfig, init_tracing};
use vocalis::infrastructure::terms::CsvRuleSource;
use vocalis::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env().context("failed to read configuration")?;

    init_tracing(TracingConfig::default(), settings.server.port);

    let policy = PolicyDocument::from_file(&settings.policy_path).with_context(|| {
        format!(
            "failed to load policy document from {}",
            settings.policy_path.display()
        )
    })?;
    tracing::info!(path = %settings.policy_path.display(), "Policy document loaded");

    let normalizer = Arc::new(FfmpegNormalizer::new(&settings.ffmpeg_path));

    // Model weights load here, once; a failure is fatal to the process.
    let recognition = RecognitionEngineFactory::create(
        settings.recognition.provider,
        &settings.recognition.model,
        RecognitionConfig {
            language: settings.recognition.language.clone(),
            temperature: settings.recognition.temperature,
            initial_prompt: settings.recognition.initial_prompt.clone(),
            batch_size: settings.recognition.batch_size,
        },
    )
    .context("failed to initialize recognition engine")?;

    let rewriter = RewriteClientFactory::create(
        settings.rewrite.provider,
        &settings.rewrite.model,
        settings.rewrite.api_key.clone(),
        settings.rewrite.base_url.clone(),
        settings.rewrite.max_tokens,
    )
    .context("failed to initialize rewrite client")?;

    let rule_source = Arc::new(CsvRuleSource::new(&settings.terms.dir));

    let transcription_service = Arc::new(TranscriptionService::new(
        normalizer,
        recognition,
        rewriter,
        Arc::clone(&rule_source),
        policy,
    ));

    let state = AppState {
        transcription_service,
        rule_source,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
