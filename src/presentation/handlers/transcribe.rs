use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{AudioNormalizer, RecognitionEngine, RewriteClient, TermRuleSource};
use crate::application::services::{PipelineError, TranscriptionOutcome};
use crate::domain::AudioBlob;
use crate::infrastructure::observability::sanitize_transcript;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::identity::Identity;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub txt_orig: String,
    pub txt_improved: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<N, R, W, S>(
    State(state): State<AppState<N, R, W, S>>,
    Identity(user): Identity,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    N: AudioNormalizer + 'static + ?Sized,
    R: RecognitionEngine + 'static + ?Sized,
    W: RewriteClient + 'static + ?Sized,
    S: TermRuleSource + 'static + ?Sized,
{
    let mut audio: Option<AudioBlob> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("audio") {
                    continue;
                }
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                match field.bytes().await {
                    Ok(data) => {
                        audio = Some(AudioBlob::new(data.to_vec(), content_type));
                        break;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read audio field");
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse {
                                error: format!("Failed to read audio field: {}", e),
                            }),
                        )
                            .into_response();
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        }
    }

    let Some(blob) = audio else {
        tracing::warn!("Transcribe request with no audio field");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No audio file provided".to_string(),
            }),
        )
            .into_response();
    };

    tracing::debug!(
        bytes = blob.data.len(),
        content_type = %blob.content_type,
        "Audio upload received"
    );

    match state.transcription_service.run(blob, &user).await {
        Ok(TranscriptionOutcome::Completed(result)) => {
            tracing::debug!(
                raw = %sanitize_transcript(&result.raw),
                "Returning transcription"
            );
            (
                StatusCode::OK,
                Json(TranscribeResponse {
                    txt_orig: result.raw,
                    txt_improved: result.improved,
                }),
            )
                .into_response()
        }
        Ok(TranscriptionOutcome::NoSpeech) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No speech detected in the recording.".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            let status = match &e {
                PipelineError::Preprocessing(_) | PipelineError::Recognition(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                PipelineError::Rewrite(_) => StatusCode::BAD_GATEWAY,
            };
            tracing::error!(error = %e, "Transcription pipeline failed");
            (status, Json(ErrorResponse { error: e.to_string() })).into_response()
        }
    }
}
