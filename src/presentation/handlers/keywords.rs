use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AudioNormalizer, RecognitionEngine, RewriteClient, TermRuleSource};
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::identity::Identity;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct KeywordsResponse {
    pub content: String,
}

#[derive(Deserialize)]
pub struct SaveKeywordsRequest {
    pub content: String,
}

#[derive(Serialize)]
pub struct SaveKeywordsResponse {
    pub ok: bool,
}

/// Returns the raw per-user term-replacement source so the frontend can
/// populate its editing panel. An absent file reads as the empty string.
pub async fn get_keywords_handler<N, R, W, S>(
    State(state): State<AppState<N, R, W, S>>,
    Identity(user): Identity,
) -> impl IntoResponse
where
    N: AudioNormalizer + 'static + ?Sized,
    R: RecognitionEngine + 'static + ?Sized,
    W: RewriteClient + 'static + ?Sized,
    S: TermRuleSource + 'static + ?Sized,
{
    match state.rule_source.read_raw(&user).await {
        Ok(content) => (StatusCode::OK, Json(KeywordsResponse { content })).into_response(),
        Err(e) => {
            tracing::error!(user = %user, error = %e, "Failed to read term ruleset");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to read keywords: {}", e),
                }),
            )
                .into_response()
        }
    }
}

pub async fn save_keywords_handler<N, R, W, S>(
    State(state): State<AppState<N, R, W, S>>,
    Identity(user): Identity,
    Json(request): Json<SaveKeywordsRequest>,
) -> impl IntoResponse
where
    N: AudioNormalizer + 'static + ?Sized,
    R: RecognitionEngine + 'static + ?Sized,
    W: RewriteClient + 'static + ?Sized,
    S: TermRuleSource + 'static + ?Sized,
{
    match state.rule_source.write_raw(&user, &request.content).await {
        Ok(()) => {
            tracing::info!(
                user = %user,
                bytes = request.content.len(),
                "Term ruleset saved"
            );
            (StatusCode::OK, Json(SaveKeywordsResponse { ok: true })).into_response()
        }
        Err(e) => {
            tracing::error!(user = %user, error = %e, "Failed to save term ruleset");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to save keywords: {}", e),
                }),
            )
                .into_response()
        }
    }
}
