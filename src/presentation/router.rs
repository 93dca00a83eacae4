use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{AudioNormalizer, RecognitionEngine, RewriteClient, TermRuleSource};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    get_keywords_handler, health_handler, save_keywords_handler, transcribe_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<N, R, W, S>(state: AppState<N, R, W, S>) -> Router
where
    N: AudioNormalizer + 'static + ?Sized,
    R: RecognitionEngine + 'static + ?Sized,
    W: RewriteClient + 'static + ?Sized,
    S: TermRuleSource + 'static + ?Sized,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/transcribe", post(transcribe_handler::<N, R, W, S>))
        .route(
            "/keywords",
            get(get_keywords_handler::<N, R, W, S>).post(save_keywords_handler::<N, R, W, S>),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
