use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use vocalis::application::ports::{
    AudioNormalizer, PreprocessingError, RecognitionEngine, RecognitionError, RewriteClient,
    RewriteError,
};
use vocalis::application::services::TranscriptionService;
use vocalis::domain::{AudioBlob, NormalizedAudio, PolicyDocument};
use vocalis::infrastructure::terms::CsvRuleSource;
use vocalis::presentation::{AppState, USER_ID_HEADER, create_router};

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

struct MockNormalizer {
    fail: bool,
}

#[async_trait]
impl AudioNormalizer for MockNormalizer {
    async fn normalize(&self, _blob: &AudioBlob) -> Result<NormalizedAudio, PreprocessingError> {
        if self.fail {
            Err(PreprocessingError::ToolFailed(
                "ffmpeg exited with exit status: 1: invalid data".to_string(),
            ))
        } else {
            Ok(NormalizedAudio::new(vec![0.0; 16_000]))
        }
    }
}

struct MockEngine {
    transcript: String,
}

#[async_trait]
impl RecognitionEngine for MockEngine {
    async fn recognize(&self, _audio: &NormalizedAudio) -> Result<String, RecognitionError> {
        Ok(self.transcript.clone())
    }
}

struct MockRewriter;

#[async_trait]
impl RewriteClient for MockRewriter {
    async fn rewrite(&self, text: &str, _policy: &PolicyDocument) -> Result<String, RewriteError> {
        Ok(text.to_string())
    }
}

struct TestApp {
    router: Router,
    terms_dir: tempfile::TempDir,
}

fn app(transcript: &str, normalizer_fails: bool) -> TestApp {
    let terms_dir = tempfile::tempdir().unwrap();
    let rule_source = Arc::new(CsvRuleSource::new(terms_dir.path()));

    let transcription_service = Arc::new(TranscriptionService::new(
        Arc::new(MockNormalizer {
            fail: normalizer_fails,
        }),
        Arc::new(MockEngine {
            transcript: transcript.to_string(),
        }),
        Arc::new(MockRewriter),
        Arc::clone(&rule_source),
        PolicyDocument::new("Improve the transcription."),
    ));

    let state = AppState {
        transcription_service,
        rule_source,
    };

    TestApp {
        router: create_router(state),
        terms_dir,
    }
}

fn multipart_audio_body(field_name: &str) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
             filename=\"recording.webm\"\r\nContent-Type: audio/webm\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(&[0x1a, 0x45, 0xdf, 0xa3, 0, 1, 2, 3]);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn transcribe_request(user: Option<&str>, field_name: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/transcribe")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user);
    }
    builder
        .body(Body::from(multipart_audio_body(field_name)))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_running_app_when_health_checked_then_status_is_healthy() {
    let app = app("hello", false);

    let response = app
        .router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn given_no_identity_header_when_transcribing_then_unauthorized() {
    let app = app("hello", false);

    let response = app
        .router
        .oneshot(transcribe_request(None, "audio"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Authentication required");
}

#[tokio::test]
async fn given_traversal_identity_when_transcribing_then_bad_request() {
    let app = app("hello", false);

    let response = app
        .router
        .oneshot(transcribe_request(Some("../evil"), "audio"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid user identifier");
}

#[tokio::test]
async fn given_audio_upload_when_transcribing_then_raw_and_improved_text_returned() {
    let app = app("meeting is at 3pm", false);
    std::fs::write(
        app.terms_dir.path().join("alice_keywords.txt"),
        "3pm,15:00\n",
    )
    .unwrap();

    let response = app
        .router
        .oneshot(transcribe_request(Some("alice"), "audio"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["txt_orig"], "meeting is at 3pm");
    assert_eq!(json["txt_improved"], "meeting is at 15:00");
}

#[tokio::test]
async fn given_upload_without_audio_field_when_transcribing_then_bad_request() {
    let app = app("hello", false);

    let response = app
        .router
        .oneshot(transcribe_request(Some("alice"), "attachment"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No audio file provided");
}

#[tokio::test]
async fn given_silent_recording_when_transcribing_then_no_speech_reported() {
    let app = app("   ", false);

    let response = app
        .router
        .oneshot(transcribe_request(Some("alice"), "audio"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No speech detected in the recording.");
}

#[tokio::test]
async fn given_failing_transcoder_when_transcribing_then_internal_error_with_diagnostics() {
    let app = app("hello", true);

    let response = app
        .router
        .oneshot(transcribe_request(Some("alice"), "audio"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("invalid data"));
}

#[tokio::test]
async fn given_no_saved_keywords_when_fetching_then_content_is_empty() {
    let app = app("hello", false);

    let response = app
        .router
        .oneshot(
            Request::get("/keywords")
                .header(USER_ID_HEADER, "alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["content"], "");
}

#[tokio::test]
async fn given_saved_keywords_when_fetching_then_content_round_trips() {
    let app = app("hello", false);

    let save = app
        .router
        .clone()
        .oneshot(
            Request::post("/keywords")
                .header(USER_ID_HEADER, "alice")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"content":"人工智慧,人工智能\n"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(save.status(), StatusCode::OK);
    let json = body_json(save).await;
    assert_eq!(json["ok"], true);

    let fetch = app
        .router
        .oneshot(
            Request::get("/keywords")
                .header(USER_ID_HEADER, "alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(fetch.status(), StatusCode::OK);
    let json = body_json(fetch).await;
    assert_eq!(json["content"], "人工智慧,人工智能\n");
}
