mod init_tracing;
mod request_id;
mod tracing_config;
mod transcript_sanitizer;

pub use init_tracing::init_tracing;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use tracing_config::TracingConfig;
pub use transcript_sanitizer::sanitize_transcript;
