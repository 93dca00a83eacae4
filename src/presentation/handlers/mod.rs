mod health;
mod keywords;
mod transcribe;

use serde::Serialize;

pub use health::health_handler;
pub use keywords::{get_keywords_handler, save_keywords_handler};
pub use transcribe::{TranscribeResponse, transcribe_handler};

/// JSON error body shared by every handler.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
