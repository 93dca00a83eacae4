pub mod config;
pub mod handlers;
pub mod identity;
pub mod router;
pub mod state;

pub use config::{
    RecognitionSettings, RewriteSettings, ServerSettings, Settings, SettingsError, TermSettings,
};
pub use identity::{Identity, USER_ID_HEADER};
pub use router::create_router;
pub use state::AppState;
