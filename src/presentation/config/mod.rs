mod settings;

pub use settings::{
    RecognitionSettings, RewriteSettings, ServerSettings, Settings, SettingsError, TermSettings,
};
