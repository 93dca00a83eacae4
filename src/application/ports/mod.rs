mod audio_normalizer;
mod recognition_engine;
mod rewrite_client;
mod term_rule_source;

pub use audio_normalizer::{AudioNormalizer, PreprocessingError};
pub use recognition_engine::{RecognitionEngine, RecognitionError};
pub use rewrite_client::{RewriteClient, RewriteError};
pub use term_rule_source::{TermRuleSource, TermRuleStoreError};
