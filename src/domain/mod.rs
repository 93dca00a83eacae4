mod audio;
mod policy;
mod term_rule;
mod transcript;
mod user_id;

pub use audio::{AudioBlob, NormalizedAudio, TARGET_SAMPLE_RATE};
pub use policy::PolicyDocument;
pub use term_rule::{TermRule, TermRuleset};
pub use transcript::TranscriptionResult;
pub use user_id::UserId;
