use async_trait::async_trait;

use crate::domain::{TermRuleset, UserId};

/// Supplies the per-user term ruleset and raw access to its backing
/// source for the editing endpoints.
///
/// `load` is infallible by contract: an absent or unreadable source
/// degrades to the empty ruleset so that a broken keywords file can never
/// fail a transcription. It is called fresh on every pipeline invocation,
/// never cached, so a user's edits take effect immediately.
#[async_trait]
pub trait TermRuleSource: Send + Sync {
    async fn load(&self, user: &UserId) -> TermRuleset;

    /// Raw source contents as the user edits them; empty string when the
    /// source does not exist yet.
    async fn read_raw(&self, user: &UserId) -> Result<String, TermRuleStoreError>;

    async fn write_raw(&self, user: &UserId, contents: &str) -> Result<(), TermRuleStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TermRuleStoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
