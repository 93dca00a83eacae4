use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::ports::{TermRuleSource, TermRuleStoreError};
use crate::domain::{TermRule, TermRuleset, UserId};

/// Parses a two-column `pattern,replacement` source into an ordered
/// ruleset. Rows with fewer than two columns are discarded silently;
/// columns past the second are ignored; rows with an empty pattern are
/// skipped with a warning since they must never reach the substitution
/// step.
pub fn parse_ruleset(contents: &str) -> TermRuleset {
    let mut rules = Vec::new();
    for line in contents.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut columns = line.split(',');
        let (Some(pattern), Some(replacement)) = (columns.next(), columns.next()) else {
            continue;
        };
        match TermRule::new(pattern, replacement) {
            Some(rule) => rules.push(rule),
            None => tracing::warn!(row = line, "Skipping term rule with empty pattern"),
        }
    }
    TermRuleset::new(rules)
}

/// Per-user term rulesets stored as `<dir>/<user>_keywords.txt` files.
pub struct CsvRuleSource {
    dir: PathBuf,
}

impl CsvRuleSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn user_file(&self, user: &UserId) -> PathBuf {
        self.dir.join(format!("{}_keywords.txt", user.as_str()))
    }
}

#[async_trait]
impl TermRuleSource for CsvRuleSource {
    async fn load(&self, user: &UserId) -> TermRuleset {
        let path = self.user_file(user);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => parse_ruleset(&contents),
            Err(e) => {
                // Absent or unreadable rulesets degrade to "no
                // substitutions" rather than failing the pipeline.
                tracing::debug!(path = %path.display(), error = %e, "No term ruleset loaded");
                TermRuleset::empty()
            }
        }
    }

    async fn read_raw(&self, user: &UserId) -> Result<String, TermRuleStoreError> {
        let path = self.user_file(user);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_raw(&self, user: &UserId, contents: &str) -> Result<(), TermRuleStoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.user_file(user), contents).await?;
        Ok(())
    }
}
