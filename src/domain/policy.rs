use std::io;
use std::path::Path;

/// The fixed editorial instructions sent to every rewrite backend as the
/// system-level message. Loaded once at startup and shared read-only by
/// all invocations; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PolicyDocument {
    text: String,
}

impl PolicyDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::new(contents))
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
