/// One literal find/replace pair. No pattern syntax: `pattern` matches
/// exact substrings only, case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRule {
    pattern: String,
    replacement: String,
}

impl TermRule {
    /// Returns `None` for an empty pattern. Replacing the empty string
    /// would match every position in the text, so such rules are refused
    /// before they can reach the substitution step.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Option<Self> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return None;
        }
        Some(Self {
            pattern,
            replacement: replacement.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// A user's ordered substitution rules, applied after rewriting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermRuleset {
    rules: Vec<TermRule>,
}

impl TermRuleset {
    pub fn new(rules: Vec<TermRule>) -> Self {
        Self { rules }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn rules(&self) -> &[TermRule] {
        &self.rules
    }

    /// Applies every rule in stored order. Each rule rewrites the output
    /// of the previous one, so a later rule may match text an earlier rule
    /// introduced, and repeated application is not idempotent.
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for rule in &self.rules {
            result = result.replace(&rule.pattern, &rule.replacement);
        }
        result
    }
}
