const MAX_VISIBLE_CHARS: usize = 100;

/// Shortens transcript text for log lines. Spoken content is user data;
/// logs carry at most a prefix of it.
pub fn sanitize_transcript(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    if trimmed.chars().count() > MAX_VISIBLE_CHARS {
        let prefix: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", prefix, trimmed.chars().count())
    } else {
        trimmed.to_string()
    }
}
