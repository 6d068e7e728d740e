/// Trim `text`, returning `None` if nothing is left.
pub fn normalize_text(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Build a task's tag set: trimmed, empties dropped, exact duplicates dropped,
/// first-given order kept. Falls back to `default_tag` if nothing survives.
pub fn build_tag_set<S: AsRef<str>>(tags: &[S], default_tag: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        if let Some(t) = normalize_text(tag.as_ref()) {
            if !out.iter().any(|existing| existing == t) {
                out.push(t.to_string());
            }
        }
    }
    if out.is_empty() {
        out.push(default_tag.to_string());
    }
    out
}
