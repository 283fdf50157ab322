use crate::thread::CommentThread;

pub const DEFAULT_PLACEHOLDER_LABEL: &str = "Start discussion";

/// Explicit label wins, then the placeholder for an empty thread. `None` means
/// the title should be left as it is.
pub fn resolve_label(thread: &CommentThread, placeholder: &str) -> Option<String> {
    if let Some(label) = thread.label().filter(|label| !label.is_empty()) {
        return Some(label);
    }

    if !thread.has_comments() {
        return Some(placeholder.to_string());
    }

    None
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
