//! String helpers for diagnostics and source text.

/// Cut `message` at the first occurrence of `marker` and trim the remainder.
///
/// Parser diagnostics append a verbose dump after a marker; callers only
/// ever surface the part before it. A message without the marker is
/// returned trimmed.
pub fn truncate_at_marker(message: &str, marker: &str) -> String {
    if marker.is_empty() {
        return message.trim().to_string();
    }
    match message.find(marker) {
        Some(idx) => message[..idx].trim().to_string(),
        None => message.trim().to_string(),
    }
}

/// Count the `\n`-delimited segments of `text`.
///
/// Trailing empty segments are not counted, and text without any newline
/// is a single segment (even when empty). Blank and comment lines in the
/// middle of the text are counted like any other line.
pub fn count_line_segments(text: &str) -> usize {
    if !text.contains('\n') {
        return 1;
    }
    let segments: Vec<&str> = text.split('\n').collect();
    let trailing_empty = segments.iter().rev().take_while(|s| s.is_empty()).count();
    segments.len() - trailing_empty
}
