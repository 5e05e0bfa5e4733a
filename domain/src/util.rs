//! Shared utility functions.

/// Shorten `s` for log output.
///
/// Keeps at most `max_chars` characters and appends `…` when anything was
/// cut. Newlines are flattened so a preview always fits on one log line.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat = s.replace(['\n', '\r'], " ");
    match flat.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}…", &flat[..end]),
        None => flat,
    }
}
