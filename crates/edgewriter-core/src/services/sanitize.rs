//! Output cleanup.
//!
//! The engine's own stop-sequence handling is not trusted, so every result
//! is trimmed and cut at the first leaked marker.

/// Trim `raw` and truncate it at each marker in turn.
///
/// Markers are applied in the given order: after cutting at one marker the
/// remainder is trimmed again before looking for the next. The result never
/// contains any of `markers` and sanitizing it again is a no-op.
pub fn sanitize_output(raw: &str, markers: &[&str]) -> String {
    let mut text = raw.trim();
    for marker in markers {
        if let Some(idx) = text.find(marker) {
            text = text[..idx].trim();
        }
    }
    text.to_string()
}
