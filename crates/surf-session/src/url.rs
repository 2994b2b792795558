//! URL validation and formatting.

use surf_types::error::{Result, SurfError};

/// Longest URL (in bytes) any structure stores.
pub const MAX_URL_LEN: usize = 99;

/// Shortest URL accepted from user input.
const MIN_INPUT_LEN: usize = 3;

/// Longest URL accepted from user input.
const MAX_INPUT_LEN: usize = 98;

/// Punctuation allowed in user-entered URLs besides ASCII alphanumerics.
const ALLOWED_PUNCT: &[char] = &['.', '-', '/', ':', '?', '&', '='];

/// Validate a user-entered URL.
///
/// Accepts 3 to 98 bytes made only of ASCII alphanumerics and
/// `. - / : ? & =`.
pub fn validate_url(url: &str) -> Result<()> {
    if !(MIN_INPUT_LEN..=MAX_INPUT_LEN).contains(&url.len()) {
        return Err(SurfError::InvalidUrl(url.to_string()));
    }
    let ok = url
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || ALLOWED_PUNCT.contains(&c));
    if ok {
        Ok(())
    } else {
        Err(SurfError::InvalidUrl(url.to_string()))
    }
}

/// The form handed to an external browser: `https://` is prefixed unless
/// the URL already names an http(s) scheme.
pub fn external_form(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Truncate `s` to at most `max` bytes without splitting a character.
pub(crate) fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Clamp a URL to [`MAX_URL_LEN`] bytes.
pub(crate) fn clamp_url(url: &str) -> String {
    truncate_bytes(url, MAX_URL_LEN).to_string()
}
