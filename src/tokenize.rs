/// Single-space tokenization shared by the input tracker and the completion
/// bridge. Consecutive spaces produce empty tokens on purpose: the empty
/// placeholder appended by selection commit round-trips through these
/// helpers as a trailing empty token.

pub fn split_terms(text: &str) -> Vec<&str> {
    text.split(' ').collect()
}

/// The in-progress (final) token. Empty for empty input and for input that
/// ends with a delimiter.
pub fn extract_last(text: &str) -> &str {
    text.rsplit(' ').next().unwrap_or_default()
}

/// The token immediately preceding the in-progress one, or "" when fewer
/// than two tokens exist.
pub fn extract_prev(text: &str) -> &str {
    let mut tokens = text.rsplit(' ');
    tokens.next();
    tokens.next().unwrap_or_default()
}
