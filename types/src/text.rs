/// Maximum length of a derived chat title, in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Derive a chat title from the first message of a new conversation.
///
/// The title is the trimmed text truncated to [`TITLE_MAX_CHARS`] characters.
/// Truncation counts characters, not bytes, so multi-byte text never splits.
#[must_use]
pub fn derive_title(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(TITLE_MAX_CHARS) {
        Some((idx, _)) => trimmed[..idx].to_owned(),
        None => trimmed.to_owned(),
    }
}
