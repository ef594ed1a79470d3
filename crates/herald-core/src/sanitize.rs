//! Text sanitization for Telegram's HTML parse mode.
//!
//! Telegram rejects a whole message when it contains a stray `<` or an
//! unknown entity, so every user-supplied value goes through [`escape_html`]
//! before it is placed inside the HTML template.

use std::borrow::Cow;

/// Marker appended to text that was cut short.
pub const ELLIPSIS: &str = "…";

/// Escape the characters that carry meaning in Telegram HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Cap `input` at `max` characters, appending [`ELLIPSIS`] when it was longer.
///
/// Counts Unicode scalar values, never bytes, so multi-byte content
/// (accents, emoji) is never split mid-character.
pub fn truncate_chars(input: &str, max: usize) -> Cow<'_, str> {
    match input.char_indices().nth(max) {
        None => Cow::Borrowed(input),
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &input[..cut])),
    }
}
