//! HTML escaping for untrusted message text and configured attribute values.

use std::borrow::Cow;

/// Escape characters with meaning in HTML.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with entities. None of the entities
/// contain a bullet, a `<digits>.` marker, `*`, `[` or a leading `#`, so escaped
/// text never triggers a rewrite stage on its own.
///
/// Borrows the input when nothing needs escaping.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(ch),
        }
    }
    Cow::Owned(result)
}

/// Escape a value placed inside a double-quoted attribute.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape_html(value)
}
