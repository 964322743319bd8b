//! Markup escaping.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
//!
//! Every piece of text or attribute value placed in a fragment goes through
//! [`escape_into`]. The same set of characters is escaped in both contexts,
//! so a value is safe whichever quote character its attribute uses.

/// Append `text` to `out`, replacing `&`, `<`, `>`, `"` and `'` with
/// character references.
pub fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Escape `text` into a new string.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, &mut out);
    out
}
