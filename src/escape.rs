// src/escape.rs
//
// Attribute value escaping.
//
// Input values arrive decoded, so escaping them again is what normalizes
// source spellings: `&amp;&#38;` decodes to `&&` and comes back out as
// `&amp;&amp;`.

use std::borrow::Cow;

#[inline]
fn needs_escape(b: u8) -> bool {
    matches!(b, b'&' | b'\'' | b'<' | b'>' | b'"' | b'\r')
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attribute_value(value: &str) -> Cow<'_, str> {
    let bytes = value.as_bytes();
    let Some(first) = bytes.iter().position(|&b| needs_escape(b)) else {
        return Cow::Borrowed(value);
    };

    let mut out = String::with_capacity(value.len() + 16);
    out.push_str(&value[..first]);
    // Every escapable byte is ASCII, so slicing at them stays on char boundaries.
    let mut last = first;
    for (i, &b) in bytes.iter().enumerate().skip(first) {
        let rep = match b {
            b'&' => "&amp;",
            b'\'' => "&#39;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&#34;",
            b'\r' => "&#13;",
            _ => continue,
        };
        out.push_str(&value[last..i]);
        out.push_str(rep);
        last = i + 1;
    }
    out.push_str(&value[last..]);
    Cow::Owned(out)
}
