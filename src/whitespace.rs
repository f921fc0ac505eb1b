// src/whitespace.rs
//
// Whitespace policy for text runs.
//
// - Edge padding left over from source indentation collapses to at most one
//   space on each side. Inner whitespace is kept as written.
// - Boundary runes decide gluing: a sibling whose trimmed text starts with
//   punctuation stays on the line of the content before it.

use std::borrow::Cow;

use unicode_general_category::{get_general_category, GeneralCategory};

/// Trim `s` to its non-whitespace core, then put back one space on each side
/// that had any whitespace.
pub fn collapse_whitespace(s: &str) -> Cow<'_, str> {
    let core = s.trim();
    if core.is_empty() {
        return Cow::Borrowed("");
    }
    let start = s.len() - s.trim_start().len();
    let end = s.trim_end().len();
    let lead = start > 0;
    let trail = end < s.len();

    // Already normalized when every padded side is exactly one ASCII space.
    let lead_ok = !lead || (start == 1 && s.as_bytes()[0] == b' ');
    let trail_ok = !trail || (s.len() - end == 1 && s.as_bytes()[s.len() - 1] == b' ');
    if lead_ok && trail_ok {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(core.len() + 2);
    if lead {
        out.push(' ');
    }
    out.push_str(core);
    if trail {
        out.push(' ');
    }
    Cow::Owned(out)
}

/* ============================ Boundary runes ============================ */

pub fn first_rune(s: &str) -> Option<char> {
    s.trim_start().chars().next()
}

pub fn ends_with_whitespace(s: &str) -> bool {
    s.chars().next_back().is_some_and(char::is_whitespace)
}

pub fn starts_with_punctuation(s: &str) -> bool {
    first_rune(s).is_some_and(is_punctuation)
}

/// Unicode general category P (Pc, Pd, Ps, Pe, Pi, Pf, Po). ASCII symbols
/// such as `$`, `+`, `<`, `|` and `~` are category S and do not count.
pub fn is_punctuation(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}
