// src/bootstrap/escape.rs

//! String literal escaping for generated source.
//!
//! The table below is the whole contract. Every other character is copied
//! through as-is, which Rust string literals accept for everything except a
//! bare carriage return.

const ESCAPES: [(char, &str); 5] = [
    ('"', "\\\""),
    ('\\', "\\\\"),
    ('\n', "\\n"),
    ('\t', "\\t"),
    ('\r', "\\r"),
];

/// Escape `raw` for use between double quotes.
pub fn escape_str(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match ESCAPES.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}

/// `raw` as a complete double-quoted literal.
pub fn quote(raw: &str) -> String {
    format!("\"{}\"", escape_str(raw))
}

/// Decode the body of a literal produced by [`escape_str`].
///
/// Returns `None` for escape sequences `escape_str` never emits.
pub fn unescape(escaped: &str) -> Option<String> {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let next = chars.next()?;
        let (from, _) = ESCAPES
            .iter()
            .find(|(_, to)| to.chars().nth(1) == Some(next))?;
        out.push(*from);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_four_required_escapes() {
        assert_eq!(escape_str("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_str("a\\b"), "a\\\\b");
        assert_eq!(escape_str("one\ntwo"), "one\\ntwo");
        assert_eq!(escape_str("col\tcol"), "col\\tcol");
    }

    #[test]
    fn other_characters_pass_through() {
        let raw = "echo 'single' $HOME {braces} ñ ✓ \u{7}";
        assert_eq!(escape_str(raw), raw);
    }

    #[test]
    fn carriage_return_is_escaped() {
        assert_eq!(escape_str("x\r"), "x\\r");
    }

    #[test]
    fn quote_wraps_in_double_quotes() {
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn unescape_inverts_escape() {
        let raw = "printf \"%s\\n\" \"a\tb\"\nexit 0";
        assert_eq!(unescape(&escape_str(raw)).as_deref(), Some(raw));
    }

    #[test]
    fn unescape_rejects_unknown_sequences() {
        assert_eq!(unescape("\\x41"), None);
        assert_eq!(unescape("dangling\\"), None);
    }
}
