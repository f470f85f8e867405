//! Small text helpers shared by the hoisting passes: JSON-style string
//! quoting (spec.md §3: "double-quoted strings with standard JSON-style
//! escaping") and numeric canonicalization.

/// Render `s` as a double-quoted JS string literal with JSON-style
/// escaping, the form the printer facade is assumed to emit.
pub fn json_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// The cost, in the profit model's uniform unit, of `s`'s JSON-quoted
/// form, without allocating it — used heavily by the profit model, which
/// only needs the length. Ordinary characters always cost 1 regardless of
/// real UTF-8 width (spec.md §3's deliberately Unicode-agnostic cost
/// model), so this is not the real byte length of the quoted UTF-8 output
/// for strings containing non-ASCII content.
pub fn json_quote_len(s: &str) -> usize {
    let mut len = 2; // surrounding quotes
    for c in s.chars() {
        len += match c {
            '"' | '\\' | '\n' | '\r' | '\t' => 2,
            '\u{2028}' | '\u{2029}' => 6,
            c if (c as u32) < 0x20 => 6,
            _ => 1,
        };
    }
    len
}

/// Canonical shortest decimal form of a numeric literal's source text.
/// A real implementation would reparse and reformat per ECMA-262's Number
/// ToString; this trusts the printer facade already emitted the shortest
/// form (spec.md §2: "the core assumes the printer emits ... minimal-length
/// numeric ... literal forms") and just measures it.
pub fn numeric_repr_len(source_text: &str) -> usize {
    source_text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ascii_round_trips_length() {
        assert_eq!(json_quote_len("abc"), 5);
        assert_eq!(json_quote("abc"), "\"abc\"");
    }

    #[test]
    fn escapes_inflate_length() {
        assert_eq!(json_quote_len("a\"b"), 6);
        assert_eq!(json_quote("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn non_ascii_characters_cost_one_regardless_of_utf8_width() {
        // '\u{00e9}' (é) is 2 bytes in UTF-8, '\u{4e2d}' (中) is 3 bytes;
        // the cost model charges exactly 1 per ordinary char either way.
        assert_eq!(json_quote_len("\u{00e9}"), 3);
        assert_eq!(json_quote_len("\u{4e2d}"), 3);
        assert_eq!(json_quote_len("a\u{4e2d}b"), 5);
    }
}
