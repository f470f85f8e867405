//! The byte-cost profit model.
//!
//! A pure module: every function here takes plain integers (and, where a
//! literal's printed form matters, a pre-computed representation length)
//! and returns a signed byte count. No AST or scope type appears in this
//! module's signatures — it is shared verbatim by the global hoister and
//! the duplicate-literal hoister.

/// A literal's kind, for representation-length purposes. `String`'s
/// representation length is supplied by the caller (it requires JSON
/// quoting, done once by the collector) rather than recomputed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    Number,
    True,
    False,
    Null,
    Undefined,
    BigInt,
}

/// `R(type, value)`: the byte length of `value`'s compact printed form.
///
/// For `String`, `repr_len` must already be the length of the JSON-quoted
/// form (including the surrounding quotes); this function just returns it
/// unchanged, so all call sites can go through one function regardless of
/// kind.
pub fn literal_repr_len(kind: LiteralKind, repr_len: usize) -> usize {
    match kind {
        LiteralKind::String | LiteralKind::Number | LiteralKind::BigInt => repr_len,
        LiteralKind::True => 4,
        LiteralKind::False => 5,
        LiteralKind::Null => 4,
        LiteralKind::Undefined => 9,
    }
}

/// `D(R, id, first)`: the byte cost of declaring one binding of
/// representation length `r` under an identifier of length `id`.
///
/// `first`: whether this is the first declarator emitted in the program's
/// hoisted declaration (pays for the leading `const⎵`/`let⎵` keyword and
/// space; `6 + id + 1 + r`), or a later declarator riding the same
/// declaration via a comma (`1 + id + 1 + r`).
pub fn declaration_cost(r: usize, id: usize, first: bool) -> i64 {
    let r = r as i64;
    let id = id as i64;
    if first {
        6 + id + 1 + r
    } else {
        1 + id + 1 + r
    }
}

/// Literal hoist profit: replacing `n` occurrences of a literal whose
/// printed form is `r` bytes with an `id`-byte identifier, paying the
/// one-time declaration cost `d`.
pub fn literal_hoist_profit(n: usize, r: usize, id: usize, first: bool) -> i64 {
    let n = n as i64;
    let r = r as i64;
    let id = id as i64;
    n * r - declaration_cost(r as usize, id as usize, first) - n * id
}

/// Dot-access → bracket-access profit for a property name of length `l`,
/// used `n` times, replaced by an `id`-byte placeholder identifier. `quoted_len`
/// is the JSON-quoted length of the property name (used for the hoisted
/// declaration's representation length).
pub fn dot_to_bracket_profit(n: usize, l: usize, id: usize, quoted_len: usize, first: bool) -> i64 {
    let before = (n * (1 + l)) as i64;
    let after =
        declaration_cost(quoted_len, id, first) + (n * (2 + id)) as i64;
    before - after
}

/// Whether a single dot-access use is individually worth rewriting:
/// `L > 1 + id`.
pub fn dot_access_gate(l: usize, id: usize) -> bool {
    l > 1 + id
}

/// Object-key → computed-key profit for a property name of length `l`
/// (the `k:` form amortizes its colon against the value expression, so
/// only the key itself — `l` bytes — is charged).
pub fn object_key_to_computed_profit(
    n: usize,
    l: usize,
    id: usize,
    quoted_len: usize,
    first: bool,
) -> i64 {
    let before = (n * l) as i64;
    let after = declaration_cost(quoted_len, id, first) + (n * (2 + id)) as i64;
    before - after
}

/// Whether a single identifier-key use is individually worth rewriting:
/// `L > 2 + id`.
pub fn identifier_key_gate(l: usize, id: usize) -> bool {
    l > 2 + id
}

/// Global hoist profit: a free global of name-length `g`, referenced `n`
/// times, replaced by an `id`-byte placeholder (globals hoist verbatim,
/// with no quoting overhead on either side).
pub fn global_hoist_profit(n: usize, g: usize, id: usize, first: bool) -> i64 {
    let n = n as i64;
    let g = g as i64;
    let id = id as i64;
    n * g - declaration_cost(g as usize, id as usize, first) - n * id
}

/// The decision produced by [`selective_string_profit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringDecision {
    pub profit: i64,
    pub hoist_literals: bool,
    pub hoist_access: bool,
    pub hoist_keys: bool,
    /// Total effective occurrences across the categories that were hoisted.
    pub effective_count: usize,
}

/// Counts of a string value's occurrences, per spec.md §4.3's category
/// table, already collapsed to the three profit-relevant groups: plain
/// literal uses, dot-access uses (`obj.s`), and identifier-key uses
/// (`{s: v}`). `bracketAccess` and `stringKey` occurrences behave exactly
/// like plain literal uses for costing purposes and should be folded into
/// `literal_uses` by the caller before this is invoked.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringOccurrences {
    pub literal_uses: usize,
    pub dot_access_uses: usize,
    pub identifier_key_uses: usize,
}

/// Compute the selective profit for a string value of JSON-quoted length
/// `quoted_len` (the string's `R`), given an assumed placeholder identifier
/// length `id` (callers pass `1`, per spec.md §4.3's short-name
/// assumption) and whether this would be the first hoisted declaration.
///
/// Implements spec.md §4.3 "Decision phase": zero out categories that fail
/// their per-occurrence gate, require the remaining effective count ≥ 2,
/// then sum costs.
pub fn selective_string_profit(
    occ: StringOccurrences,
    quoted_len: usize,
    id: usize,
    first: bool,
) -> StringDecision {
    // Un-quoted length for gate comparisons (dot/key access rewrite the bare
    // name, not the quoted literal).
    let bare_len = quoted_len.saturating_sub(2);

    let hoist_access = occ.dot_access_uses > 0 && dot_access_gate(bare_len, id);
    let hoist_keys = occ.identifier_key_uses > 0 && identifier_key_gate(bare_len, id);
    let hoist_literals = occ.literal_uses > 0;

    let effective_count = occ.literal_uses
        + if hoist_access { occ.dot_access_uses } else { 0 }
        + if hoist_keys { occ.identifier_key_uses } else { 0 };

    if effective_count < 2 {
        return StringDecision {
            profit: i64::MIN,
            hoist_literals: false,
            hoist_access: false,
            hoist_keys: false,
            effective_count,
        };
    }

    let mut profit = 0i64;
    if hoist_literals {
        profit += literal_hoist_profit(occ.literal_uses, quoted_len, id, first);
    }
    if hoist_access {
        profit += dot_to_bracket_profit(occ.dot_access_uses, bare_len, id, quoted_len, false);
    }
    if hoist_keys {
        profit += object_key_to_computed_profit(occ.identifier_key_uses, bare_len, id, quoted_len, false);
    }
    // Only one declaration overhead should be charged across all three
    // categories for this value; `dot_to_bracket_profit`/
    // `object_key_to_computed_profit` above were asked for `first=false` so
    // as not to double-charge it, and `literal_hoist_profit` (if present)
    // already charged it with the real `first` flag. If literals weren't
    // hoisted but another category was, charge the declaration once here.
    if !hoist_literals && (hoist_access || hoist_keys) {
        profit -= declaration_cost(quoted_len, id, first) - declaration_cost(quoted_len, id, false);
    }

    StringDecision {
        profit,
        hoist_literals,
        hoist_access,
        hoist_keys,
        effective_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_repr_lengths_match_spec() {
        assert_eq!(literal_repr_len(LiteralKind::True, 0), 4);
        assert_eq!(literal_repr_len(LiteralKind::False, 0), 5);
        assert_eq!(literal_repr_len(LiteralKind::Null, 0), 4);
        assert_eq!(literal_repr_len(LiteralKind::Undefined, 0), 9);
        assert_eq!(literal_repr_len(LiteralKind::String, 7), 7);
    }

    #[test]
    fn declaration_cost_first_vs_subsequent() {
        // const⎵X=V -> 6 + 1 + 1 + R for id length 1
        assert_eq!(declaration_cost(5, 1, true), 6 + 1 + 1 + 5);
        // ,X=V -> 1 + 1 + 1 + R
        assert_eq!(declaration_cost(5, 1, false), 1 + 1 + 1 + 5);
    }

    #[test]
    fn four_copies_of_abc_is_profitable() {
        // "abc" quoted length 5, four occurrences, id length 1, first decl.
        let profit = literal_hoist_profit(4, 5, 1, true);
        assert!(profit > 0, "expected positive profit, got {profit}");
    }

    #[test]
    fn three_copies_of_abc_breaks_even_or_loses() {
        let profit = literal_hoist_profit(3, 5, 1, true);
        assert!(profit <= 0, "expected non-positive profit, got {profit}");
    }

    #[test]
    fn ten_uses_of_long_dot_access_is_profitable() {
        // obj.something, "something" is 9 bytes bare, 11 quoted.
        let profit = dot_to_bracket_profit(10, 9, 1, 11, true);
        assert!(profit > 0, "expected positive profit, got {profit}");
        assert!(dot_access_gate(9, 1));
    }

    #[test]
    fn ten_uses_of_short_dot_access_is_not_profitable() {
        // obj.x, "x" is 1 byte bare -- gate fails (1 > 1+1 is false).
        assert!(!dot_access_gate(1, 1));
    }

    #[test]
    fn selective_profit_requires_two_effective_occurrences() {
        let occ = StringOccurrences {
            literal_uses: 1,
            dot_access_uses: 0,
            identifier_key_uses: 0,
        };
        let decision = selective_string_profit(occ, 5, 1, true);
        assert_eq!(decision.effective_count, 1);
        assert!(!decision.hoist_literals);
    }
}
