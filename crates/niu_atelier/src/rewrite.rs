//! Span-based text splicing, the rewrite-application technique every pass
//! in this crate uses instead of AST mutation.
//!
//! Grounded directly on `vize_canon::batch::import_rewriter::ImportRewriter`:
//! collect `(start, end, replacement)` triples during a read-only AST walk,
//! sort them by descending start offset, and apply them back-to-front with
//! `String::replace_range` so earlier offsets stay valid as later splices
//! are applied.

/// One text replacement: bytes `[start, end)` of the source become
/// `replacement`.
#[derive(Debug, Clone)]
pub struct Splice {
    pub start: u32,
    pub end: u32,
    pub replacement: String,
}

impl Splice {
    pub fn new(start: u32, end: u32, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }
}

/// Apply `splices` to `source`, returning the rewritten text. Splices must
/// not overlap; applying them in descending-start order means every
/// earlier (lower-offset) splice's coordinates stay valid as each later
/// one lands.
pub fn apply_splices(source: &str, mut splices: Vec<Splice>) -> String {
    splices.sort_by(|a, b| b.start.cmp(&a.start));
    let mut output = source.to_string();
    for splice in splices {
        output.replace_range(splice.start as usize..splice.end as usize, &splice.replacement);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_overlapping_splices_apply_independent_of_order() {
        let source = "let a = 1; let b = 2;";
        let splices = vec![
            Splice::new(4, 5, "x"),
            Splice::new(16, 17, "y"),
        ];
        let out = apply_splices(source, splices);
        assert_eq!(out, "let x = 1; let y = 2;");
    }

    #[test]
    fn splice_can_grow_or_shrink_text() {
        let source = "const obj = {};";
        let out = apply_splices(
            source,
            vec![Splice::new(0, 5, "let")],
        );
        assert_eq!(out, "let obj = {};");
    }
}
