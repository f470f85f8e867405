//! The global hoister (spec.md §4.2).
//!
//! Lifts frequently-referenced free identifiers into a single prepended
//! `const` declaration when doing so is a net byte saving, skipping any
//! name that is ever the operand of `typeof` (hoisting it could turn a
//! safe `typeof G` check into a throwing `ReferenceError` read).

use niu_croquis::profit;

use crate::analyzer::Analysis;
use crate::rewrite::{apply_splices, Splice};

/// One accepted global-hoist candidate.
#[derive(Debug, Clone)]
pub struct GlobalHoist {
    pub name: String,
    pub placeholder: String,
    pub occurrence_count: usize,
}

pub struct GlobalHoistResult {
    pub code: String,
    pub hoisted: Vec<GlobalHoist>,
}

/// Run the pass. `source` must be the exact text `analysis` was built
/// from (the offsets it carries are only valid against that text).
pub fn run(source: &str, analysis: &Analysis) -> GlobalHoistResult {
    let globals = analysis.scopes.globals_by_reference_count();

    let reserved_contextual = [
        "arguments", "this", "super", "undefined", "NaN", "Infinity", "null", "true", "false",
    ];

    let mut candidates: Vec<(&str, &[u32])> = globals
        .into_iter()
        .filter(|(name, _)| !reserved_contextual.contains(name))
        .filter(|(name, _)| !analysis.typeof_guarded.contains(*name))
        .filter(|(name, _)| {
            analysis
                .dot_object_uses
                .get(*name)
                .is_some_and(|uses| uses.len() >= 2)
        })
        .collect();
    // globals_by_reference_count already sorts by descending reference
    // count with a name tiebreak; keep that order (spec.md §4.2: "sort
    // descending by occurrence count (stable)").
    candidates.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    let mut hoisted = Vec::new();
    let mut splices = Vec::new();
    let mut has_first = false;

    for (name, offsets) in candidates {
        let profit = profit::global_hoist_profit(offsets.len(), name.len(), 1, !has_first);
        if profit <= 0 {
            continue;
        }
        let placeholder = format!("__niu_global_{}__", hoisted.len());
        for &offset in offsets {
            splices.push(Splice::new(
                offset,
                offset + name.len() as u32,
                placeholder.clone(),
            ));
        }
        hoisted.push(GlobalHoist {
            name: name.to_string(),
            placeholder,
            occurrence_count: offsets.len(),
        });
        has_first = true;
    }

    if hoisted.is_empty() {
        return GlobalHoistResult {
            code: source.to_string(),
            hoisted,
        };
    }

    let decl = format!(
        "const {};",
        hoisted
            .iter()
            .map(|h| format!("{}={}", h.placeholder, h.name))
            .collect::<Vec<_>>()
            .join(",")
    );
    splices.push(Splice::new(0, 0, decl));

    GlobalHoistResult {
        code: apply_splices(source, splices),
        hoisted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn run_source(src: &str) -> GlobalHoistResult {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, src, SourceType::default().with_module(true)).parse();
        let analysis = analyze(&ret.program);
        run(src, &analysis)
    }

    #[test]
    fn typeof_guarded_global_is_never_hoisted() {
        let src = "typeof G !== 'undefined' && G.foo(); typeof G !== 'undefined' && G.bar(); typeof G !== 'undefined' && G.baz();";
        let result = run_source(src);
        assert!(result.hoisted.is_empty());
        assert!(!result.code.contains("=G;") && !result.code.contains("=G,"));
    }

    #[test]
    fn frequent_dotted_global_is_hoisted() {
        let src = "Array.isArray(a);Array.isArray(b);Array.isArray(c);Array.isArray(d);Array.isArray(e);Array.isArray(f);";
        let result = run_source(src);
        assert!(!result.hoisted.is_empty());
        assert!(result.code.starts_with("const __niu_global_0__=Array;"));
        assert!(result.code.contains("__niu_global_0__.isArray"));
    }

    #[test]
    fn single_dot_use_global_is_not_a_candidate() {
        let src = "Array.isArray(a);";
        let result = run_source(src);
        assert!(result.hoisted.is_empty());
    }
}
