//! The end-to-end minification pipeline (spec.md §6).
//!
//! `parse → global hoist (opt) → re-parse → duplicate-literal hoist (opt)
//! → re-parse → mangle → const→let (opt) → re-parse → compact print`.
//!
//! Every pass rewrites source text rather than the AST, so each pass after
//! the first needs its own fresh parse — the scope/fact tables a pass
//! consults are only valid against the exact text they were built from.

use oxc_allocator::Allocator;

use crate::analyzer::{self, Analysis};
use crate::error::{NiuError, ParsePhase};
use crate::facade;
use crate::passes::{const_to_let, global_hoist, literal_hoist, mangle};

/// Which passes to run. `consts_to_lets` defaults to off: it is the one
/// pass that changes program semantics (spec.md §4.5), so it is opt-in.
#[derive(Debug, Clone, Copy)]
pub struct MinifyOptions {
    pub hoist_globals: bool,
    pub hoist_duplicate_literals: bool,
    pub consts_to_lets: bool,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            hoist_globals: true,
            hoist_duplicate_literals: true,
            consts_to_lets: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MinifyStats {
    pub globals_hoisted: usize,
    pub literals_hoisted: usize,
    pub bindings_mangled: usize,
    pub consts_rewritten: usize,
}

pub struct MinifyResult {
    pub code: String,
    pub stats: MinifyStats,
}

fn reparse<'a>(allocator: &'a Allocator, source: &'a str) -> Result<Analysis, NiuError> {
    let parsed = facade::parse(allocator, source, ParsePhase::PostHoist)?;
    Ok(analyzer::analyze(&parsed.program))
}

pub fn minify(source: &str, options: &MinifyOptions) -> Result<MinifyResult, NiuError> {
    let mut stats = MinifyStats::default();

    let input_alloc = Allocator::default();
    let input_parsed = facade::parse(&input_alloc, source, ParsePhase::Input)?;

    let mut code = if options.hoist_globals {
        let span = tracing::info_span!("global_hoist");
        let _enter = span.enter();
        let analysis = analyzer::analyze(&input_parsed.program);
        let result = global_hoist::run(source, &analysis);
        stats.globals_hoisted = result.hoisted.len();
        tracing::debug!(count = stats.globals_hoisted, "globals hoisted");
        result.code
    } else {
        source.to_string()
    };

    if options.hoist_duplicate_literals {
        let span = tracing::info_span!("literal_hoist");
        let _enter = span.enter();
        let alloc = Allocator::default();
        let parsed = facade::parse(&alloc, &code, ParsePhase::PostHoist)?;
        let result = literal_hoist::run(&code, &parsed.program);
        stats.literals_hoisted = result.hoisted_count;
        tracing::debug!(count = stats.literals_hoisted, "literals hoisted");
        code = result.code;
    }

    {
        let span = tracing::info_span!("mangle");
        let _enter = span.enter();
        let alloc = Allocator::default();
        let analysis = reparse(&alloc, &code)?;
        let result = mangle::run(&code, &analysis);
        stats.bindings_mangled = result.renamed.len();
        tracing::debug!(count = stats.bindings_mangled, "bindings mangled");
        code = result.code;
    }

    if options.consts_to_lets {
        let span = tracing::info_span!("const_to_let");
        let _enter = span.enter();
        let alloc = Allocator::default();
        let parsed = facade::parse(&alloc, &code, ParsePhase::PostHoist)?;
        let result = const_to_let::run(&code, &parsed.program);
        stats.consts_rewritten = result.rewritten_count;
        tracing::debug!(count = stats.consts_rewritten, "consts rewritten to lets");
        code = result.code;
    }

    let final_alloc = Allocator::default();
    let final_parsed = facade::parse(&final_alloc, &code, ParsePhase::PostHoist)?;
    let printed = facade::print_compact(&final_parsed.program);

    if printed.code.contains("__niu_") {
        return Err(NiuError::Invariant(
            "a __niu_ placeholder survived to the final output".to_string(),
        ));
    }

    Ok(MinifyResult {
        code: printed.code,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_round_trips_trivial_source() {
        let result = minify("const x = 1; console.log(x);", &MinifyOptions::default()).unwrap();
        assert!(!result.code.is_empty());
        assert!(!result.code.contains("__niu_"));
    }

    #[test]
    fn duplicate_string_literal_gets_hoisted_end_to_end() {
        let src = (0..5)
            .map(|_| "console.log(\"hello world\");".to_string())
            .collect::<String>();
        let result = minify(&src, &MinifyOptions::default()).unwrap();
        assert_eq!(result.code.matches("hello world").count(), 1);
        assert!(result.stats.literals_hoisted >= 1);
    }

    #[test]
    fn consts_to_lets_is_off_by_default() {
        let result = minify("const x = 1;", &MinifyOptions::default()).unwrap();
        assert_eq!(result.stats.consts_rewritten, 0);
    }

    #[test]
    fn consts_to_lets_rewrites_when_enabled() {
        let options = MinifyOptions {
            consts_to_lets: true,
            ..MinifyOptions::default()
        };
        let result = minify("const x = 1;", &options).unwrap();
        assert!(result.stats.consts_rewritten >= 1);
    }

    #[test]
    fn unparseable_input_surfaces_as_parse_error() {
        let err = minify("const = ;", &MinifyOptions::default()).unwrap_err();
        assert!(matches!(err, NiuError::Parse { .. }));
    }
}
