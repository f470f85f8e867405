//! The identifier mangler (spec.md §4.4).
//!
//! Walks the scope tree in declaration (pre-)order — the order
//! `niu_croquis::scope::ScopeTree` assigns scope ids in, since
//! `niu_atelier::analyzer` pushes a child scope the moment it is entered —
//! and, within each scope, assigns short names to bindings ranked by total
//! reference count (ties broken by declaration order), skipping reserved
//! words and any name still visible from an enclosing scope.
//!
//! Two-phase rename: every renamed binding first gets a unique, collision-
//! proof placeholder (`__niu_mangle_N__`) spliced in at every declaration
//! and reference offset; only once every splice has landed do placeholders
//! get substituted for their final short names, so a later binding's
//! rename can never accidentally land inside an earlier one's replacement
//! text. A final defensive scan confirms no `__niu_` placeholder leaked
//! into the output (spec.md §8's "no placeholder leakage" invariant).

use std::collections::{HashMap, HashSet};

use niu_croquis::naming::{self, NameCandidates};
use niu_croquis::scope::ScopeId;

use crate::analyzer::Analysis;
use crate::rewrite::{apply_splices, Splice};

pub struct ManglePlan {
    pub original_name: String,
    pub mangled_name: String,
    pub scope: ScopeId,
}

pub struct MangleResult {
    pub code: String,
    pub renamed: Vec<ManglePlan>,
}

pub fn run(source: &str, analysis: &Analysis) -> MangleResult {
    let tree = &analysis.scopes;

    let mut reserved_for: HashMap<ScopeId, HashSet<String>> = HashMap::new();
    let mut assigned_in: HashMap<ScopeId, HashSet<String>> = HashMap::new();
    reserved_for.insert(tree.root(), HashSet::new());
    assigned_in.insert(tree.root(), HashSet::new());

    let mut splices = Vec::new();
    let mut renamed = Vec::new();
    let mut placeholder_counter = 0u64;
    let mut substitutions: Vec<(String, String)> = Vec::new();

    for raw_id in 0..tree.scope_count() as u32 {
        let scope_id = ScopeId::new(raw_id);

        let reserved = if scope_id == tree.root() {
            reserved_for.entry(scope_id).or_default().clone()
        } else {
            let parent = tree.parent(scope_id).expect("non-root scope has a parent");
            let mut r = reserved_for.get(&parent).cloned().unwrap_or_default();
            r.extend(assigned_in.get(&parent).cloned().unwrap_or_default());
            reserved_for.insert(scope_id, r.clone());
            r
        };

        let mut bindings: Vec<_> = tree.scope(scope_id).bindings().collect();
        bindings.sort_by(|a, b| {
            b.occurrence_count()
                .cmp(&a.occurrence_count())
                .then_with(|| a.declaration_offset.cmp(&b.declaration_offset))
        });

        let own_assigned = assigned_in.entry(scope_id).or_default();
        let mut taken: HashSet<String> = reserved.clone();
        taken.extend(own_assigned.iter().cloned());

        for binding in bindings {
            let mut candidates = NameCandidates::new();
            let name = loop {
                let candidate = candidates.next().expect("name candidates are infinite");
                if naming::is_reserved_word(&candidate) || taken.contains(&candidate) {
                    continue;
                }
                break candidate;
            };

            taken.insert(name.clone());
            own_assigned.insert(name.clone());

            let placeholder = format!("__niu_mangle_{placeholder_counter}__");
            placeholder_counter += 1;

            let orig_len = binding.name.len() as u32;
            splices.push(Splice::new(
                binding.declaration_offset,
                binding.declaration_offset + orig_len,
                placeholder.clone(),
            ));
            for &offset in &binding.references {
                splices.push(Splice::new(offset, offset + orig_len, placeholder.clone()));
            }

            substitutions.push((placeholder, name.clone()));
            renamed.push(ManglePlan {
                original_name: binding.name.to_string(),
                mangled_name: name,
                scope: scope_id,
            });
        }
    }

    let mut code = apply_splices(source, splices);
    for (placeholder, name) in &substitutions {
        code = code.replace(placeholder.as_str(), name);
    }

    if code.contains("__niu_") {
        tracing::warn!("mangler left an unreplaced __niu_ placeholder in the output");
    }

    MangleResult { code, renamed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn run_source(src: &str) -> MangleResult {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, src, SourceType::default().with_module(true)).parse();
        let analysis = analyze(&ret.program);
        run(src, &analysis)
    }

    #[test]
    fn most_referenced_binding_gets_first_letter() {
        let src = "function f(verbose) { return verbose+verbose+verbose+verbose+verbose+verbose+verbose+verbose+verbose+verbose; }";
        let result = run_source(src);
        let verbose = result
            .renamed
            .iter()
            .find(|r| r.original_name == "verbose")
            .unwrap();
        assert_eq!(verbose.mangled_name, "e");
    }

    #[test]
    fn no_placeholder_text_survives() {
        let src = "function f(a, b) { return a + b; }";
        let result = run_source(src);
        assert!(!result.code.contains("__niu_"));
    }

    #[test]
    fn shadowed_outer_binding_does_not_collide() {
        let src = "function outer() { let x = 1; function inner() { let y = 2; return x + y; } return inner(); }";
        let result = run_source(src);
        let names: Vec<_> = result.renamed.iter().map(|r| r.mangled_name.clone()).collect();
        let mut dedup = names.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(names.len(), dedup.len(), "no two bindings visible to each other share a name");
    }
}
