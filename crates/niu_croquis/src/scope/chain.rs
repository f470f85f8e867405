//! The scope side table.
//!
//! `oxc_semantic` builds scope/symbol metadata tied to the arena-allocated
//! AST it walks; since every pass here rewrites source text and then
//! re-parses, that metadata would be invalidated on the next pass anyway.
//! Instead we build our own scope tree directly from a hand-rolled walk
//! (see `niu_atelier::analyzer`), keyed by scope id rather than AST node
//! identity, and keep it around only as long as the AST it was built from.

use niu_carton::{CompactString, FxHashMap};

use super::types::{BindingKind, ScopeBinding, ScopeKind};

pub use super::types::ScopeId;

/// A single scope: its kind, its parent (if any), and its own declared
/// bindings.
#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    bindings: FxHashMap<CompactString, ScopeBinding>,
}

impl Scope {
    fn new(kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            parent,
            bindings: FxHashMap::default(),
        }
    }

    pub fn bindings(&self) -> impl Iterator<Item = &ScopeBinding> {
        self.bindings.values()
    }

    pub fn binding(&self, name: &str) -> Option<&ScopeBinding> {
        self.bindings.get(name)
    }
}

/// The full tree of scopes for one parse, plus the free-identifier table
/// for the program (module) scope (spec.md's "globals map").
#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    /// Free identifiers: name -> every reference offset that failed to
    /// resolve to a binding anywhere in the scope chain.
    globals: FxHashMap<CompactString, Vec<u32>>,
}

impl ScopeTree {
    /// A fresh tree with only the root module scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Module, None)],
            globals: FxHashMap::default(),
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    /// Open a new child scope and return its id.
    pub fn push_scope(&mut self, kind: ScopeKind, parent: ScopeId) -> ScopeId {
        self.scopes.push(Scope::new(kind, Some(parent)));
        ScopeId::new((self.scopes.len() - 1) as u32)
    }

    pub fn kind(&self, scope: ScopeId) -> ScopeKind {
        self.scopes[scope.as_u32() as usize].kind
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.as_u32() as usize].parent
    }

    pub fn scope(&self, scope: ScopeId) -> &Scope {
        &self.scopes[scope.as_u32() as usize]
    }

    /// The nearest enclosing var-boundary scope (module or function): the
    /// target scope for a `var` declaration per JS hoisting semantics.
    pub fn nearest_var_scope(&self, from: ScopeId) -> ScopeId {
        let mut cur = from;
        loop {
            if self.kind(cur).is_var_boundary() {
                return cur;
            }
            cur = self.parent(cur).expect("module scope is always a var boundary");
        }
    }

    /// Declare `name` in `scope` (or, for `var`/function declarations, in
    /// the nearest enclosing var-boundary scope). Returns the scope the
    /// binding actually landed in.
    pub fn add_binding(
        &mut self,
        scope: ScopeId,
        name: CompactString,
        kind: BindingKind,
        declaration_offset: u32,
    ) -> ScopeId {
        let target = if matches!(kind, BindingKind::Var | BindingKind::FunctionDecl) {
            self.nearest_var_scope(scope)
        } else {
            scope
        };
        self.scopes[target.as_u32() as usize]
            .bindings
            .entry(name.clone())
            .or_insert_with(|| ScopeBinding::new(name, kind, declaration_offset));
        target
    }

    /// Resolve `name` starting at `scope`, walking up to the root. Returns
    /// the owning scope id if found.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let mut cur = Some(scope);
        while let Some(id) = cur {
            if self.scopes[id.as_u32() as usize].bindings.contains_key(name) {
                return Some(id);
            }
            cur = self.scopes[id.as_u32() as usize].parent;
        }
        None
    }

    /// Record a reference to `name` seen while reading `scope`. If it
    /// resolves, the owning binding's reference list grows; otherwise it is
    /// a free identifier and is recorded in the program's globals map.
    pub fn record_reference(&mut self, scope: ScopeId, name: &str, offset: u32) {
        if let Some(owner) = self.resolve(scope, name) {
            if let Some(binding) = self.scopes[owner.as_u32() as usize].bindings.get_mut(name) {
                binding.record_reference(offset);
            }
            return;
        }
        self.globals.entry(name.into()).or_default().push(offset);
    }

    /// Record that `name`, visible from `scope`, was the target of an
    /// assignment (or `++`/`--`) rather than a plain read.
    pub fn record_reassignment(&mut self, scope: ScopeId, name: &str) {
        if let Some(owner) = self.resolve(scope, name) {
            if let Some(binding) = self.scopes[owner.as_u32() as usize].bindings.get_mut(name) {
                binding.record_reassignment();
            }
        }
    }

    /// Every free identifier referenced anywhere in the program, with the
    /// offsets of every reference to it, ordered by decreasing reference
    /// count (the order the global hoister considers candidates in).
    pub fn globals_by_reference_count(&self) -> Vec<(&str, &[u32])> {
        let mut out: Vec<_> = self
            .globals
            .iter()
            .map(|(name, offsets)| (name.as_str(), offsets.as_slice()))
            .collect();
        out.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));
        out
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_scope_nests_under_function() {
        let mut tree = ScopeTree::new();
        let func = tree.push_scope(ScopeKind::Function, tree.root());
        let block = tree.push_scope(ScopeKind::Block, func);

        tree.add_binding(func, "x".into(), BindingKind::Let, 5);
        assert!(tree.resolve(block, "x").is_some());
        assert!(tree.resolve(func, "x").is_some());
    }

    #[test]
    fn var_escapes_block_to_function() {
        let mut tree = ScopeTree::new();
        let func = tree.push_scope(ScopeKind::Function, tree.root());
        let block = tree.push_scope(ScopeKind::Block, func);

        let landed = tree.add_binding(block, "y".into(), BindingKind::Var, 0);
        assert_eq!(landed, func);
        assert!(tree.scope(block).binding("y").is_none());
        assert!(tree.scope(func).binding("y").is_some());
    }

    #[test]
    fn unresolved_reference_is_global() {
        let mut tree = ScopeTree::new();
        tree.record_reference(tree.root(), "Array", 10);
        tree.record_reference(tree.root(), "Array", 40);

        let globals = tree.globals_by_reference_count();
        assert_eq!(globals[0].0, "Array");
        assert_eq!(globals[0].1.len(), 2);
    }

    #[test]
    fn reference_resolves_to_nearest_binding() {
        let mut tree = ScopeTree::new();
        tree.add_binding(tree.root(), "x".into(), BindingKind::Const, 0);
        let func = tree.push_scope(ScopeKind::Function, tree.root());
        tree.add_binding(func, "x".into(), BindingKind::Let, 20);

        tree.record_reference(func, "x", 30);
        assert!(tree.scope(func).binding("x").unwrap().is_used());
        assert!(!tree.scope(tree.root()).binding("x").unwrap().is_used());
    }
}
