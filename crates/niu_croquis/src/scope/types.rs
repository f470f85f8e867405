//! Type definitions for scope analysis.
//!
//! - `ScopeId` - unique identifier for a scope
//! - `ScopeKind` - what kind of JavaScript construct opened the scope
//! - `BindingKind` - how a binding was declared
//! - `ScopeBinding` - a single declared name and its reference history

use niu_carton::{bitflags, CompactString, SmallVec};

/// Reference offsets are typically few; stack-allocate the common case.
pub type RefOffsets = SmallVec<[u32; 8]>;

/// Unique identifier for a scope, assigned in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The program (module) scope is always the first scope created.
    pub const ROOT: Self = Self(0);

    #[inline(always)]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// What kind of JavaScript construct opened this scope.
///
/// Distinguishes function-like scopes (which stop `var` from escaping)
/// from plain block scopes, since the mangler and the global hoister both
/// need to know which boundary a binding is confined to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ScopeKind {
    /// The program itself.
    Module,
    /// A function declaration, function expression, or arrow function.
    Function,
    /// A `{ ... }` block, `for`/`if`/`while` body, or similar.
    Block,
    /// A `catch (e) { ... }` clause — `e` is confined to this scope alone.
    Catch,
}

impl ScopeKind {
    #[inline]
    pub const fn is_var_boundary(self) -> bool {
        matches!(self, Self::Module | Self::Function)
    }
}

bitflags! {
    /// Per-binding usage flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BindingFlags: u8 {
        /// At least one reference was seen.
        const USED = 1 << 0;
        /// A reference wrote to this binding via assignment, `++`/`--`, or
        /// destructuring-as-assignment-target (disqualifies it from the
        /// `const` -> `let` rewrite's precondition and from some hoists).
        const REASSIGNED = 1 << 1;
    }
}

/// How a name came to be bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Var,
    Let,
    Const,
    Param,
    FunctionDecl,
    ClassDecl,
    CatchParam,
    Import,
}

impl BindingKind {
    #[inline]
    pub const fn is_const_declaration(self) -> bool {
        matches!(self, Self::Const)
    }
}

/// A single declared name within a scope, with its reference history.
#[derive(Debug, Clone)]
pub struct ScopeBinding {
    pub name: CompactString,
    pub kind: BindingKind,
    /// Byte offset of the declaring identifier in the (current) source.
    pub declaration_offset: u32,
    /// Byte offsets of every identifier reference resolving to this binding,
    /// in source order, declaration excluded.
    pub references: RefOffsets,
    flags: BindingFlags,
}

impl ScopeBinding {
    #[inline]
    pub fn new(name: CompactString, kind: BindingKind, declaration_offset: u32) -> Self {
        Self {
            name,
            kind,
            declaration_offset,
            references: RefOffsets::new(),
            flags: BindingFlags::empty(),
        }
    }

    #[inline]
    pub fn record_reference(&mut self, offset: u32) {
        self.references.push(offset);
        self.flags.insert(BindingFlags::USED);
    }

    #[inline]
    pub fn record_reassignment(&mut self) {
        self.flags.insert(BindingFlags::REASSIGNED);
    }

    #[inline]
    pub const fn is_used(&self) -> bool {
        self.flags.contains(BindingFlags::USED)
    }

    #[inline]
    pub const fn is_reassigned(&self) -> bool {
        self.flags.contains(BindingFlags::REASSIGNED)
    }

    /// Total effective occurrences: the declaration itself plus every
    /// reference (spec.md glossary: "effective occurrence").
    #[inline]
    pub fn occurrence_count(&self) -> usize {
        self.references.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_id_root_is_zero() {
        assert_eq!(ScopeId::ROOT.as_u32(), 0);
        assert_eq!(ScopeId::new(7).as_u32(), 7);
    }

    #[test]
    fn var_boundary_kinds() {
        assert!(ScopeKind::Module.is_var_boundary());
        assert!(ScopeKind::Function.is_var_boundary());
        assert!(!ScopeKind::Block.is_var_boundary());
        assert!(!ScopeKind::Catch.is_var_boundary());
    }

    #[test]
    fn binding_usage_tracking() {
        let mut b = ScopeBinding::new("x".into(), BindingKind::Const, 0);
        assert!(!b.is_used());
        assert_eq!(b.occurrence_count(), 1);

        b.record_reference(10);
        b.record_reference(20);
        assert!(b.is_used());
        assert!(!b.is_reassigned());
        assert_eq!(b.occurrence_count(), 3);

        b.record_reassignment();
        assert!(b.is_reassigned());
    }
}
