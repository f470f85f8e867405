//! Scope analysis for JavaScript/TypeScript source.
//!
//! Provides a hierarchical scope tree that tracks variable visibility
//! across module, function, block, and catch-clause scopes, plus a
//! program-level free-identifier ("globals") table.
//!
//! ## Module Structure
//!
//! - [`types`] - Type definitions (ScopeId, ScopeKind, BindingKind, ScopeBinding, etc.)
//! - [`chain`] - `Scope` and `ScopeTree`, the side-table implementation

mod chain;
mod types;

pub use chain::{Scope, ScopeTree};
pub use types::{BindingFlags, BindingKind, RefOffsets, ScopeBinding, ScopeId, ScopeKind};
