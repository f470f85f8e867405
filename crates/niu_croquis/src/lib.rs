//! # niu_croquis
//!
//! Croquis - the semantic analysis layer for niu.
//!
//! ## Name Origin
//!
//! **Croquis** (/kʁɔ.ki/) is a French term for a quick, sketchy drawing that
//! captures the essential features of a subject. `niu_croquis` quickly
//! analyzes JavaScript source to extract the semantic meaning (scopes,
//! bindings, byte cost) the rewrite passes need from the syntactic
//! structure `oxc_parser` hands back.
//!
//! ## Purpose
//!
//! This crate holds everything the rewrite passes need that is *not*
//! traversal itself (traversal lives in `niu_atelier::analyzer`, which
//! builds a [`scope::ScopeTree`] by walking `oxc_ast` nodes):
//!
//! - **Scope side table** ([`scope`]): an explicit scope tree, rebuilt by
//!   re-parsing rather than patched in place, since every pass here
//!   rewrites source text rather than mutating the AST (see DESIGN.md).
//! - **Profit model** ([`profit`]): the pure byte-cost arithmetic shared
//!   by the global hoister and the duplicate-literal hoister.
//! - **Mangling alphabet** ([`naming`]): the frequency-ordered short-name
//!   generator the identifier mangler assigns names from.
//!
//! ## Architecture
//!
//! ```text
//! oxc_parser (Parse)
//!        ↓
//!    oxc_ast (AST)
//!        ↓
//!  niu_croquis (Scope + Profit model)  ← This crate
//!        ↓
//! niu_atelier (Traversal + Passes)
//! ```

pub mod naming;
pub mod profit;
pub mod scope;

pub use scope::{BindingFlags, BindingKind, ScopeBinding, ScopeId, ScopeKind, ScopeTree};
