//! # niu
//!
//! A byte-cost-driven JavaScript/TypeScript minifier.
//!
//! This crate re-exports niu's sub-crates for unified documentation and
//! houses the CLI binary (`src/main.rs`).
//!
//! ## Crates
//!
//! - [`carton`] - small shared types (`CompactString`, `SmallVec`, fast
//!   hash maps) with no niu-specific logic of their own.
//! - [`croquis`] - the scope side table, the byte-cost profit model, and
//!   the mangling alphabet.
//! - [`atelier`] - the parser/printer facade, the scope-building walker,
//!   and the four rewrite passes.

/// Small shared types.
pub use niu_carton as carton;

/// Scope tracking, profit model, mangling alphabet.
pub use niu_croquis as croquis;

/// Parser/printer facade and rewrite passes.
pub use niu_atelier as atelier;
