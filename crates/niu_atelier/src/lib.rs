//! # niu_atelier
//!
//! ## Name Origin
//!
//! An atelier is a workshop where raw material is cut down to its final
//! shape; this crate is where source text is actually rewritten, as
//! opposed to `niu_croquis` (the scope/profit sketchbook it works from).
//!
//! ## Purpose
//!
//! Implements the minification pipeline: parse once with `oxc_parser`,
//! run the byte-cost-driven rewrite passes against that AST, reprint and
//! re-parse between passes that invalidate it, and print a final compact
//! form.
//!
//! ## Architecture
//!
//! ```text
//! oxc_parser -> oxc_ast -> niu_croquis (scope/profit) -> niu_atelier::passes -> oxc_codegen
//! ```

pub mod analyzer;
pub mod error;
pub mod facade;
pub mod passes;
pub mod pipeline;
pub mod rewrite;
pub mod text;

pub use error::{NiuError, ParsePhase};
pub use pipeline::{minify, MinifyOptions, MinifyResult, MinifyStats};
