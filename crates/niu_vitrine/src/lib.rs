//! # niu_vitrine
//!
//! ## Name Origin
//!
//! A vitrine is a display case; this crate is where niu is put on display
//! for a Node.js bundler to call into.
//!
//! ## Purpose
//!
//! NAPI bindings exposing `niu_atelier`'s minification pipeline as a
//! `minify(source, options)` function and a `createPlugin(options)`
//! factory shaped like an esbuild/Rollup/Vite plugin object (spec.md's
//! "bundler integration" surface, per SPEC_FULL.md §4.10).

#[cfg(feature = "napi")]
pub mod napi;
