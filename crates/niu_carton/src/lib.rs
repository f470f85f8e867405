//! Carton - the shared toolbox for niu.
//!
//! Much like a carton (artist's portfolio case) holds the tools an artist needs,
//! this crate re-exports the small set of general-purpose types every other niu
//! crate builds on, so they stay pinned to one version and one import path.
//!
//! # Example
//!
//! ```
//! use niu_carton::{CompactString, FxHashMap};
//!
//! let mut counts: FxHashMap<CompactString, u32> = FxHashMap::default();
//! *counts.entry("Array".into()).or_insert(0) += 1;
//! assert_eq!(counts["Array"], 1);
//! ```

// Re-export compact_str::CompactString for short-string-optimized identifiers.
pub use compact_str::CompactString;

// Re-export smallvec for stack-allocated small collections (reference lists, etc).
pub use smallvec::{smallvec, SmallVec};

// Re-export bitflags for binding-flag structs.
pub use bitflags::bitflags;

// Re-export rustc-hash for fast, non-DoS-resistant hash maps/sets (internal use only).
pub use rustc_hash::{FxHashMap, FxHashSet};
