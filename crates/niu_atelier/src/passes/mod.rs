//! The four rewrite passes, run in the order spec.md §6 lays out: global
//! hoisting and duplicate-literal hoisting share one AST (both read-only,
//! applied as independent splice sets against the same source), then the
//! program is reprinted, reparsed, and mangled, and finally (opt-in)
//! every `const` becomes a `let`.

pub mod const_to_let;
pub mod global_hoist;
pub mod literal_hoist;
pub mod mangle;
