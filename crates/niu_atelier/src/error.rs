//! Error types for the niu pipeline.

use thiserror::Error;

/// Which parse this failure happened at, so a caller can tell "your source
/// doesn't parse" apart from "niu produced unparseable output" (the latter
/// is always an invariant violation inside a pass, never a user error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePhase {
    /// The original input source.
    Input,
    /// The re-parse between the hoisting passes and the mangler.
    PostHoist,
}

impl std::fmt::Display for ParsePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::PostHoist => write!(f, "post-hoist re-parse"),
        }
    }
}

#[derive(Debug, Error)]
pub enum NiuError {
    #[error("{phase} parse failed: {message}")]
    Parse { phase: ParsePhase, message: String },

    /// A fatal programmer error: a placeholder name collision, a binding
    /// with no resolvable scope, or some other state the pipeline's own
    /// invariants rule out. Per spec.md §7 these are never masked.
    #[error("internal invariant violated: {0}")]
    Invariant(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
