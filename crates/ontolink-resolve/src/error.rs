//! The resolution failure taxonomy.
//!
//! Every resolution outcome is a sum type, never a nullable with ambient
//! exceptions: callers are forced to handle absence explicitly. All
//! variants except [`ResolveError::Provider`] describe the analyzed code's
//! own ambiguity or dynamism and are locally recoverable; the annotation
//! pass converts them into "no result" for the one item being resolved.

use thiserror::Error;

use ontolink_graph::GraphError;

/// Ways a single resolution can fail.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Nothing found. The common, expected case for dynamic or
    /// unanalyzable code.
    #[error("no declaration found for '{name}'")]
    NoMatch { name: String },

    /// An alias or wildcard-import chain looped back on itself.
    #[error("cyclic resolution detected while tracking '{name}'")]
    CycleDetected { name: String },

    /// A shape the resolver intentionally does not attempt, e.g. an
    /// attribute chain anchored at a call or subscript result.
    #[error("unsupported construct: {detail}")]
    UnsupportedConstruct { detail: String },

    /// Alias chasing exceeded its step cap. Reported as failure, never as
    /// a silent partial result.
    #[error("iteration budget exceeded while following aliases from '{name}'")]
    IterationBudgetExceeded { name: String },

    /// The syntax graph provider could not locate or produce something
    /// (typically a referenced module with no obtainable source).
    #[error("provider failure: {0}")]
    Provider(#[from] GraphError),
}

impl ResolveError {
    pub(crate) fn no_match(name: impl Into<String>) -> Self {
        ResolveError::NoMatch { name: name.into() }
    }

    pub(crate) fn unsupported(detail: impl Into<String>) -> Self {
        ResolveError::UnsupportedConstruct {
            detail: detail.into(),
        }
    }
}

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
