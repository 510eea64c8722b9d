//! Error types for the syntax graph provider.

use thiserror::Error;

/// Errors raised by the syntax graph provider.
///
/// Provider errors are the only failures the resolution engine treats as
/// potentially fatal; everything about the analyzed code's own ambiguity is
/// absorbed at the engine layer instead.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A dotted module identifier could not be resolved to a module root
    /// (no obtainable source for that module).
    #[error("module '{path}' not found in the graph")]
    ModuleNotFound { path: String },

    /// The class hierarchy admits no consistent C3 linearization.
    #[error("inconsistent hierarchy for class '{class_name}': cannot linearize")]
    InconsistentHierarchy { class_name: String },

    /// The graph itself is malformed (detached node, wrong kind in a
    /// structural position). Indicates a construction bug, not analyzed-code
    /// dynamism.
    #[error("malformed graph: {detail}")]
    Malformed { detail: String },
}

/// Result type for graph provider operations.
pub type GraphResult<T> = Result<T, GraphError>;
