//! Cycle-guard state for one resolution call.
//!
//! The trace records every (name, scope) pair a resolution has already
//! searched. Pushing the same pair twice signals a cyclic alias or
//! wildcard-import chain and fails fast instead of looping. The trace is
//! an explicit parameter threaded through every recursive search, never
//! global or thread-local state, so per-module parallel processing stays
//! safe: each top-level resolution call owns exactly one trace.

use std::collections::HashMap;

use ontolink_graph::NodeId;

use crate::error::{ResolveError, ResolveResult};

/// Visited (name, scope) pairs for a single resolution call.
#[derive(Debug, Default)]
pub struct ResolutionTrace {
    visited: HashMap<String, Vec<NodeId>>,
}

impl ResolutionTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        ResolutionTrace::default()
    }

    /// Record that `name` is about to be searched in `scope`.
    ///
    /// Fails with [`ResolveError::CycleDetected`] when this exact pair was
    /// already recorded in this trace.
    pub fn enter(&mut self, name: &str, scope: NodeId) -> ResolveResult<()> {
        let scopes = self.visited.entry(name.to_string()).or_default();
        if scopes.contains(&scope) {
            return Err(ResolveError::CycleDetected {
                name: name.to_string(),
            });
        }
        scopes.push(scope);
        Ok(())
    }

    /// Number of distinct names this trace has touched.
    pub fn names_visited(&self) -> usize {
        self.visited.len()
    }
}
