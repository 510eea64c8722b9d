//! Ancestor linearization using C3.
//!
//! The analyzed language resolves attribute and method lookups through a
//! linearized ancestor order under multiple inheritance. C3 guarantees:
//!
//! - children precede their parents,
//! - direct bases keep their declaration order,
//! - the ordering is consistent across the hierarchy.
//!
//! The linearization of a class starts with the class itself; consumers
//! that only want ancestors skip the first entry. Results are cached on
//! the class node by [`SyntaxGraph::linearization`].

use std::collections::HashSet;

use crate::arena::{NodeId, NodeKind, SyntaxGraph};
use crate::error::{GraphError, GraphResult};

/// Compute the C3 linearization for a class node.
///
/// Bases that are not class definitions are skipped (unresolvable external
/// bases). An inheritance cycle or an order conflict among bases yields
/// [`GraphError::InconsistentHierarchy`].
pub(crate) fn linearize(graph: &SyntaxGraph, class: NodeId) -> GraphResult<Vec<NodeId>> {
    let mut visited = HashSet::new();
    linearize_internal(graph, class, &mut visited)
}

fn linearize_internal(
    graph: &SyntaxGraph,
    class: NodeId,
    visited: &mut HashSet<NodeId>,
) -> GraphResult<Vec<NodeId>> {
    if !visited.insert(class) {
        return Err(inconsistent(graph, class));
    }

    let bases: Vec<NodeId> = match graph.kind(class) {
        NodeKind::ClassDef { bases, .. } => bases
            .iter()
            .copied()
            .filter(|&b| matches!(graph.kind(b), NodeKind::ClassDef { .. }))
            .collect(),
        _ => {
            visited.remove(&class);
            return Err(GraphError::Malformed {
                detail: format!("linearization requested for non-class node {class}"),
            });
        }
    };

    if bases.is_empty() {
        visited.remove(&class);
        return Ok(vec![class]);
    }

    // Linearize each base, then merge with the list of direct bases.
    let mut seqs: Vec<Vec<NodeId>> = Vec::new();
    for base in &bases {
        seqs.push(linearize_internal(graph, *base, visited)?);
    }
    seqs.push(bases);

    let mut order = vec![class];
    match merge(&mut seqs) {
        Some(merged) => order.extend(merged),
        None => {
            visited.remove(&class);
            return Err(inconsistent(graph, class));
        }
    }

    visited.remove(&class);
    Ok(order)
}

fn inconsistent(graph: &SyntaxGraph, class: NodeId) -> GraphError {
    GraphError::InconsistentHierarchy {
        class_name: graph.name_of(class).unwrap_or("<anonymous>").to_string(),
    }
}

/// C3 merge: repeatedly take a head that appears in no sequence tail,
/// append it, and strip it from all heads. `None` when no such head
/// exists, which means the hierarchy is inconsistent.
fn merge(seqs: &mut Vec<Vec<NodeId>>) -> Option<Vec<NodeId>> {
    let mut result = Vec::new();

    loop {
        seqs.retain(|seq| !seq.is_empty());
        if seqs.is_empty() {
            return Some(result);
        }

        let mut candidate = None;
        for seq in seqs.iter() {
            let head = seq[0];
            let in_tail = seqs.iter().any(|s| s.len() > 1 && s[1..].contains(&head));
            if !in_tail {
                candidate = Some(head);
                break;
            }
        }

        let cand = candidate?;
        result.push(cand);
        for seq in seqs.iter_mut() {
            if seq.first() == Some(&cand) {
                seq.remove(0);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
