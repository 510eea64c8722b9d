//! The memoizing annotation pass.
//!
//! Wraps every resolver in this crate behind the write-once derived slots
//! on graph nodes, so each node's outcome is computed at most once no
//! matter how many paths reach it. Failed resolutions are recorded as
//! absent and reused too. Failures are absorbed here, at the boundary of
//! the single node being annotated: one dynamic name never aborts its
//! siblings or the module pass.

use tracing::{debug, trace};

use ontolink_graph::{FieldRecord, NodeId, NodeKind, ResolvedType, SyntaxGraph};

use crate::annotation::resolve_annotation;
use crate::fields::merged_fields;
use crate::overrides::find_override;
use crate::tracker::{track_attribute, track_name};

/// Declaration site an occurrence refers to, memoized on the node.
///
/// Covers name and attribute occurrences and import statements; an import
/// statement's reference is the module it brings in (for multi-entry
/// imports, the first entry that resolves).
pub fn reference_of(graph: &SyntaxGraph, occurrence: NodeId) -> Option<NodeId> {
    graph
        .derived(occurrence)
        .reference
        .get_or_compute(|| compute_reference(graph, occurrence))
        .copied()
}

fn compute_reference(graph: &SyntaxGraph, occurrence: NodeId) -> Option<NodeId> {
    let outcome = match graph.kind(occurrence) {
        NodeKind::Name { .. } | NodeKind::AssignName { .. } => track_name(graph, occurrence),
        NodeKind::Attribute { .. } | NodeKind::AssignAttr { .. } => {
            track_attribute(graph, occurrence)
        }
        NodeKind::Import { names } => {
            return names
                .iter()
                .find_map(|entry| graph.resolve_module(&entry.name).ok());
        }
        NodeKind::ImportFrom { module, .. } => {
            graph.resolve_module(module).map_err(Into::into)
        }
        _ => return None,
    };
    match outcome {
        Ok(site) => Some(site),
        Err(err) => {
            trace!(occurrence = %occurrence, %err, "reference not resolved");
            None
        }
    }
}

/// Merged fields of a class, memoized on the class node.
pub fn fields_of(graph: &SyntaxGraph, class: NodeId) -> Option<&[FieldRecord]> {
    graph
        .derived(class)
        .fields
        .get_or_compute(|| match merged_fields(graph, class) {
            Ok(records) => Some(records),
            Err(err) => {
                debug!(class = %class, %err, "field merge failed");
                None
            }
        })
        .map(Vec::as_slice)
}

/// Overridden ancestor method of a method, memoized on the method node.
/// Absent covers both "overrides nothing" and "hierarchy unresolvable".
pub fn override_of(graph: &SyntaxGraph, method: NodeId) -> Option<NodeId> {
    graph
        .derived(method)
        .override_link
        .get_or_compute(|| match find_override(graph, method) {
            Ok(target) => target,
            Err(err) => {
                debug!(method = %method, %err, "override linking failed");
                None
            }
        })
        .copied()
}

/// Resolved return annotation of a function, memoized on the function
/// node. Absent for unannotated functions.
pub fn return_type_of(graph: &SyntaxGraph, func: NodeId) -> Option<&ResolvedType> {
    graph.derived(func).return_type.get_or_compute(|| {
        let NodeKind::FunctionDef {
            returns: Some(annotation),
            ..
        } = graph.kind(func)
        else {
            return None;
        };
        resolve_annotation(graph, *annotation).ok()
    })
}

/// Resolved annotation of a parameter, memoized on the parameter node.
pub fn param_type_of(graph: &SyntaxGraph, param: NodeId) -> Option<&ResolvedType> {
    graph.derived(param).param_type.get_or_compute(|| {
        let NodeKind::Param {
            annotation: Some(annotation),
            ..
        } = graph.kind(param)
        else {
            return None;
        };
        resolve_annotation(graph, *annotation).ok()
    })
}

/// Annotate every node of a module: resolve references for occurrences
/// and imports, fields and linearizations for classes, override links and
/// return types for functions, types for parameters.
///
/// The walk is an explicit stack over structural children, so deeply
/// nested fixtures cannot overflow the call stack, and it is re-entrant
/// with respect to other modules: resolutions that cross into a module
/// not yet annotated simply fill that module's slots early.
pub fn annotate_module(graph: &SyntaxGraph, module: NodeId) {
    debug!(module = %module, "annotating module");
    let mut stack = vec![module];
    while let Some(node) = stack.pop() {
        match graph.kind(node) {
            NodeKind::Name { .. }
            | NodeKind::AssignName { .. }
            | NodeKind::Attribute { .. }
            | NodeKind::AssignAttr { .. }
            | NodeKind::Import { .. }
            | NodeKind::ImportFrom { .. } => {
                reference_of(graph, node);
            }
            NodeKind::ClassDef { .. } => {
                fields_of(graph, node);
            }
            NodeKind::FunctionDef { .. } => {
                override_of(graph, node);
                return_type_of(graph, node);
            }
            NodeKind::Param { .. } => {
                param_type_of(graph, node);
            }
            _ => {}
        }
        stack.extend(graph.children(node));
    }
}

// ============================================================================
// Tests
// ============================================================================
