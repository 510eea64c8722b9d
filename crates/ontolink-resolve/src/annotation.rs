//! Annotation structuring and resolution.
//!
//! Annotations are handled in two passes. Structuring is purely syntactic:
//! it turns the annotation expression into a [`TypeShape`] without looking
//! anything up, so it cannot fail on unresolvable names. Resolution walks
//! the shape and tracks every leaf name to a class declaration, preserving
//! the shape exactly and substituting [`ResolvedType::Unresolved`] for the
//! leaves that do not track. A `Tuple[int, str] | None` annotation thus
//! degrades leaf by leaf, never as a whole.

use tracing::trace;

use ontolink_graph::{ConstValue, NodeId, NodeKind, ResolvedType, SyntaxGraph, TypeShape};

use crate::error::{ResolveError, ResolveResult};
use crate::tracker::{decompose_attribute, track_type_name};

/// Build the syntactic shape of an annotation expression.
///
/// Shapes the structurer does not attempt (stringified forward references,
/// bare tuple or list expressions outside a subscript) come back as
/// [`TypeShape::Unresolved`] rather than an error: a half-structured
/// annotation is still useful to the resolution pass.
pub fn structure_annotation(graph: &SyntaxGraph, expr: NodeId) -> ResolveResult<TypeShape> {
    let shape = match graph.kind(expr) {
        NodeKind::Name { name } => TypeShape::Leaf(name.clone()),
        NodeKind::Attribute { .. } => match decompose_attribute(graph, expr) {
            Ok(segments) => TypeShape::Leaf(segments.join(".")),
            Err(_) => TypeShape::Unresolved,
        },
        NodeKind::Const { value } => match value {
            ConstValue::None => TypeShape::Leaf("NoneType".to_string()),
            ConstValue::Ellipsis => TypeShape::Leaf("Any".to_string()),
            _ => TypeShape::Unresolved,
        },
        NodeKind::BinOp { op, .. } if op == "|" => {
            let mut alternatives = Vec::new();
            flatten_union(graph, expr, &mut alternatives)?;
            TypeShape::Union(alternatives)
        }
        NodeKind::Subscript { value, slice } => {
            let base = structure_annotation(graph, *value)?;
            let args = match graph.kind(*slice) {
                NodeKind::TupleExpr { elements } | NodeKind::ListExpr { elements } => elements
                    .iter()
                    .map(|&e| structure_annotation(graph, e))
                    .collect::<ResolveResult<Vec<_>>>()?,
                _ => vec![structure_annotation(graph, *slice)?],
            };
            TypeShape::Parameterized {
                base: Box::new(base),
                args,
            }
        }
        _ => TypeShape::Unresolved,
    };
    Ok(shape)
}

/// Flatten a left-associative chain of `|` operators into one alternative
/// list, so `a | b | c` structures as a three-way union rather than nested
/// pairs.
fn flatten_union(
    graph: &SyntaxGraph,
    expr: NodeId,
    out: &mut Vec<TypeShape>,
) -> ResolveResult<()> {
    match graph.kind(expr) {
        NodeKind::BinOp { op, left, right } if op == "|" => {
            flatten_union(graph, *left, out)?;
            flatten_union(graph, *right, out)?;
        }
        _ => out.push(structure_annotation(graph, expr)?),
    }
    Ok(())
}

/// Structure an annotation expression and resolve every leaf to the class
/// declaration it names.
pub fn resolve_annotation(graph: &SyntaxGraph, expr: NodeId) -> ResolveResult<ResolvedType> {
    let shape = structure_annotation(graph, expr)?;
    let scope = graph
        .enclosing_scope(expr)
        .ok_or_else(|| ResolveError::unsupported("annotation expression outside any scope"))?;
    Ok(resolve_shape(graph, &shape, scope))
}

/// Resolve a structured shape within a scope. Shape-preserving: each leaf
/// resolves independently and failures stay local to their leaf.
pub(crate) fn resolve_shape(
    graph: &SyntaxGraph,
    shape: &TypeShape,
    scope: NodeId,
) -> ResolvedType {
    match shape {
        TypeShape::Leaf(name) => match track_type_name(graph, name, scope) {
            Ok(class) => ResolvedType::Class(class),
            Err(err) => {
                trace!(leaf = %name, %err, "annotation leaf did not resolve");
                ResolvedType::Unresolved
            }
        },
        TypeShape::Union(alternatives) => ResolvedType::Union(
            alternatives
                .iter()
                .map(|alt| resolve_shape(graph, alt, scope))
                .collect(),
        ),
        TypeShape::Parameterized { base, args } => ResolvedType::Parameterized {
            base: Box::new(resolve_shape(graph, base, scope)),
            args: args
                .iter()
                .map(|arg| resolve_shape(graph, arg, scope))
                .collect(),
        },
        TypeShape::Unresolved => ResolvedType::Unresolved,
    }
}
