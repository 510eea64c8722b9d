//! Class field inference and merging.
//!
//! The analyzed language has no field declarations; fields emerge from
//! assignments in class bodies and constructors. This pass replays those
//! assignments in interpreter order and merges same-named occurrences into
//! one record per field:
//!
//! 1. ancestor class bodies, oldest ancestor first;
//! 2. the class's own body;
//! 3. the class's own constructor, where a `super().__init__(...)` or
//!    `Ancestor.__init__(self, ...)` call inlines that ancestor's
//!    constructor assignments at the call site.
//!
//! Ancestor constructors contribute only through such explicit calls, the
//! same way the interpreter would run them. Within a merged record the
//! newest occurrence supplies both annotation and value, interpreter
//! style, while the oldest occurrence remains the declaring site.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, trace};

use ontolink_graph::{
    FieldRecord, NodeId, NodeKind, ResolvedType, SyntaxGraph,
};

use crate::annotation::resolve_annotation;
use crate::error::ResolveResult;
use crate::tracker::track_name;
use crate::values::resolve_value;

/// One raw field occurrence, before merging.
struct FieldCandidate {
    name: String,
    annotation: Option<NodeId>,
    /// Absent for tuple-assignment elements, where the aggregate value
    /// cannot be attributed to one element.
    value: Option<NodeId>,
    site: NodeId,
}

/// Infer and merge the fields of a class, in replay order.
pub fn merged_fields(graph: &SyntaxGraph, class: NodeId) -> ResolveResult<Vec<FieldRecord>> {
    let order = graph.linearization(class)?.to_vec();

    let mut candidates = Vec::new();
    for &ancestor in order[1..].iter().rev() {
        collect_body_fields(graph, ancestor, &mut candidates);
    }
    collect_body_fields(graph, class, &mut candidates);
    if let Some(ctor) = constructor_of(graph, class) {
        let mut replayed = HashSet::new();
        collect_ctor_fields(graph, class, ctor, &mut replayed, &mut candidates);
    }

    let mut merged: IndexMap<String, FieldRecord> = IndexMap::new();
    for candidate in candidates {
        match merged.get_mut(&candidate.name) {
            Some(record) => {
                record.annotation = candidate.annotation;
                record.value = candidate.value;
            }
            None => {
                merged.insert(
                    candidate.name.clone(),
                    FieldRecord {
                        name: candidate.name,
                        annotation: candidate.annotation,
                        value: candidate.value,
                        declaring_site: candidate.site,
                        ty: None,
                    },
                );
            }
        }
    }

    let mut records: Vec<FieldRecord> = merged.into_values().collect();
    for record in &mut records {
        record.ty = field_type(graph, record);
    }
    Ok(records)
}

/// Collect field occurrences from plain and annotated assignments in a
/// class body. Methods, nested classes, and names declared `global` in
/// the body do not contribute.
fn collect_body_fields(graph: &SyntaxGraph, class: NodeId, out: &mut Vec<FieldCandidate>) {
    let body = match graph.kind(class) {
        NodeKind::ClassDef { body, .. } => body.clone(),
        _ => return,
    };
    for stmt in body {
        match graph.kind(stmt) {
            NodeKind::Assign { targets, value } => {
                for &target in targets {
                    match graph.kind(target) {
                        NodeKind::AssignName { name } => {
                            if !declared_global(graph, stmt, name) {
                                out.push(FieldCandidate {
                                    name: name.clone(),
                                    annotation: None,
                                    value: Some(*value),
                                    site: target,
                                });
                            }
                        }
                        NodeKind::TupleExpr { elements } => {
                            for &element in elements {
                                if let NodeKind::AssignName { name } = graph.kind(element) {
                                    if !declared_global(graph, stmt, name) {
                                        out.push(FieldCandidate {
                                            name: name.clone(),
                                            annotation: None,
                                            value: None,
                                            site: element,
                                        });
                                    }
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
            NodeKind::AnnAssign {
                target,
                annotation,
                value,
            } => {
                if let NodeKind::AssignName { name } = graph.kind(*target) {
                    if !declared_global(graph, stmt, name) {
                        out.push(FieldCandidate {
                            name: name.clone(),
                            annotation: Some(*annotation),
                            value: *value,
                            site: *target,
                        });
                    }
                }
            }
            _ => {}
        }
    }
}

/// Whether `name` was declared `global` by an earlier sibling statement:
/// such an assignment rebinds a module-level name, not a class field.
fn declared_global(graph: &SyntaxGraph, stmt: NodeId, name: &str) -> bool {
    let mut prev = graph.previous_sibling(stmt);
    while let Some(p) = prev {
        if matches!(graph.kind(p), NodeKind::Global { names } if names.iter().any(|n| n == name)) {
            return true;
        }
        prev = graph.previous_sibling(p);
    }
    false
}

/// Collect field occurrences from a constructor body: assignments to
/// attributes of the receiver parameter, plus inlined replays of ancestor
/// constructors invoked from it. `replayed` guards against constructor
/// call cycles.
fn collect_ctor_fields(
    graph: &SyntaxGraph,
    class: NodeId,
    ctor: NodeId,
    replayed: &mut HashSet<NodeId>,
    out: &mut Vec<FieldCandidate>,
) {
    if !replayed.insert(ctor) {
        return;
    }
    let Some(receiver) = receiver_name(graph, ctor) else {
        return;
    };
    let body = match graph.kind(ctor) {
        NodeKind::FunctionDef { body, .. } => body.clone(),
        _ => return,
    };

    for stmt in body {
        match graph.kind(stmt) {
            NodeKind::Assign { targets, value } => {
                for &target in targets {
                    match graph.kind(target) {
                        NodeKind::AssignAttr { base, attr } => {
                            if is_receiver(graph, *base, &receiver) {
                                out.push(FieldCandidate {
                                    name: attr.clone(),
                                    annotation: None,
                                    value: Some(*value),
                                    site: target,
                                });
                            }
                        }
                        NodeKind::TupleExpr { elements } => {
                            for &element in elements {
                                if let NodeKind::AssignAttr { base, attr } = graph.kind(element) {
                                    if is_receiver(graph, *base, &receiver) {
                                        out.push(FieldCandidate {
                                            name: attr.clone(),
                                            annotation: None,
                                            value: None,
                                            site: element,
                                        });
                                    }
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
            NodeKind::AnnAssign {
                target,
                annotation,
                value,
            } => {
                if let NodeKind::AssignAttr { base, attr } = graph.kind(*target) {
                    if is_receiver(graph, *base, &receiver) {
                        out.push(FieldCandidate {
                            name: attr.clone(),
                            annotation: Some(*annotation),
                            value: *value,
                            site: *target,
                        });
                    }
                }
            }
            NodeKind::ExprStmt { value } => {
                if let Some(ancestor) = ancestor_ctor_call(graph, class, *value) {
                    if let Some(ancestor_ctor) = constructor_of(graph, ancestor) {
                        collect_ctor_fields(graph, ancestor, ancestor_ctor, replayed, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn is_receiver(graph: &SyntaxGraph, base: NodeId, receiver: &str) -> bool {
    matches!(graph.kind(base), NodeKind::Name { name } if name == receiver)
}

/// The receiver parameter name of a method (`None` for static methods
/// and parameterless definitions).
fn receiver_name(graph: &SyntaxGraph, method: NodeId) -> Option<String> {
    match graph.kind(method) {
        NodeKind::FunctionDef {
            is_static: false,
            params,
            ..
        } => params
            .first()
            .and_then(|&p| graph.name_of(p))
            .map(str::to_string),
        _ => None,
    }
}

/// The constructor a class would run: the first class in its
/// linearization that directly declares one. Hierarchy inconsistencies
/// are absorbed here; an unlinearizable ancestor simply contributes no
/// constructor.
fn constructor_of(graph: &SyntaxGraph, class: NodeId) -> Option<NodeId> {
    let order = match graph.linearization(class) {
        Ok(order) => order,
        Err(err) => {
            debug!(class = %class, %err, "skipping constructor lookup");
            return None;
        }
    };
    for &candidate_class in order {
        for method in graph.methods_of(candidate_class) {
            if graph.name_of(method) == Some("__init__") {
                return Some(method);
            }
        }
    }
    None
}

/// Detect a constructor delegation call and resolve the ancestor it
/// targets: `super().__init__(...)` delegates to the first class along
/// the caller's linearization that declares a constructor (runtime
/// dispatch order), `Ancestor.__init__(self, ...)` to the named class,
/// which must actually be an ancestor.
fn ancestor_ctor_call(graph: &SyntaxGraph, class: NodeId, expr: NodeId) -> Option<NodeId> {
    let NodeKind::Call { func, .. } = graph.kind(expr) else {
        return None;
    };
    let NodeKind::Attribute { base, attr } = graph.kind(*func) else {
        return None;
    };
    if attr != "__init__" {
        return None;
    }
    match graph.kind(*base) {
        NodeKind::Call { func: inner, .. } => {
            if !matches!(graph.kind(*inner), NodeKind::Name { name } if name == "super") {
                return None;
            }
            let order = graph.linearization(class).ok()?;
            order[1..]
                .iter()
                .copied()
                .find(|&ancestor| declares_constructor(graph, ancestor))
        }
        NodeKind::Name { .. } => match track_name(graph, *base) {
            Ok(target) if matches!(graph.kind(target), NodeKind::ClassDef { .. }) => {
                let order = graph.linearization(class).ok()?;
                if order[1..].contains(&target) {
                    Some(target)
                } else {
                    trace!(class = %class, target = %target, "delegation target is not an ancestor");
                    None
                }
            }
            Ok(_) => None,
            Err(err) => {
                trace!(class = %class, %err, "delegation target did not resolve");
                None
            }
        },
        _ => None,
    }
}

fn declares_constructor(graph: &SyntaxGraph, class: NodeId) -> bool {
    graph
        .methods_of(class)
        .iter()
        .any(|&m| graph.name_of(m) == Some("__init__"))
}

/// Best-effort type of a merged field: the resolved annotation when it
/// resolves to something, otherwise the class inferred from the newest
/// value.
fn field_type(graph: &SyntaxGraph, record: &FieldRecord) -> Option<ResolvedType> {
    if let Some(annotation) = record.annotation {
        if let Ok(ty) = resolve_annotation(graph, annotation) {
            if ty != ResolvedType::Unresolved {
                return Some(ty);
            }
        }
    }
    let value = record.value?;
    match resolve_value(graph, value) {
        Ok(class) => Some(ResolvedType::Class(class)),
        Err(err) => {
            trace!(field = %record.name, %err, "field value did not resolve");
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
