//! Value-to-type resolution.
//!
//! Given an assigned value expression, determine the class declaration its
//! runtime value would be an instance of. The provider's `infer` primitive
//! supplies candidates; this module examines a bounded number of them,
//! normalizes prefixed type names, and tracks each name back to a class
//! declaration. The first candidate that lands on a class wins.

use tracing::trace;

use ontolink_graph::{Inferred, NodeId, NodeKind, SyntaxGraph};

use crate::error::{ResolveError, ResolveResult};
use crate::tracker::track_type_name;

/// Cap on inference candidates examined per value. Inference on dynamic
/// code can produce long speculative candidate lists whose tail is noise.
pub(crate) const MAX_INFER_CANDIDATES: usize = 3;

/// Resolve the class a value expression evaluates to an instance of.
///
/// Candidate type names arrive prefixed in several spellings depending on
/// where inference found them (`builtins.str`, `.LocalClass`, or the
/// defining module's own name); the leading qualifier is stripped before
/// tracking so that lookup starts from a name the scope can actually see.
pub fn resolve_value(graph: &SyntaxGraph, value: NodeId) -> ResolveResult<NodeId> {
    let scope = graph
        .enclosing_scope(value)
        .ok_or_else(|| ResolveError::unsupported("value expression outside any scope"))?;
    let own_module = graph
        .module_of(value)
        .and_then(|m| graph.name_of(m))
        .map(str::to_string);

    for candidate in graph.infer(value).into_iter().take(MAX_INFER_CANDIDATES) {
        match candidate {
            Inferred::Class(class) => {
                if matches!(graph.kind(class), NodeKind::ClassDef { .. }) {
                    return Ok(class);
                }
            }
            Inferred::TypeName(dotted) => {
                let normalized = normalize_type_name(&dotted, own_module.as_deref());
                match track_type_name(graph, normalized, scope) {
                    Ok(class) => return Ok(class),
                    Err(err) => {
                        trace!(candidate = %dotted, %err, "inference candidate did not resolve");
                    }
                }
            }
        }
    }

    Err(ResolveError::no_match(describe_value(graph, value)))
}

/// Strip a redundant leading qualifier from an inferred type name:
/// an empty segment (relative spelling), the builtins module, or the
/// expression's own module. Only the first segment is eligible.
fn normalize_type_name<'a>(dotted: &'a str, own_module: Option<&str>) -> &'a str {
    if let Some((first, rest)) = dotted.split_once('.') {
        if first.is_empty() || first == "builtins" || Some(first) == own_module {
            return rest;
        }
    }
    dotted
}

fn describe_value(graph: &SyntaxGraph, value: NodeId) -> String {
    graph
        .name_of(value)
        .map(str::to_string)
        .unwrap_or_else(|| format!("<value {value}>"))
}
