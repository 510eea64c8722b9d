//! Name and attribute tracking.
//!
//! Resolves a single identifier or dotted-attribute chain, starting from a
//! local occurrence, to the declaration site that defines it, possibly in
//! another module. Lookup follows the analyzed language's scope chain:
//! function, enclosing functions, module, with `global`/`nonlocal`
//! statements redirecting where the search starts. Matches that are import
//! statements are resolved through the imported module; matches that are
//! plain alias assignments are followed to their right-hand side under an
//! iteration budget.
//!
//! All searches thread a [`ResolutionTrace`] to fail fast on cyclic alias
//! and wildcard-import chains.

use tracing::{debug, trace};

use ontolink_graph::{GraphError, ImportedName, NodeId, NodeKind, SyntaxGraph};

use crate::error::{ResolveError, ResolveResult};
use crate::trace::ResolutionTrace;
use crate::values::resolve_value;

/// Cap on alias-chain steps. Type names in stub-heavy modules are often
/// aliases of aliases (`Tuple` -> `_TupleType` and the like); ten steps is
/// far beyond anything legitimate.
pub(crate) const MAX_ALIAS_ITERATIONS: usize = 10;

/// Node kinds that can stand as a declaration site.
fn is_declaration_site(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Module { .. }
            | NodeKind::ClassDef { .. }
            | NodeKind::FunctionDef { .. }
            | NodeKind::AssignName { .. }
            | NodeKind::AssignAttr { .. }
            | NodeKind::Param { .. }
    )
}

fn detached(node: NodeId) -> ResolveError {
    ResolveError::Provider(GraphError::Malformed {
        detail: format!("node {node} has no enclosing scope"),
    })
}

// ============================================================================
// Bare Names
// ============================================================================

/// Resolve a `Name` or `AssignName` occurrence to its declaration site.
///
/// Applies `global`/`nonlocal` redirection, scope-chained lookup, import
/// resolution, wildcard imports, and finally follows plain alias
/// assignments on the match under [`MAX_ALIAS_ITERATIONS`].
pub fn track_name(graph: &SyntaxGraph, occurrence: NodeId) -> ResolveResult<NodeId> {
    let matched = resolve_name_occurrence(graph, occurrence)?;
    let name = graph.name_of(occurrence).unwrap_or_default().to_string();
    follow_alias_chain(graph, &name, matched)
}

/// Steps 1-4 of bare-name tracking: redirect scan plus scoped search,
/// without alias following. Alias chains are followed iteratively on top
/// of this so that mutually-aliasing assignments cannot recurse.
fn resolve_name_occurrence(graph: &SyntaxGraph, occurrence: NodeId) -> ResolveResult<NodeId> {
    let name = match graph.kind(occurrence) {
        NodeKind::Name { name } | NodeKind::AssignName { name } => name.clone(),
        _ => {
            return Err(ResolveError::unsupported(
                "name tracking requires a Name or AssignName occurrence",
            ))
        }
    };

    // A `global`/`nonlocal` earlier in the same statement sequence
    // redirects where the search starts. Sibling statements only; nested
    // blocks do not count.
    let mut redirect = None;
    if let Some(stmt) = graph.statement_of(occurrence) {
        let mut prev = graph.previous_sibling(stmt);
        while let Some(p) = prev {
            match graph.kind(p) {
                NodeKind::Global { names } if names.iter().any(|n| n == &name) => {
                    redirect = Some(ScopeRedirect::Global);
                    break;
                }
                NodeKind::Nonlocal { names } if names.iter().any(|n| n == &name) => {
                    redirect = Some(ScopeRedirect::Nonlocal(p));
                    break;
                }
                _ => {}
            }
            prev = graph.previous_sibling(p);
        }
    }

    let mut trace = ResolutionTrace::new();
    match redirect {
        None => {
            let scope = graph
                .enclosing_scope(occurrence)
                .ok_or_else(|| detached(occurrence))?;
            track_name_in_scope(graph, &name, scope, &mut trace, true)
        }
        Some(ScopeRedirect::Global) => {
            let module = graph
                .module_of(occurrence)
                .ok_or_else(|| detached(occurrence))?;
            track_name_in_scope(graph, &name, module, &mut trace, true)
        }
        Some(ScopeRedirect::Nonlocal(stmt)) => {
            track_name_from_nonlocal(graph, &name, stmt, &mut trace)
        }
    }
}

enum ScopeRedirect {
    Global,
    Nonlocal(NodeId),
}

/// `nonlocal` search: layered closure semantics. Try each enclosing
/// function scope above the current one, nearest first, without extending
/// past function scopes.
fn track_name_from_nonlocal(
    graph: &SyntaxGraph,
    name: &str,
    stmt: NodeId,
    trace: &mut ResolutionTrace,
) -> ResolveResult<NodeId> {
    let current = graph.enclosing_scope(stmt).ok_or_else(|| detached(stmt))?;
    let mut upper = parent_scope(graph, current);
    while let Some(scope) = upper {
        if !matches!(graph.kind(scope), NodeKind::FunctionDef { .. }) {
            break;
        }
        if let Ok(matched) = track_name_in_scope(graph, name, scope, trace, false) {
            return Ok(matched);
        }
        upper = parent_scope(graph, scope);
    }
    Err(ResolveError::no_match(name))
}

fn parent_scope(graph: &SyntaxGraph, scope: NodeId) -> Option<NodeId> {
    graph.parent(scope).and_then(|p| graph.enclosing_scope(p))
}

/// Scoped lookup with optional outward extension.
///
/// First match within a scope wins: declaration order defines precedence
/// at the scope's own level. When the scope yields nothing and `extend`
/// is set, the search retries outward; at module scope it falls through
/// to wildcard imports and finally the builtins module.
pub(crate) fn track_name_in_scope(
    graph: &SyntaxGraph,
    name: &str,
    scope: NodeId,
    trace: &mut ResolutionTrace,
    extend: bool,
) -> ResolveResult<NodeId> {
    trace.enter(name, scope)?;

    let matches = graph.lookup(scope, name);
    if let Some(&first) = matches.first() {
        trace!(%name, scope = %scope, site = %first, "scope lookup matched");
        return match graph.kind(first) {
            NodeKind::Import { .. } => track_through_import(graph, name, first),
            NodeKind::ImportFrom { .. } => track_through_import_from(graph, name, first, trace),
            kind if is_declaration_site(kind) => Ok(first),
            _ => Err(ResolveError::no_match(name)),
        };
    }

    if extend {
        if !matches!(graph.kind(scope), NodeKind::Module { .. }) {
            let outer = parent_scope(graph, scope).ok_or_else(|| detached(scope))?;
            return track_name_in_scope(graph, name, outer, trace, true);
        }
        // No more outward scopes: wildcard imports, then builtins.
        if let Ok(matched) = track_name_from_wildcards(graph, name, scope, trace) {
            return Ok(matched);
        }
        if let Some(builtins) = graph.builtins_module() {
            if builtins != scope {
                if let Ok(matched) = track_name_in_scope(graph, name, builtins, trace, false) {
                    return Ok(matched);
                }
            }
        }
    }

    Err(ResolveError::no_match(name))
}

// ============================================================================
// Imports
// ============================================================================

fn entry_matches(entry: &ImportedName, name: &str) -> bool {
    let local = entry.local_name();
    local == name || local.starts_with(&format!("{name}."))
}

/// Resolve a name bound by an `import` statement to the module it names.
fn track_through_import(
    graph: &SyntaxGraph,
    name: &str,
    import_node: NodeId,
) -> ResolveResult<NodeId> {
    let entries = match graph.kind(import_node) {
        NodeKind::Import { names } => names.clone(),
        _ => return Err(ResolveError::unsupported("not an import statement")),
    };
    for entry in &entries {
        let first_segment_match =
            entry.alias.is_none() && entry.name.split('.').next() == Some(name);
        if entry_matches(entry, name) || first_segment_match {
            let module = graph.resolve_module(&entry.name)?;
            debug!(%name, module = %entry.name, "resolved through import");
            return Ok(module);
        }
    }
    Err(ResolveError::no_match(name))
}

/// Resolve a name bound by a `from ... import` statement.
///
/// The imported name may itself be a submodule; a submodule import is
/// attempted first, and only on failure is the name treated as an object
/// inside the source module.
fn track_through_import_from(
    graph: &SyntaxGraph,
    name: &str,
    node: NodeId,
    trace: &mut ResolutionTrace,
) -> ResolveResult<NodeId> {
    let (modname, entries) = match graph.kind(node) {
        NodeKind::ImportFrom { module, names } => (module.clone(), names.clone()),
        _ => return Err(ResolveError::unsupported("not a from-import statement")),
    };
    let module = graph.resolve_module(&modname)?;

    let is_wildcard = entries.first().is_some_and(|e| e.name == "*");
    if is_wildcard {
        return match graph.resolve_module(&format!("{modname}.{name}")) {
            Ok(submodule) => Ok(submodule),
            Err(_) => track_name_in_scope(graph, name, module, trace, true),
        };
    }

    for entry in &entries {
        if entry_matches(entry, name) {
            return match graph.resolve_module(&format!("{modname}.{}", entry.name)) {
                Ok(submodule) => Ok(submodule),
                Err(_) => track_name_in_scope(graph, &entry.name, module, trace, true),
            };
        }
    }
    Err(ResolveError::no_match(name))
}

/// Search a module's wildcard imports for a name.
///
/// Wildcards are tried in reverse source order: a later wildcard import
/// overrides an earlier one on a name collision. A failing wildcard does
/// not abort the remaining candidates.
fn track_name_from_wildcards(
    graph: &SyntaxGraph,
    name: &str,
    module: NodeId,
    trace: &mut ResolutionTrace,
) -> ResolveResult<NodeId> {
    let body = match graph.kind(module) {
        NodeKind::Module { body, .. } => body.clone(),
        _ => return Err(ResolveError::unsupported("wildcard search outside a module")),
    };

    for stmt in body.iter().rev() {
        let is_wildcard = matches!(
            graph.kind(*stmt),
            NodeKind::ImportFrom { names, .. } if names.first().is_some_and(|e| e.name == "*")
        );
        if !is_wildcard {
            continue;
        }
        match track_through_import_from(graph, name, *stmt, trace) {
            Ok(matched) => return Ok(matched),
            Err(err) => {
                trace!(%name, module = %module, %err, "wildcard candidate failed");
            }
        }
    }
    Err(ResolveError::no_match(name))
}

// ============================================================================
// Attribute Chains
// ============================================================================

/// Resolve an `Attribute` or `AssignAttr` occurrence (`a.b.c`) to the
/// declaration site of its final segment.
pub fn track_attribute(graph: &SyntaxGraph, occurrence: NodeId) -> ResolveResult<NodeId> {
    if !matches!(
        graph.kind(occurrence),
        NodeKind::Attribute { .. } | NodeKind::AssignAttr { .. }
    ) {
        return Err(ResolveError::unsupported(
            "attribute tracking requires an Attribute or AssignAttr occurrence",
        ));
    }
    let segments = decompose_attribute(graph, occurrence)?;
    let scope = graph
        .enclosing_scope(occurrence)
        .ok_or_else(|| detached(occurrence))?;
    track_dotted_path(graph, &segments, scope)
}

/// Flatten an attribute chain to its ordered simple names.
///
/// The base of the chain must be a plain name. A chain anchored at a call
/// or subscript result would require value-type inference that this
/// resolver intentionally does not attempt.
pub(crate) fn decompose_attribute(
    graph: &SyntaxGraph,
    node: NodeId,
) -> ResolveResult<Vec<String>> {
    let mut segments = Vec::new();
    let mut cur = node;
    loop {
        match graph.kind(cur) {
            NodeKind::Attribute { base, attr } | NodeKind::AssignAttr { base, attr } => {
                segments.push(attr.clone());
                cur = *base;
            }
            NodeKind::Name { name } => {
                segments.push(name.clone());
                break;
            }
            _ => {
                return Err(ResolveError::unsupported(
                    "attribute chain anchored at a call or subscript result",
                ))
            }
        }
    }
    segments.reverse();
    Ok(segments)
}

/// Resolve an ordered dotted path starting from a scope.
///
/// For each position, progressively longer dotted suffixes ending at that
/// position are tried first (`c`, then `b.c`, then `a.b.c`): nested-class
/// and nested-package names are stored under compound dotted keys in some
/// lookup tables. Each attempt runs with its own trace; attempts are
/// independent searches, not one chain.
pub(crate) fn track_dotted_path(
    graph: &SyntaxGraph,
    segments: &[String],
    start_scope: NodeId,
) -> ResolveResult<NodeId> {
    if segments.is_empty() {
        return Err(ResolveError::unsupported("empty attribute path"));
    }

    let mut anchor = start_scope;
    let mut matched = None;
    for i in 0..segments.len() {
        let search_scope = graph
            .enclosing_scope(anchor)
            .ok_or_else(|| detached(anchor))?;
        let mut found = None;
        for j in (0..=i).rev() {
            let name = segments[j..=i].join(".");
            let mut attempt = ResolutionTrace::new();
            if let Ok(m) = track_name_in_scope(graph, &name, search_scope, &mut attempt, true) {
                found = Some(m);
                break;
            }
        }
        match found {
            Some(m) => {
                matched = Some(m);
                anchor = m;
            }
            None => return Err(ResolveError::no_match(segments[..=i].join("."))),
        }
    }

    matched.ok_or_else(|| ResolveError::no_match(segments.join(".")))
}

// ============================================================================
// Alias Chains
// ============================================================================

/// Resolve the right-hand side of an alias assignment without alias
/// following; the caller iterates.
fn resolve_alias_rhs(graph: &SyntaxGraph, rhs: NodeId) -> ResolveResult<NodeId> {
    match graph.kind(rhs) {
        NodeKind::Name { .. } => resolve_name_occurrence(graph, rhs),
        NodeKind::Attribute { .. } => {
            let segments = decompose_attribute(graph, rhs)?;
            let scope = graph.enclosing_scope(rhs).ok_or_else(|| detached(rhs))?;
            track_dotted_path(graph, &segments, scope)
        }
        NodeKind::Call { func, .. } => {
            let func = *func;
            match graph.kind(func) {
                NodeKind::Name { .. } | NodeKind::Attribute { .. } => {
                    resolve_alias_rhs(graph, func)
                }
                _ => Err(ResolveError::unsupported(
                    "alias right-hand side is a call on a non-name expression",
                )),
            }
        }
        _ => Err(ResolveError::unsupported(
            "alias right-hand side is not a name, attribute, or call",
        )),
    }
}

/// Follow a chain of plain alias assignments (`b = bar`) from a matched
/// `AssignName`, bounded by [`MAX_ALIAS_ITERATIONS`]. Stops at the first
/// match that is not such an alias; an unresolvable right-hand side keeps
/// the current match rather than failing the whole track.
fn follow_alias_chain(
    graph: &SyntaxGraph,
    origin_name: &str,
    mut matched: NodeId,
) -> ResolveResult<NodeId> {
    let mut iterations = 0;
    while matches!(graph.kind(matched), NodeKind::AssignName { .. }) {
        let Some(parent) = graph.parent(matched) else {
            break;
        };
        let NodeKind::Assign { value, .. } = graph.kind(parent) else {
            break;
        };
        let rhs = *value;
        if !matches!(
            graph.kind(rhs),
            NodeKind::Name { .. } | NodeKind::Attribute { .. } | NodeKind::Call { .. }
        ) {
            break;
        }
        let next = match resolve_alias_rhs(graph, rhs) {
            Ok(next) => next,
            Err(err) => {
                trace!(name = origin_name, %err, "alias right-hand side unresolvable, keeping match");
                break;
            }
        };
        if next == matched {
            return Err(ResolveError::CycleDetected {
                name: origin_name.to_string(),
            });
        }
        matched = next;
        iterations += 1;
        if iterations >= MAX_ALIAS_ITERATIONS {
            return Err(ResolveError::IterationBudgetExceeded {
                name: origin_name.to_string(),
            });
        }
    }
    Ok(matched)
}

// ============================================================================
// Type Names
// ============================================================================

/// Track a (possibly dotted) name as a type: resolve it, then chase alias
/// assignments until a class declaration is reached.
///
/// Typing-module style aliases (`Tuple = _TupleType`) make this chase
/// necessary; it is bounded by [`MAX_ALIAS_ITERATIONS`] and fails rather
/// than returning a partial result.
pub fn track_type_name(
    graph: &SyntaxGraph,
    dotted: &str,
    scope: NodeId,
) -> ResolveResult<NodeId> {
    let segments: Vec<String> = dotted.split('.').map(str::to_string).collect();
    let mut matched = track_dotted_path(graph, &segments, scope)?;

    let mut iterations = 0;
    while matches!(graph.kind(matched), NodeKind::AssignName { .. }) {
        let Some(parent) = graph.parent(matched) else {
            return Err(ResolveError::no_match(dotted));
        };
        let NodeKind::Assign { value, .. } = graph.kind(parent) else {
            return Err(ResolveError::no_match(dotted));
        };
        let mut rhs = *value;
        if let NodeKind::Call { func, .. } = graph.kind(rhs) {
            rhs = *func;
        }
        let next = match graph.kind(rhs) {
            NodeKind::Name { .. } => resolve_name_occurrence(graph, rhs)?,
            NodeKind::Attribute { .. } => {
                let rhs_segments = decompose_attribute(graph, rhs)?;
                let rhs_scope = graph.enclosing_scope(rhs).ok_or_else(|| detached(rhs))?;
                track_dotted_path(graph, &rhs_segments, rhs_scope)?
            }
            _ => resolve_value(graph, rhs)?,
        };
        if next == matched {
            return Err(ResolveError::CycleDetected {
                name: dotted.to_string(),
            });
        }
        matched = next;
        iterations += 1;
        if iterations >= MAX_ALIAS_ITERATIONS {
            return Err(ResolveError::IterationBudgetExceeded {
                name: dotted.to_string(),
            });
        }
    }

    if matches!(graph.kind(matched), NodeKind::ClassDef { .. }) {
        Ok(matched)
    } else {
        Err(ResolveError::no_match(dotted))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_assignment_shadows_module_scope() {
        // x = 1 at module scope; def f(): x = 2; return x
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let one = g.const_int(1);
        let x_mod = g.assign_name("x");
        g.assign(m, vec![x_mod], one);

        let f = g.function_def(m, "f", false, vec![], None);
        let two = g.const_int(2);
        let x_local = g.assign_name("x");
        g.assign(f, vec![x_local], two);
        let x_use = g.name("x");
        g.expr_stmt(f, x_use);

        assert_eq!(track_name(&g, x_use).unwrap(), x_local);
    }

    #[test]
    fn global_statement_redirects_to_module_scope() {
        // x = 1 at module scope; def f(): global x; x = 2
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let one = g.const_int(1);
        let x_mod = g.assign_name("x");
        g.assign(m, vec![x_mod], one);

        let f = g.function_def(m, "f", false, vec![], None);
        g.global_stmt(f, &["x"]);
        let two = g.const_int(2);
        let x_local = g.assign_name("x");
        g.assign(f, vec![x_local], two);

        assert_eq!(track_name(&g, x_local).unwrap(), x_mod);
    }

    #[test]
    fn nonlocal_reaches_enclosing_function_only() {
        // def outer(): y = 1; def inner(): nonlocal y; y = 2
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let outer = g.function_def(m, "outer", false, vec![], None);
        let one = g.const_int(1);
        let y_outer = g.assign_name("y");
        g.assign(outer, vec![y_outer], one);

        let inner = g.function_def(outer, "inner", false, vec![], None);
        g.nonlocal_stmt(inner, &["y"]);
        let two = g.const_int(2);
        let y_inner = g.assign_name("y");
        g.assign(inner, vec![y_inner], two);

        assert_eq!(track_name(&g, y_inner).unwrap(), y_outer);
    }

    #[test]
    fn import_resolves_to_module_root() {
        let mut g = SyntaxGraph::new();
        let helpers = g.add_module("helpers");
        let m = g.add_module("m");
        g.import(m, &[("helpers", Some("h"))]);
        let use_h = g.name("h");
        g.expr_stmt(m, use_h);

        assert_eq!(track_name(&g, use_h).unwrap(), helpers);
    }

    #[test]
    fn from_import_prefers_submodule_over_member() {
        // pkg has both a submodule `util` and (hypothetically) a member.
        let mut g = SyntaxGraph::new();
        let _pkg = g.add_module("pkg");
        let pkg_util = g.add_module("pkg.util");
        let m = g.add_module("m");
        g.import_from(m, "pkg", &[("util", None)]);
        let use_util = g.name("util");
        g.expr_stmt(m, use_util);

        assert_eq!(track_name(&g, use_util).unwrap(), pkg_util);
    }

    #[test]
    fn from_import_falls_back_to_in_module_lookup() {
        let mut g = SyntaxGraph::new();
        let lib = g.add_module("lib");
        let handler = g.class_def(lib, "Handler", &[]);
        let m = g.add_module("m");
        g.import_from(m, "lib", &[("Handler", None)]);
        let use_handler = g.name("Handler");
        g.expr_stmt(m, use_handler);

        assert_eq!(track_name(&g, use_handler).unwrap(), handler);
    }

    #[test]
    fn missing_module_is_a_provider_failure() {
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        g.import(m, &[("nowhere", None)]);
        let use_it = g.name("nowhere");
        g.expr_stmt(m, use_it);

        let err = track_name(&g, use_it).unwrap_err();
        assert!(matches!(err, ResolveError::Provider(_)));
    }

    #[test]
    fn alias_assignment_is_followed_to_its_source() {
        // def bar(): ...; b = bar; use of `b` resolves to bar's definition.
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let bar = g.function_def(m, "bar", false, vec![], None);
        let rhs = g.name("bar");
        let b = g.assign_name("b");
        g.assign(m, vec![b], rhs);
        let use_b = g.name("b");
        g.expr_stmt(m, use_b);

        assert_eq!(track_name(&g, use_b).unwrap(), bar);
    }

    #[test]
    fn mutually_aliasing_assignments_exhaust_the_budget() {
        // a = b; b = a
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let rhs_b = g.name("b");
        let a = g.assign_name("a");
        g.assign(m, vec![a], rhs_b);
        let rhs_a = g.name("a");
        let b = g.assign_name("b");
        g.assign(m, vec![b], rhs_a);
        let use_a = g.name("a");
        g.expr_stmt(m, use_a);

        let err = track_name(&g, use_a).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::IterationBudgetExceeded { .. } | ResolveError::CycleDetected { .. }
        ));
    }

    #[test]
    fn attribute_chain_through_imported_module() {
        // lib defines class C; m does `import lib` and uses `lib.C`.
        let mut g = SyntaxGraph::new();
        let lib = g.add_module("lib");
        let c = g.class_def(lib, "C", &[]);
        let m = g.add_module("m");
        g.import(m, &[("lib", None)]);
        let base = g.name("lib");
        let access = g.attribute(base, "C");
        g.expr_stmt(m, access);

        assert_eq!(track_attribute(&g, access).unwrap(), c);
    }

    #[test]
    fn attribute_chain_on_call_result_is_unsupported() {
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let f = g.name("f");
        let call = g.call(f, vec![]);
        let access = g.attribute(call, "attr");
        g.expr_stmt(m, access);

        let err = track_attribute(&g, access).unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedConstruct { .. }));
    }

    #[test]
    fn type_name_chases_aliases_to_a_class() {
        // class _TupleType: ...; Tuple = _TupleType
        let mut g = SyntaxGraph::new();
        let m = g.add_module("typingish");
        let tuple_type = g.class_def(m, "_TupleType", &[]);
        let rhs = g.name("_TupleType");
        let alias = g.assign_name("Tuple");
        g.assign(m, vec![alias], rhs);

        assert_eq!(track_type_name(&g, "Tuple", m).unwrap(), tuple_type);
    }

    #[test]
    fn type_name_requires_a_class() {
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        g.function_def(m, "not_a_class", false, vec![], None);

        let err = track_type_name(&g, "not_a_class", m).unwrap_err();
        assert!(matches!(err, ResolveError::NoMatch { .. }));
    }
}
