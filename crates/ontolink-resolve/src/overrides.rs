//! Override linking.
//!
//! Connects a method to the nearest ancestor method it overrides, walking
//! the declaring class's linearization in resolution order. Only directly
//! declared methods count: an ancestor that merely inherits the name does
//! not redeclare it and cannot be the override target.

use ontolink_graph::{NodeId, NodeKind, SyntaxGraph};

use crate::error::{ResolveError, ResolveResult};

/// Find the method this one overrides, if any.
///
/// `Ok(None)` is the definitive "overrides nothing" answer: for functions
/// outside a class body, for constructors of root classes, and for any
/// method whose name appears nowhere among the ancestors' own
/// declarations.
pub fn find_override(graph: &SyntaxGraph, method: NodeId) -> ResolveResult<Option<NodeId>> {
    let name = match graph.kind(method) {
        NodeKind::FunctionDef { name, .. } => name.clone(),
        _ => {
            return Err(ResolveError::unsupported(
                "override linking requires a function definition",
            ))
        }
    };
    let Some(class) = graph.parent(method) else {
        return Ok(None);
    };
    if !matches!(graph.kind(class), NodeKind::ClassDef { .. }) {
        return Ok(None);
    }

    let order = graph.linearization(class)?;
    for &ancestor in &order[1..] {
        for candidate in graph.methods_of(ancestor) {
            if graph.name_of(candidate) == Some(name.as_str()) {
                return Ok(Some(candidate));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_overrides_nearest_ancestor_declaration() {
        // class A: def run(self)
        // class B(A): def run(self)
        // class C(B): def run(self)
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let a = g.class_def(m, "A", &[]);
        let p1 = g.param("self", None);
        let _run_a = g.function_def(a, "run", false, vec![p1], None);
        let b = g.class_def(m, "B", &[a]);
        let p2 = g.param("self", None);
        let run_b = g.function_def(b, "run", false, vec![p2], None);
        let c = g.class_def(m, "C", &[b]);
        let p3 = g.param("self", None);
        let run_c = g.function_def(c, "run", false, vec![p3], None);

        assert_eq!(find_override(&g, run_c).unwrap(), Some(run_b));
    }

    #[test]
    fn skips_ancestors_that_only_inherit_the_name() {
        // class A: def run(self)
        // class B(A): pass
        // class C(B): def run(self)    overrides A.run, not anything on B
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let a = g.class_def(m, "A", &[]);
        let p1 = g.param("self", None);
        let run_a = g.function_def(a, "run", false, vec![p1], None);
        let b = g.class_def(m, "B", &[a]);
        let c = g.class_def(m, "C", &[b]);
        let p2 = g.param("self", None);
        let run_c = g.function_def(c, "run", false, vec![p2], None);

        assert_eq!(find_override(&g, run_c).unwrap(), Some(run_a));
    }

    #[test]
    fn no_ancestor_declaration_is_a_definitive_none() {
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let a = g.class_def(m, "A", &[]);
        let c = g.class_def(m, "C", &[a]);
        let p = g.param("self", None);
        let run = g.function_def(c, "run", false, vec![p], None);

        assert_eq!(find_override(&g, run).unwrap(), None);
    }

    #[test]
    fn free_functions_override_nothing() {
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let f = g.function_def(m, "f", false, vec![], None);

        assert_eq!(find_override(&g, f).unwrap(), None);
    }

    #[test]
    fn diamond_follows_resolution_order() {
        //    A (run)
        //   / \
        //  B   C (run)
        //   \ /
        //    D (run)   overrides C.run, since C precedes A
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let a = g.class_def(m, "A", &[]);
        let p1 = g.param("self", None);
        let _run_a = g.function_def(a, "run", false, vec![p1], None);
        let b = g.class_def(m, "B", &[a]);
        let c = g.class_def(m, "C", &[a]);
        let p2 = g.param("self", None);
        let run_c = g.function_def(c, "run", false, vec![p2], None);
        let d = g.class_def(m, "D", &[b, c]);
        let p3 = g.param("self", None);
        let run_d = g.function_def(d, "run", false, vec![p3], None);

        assert_eq!(find_override(&g, run_d).unwrap(), Some(run_c));
    }
}
