//! End-to-end resolution over multi-module fixtures.

use ontolink_graph::{NodeId, ResolvedType, SyntaxGraph};
use ontolink_resolve::{
    annotate_module, fields_of, find_override, override_of, reference_of, resolve_annotation,
    return_type_of, track_name, ResolveError,
};

fn builtins(g: &mut SyntaxGraph) -> NodeId {
    let b = g.add_module("builtins");
    g.set_builtins(b);
    g.class_def(b, "int", &[]);
    g.class_def(b, "str", &[]);
    g.class_def(b, "NoneType", &[]);
    b
}

#[test]
fn resolution_is_deterministic_across_identical_graphs() {
    // Two independently built copies of the same program must resolve the
    // same occurrence to the same declaration, identified by name.
    fn build() -> (SyntaxGraph, NodeId) {
        let mut g = SyntaxGraph::new();
        let lib = g.add_module("lib");
        g.class_def(lib, "Widget", &[]);
        let m = g.add_module("m");
        g.import_from(m, "lib", &[("Widget", None)]);
        let use_widget = g.name("Widget");
        g.expr_stmt(m, use_widget);
        (g, use_widget)
    }

    let (g1, occ1) = build();
    let (g2, occ2) = build();
    let r1 = track_name(&g1, occ1).unwrap();
    let r2 = track_name(&g2, occ2).unwrap();
    assert_eq!(g1.name_of(r1), Some("Widget"));
    assert_eq!(g1.name_of(r1), g2.name_of(r2));
}

#[test]
fn inner_scopes_shadow_outer_declarations() {
    // x at module scope, x in a function: the function's own x wins for a
    // use inside the function, and stays resolved that way after the
    // module pass.
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

    annotate_module(&g, m);
    assert_eq!(reference_of(&g, x_use), Some(x_local));
}

#[test]
fn global_statement_skips_the_local_binding() {
    let mut g = SyntaxGraph::new();
    let m = g.add_module("m");
    let one = g.const_int(1);
    let x_mod = g.assign_name("x");
    g.assign(m, vec![x_mod], one);
    let f = g.function_def(m, "f", false, vec![], None);
    g.global_stmt(f, &["x"]);
    let two = g.const_int(2);
    let x_store = g.assign_name("x");
    g.assign(f, vec![x_store], two);

    assert_eq!(track_name(&g, x_store).unwrap(), x_mod);
}

#[test]
fn later_wildcard_import_wins_name_collisions() {
    // a and b both define X; `from a import *` then `from b import *`
    // makes an unqualified X mean b's X, matching interpreter rebinding.
    let mut g = SyntaxGraph::new();
    let a = g.add_module("a");
    let _x_a = g.class_def(a, "X", &[]);
    let b = g.add_module("b");
    let x_b = g.class_def(b, "X", &[]);
    let m = g.add_module("m");
    g.import_from(m, "a", &[("*", None)]);
    g.import_from(m, "b", &[("*", None)]);
    let use_x = g.name("X");
    g.expr_stmt(m, use_x);

    assert_eq!(track_name(&g, use_x).unwrap(), x_b);
}

#[test]
fn failing_wildcard_does_not_mask_an_earlier_one() {
    // The later wildcard points at a module that does not export the
    // name; the earlier one still resolves it.
    let mut g = SyntaxGraph::new();
    let a = g.add_module("a");
    let x_a = g.class_def(a, "X", &[]);
    g.add_module("empty");
    let m = g.add_module("m");
    g.import_from(m, "a", &[("*", None)]);
    g.import_from(m, "empty", &[("*", None)]);
    let use_x = g.name("X");
    g.expr_stmt(m, use_x);

    assert_eq!(track_name(&g, use_x).unwrap(), x_a);
}

#[test]
fn mutually_wildcard_importing_modules_terminate() {
    // p and q wildcard-import each other. Resolving a name neither
    // defines must terminate with a failure, not recurse forever.
    let mut g = SyntaxGraph::new();
    let p = g.add_module("p");
    let q = g.add_module("q");
    g.import_from(p, "q", &[("*", None)]);
    g.import_from(q, "p", &[("*", None)]);
    let use_ghost = g.name("ghost");
    g.expr_stmt(p, use_ghost);

    let err = track_name(&g, use_ghost).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::NoMatch { .. } | ResolveError::CycleDetected { .. }
    ));
}

#[test]
fn merged_field_takes_newest_value_and_oldest_site() {
    // class A: size = 1
    // class B(A):
    //     def __init__(self): self.size = 2
    let mut g = SyntaxGraph::new();
    let m = g.add_module("m");
    let a = g.class_def(m, "A", &[]);
    let one = g.const_int(1);
    let size_a = g.assign_name("size");
    g.assign(a, vec![size_a], one);
    let b = g.class_def(m, "B", &[a]);
    let self_param = g.param("self", None);
    let ctor = g.function_def(b, "__init__", false, vec![self_param], None);
    let two = g.const_int(2);
    let self_ref = g.name("self");
    let target = g.assign_attr(self_ref, "size");
    g.assign(ctor, vec![target], two);

    annotate_module(&g, m);
    let records = fields_of(&g, b).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "size");
    assert_eq!(records[0].value, Some(two));
    assert_eq!(records[0].declaring_site, size_a);
}

#[test]
fn override_links_point_at_ancestor_declarations() {
    let mut g = SyntaxGraph::new();
    let m = g.add_module("m");
    let base = g.class_def(m, "Base", &[]);
    let p1 = g.param("self", None);
    let close_base = g.function_def(base, "close", false, vec![p1], None);
    let derived = g.class_def(m, "Derived", &[base]);
    let p2 = g.param("self", None);
    let close_derived = g.function_def(derived, "close", false, vec![p2], None);
    let p3 = g.param("self", None);
    let open_derived = g.function_def(derived, "open", false, vec![p3], None);

    annotate_module(&g, m);
    assert_eq!(override_of(&g, close_derived), Some(close_base));
    assert_eq!(override_of(&g, open_derived), None);
    assert_eq!(find_override(&g, open_derived).unwrap(), None);
}

#[test]
fn annotation_resolves_across_modules_and_degrades_per_leaf() {
    // typingmod:  class _TupleType; Tuple = _TupleType
    // m:          from typingmod import Tuple
    //             def f() -> Tuple[int, str] | None
    let mut g = SyntaxGraph::new();
    builtins(&mut g);

    let typingmod = g.add_module("typingmod");
    let tuple_class = g.class_def(typingmod, "_TupleType", &[]);
    let rhs = g.name("_TupleType");
    let alias = g.assign_name("Tuple");
    g.assign(typingmod, vec![alias], rhs);

    let m = g.add_module("m");
    g.import_from(m, "typingmod", &[("Tuple", None)]);
    let tuple_name = g.name("Tuple");
    let int_name = g.name("int");
    let str_name = g.name("str");
    let slice = g.tuple_expr(vec![int_name, str_name]);
    let subscript = g.subscript(tuple_name, slice);
    let none = g.const_none();
    let annotation = g.bin_or(subscript, none);
    let f = g.function_def(m, "f", false, vec![], Some(annotation));

    annotate_module(&g, m);

    let int_class = g.lookup(g.builtins_module().unwrap(), "int")[0];
    let str_class = g.lookup(g.builtins_module().unwrap(), "str")[0];
    let none_class = g.lookup(g.builtins_module().unwrap(), "NoneType")[0];
    let expected = ResolvedType::Union(vec![
        ResolvedType::Parameterized {
            base: Box::new(ResolvedType::Class(tuple_class)),
            args: vec![
                ResolvedType::Class(int_class),
                ResolvedType::Class(str_class),
            ],
        },
        ResolvedType::Class(none_class),
    ]);
    assert_eq!(return_type_of(&g, f), Some(&expected));

    // The resolved type serializes for downstream fact emission.
    let json = serde_json::to_value(&expected).unwrap();
    assert!(json.to_string().contains("Parameterized"));
}

#[test]
fn unresolvable_leaves_do_not_poison_the_annotation() {
    let mut g = SyntaxGraph::new();
    builtins(&mut g);
    let m = g.add_module("m");
    let int_name = g.name("int");
    let ghost_name = g.name("Ghost");
    let annotation = g.bin_or(int_name, ghost_name);
    g.expr_stmt(m, annotation);

    let int_class = g.lookup(g.builtins_module().unwrap(), "int")[0];
    assert_eq!(
        resolve_annotation(&g, annotation).unwrap(),
        ResolvedType::Union(vec![
            ResolvedType::Class(int_class),
            ResolvedType::Unresolved,
        ])
    );
}
