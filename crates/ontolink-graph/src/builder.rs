//! Programmatic graph construction.
//!
//! The parse step is an upstream concern; parsers and test fixtures build
//! graphs through these methods. Construction takes `&mut self` and does
//! three things the navigation layer depends on: it sets parent links, it
//! binds declaration sites into the enclosing scope's name table, and it
//! registers module roots in the module registry.
//!
//! Binding follows the analyzed language's rules: assignment targets,
//! class/function definitions, parameters and import statements bind in
//! the scope where they appear. `global` redirection is a resolution-time
//! concern and does not move bindings.
//!
//! # Panics
//!
//! Statement constructors panic when handed a non-scope node as the
//! enclosing scope. That is a construction bug in the caller, not a
//! property of the analyzed code.

use tracing::debug;

use crate::arena::{ConstValue, ImportedName, Inferred, NodeId, NodeKind, SyntaxGraph};
use crate::derived::DerivedSlots;

impl SyntaxGraph {
    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(crate::arena::NodeData {
            kind,
            parent: None,
            derived: DerivedSlots::default(),
        });
        id
    }

    fn adopt(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
    }

    fn bind(&mut self, scope: NodeId, name: &str, site: NodeId) {
        self.scope_locals
            .entry(scope)
            .or_default()
            .entry(name.to_string())
            .or_default()
            .push(site);
    }

    fn attach_stmt(&mut self, scope: NodeId, stmt: NodeId) {
        match &mut self.nodes[scope.index()].kind {
            NodeKind::Module { body, .. }
            | NodeKind::ClassDef { body, .. }
            | NodeKind::FunctionDef { body, .. } => body.push(stmt),
            other => panic!("cannot attach a statement to non-scope node kind {other:?}"),
        }
        self.adopt(scope, stmt);
    }

    /// Bind the assignable names reachable from an assignment target:
    /// a plain `AssignName`, or the named elements of a tuple target.
    fn bind_target(&mut self, scope: NodeId, target: NodeId) {
        match self.kind(target).clone() {
            NodeKind::AssignName { name } => self.bind(scope, &name, target),
            NodeKind::TupleExpr { elements } => {
                for element in elements {
                    if let NodeKind::AssignName { name } = self.kind(element).clone() {
                        self.bind(scope, &name, element);
                    }
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Modules
    // ------------------------------------------------------------------

    /// Create a module root and register it under its dotted identifier.
    pub fn add_module(&mut self, name: &str) -> NodeId {
        let id = self.alloc(NodeKind::Module {
            name: name.to_string(),
            body: Vec::new(),
        });
        debug!(module = name, node = %id, "registered module root");
        self.modules.insert(name.to_string(), id);
        id
    }

    /// Mark a module as the builtins module, reachable from every module
    /// scope after wildcard imports are exhausted.
    pub fn set_builtins(&mut self, module: NodeId) {
        self.builtins = Some(module);
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// A name occurrence in load context.
    pub fn name(&mut self, name: &str) -> NodeId {
        self.alloc(NodeKind::Name {
            name: name.to_string(),
        })
    }

    /// A name occurrence in store context.
    pub fn assign_name(&mut self, name: &str) -> NodeId {
        self.alloc(NodeKind::AssignName {
            name: name.to_string(),
        })
    }

    /// `base.attr` in load context.
    pub fn attribute(&mut self, base: NodeId, attr: &str) -> NodeId {
        let id = self.alloc(NodeKind::Attribute {
            base,
            attr: attr.to_string(),
        });
        self.adopt(id, base);
        id
    }

    /// `base.attr` in store context.
    pub fn assign_attr(&mut self, base: NodeId, attr: &str) -> NodeId {
        let id = self.alloc(NodeKind::AssignAttr {
            base,
            attr: attr.to_string(),
        });
        self.adopt(id, base);
        id
    }

    /// The constant `None`.
    pub fn const_none(&mut self) -> NodeId {
        self.alloc(NodeKind::Const {
            value: ConstValue::None,
        })
    }

    /// The constant `...`.
    pub fn const_ellipsis(&mut self) -> NodeId {
        self.alloc(NodeKind::Const {
            value: ConstValue::Ellipsis,
        })
    }

    /// A string constant.
    pub fn const_str(&mut self, value: &str) -> NodeId {
        self.alloc(NodeKind::Const {
            value: ConstValue::Str(value.to_string()),
        })
    }

    /// An integer constant.
    pub fn const_int(&mut self, value: i64) -> NodeId {
        self.alloc(NodeKind::Const {
            value: ConstValue::Int(value),
        })
    }

    /// A float constant.
    pub fn const_float(&mut self, value: f64) -> NodeId {
        self.alloc(NodeKind::Const {
            value: ConstValue::Float(value),
        })
    }

    /// A boolean constant.
    pub fn const_bool(&mut self, value: bool) -> NodeId {
        self.alloc(NodeKind::Const {
            value: ConstValue::Bool(value),
        })
    }

    /// `left | right` (the only operator annotations use).
    pub fn bin_or(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::BinOp {
            op: "|".to_string(),
            left,
            right,
        });
        self.adopt(id, left);
        self.adopt(id, right);
        id
    }

    /// `value[slice]`.
    pub fn subscript(&mut self, value: NodeId, slice: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::Subscript { value, slice });
        self.adopt(id, value);
        self.adopt(id, slice);
        id
    }

    /// A tuple literal.
    pub fn tuple_expr(&mut self, elements: Vec<NodeId>) -> NodeId {
        let id = self.alloc(NodeKind::TupleExpr {
            elements: elements.clone(),
        });
        for element in elements {
            self.adopt(id, element);
        }
        id
    }

    /// A list literal.
    pub fn list_expr(&mut self, elements: Vec<NodeId>) -> NodeId {
        let id = self.alloc(NodeKind::ListExpr {
            elements: elements.clone(),
        });
        for element in elements {
            self.adopt(id, element);
        }
        id
    }

    /// `func(args...)`.
    pub fn call(&mut self, func: NodeId, args: Vec<NodeId>) -> NodeId {
        let id = self.alloc(NodeKind::Call {
            func,
            args: args.clone(),
        });
        self.adopt(id, func);
        for arg in args {
            self.adopt(id, arg);
        }
        id
    }

    /// `*value` inside a tuple target.
    pub fn starred(&mut self, value: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::Starred { value });
        self.adopt(id, value);
        id
    }

    /// A formal parameter; bound into the function's name table when the
    /// function is created.
    pub fn param(&mut self, name: &str, annotation: Option<NodeId>) -> NodeId {
        let id = self.alloc(NodeKind::Param {
            name: name.to_string(),
            annotation,
        });
        if let Some(ann) = annotation {
            self.adopt(id, ann);
        }
        id
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    /// `t1 = t2 = value`, appended to `scope`'s body.
    pub fn assign(&mut self, scope: NodeId, targets: Vec<NodeId>, value: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::Assign {
            targets: targets.clone(),
            value,
        });
        for target in &targets {
            self.adopt(id, *target);
        }
        self.adopt(id, value);
        self.attach_stmt(scope, id);
        for target in targets {
            self.bind_target(scope, target);
        }
        id
    }

    /// `target: annotation = value`, appended to `scope`'s body.
    pub fn ann_assign(
        &mut self,
        scope: NodeId,
        target: NodeId,
        annotation: NodeId,
        value: Option<NodeId>,
    ) -> NodeId {
        let id = self.alloc(NodeKind::AnnAssign {
            target,
            annotation,
            value,
        });
        self.adopt(id, target);
        self.adopt(id, annotation);
        if let Some(v) = value {
            self.adopt(id, v);
        }
        self.attach_stmt(scope, id);
        self.bind_target(scope, target);
        id
    }

    /// An expression statement.
    pub fn expr_stmt(&mut self, scope: NodeId, value: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::ExprStmt { value });
        self.adopt(id, value);
        self.attach_stmt(scope, id);
        id
    }

    /// `global a, b`.
    pub fn global_stmt(&mut self, scope: NodeId, names: &[&str]) -> NodeId {
        let id = self.alloc(NodeKind::Global {
            names: names.iter().map(|n| n.to_string()).collect(),
        });
        self.attach_stmt(scope, id);
        id
    }

    /// `nonlocal a, b`.
    pub fn nonlocal_stmt(&mut self, scope: NodeId, names: &[&str]) -> NodeId {
        let id = self.alloc(NodeKind::Nonlocal {
            names: names.iter().map(|n| n.to_string()).collect(),
        });
        self.attach_stmt(scope, id);
        id
    }

    /// `import a.b as c, d`. Binds each entry under its alias when given,
    /// otherwise under the full dotted name and, for dotted imports, the
    /// first segment as well.
    pub fn import(&mut self, scope: NodeId, entries: &[(&str, Option<&str>)]) -> NodeId {
        let names: Vec<ImportedName> = entries
            .iter()
            .map(|(name, alias)| ImportedName {
                name: name.to_string(),
                alias: alias.map(|a| a.to_string()),
            })
            .collect();
        let id = self.alloc(NodeKind::Import {
            names: names.clone(),
        });
        self.attach_stmt(scope, id);
        for entry in &names {
            self.bind(scope, entry.local_name(), id);
            if entry.alias.is_none() {
                if let Some(first) = entry.name.split('.').next() {
                    if first != entry.name {
                        self.bind(scope, first, id);
                    }
                }
            }
        }
        id
    }

    /// `from module import x as y, ...`. A `"*"` entry is a wildcard
    /// import and binds nothing; its effective symbol set is only known
    /// after resolving the imported module.
    pub fn import_from(
        &mut self,
        scope: NodeId,
        module: &str,
        entries: &[(&str, Option<&str>)],
    ) -> NodeId {
        let names: Vec<ImportedName> = entries
            .iter()
            .map(|(name, alias)| ImportedName {
                name: name.to_string(),
                alias: alias.map(|a| a.to_string()),
            })
            .collect();
        let id = self.alloc(NodeKind::ImportFrom {
            module: module.to_string(),
            names: names.clone(),
        });
        self.attach_stmt(scope, id);
        for entry in &names {
            if entry.name != "*" {
                self.bind(scope, entry.local_name(), id);
            }
        }
        id
    }

    /// A class definition appended to `scope`'s body. `bases` are
    /// cross-links to already-built class declarations; they may live in
    /// other modules and are not re-parented.
    pub fn class_def(&mut self, scope: NodeId, name: &str, bases: &[NodeId]) -> NodeId {
        let id = self.alloc(NodeKind::ClassDef {
            name: name.to_string(),
            bases: bases.to_vec(),
            body: Vec::new(),
        });
        self.attach_stmt(scope, id);
        self.bind(scope, name, id);
        id
    }

    /// A function or method definition appended to `scope`'s body.
    /// Parameter names bind into the function's own name table.
    pub fn function_def(
        &mut self,
        scope: NodeId,
        name: &str,
        is_static: bool,
        params: Vec<NodeId>,
        returns: Option<NodeId>,
    ) -> NodeId {
        let id = self.alloc(NodeKind::FunctionDef {
            name: name.to_string(),
            is_static,
            params: params.clone(),
            returns,
            body: Vec::new(),
        });
        self.attach_stmt(scope, id);
        self.bind(scope, name, id);
        for p in params {
            self.adopt(id, p);
            if let NodeKind::Param { name, .. } = self.kind(p).clone() {
                self.bind(id, &name, p);
            }
        }
        if let Some(ret) = returns {
            self.adopt(id, ret);
        }
        id
    }

    /// Attach inference candidates to an expression node. The provider's
    /// `infer` yields these ahead of its own literal-based candidates.
    pub fn hint_infer(&mut self, expr: NodeId, candidates: Vec<Inferred>) {
        self.infer_hints.insert(expr, candidates);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_assignment_targets_in_scope() {
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let one = g.const_int(1);
        let x = g.assign_name("x");
        g.assign(m, vec![x], one);

        assert_eq!(g.lookup(m, "x"), &[x]);
        assert!(g.lookup(m, "y").is_empty());
    }

    #[test]
    fn binds_tuple_targets_per_element() {
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let a = g.assign_name("a");
        let b = g.assign_name("b");
        let tup = g.tuple_expr(vec![a, b]);
        let value = g.const_int(0);
        g.assign(m, vec![tup], value);

        assert_eq!(g.lookup(m, "a"), &[a]);
        assert_eq!(g.lookup(m, "b"), &[b]);
    }

    #[test]
    fn import_binds_alias_and_dotted_segments() {
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let imp = g.import(m, &[("pkg.sub", None), ("json", Some("j"))]);

        assert_eq!(g.lookup(m, "pkg.sub"), &[imp]);
        assert_eq!(g.lookup(m, "pkg"), &[imp]);
        assert_eq!(g.lookup(m, "j"), &[imp]);
        assert!(g.lookup(m, "json").is_empty());
    }

    #[test]
    fn wildcard_entry_binds_nothing() {
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        g.import_from(m, "other", &[("*", None)]);
        assert!(g.scope_locals.get(&m).is_none_or(|t| t.is_empty()));
    }

    #[test]
    fn function_binds_name_and_params() {
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let p = g.param("self", None);
        let f = g.function_def(m, "f", false, vec![p], None);

        assert_eq!(g.lookup(m, "f"), &[f]);
        assert_eq!(g.lookup(f, "self"), &[p]);
    }

    #[test]
    fn declaration_order_is_preserved() {
        let mut g = SyntaxGraph::new();
        let m = g.add_module("m");
        let one = g.const_int(1);
        let x1 = g.assign_name("x");
        g.assign(m, vec![x1], one);
        let two = g.const_int(2);
        let x2 = g.assign_name("x");
        g.assign(m, vec![x2], two);

        assert_eq!(g.lookup(m, "x"), &[x1, x2]);
    }
}
