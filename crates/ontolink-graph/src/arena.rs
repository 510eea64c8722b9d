//! The syntax node arena and its navigation primitives.
//!
//! The graph is deliberately not modeled as a tree: imports create
//! re-entrant paths between modules, so nodes live in one arena and refer
//! to each other by [`NodeId`] index. The resolution engine only borrows
//! nodes and never mutates structure; the only mutation after construction
//! is attaching derived attributes through the write-once slots in
//! [`crate::derived`].

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::derived::DerivedSlots;
use crate::error::{GraphError, GraphResult};
use crate::linearize::linearize;

// ============================================================================
// Node Identity
// ============================================================================

/// Index of a node in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena index as usize.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

// ============================================================================
// Node Kinds
// ============================================================================

/// A literal constant carried by a `Const` node.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    None,
    Ellipsis,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ConstValue {
    /// Builtin type name of the literal, used by best-effort inference.
    /// `Ellipsis` has no useful value type and yields nothing.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            ConstValue::None => Some("NoneType"),
            ConstValue::Ellipsis => None,
            ConstValue::Str(_) => Some("str"),
            ConstValue::Int(_) => Some("int"),
            ConstValue::Float(_) => Some("float"),
            ConstValue::Bool(_) => Some("bool"),
        }
    }
}

/// One `(name, alias)` entry of an import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedName {
    /// Imported module or object name (dotted for `import a.b`; `"*"` for
    /// wildcard entries of a from-import).
    pub name: String,
    /// Local alias, if the statement renames the binding.
    pub alias: Option<String>,
}

impl ImportedName {
    /// The name this entry binds locally: the alias when present, the
    /// imported name otherwise.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Tagged variant over syntax node kinds.
///
/// Structural children are carried as [`NodeId`] payload fields in source
/// order; [`SyntaxGraph::children`] reconstructs the ordered child list
/// from them.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A module root. `name` is the dotted module identifier.
    Module { name: String, body: Vec<NodeId> },
    /// A class definition. `bases` are the direct base class nodes.
    ClassDef {
        name: String,
        bases: Vec<NodeId>,
        body: Vec<NodeId>,
    },
    /// A function or method definition.
    FunctionDef {
        name: String,
        is_static: bool,
        params: Vec<NodeId>,
        returns: Option<NodeId>,
        body: Vec<NodeId>,
    },
    /// A formal parameter with an optional annotation expression.
    Param {
        name: String,
        annotation: Option<NodeId>,
    },
    /// `import a.b as c, d`
    Import { names: Vec<ImportedName> },
    /// `from module import x as y, *`
    ImportFrom {
        module: String,
        names: Vec<ImportedName>,
    },
    /// A name occurrence in load context.
    Name { name: String },
    /// A name occurrence in store context (assignment target).
    AssignName { name: String },
    /// Attribute access in load context, `base.attr`.
    Attribute { base: NodeId, attr: String },
    /// Attribute access in store context, `base.attr = ...`.
    AssignAttr { base: NodeId, attr: String },
    /// `global a, b`
    Global { names: Vec<String> },
    /// `nonlocal a, b`
    Nonlocal { names: Vec<String> },
    /// `t1 = t2 = value`
    Assign { targets: Vec<NodeId>, value: NodeId },
    /// `target: annotation = value`
    AnnAssign {
        target: NodeId,
        annotation: NodeId,
        value: Option<NodeId>,
    },
    /// Binary operation; annotations only ever use `|`.
    BinOp {
        op: String,
        left: NodeId,
        right: NodeId,
    },
    /// `value[slice]`
    Subscript { value: NodeId, slice: NodeId },
    /// Tuple literal.
    TupleExpr { elements: Vec<NodeId> },
    /// List literal.
    ListExpr { elements: Vec<NodeId> },
    /// A literal constant.
    Const { value: ConstValue },
    /// `func(args...)`
    Call { func: NodeId, args: Vec<NodeId> },
    /// An expression used as a statement.
    ExprStmt { value: NodeId },
    /// `*value` inside a tuple target.
    Starred { value: NodeId },
}

impl NodeKind {
    /// Whether this kind defines a local name table.
    pub fn is_scope(&self) -> bool {
        matches!(
            self,
            NodeKind::Module { .. } | NodeKind::ClassDef { .. } | NodeKind::FunctionDef { .. }
        )
    }
}

// ============================================================================
// Best-Effort Inference
// ============================================================================

/// One candidate produced by the provider's bounded `infer` primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Inferred {
    /// The expression evaluates to an instance of this class declaration.
    Class(NodeId),
    /// The expression evaluates to a value of this (possibly dotted) type
    /// name, to be tracked through the occurrence's scope.
    TypeName(String),
}

// ============================================================================
// The Graph
// ============================================================================

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) derived: DerivedSlots,
}

/// The syntax graph: node arena, per-scope name tables, and module
/// registry. Construction happens through the API in [`crate::builder`];
/// afterwards the graph is navigated through shared references only.
#[derive(Debug, Default)]
pub struct SyntaxGraph {
    pub(crate) nodes: Vec<NodeData>,
    /// Dotted module identifier -> module root node.
    pub(crate) modules: IndexMap<String, NodeId>,
    /// The module whose names are reachable from every module scope.
    pub(crate) builtins: Option<NodeId>,
    /// Per-scope name tables: declaration sites in binding order.
    pub(crate) scope_locals: HashMap<NodeId, IndexMap<String, Vec<NodeId>>>,
    /// Inference candidates attached at construction time.
    pub(crate) infer_hints: HashMap<NodeId, Vec<Inferred>>,
}

impl SyntaxGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        SyntaxGraph::default()
    }

    /// Kind of a node.
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    /// Parent link of a node (`None` for module roots).
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Derived-attribute slots of a node.
    pub fn derived(&self, id: NodeId) -> &DerivedSlots {
        &self.nodes[id.index()].derived
    }

    /// Ordered structural children of a node.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match self.kind(id) {
            NodeKind::Module { body, .. } => body.clone(),
            // Bases are cross-links to class declarations, possibly in other
            // modules; they are not structural children of this subtree.
            NodeKind::ClassDef { body, .. } => body.clone(),
            NodeKind::FunctionDef {
                params,
                returns,
                body,
                ..
            } => params
                .iter()
                .copied()
                .chain(returns.iter().copied())
                .chain(body.iter().copied())
                .collect(),
            NodeKind::Param { annotation, .. } => annotation.iter().copied().collect(),
            NodeKind::Import { .. }
            | NodeKind::ImportFrom { .. }
            | NodeKind::Name { .. }
            | NodeKind::AssignName { .. }
            | NodeKind::Global { .. }
            | NodeKind::Nonlocal { .. }
            | NodeKind::Const { .. } => Vec::new(),
            NodeKind::Attribute { base, .. } | NodeKind::AssignAttr { base, .. } => vec![*base],
            NodeKind::Assign { targets, value } => {
                targets.iter().copied().chain(std::iter::once(*value)).collect()
            }
            NodeKind::AnnAssign {
                target,
                annotation,
                value,
            } => std::iter::once(*target)
                .chain(std::iter::once(*annotation))
                .chain(value.iter().copied())
                .collect(),
            NodeKind::BinOp { left, right, .. } => vec![*left, *right],
            NodeKind::Subscript { value, slice } => vec![*value, *slice],
            NodeKind::TupleExpr { elements } | NodeKind::ListExpr { elements } => elements.clone(),
            NodeKind::Call { func, args } => {
                std::iter::once(*func).chain(args.iter().copied()).collect()
            }
            NodeKind::ExprStmt { value } | NodeKind::Starred { value } => vec![*value],
        }
    }

    /// Whether the node defines a local name table.
    pub fn is_scope(&self, id: NodeId) -> bool {
        self.kind(id).is_scope()
    }

    /// Nearest enclosing scope, counting the node itself when it is one.
    ///
    /// Every attached node has a scope; `None` indicates a detached node
    /// and is treated as a malformed graph by callers.
    pub fn enclosing_scope(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = id;
        loop {
            if self.is_scope(cur) {
                return Some(cur);
            }
            cur = self.parent(cur)?;
        }
    }

    /// The module root containing a node.
    pub fn module_of(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = id;
        while let Some(parent) = self.parent(cur) {
            cur = parent;
        }
        match self.kind(cur) {
            NodeKind::Module { .. } => Some(cur),
            _ => None,
        }
    }

    /// Declared name of a node, for the kinds that carry one.
    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Module { name, .. }
            | NodeKind::ClassDef { name, .. }
            | NodeKind::FunctionDef { name, .. }
            | NodeKind::Param { name, .. }
            | NodeKind::Name { name }
            | NodeKind::AssignName { name } => Some(name),
            NodeKind::Attribute { attr, .. } | NodeKind::AssignAttr { attr, .. } => Some(attr),
            _ => None,
        }
    }

    /// Ordered declaration sites visible under `name` in this scope's own
    /// table. Empty when the scope does not bind the name; outward search
    /// is the engine's responsibility.
    pub fn lookup(&self, scope: NodeId, name: &str) -> &[NodeId] {
        self.scope_locals
            .get(&scope)
            .and_then(|table| table.get(name))
            .map(|sites| sites.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve a dotted module identifier to its module root.
    pub fn resolve_module(&self, dotted: &str) -> GraphResult<NodeId> {
        self.modules
            .get(dotted)
            .copied()
            .ok_or_else(|| GraphError::ModuleNotFound {
                path: dotted.to_string(),
            })
    }

    /// The registered builtins module, if any.
    pub fn builtins_module(&self) -> Option<NodeId> {
        self.builtins
    }

    /// The statement containing `id`: the nearest ancestor-or-self whose
    /// parent is a scope. `None` for scope roots themselves.
    pub fn statement_of(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = id;
        loop {
            let parent = self.parent(cur)?;
            if self.is_scope(parent) {
                return Some(cur);
            }
            cur = parent;
        }
    }

    /// The statement preceding `stmt` in its scope's body.
    pub fn previous_sibling(&self, stmt: NodeId) -> Option<NodeId> {
        let parent = self.parent(stmt)?;
        let body = match self.kind(parent) {
            NodeKind::Module { body, .. }
            | NodeKind::ClassDef { body, .. }
            | NodeKind::FunctionDef { body, .. } => body,
            _ => return None,
        };
        let idx = body.iter().position(|&s| s == stmt)?;
        if idx == 0 {
            None
        } else {
            Some(body[idx - 1])
        }
    }

    /// C3 linearization of a class: the class itself first, then its
    /// ancestors in resolution order. Cached on the class node.
    pub fn linearization(&self, class: NodeId) -> GraphResult<&[NodeId]> {
        debug_assert!(matches!(self.kind(class), NodeKind::ClassDef { .. }));
        let slots = self.derived(class);
        match slots
            .linearization
            .get_or_compute(|| linearize(self, class).ok())
        {
            Some(order) => Ok(order.as_slice()),
            None => Err(GraphError::InconsistentHierarchy {
                class_name: self.name_of(class).unwrap_or("<anonymous>").to_string(),
            }),
        }
    }

    /// Methods directly declared in a class body, in source order.
    pub fn methods_of(&self, class: NodeId) -> Vec<NodeId> {
        match self.kind(class) {
            NodeKind::ClassDef { body, .. } => body
                .iter()
                .copied()
                .filter(|&n| matches!(self.kind(n), NodeKind::FunctionDef { .. }))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Best-effort inference candidates for an expression node.
    ///
    /// Yields construction-time hints when present, otherwise the literal
    /// type of a constant. May be empty; consumers must cap how many
    /// candidates they examine.
    pub fn infer(&self, expr: NodeId) -> Vec<Inferred> {
        if let Some(hints) = self.infer_hints.get(&expr) {
            if !hints.is_empty() {
                return hints.clone();
            }
        }
        if let NodeKind::Const { value } = self.kind(expr) {
            if let Some(name) = value.type_name() {
                return vec![Inferred::TypeName(name.to_string())];
            }
        }
        Vec::new()
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
