//! Derived attributes attached to graph nodes by the resolution engine.
//!
//! Every derived attribute lives in a write-once [`Slot`]. A slot
//! distinguishes three states: not yet computed, computed with a value, and
//! computed as absent. The distinction matters because "resolution failed"
//! is itself a valid, cacheable outcome: the graph is reached non-linearly
//! through imports, and a consumer arriving at the same node via a
//! different path must reuse the recorded outcome instead of recomputing.
//!
//! Slots are backed by `once_cell::sync::OnceCell`, which gives the
//! write-once-if-absent discipline required when modules are processed in
//! parallel: the computed value for a node is deterministic given the
//! graph, so a benign race that computes it twice discards one result.

use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::arena::NodeId;

// ============================================================================
// Memo Slots
// ============================================================================

/// Read-side view of a memo slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoState<'a, T> {
    /// No computation has been attempted for this slot.
    NotComputed,
    /// A computation ran and produced a value.
    Present(&'a T),
    /// A computation ran and produced no value (e.g. resolution failed).
    Absent,
}

/// A write-once derived-attribute cell with a three-state read.
///
/// Internally `OnceCell<Option<T>>`: an empty cell means not computed, a
/// filled `Some` means present, a filled `None` means computed-as-absent.
#[derive(Debug)]
pub struct Slot<T>(OnceCell<Option<T>>);

// Manual impl: an empty slot needs no `T: Default`, and slotted types
// like `NodeId` have none.
impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot(OnceCell::new())
    }
}

impl<T> Slot<T> {
    /// Create an empty (not computed) slot.
    pub fn new() -> Self {
        Slot(OnceCell::new())
    }

    /// Current state of the slot.
    pub fn state(&self) -> MemoState<'_, T> {
        match self.0.get() {
            None => MemoState::NotComputed,
            Some(Some(value)) => MemoState::Present(value),
            Some(None) => MemoState::Absent,
        }
    }

    /// Whether a computation has run for this slot (present or absent).
    pub fn is_computed(&self) -> bool {
        self.0.get().is_some()
    }

    /// Return the cached outcome, running `compute` at most once if the
    /// slot is still empty. A `None` outcome is cached too and will not be
    /// recomputed.
    pub fn get_or_compute(&self, compute: impl FnOnce() -> Option<T>) -> Option<&T> {
        self.0.get_or_init(compute).as_ref()
    }
}

/// The derived-attribute slots carried by every syntax node.
///
/// Which slots are meaningful depends on the node kind: `reference` on
/// occurrence nodes, `fields` and `linearization` on class definitions,
/// `override_link` and `return_type` on function definitions, `param_type`
/// on parameters. Unused slots stay in the not-computed state forever.
#[derive(Debug, Default)]
pub struct DerivedSlots {
    /// Resolved declaration site for an occurrence node.
    pub reference: Slot<NodeId>,
    /// Merged inferred fields for a class definition.
    pub fields: Slot<Vec<FieldRecord>>,
    /// Nearest overridden ancestor method for a function definition.
    pub override_link: Slot<NodeId>,
    /// Resolved return annotation for a function definition.
    pub return_type: Slot<ResolvedType>,
    /// Resolved annotation for a parameter node.
    pub param_type: Slot<ResolvedType>,
    /// Cached C3 linearization for a class definition (provider-level).
    pub linearization: Slot<Vec<NodeId>>,
}

// ============================================================================
// Structured Annotations
// ============================================================================

/// The syntactic shape of a type annotation, built without any name
/// resolution.
///
/// Structuring and resolution are two separate passes: this type captures
/// what the annotation expression looks like, [`ResolvedType`] captures
/// what its leaves refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeShape {
    /// A simple or dotted type name, e.g. `str` or `os.PathLike`.
    Leaf(String),
    /// Equivalent alternatives, e.g. `int | float | None`.
    Union(Vec<TypeShape>),
    /// A parameterized type, e.g. `Tuple[int, str]`.
    Parameterized {
        base: Box<TypeShape>,
        args: Vec<TypeShape>,
    },
    /// A shape the structurer does not attempt (e.g. stringified
    /// forward-reference annotations).
    Unresolved,
}

/// A structured annotation with every leaf replaced by the class
/// declaration it refers to, or [`ResolvedType::Unresolved`] where tracking
/// failed. Shape is preserved exactly from the [`TypeShape`] it was
/// resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResolvedType {
    /// A class declaration site.
    Class(NodeId),
    /// Equivalent alternatives.
    Union(Vec<ResolvedType>),
    /// A parameterized type.
    Parameterized {
        base: Box<ResolvedType>,
        args: Vec<ResolvedType>,
    },
    /// A leaf (or subtree) that could not be resolved.
    Unresolved,
}

// ============================================================================
// Field Records
// ============================================================================

/// Merged description of one inferred class field.
///
/// Fields are not declared in the analyzed language; they emerge from
/// assignment statements in class bodies and constructors. The merge keeps
/// interpreter-order overwrite semantics: `annotation` and `value` both
/// come from the newest occurrence, while `declaring_site` keeps the
/// oldest one, so documentation points at the first declaration.
#[derive(Debug, Clone, Serialize)]
pub struct FieldRecord {
    /// Field name.
    pub name: String,
    /// Annotation expression node from the newest occurrence.
    pub annotation: Option<NodeId>,
    /// Value expression node from the newest occurrence (absent for
    /// tuple-assignment elements, where the aggregate value cannot be
    /// attributed to one element).
    pub value: Option<NodeId>,
    /// Target node of the oldest occurrence.
    pub declaring_site: NodeId,
    /// Best-effort resolved type: from the annotation when present,
    /// otherwise inferred from the newest value.
    pub ty: Option<ResolvedType>,
}

// ============================================================================
// Tests
// ============================================================================
