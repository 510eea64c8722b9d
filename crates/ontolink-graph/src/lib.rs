//! Arena-based syntax graph provider for the ontolink resolution engine.
//!
//! This crate owns the syntax graph data model: an arena of syntax nodes
//! cross-linked by [`NodeId`] indexes, per-scope name tables with ordered
//! lookup, a module registry resolving dotted identifiers to module roots,
//! C3 linearization of class ancestries, and a bounded best-effort `infer`
//! primitive over expression nodes.
//!
//! It also owns the derived-attribute model that the resolution engine
//! attaches to nodes: write-once memo slots ([`Slot`]) with a three-state
//! read ([`MemoState`]), and the derived value types ([`FieldRecord`],
//! [`TypeShape`], [`ResolvedType`]).
//!
//! The parse step is out of scope: graphs are built programmatically
//! through the construction API in [`builder`], by upstream parsers or by
//! test fixtures.

pub mod arena;
pub mod builder;
pub mod derived;
pub mod error;
pub mod linearize;

pub use arena::{ConstValue, ImportedName, Inferred, NodeId, NodeKind, SyntaxGraph};
pub use derived::{DerivedSlots, FieldRecord, MemoState, ResolvedType, Slot, TypeShape};
pub use error::{GraphError, GraphResult};
