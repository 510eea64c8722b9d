//! Cross-module symbol and type resolution engine.
//!
//! Given a syntax graph built by `ontolink-graph`, this crate determines
//! what a name, attribute access, or type annotation refers to, across
//! module boundaries, aliasing, wildcard imports, and inheritance chains.
//! Results accumulate on graph nodes as memoized derived attributes; the
//! fact-emission layer reads them afterwards.
//!
//! Resolution is best-effort by design: every operation returns a
//! confident match, an explicit failure from the taxonomy in
//! [`ResolveError`], or a bounded number of speculative matches, and never
//! blocks indefinitely. Failures are absorbed at the boundary of the
//! single name, annotation, or field being resolved; they never abort
//! sibling items or the whole-module pass in [`annotator`].

pub mod annotation;
pub mod annotator;
pub mod error;
pub mod fields;
pub mod overrides;
pub mod trace;
pub mod tracker;
pub mod values;

pub use annotation::{resolve_annotation, structure_annotation};
pub use annotator::{
    annotate_module, fields_of, override_of, param_type_of, reference_of, return_type_of,
};
pub use error::{ResolveError, ResolveResult};
pub use fields::merged_fields;
pub use overrides::find_override;
pub use trace::ResolutionTrace;
pub use tracker::{track_attribute, track_name, track_type_name};
pub use values::resolve_value;
