//! Semantic model builder.
//!
//! Consumes a metadata snapshot and infers structure from it with
//! deterministic heuristics. The pipeline has five phases:
//!
//! 1. **Normalize** - canonical names, collision checks, sorted input
//! 2. **Classify** - ordered rules assign each column a semantic kind
//! 3. **Relate** - declared foreign keys, then the naming-convention fallback
//! 4. **Metrics** - default aggregations per measure, table and key
//! 5. **Queries** - one verified query per relationship (optional)
//!
//! Phases 2 and 3 are interleaved in code (kinds depend on which keys
//! resolved), but the rule order is fixed and visible in
//! [`inference::KIND_RULES`].
//!
//! Fatal problems come back as [`ValidationError`](crate::model::ValidationError);
//! everything else is an [`Advisory`] on the [`BuildOutcome`].

mod advisory;
mod builder;
pub(crate) mod canonical;
pub mod inference;

pub use advisory::{Advisory, AmbiguousInferenceWarning};
pub use builder::{build, BuildOptions, BuildOutcome, SemanticModelBuilder};
