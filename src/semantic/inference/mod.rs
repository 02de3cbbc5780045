//! Structure inference for the model builder.
//!
//! # Architecture
//!
//! Inference runs in a fixed order over a canonicalized snapshot:
//!
//! 1. **Foreign keys** - resolve declared keys, then the naming-convention
//!    fallback for columns without one
//! 2. **Kinds** - classify each column with the ordered [`KIND_RULES`]
//! 3. **Synthesis** - default metrics and verified queries from the finished
//!    tables and relationships
//!
//! Each step is a pure function of its input, so the whole pipeline is
//! deterministic.

mod inflection;
mod kinds;
mod relationships;
mod synthesis;

pub use inflection::{pluralize, singularize, table_matches_stem};
pub use kinds::{infer_kind, ColumnFacts, KindRule, KIND_RULES};
pub(crate) use relationships::resolve_foreign_keys;
pub use relationships::{ForeignKeyOrigin, ForeignKeyResolution, ResolvedForeignKey};
pub use synthesis::{synthesize_metrics, synthesize_verified_queries};

/// Tunable defaults for inference.
pub mod thresholds {
    /// A sampled column with at most this many distinct values (and fewer
    /// distinct values than rows) is treated as an enumeration.
    pub const ENUM_MAX_DISTINCT: u64 = 10;
}
