//! Semantic kind rules.
//!
//! Column kinds are decided by an ordered rule table. Rules are evaluated
//! top to bottom and the first match wins, so the order of [`KIND_RULES`]
//! *is* the policy.
//!
//! | # | rule                  | kind                  |
//! |---|-----------------------|-----------------------|
//! | 1 | primary key           | identifier            |
//! | 2 | resolved foreign key  | identifier            |
//! | 3 | date/time family      | dimension-temporal    |
//! | 4 | boolean/enum/small    | dimension-categorical |
//! | 5 | numeric, not FK       | measure-candidate     |
//! | 6 | numeric, dangling FK  | dimension-numeric     |
//! | 7 | anything else         | dimension-categorical |

use crate::model::{SemanticKind, TypeFamily};

/// Everything the rules look at for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnFacts {
    pub primary_key: bool,
    /// Declared or naming-convention FK whose target resolved.
    pub resolved_foreign_key: bool,
    /// Declared FK whose target is missing from the snapshot.
    pub dangling_foreign_key: bool,
    pub family: TypeFamily,
    /// Sampled distinct values, when content stats exist.
    pub distinct_count: Option<u64>,
    /// Sampled rows, when content stats exist.
    pub row_count: Option<u64>,
}

/// One row of the rule table.
#[derive(Debug, Clone)]
pub struct KindRule {
    /// Rule identifier, used in debug logs.
    pub name: &'static str,
    pub description: &'static str,
    /// Kind assigned when the rule matches.
    pub kind: SemanticKind,
    matcher: KindMatcher,
}

#[derive(Debug, Clone, Copy)]
enum KindMatcher {
    PrimaryKey,
    ResolvedForeignKey,
    Temporal,
    /// Boolean, declared enum, or few distinct values in the sample.
    Categorical,
    /// Numeric with no declared foreign key.
    NumericMeasure,
    /// Numeric whose declared foreign key was dropped.
    NumericDanglingKey,
    Always,
}

/// The rule table, in priority order.
pub static KIND_RULES: &[KindRule] = &[
    KindRule {
        name: "primary_key",
        description: "Primary key columns identify rows",
        kind: SemanticKind::Identifier,
        matcher: KindMatcher::PrimaryKey,
    },
    KindRule {
        name: "foreign_key",
        description: "Resolved foreign keys identify related rows",
        kind: SemanticKind::Identifier,
        matcher: KindMatcher::ResolvedForeignKey,
    },
    KindRule {
        name: "temporal",
        description: "Date and time types are temporal dimensions",
        kind: SemanticKind::DimensionTemporal,
        matcher: KindMatcher::Temporal,
    },
    KindRule {
        name: "categorical",
        description: "Booleans, enums and low-cardinality columns are categories",
        kind: SemanticKind::DimensionCategorical,
        matcher: KindMatcher::Categorical,
    },
    KindRule {
        name: "numeric_measure",
        description: "Numeric non-key columns can be aggregated",
        kind: SemanticKind::MeasureCandidate,
        matcher: KindMatcher::NumericMeasure,
    },
    KindRule {
        name: "numeric_dangling_key",
        description: "Numeric columns with an unresolved foreign key are kept as plain dimensions",
        kind: SemanticKind::DimensionNumeric,
        matcher: KindMatcher::NumericDanglingKey,
    },
    KindRule {
        name: "fallback",
        description: "Everything else is a category",
        kind: SemanticKind::DimensionCategorical,
        matcher: KindMatcher::Always,
    },
];

impl KindRule {
    /// Whether this rule applies to a column.
    pub fn matches(&self, facts: &ColumnFacts, enum_max_distinct: u64) -> bool {
        match self.matcher {
            KindMatcher::PrimaryKey => facts.primary_key,
            KindMatcher::ResolvedForeignKey => facts.resolved_foreign_key,
            KindMatcher::Temporal => facts.family.is_temporal(),
            KindMatcher::Categorical => {
                matches!(facts.family, TypeFamily::Boolean | TypeFamily::Enum)
                    || is_small_domain(facts, enum_max_distinct)
            }
            KindMatcher::NumericMeasure => facts.family.is_numeric() && !facts.dangling_foreign_key,
            KindMatcher::NumericDanglingKey => facts.family.is_numeric() && facts.dangling_foreign_key,
            KindMatcher::Always => true,
        }
    }
}

/// Few distinct values relative to the sample.
fn is_small_domain(facts: &ColumnFacts, enum_max_distinct: u64) -> bool {
    match (facts.distinct_count, facts.row_count) {
        (Some(distinct), Some(rows)) => distinct <= enum_max_distinct && rows > distinct,
        _ => false,
    }
}

/// Classify a column with the first matching rule.
///
/// Returns the kind and the name of the rule that decided it.
pub fn infer_kind(facts: &ColumnFacts, enum_max_distinct: u64) -> (SemanticKind, &'static str) {
    KIND_RULES
        .iter()
        .find(|rule| rule.matches(facts, enum_max_distinct))
        .map(|rule| (rule.kind, rule.name))
        // The last rule always matches.
        .unwrap_or((SemanticKind::DimensionCategorical, "fallback"))
}
