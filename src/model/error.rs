//! Validation errors for semantic models.

use thiserror::Error;

/// Result type for model construction.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Malformed or contradictory model input.
///
/// Every variant names the entity that caused the failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A name is empty, or empty after normalization.
    #[error("{entity} has an empty name")]
    EmptyName { entity: String },

    /// Two tables share a name after normalization.
    #[error("tables '{first}' and '{second}' both normalize to '{normalized}'")]
    DuplicateTable {
        first: String,
        second: String,
        normalized: String,
    },

    /// Two columns of one table share a name after normalization.
    #[error("columns '{first}' and '{second}' of table '{table}' both normalize to '{normalized}'")]
    DuplicateColumn {
        table: String,
        first: String,
        second: String,
        normalized: String,
    },

    /// A foreign key points at the column that declares it.
    #[error("column '{table}.{column}' declares a foreign key to itself")]
    SelfReferentialForeignKey { table: String, column: String },

    /// A reference names a table that is not in the model.
    #[error("{referenced_by} references unknown table '{table}'")]
    UnknownTable { referenced_by: String, table: String },

    /// A reference names a column that is not in the table.
    #[error("{referenced_by} references unknown column '{table}.{column}'")]
    UnknownColumn {
        referenced_by: String,
        table: String,
        column: String,
    },

    /// A reference names a metric that is not in the model.
    #[error("{referenced_by} references unknown metric '{metric}'")]
    UnknownMetric { referenced_by: String, metric: String },

    /// More than one relationship starts at the same column.
    #[error("column '{table}.{column}' is the source of more than one relationship")]
    DuplicateRelationship { table: String, column: String },

    /// Two metrics share a name.
    #[error("duplicate metric name '{0}'")]
    DuplicateMetric(String),

    /// Two verified queries share a name.
    #[error("duplicate verified query name '{0}'")]
    DuplicateVerifiedQuery(String),

    /// A column-less metric whose aggregation needs a column.
    #[error("metric '{metric}' uses {aggregation} but names no column")]
    MissingMetricColumn { metric: String, aggregation: String },
}
