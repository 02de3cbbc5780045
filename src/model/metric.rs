//! Metrics and verified queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Aggregation function of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Sum,
    Avg,
    Count,
    CountDistinct,
    Min,
    Max,
}

impl Aggregation {
    pub fn as_str(self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Avg => "avg",
            Aggregation::Count => "count",
            Aggregation::CountDistinct => "count_distinct",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
        }
    }

    /// Only `count` may omit its column (meaning `COUNT(*)`).
    pub fn requires_column(self) -> bool {
        !matches!(self, Aggregation::Count)
    }

    /// SQL rendering over an expression.
    pub fn to_sql(self, expr: &str) -> String {
        match self {
            Aggregation::Sum => format!("SUM({})", expr),
            Aggregation::Avg => format!("AVG({})", expr),
            Aggregation::Count => format!("COUNT({})", expr),
            Aggregation::CountDistinct => format!("COUNT(DISTINCT {})", expr),
            Aggregation::Min => format!("MIN({})", expr),
            Aggregation::Max => format!("MAX({})", expr),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sum" => Ok(Aggregation::Sum),
            "avg" => Ok(Aggregation::Avg),
            "count" => Ok(Aggregation::Count),
            "count_distinct" => Ok(Aggregation::CountDistinct),
            "min" => Ok(Aggregation::Min),
            "max" => Ok(Aggregation::Max),
            other => Err(format!("unknown aggregation '{}'", other)),
        }
    }
}

/// A named aggregation over a table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub aggregation: Aggregation,
    pub table: String,
    /// `None` only for whole-table `count`.
    pub column: Option<String>,
    /// Opaque filter predicate, carried but never interpreted.
    pub filter: Option<String>,
    pub description: Option<String>,
}

impl Metric {
    /// Create a metric over a column.
    pub fn new(
        name: impl Into<String>,
        aggregation: Aggregation,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            aggregation,
            table: table.into(),
            column: Some(column.into()),
            filter: None,
            description: None,
        }
    }

    /// Create a whole-table row count.
    pub fn row_count(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aggregation: Aggregation::Count,
            table: table.into(),
            column: None,
            filter: None,
            description: None,
        }
    }

    /// Builder-style: set the filter expression.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Builder-style: set documentation.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether this is the whole-table `COUNT(*)` of its table.
    pub fn is_row_count(&self) -> bool {
        self.aggregation == Aggregation::Count && self.column.is_none()
    }

    /// SQL expression for the metric, qualified by `alias` when given.
    pub fn to_sql(&self, alias: Option<&str>) -> String {
        match (&self.column, alias) {
            (None, _) => self.aggregation.to_sql("*"),
            (Some(col), Some(alias)) => self.aggregation.to_sql(&format!("{}.{}", alias, col)),
            (Some(col), None) => self.aggregation.to_sql(col),
        }
    }
}

/// A named, pre-validated query over the model.
///
/// The query text is never executed; only its table and metric references
/// are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedQuery {
    pub name: String,
    /// Referenced logical tables, in query order.
    pub tables: Vec<String>,
    /// Referenced metrics, in query order.
    pub metrics: Vec<String>,
    pub query: String,
}
