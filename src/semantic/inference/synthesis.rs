//! Default metric and verified query synthesis.
//!
//! Both functions work on finished model parts, not on raw metadata, so the
//! ontology decoder can regenerate the same defaults from a decoded model.

use std::collections::HashSet;

use crate::model::{Aggregation, LogicalTable, Metric, Relationship, SemanticKind, VerifiedQuery};

/// Aggregations generated for each measure candidate, in emission order.
const MEASURE_AGGREGATIONS: [Aggregation; 4] = [
    Aggregation::Sum,
    Aggregation::Avg,
    Aggregation::Min,
    Aggregation::Max,
];

/// Generate the default metric set.
///
/// Per table, in table order: `sum_/avg_/min_/max_<col>` for every measure
/// candidate, `count_<table>` for the table, and `count_distinct_<col>` for
/// every primary-key column. A name that is already taken gets `_<table>`
/// appended, then a numeric suffix.
pub fn synthesize_metrics(tables: &[LogicalTable]) -> Vec<Metric> {
    let mut taken = HashSet::new();
    let mut metrics = Vec::new();

    for table in tables {
        for column in table.columns_of_kind(SemanticKind::MeasureCandidate) {
            for aggregation in MEASURE_AGGREGATIONS {
                let base = format!("{}_{}", aggregation.as_str(), column.name);
                let name = unique_name(&base, &table.name, &mut taken);
                metrics.push(Metric::new(name, aggregation, &table.name, &column.name));
            }
        }

        let name = unique_name(&format!("count_{}", table.name), &table.name, &mut taken);
        metrics.push(Metric::row_count(name, &table.name));

        for column in table.primary_key_columns() {
            let base = format!("count_distinct_{}", column.name);
            let name = unique_name(&base, &table.name, &mut taken);
            metrics.push(Metric::new(name, Aggregation::CountDistinct, &table.name, &column.name));
        }
    }

    metrics
}

/// Generate one verified query per relationship.
///
/// Each query counts the target table grouped by the source table's
/// categorical dimensions. Relationships whose source has no categorical
/// dimension, or whose target has no row-count metric, are skipped.
pub fn synthesize_verified_queries(
    tables: &[LogicalTable],
    relationships: &[Relationship],
    metrics: &[Metric],
) -> Vec<VerifiedQuery> {
    let mut taken = HashSet::new();
    let mut queries = Vec::new();

    for rel in relationships {
        let (Some(source), Some(target)) = (
            tables.iter().find(|t| t.name == rel.source_table),
            tables.iter().find(|t| t.name == rel.target_table),
        ) else {
            continue;
        };

        let dimensions: Vec<&str> = source
            .columns_of_kind(SemanticKind::DimensionCategorical)
            .map(|c| c.name.as_str())
            .collect();
        if dimensions.is_empty() {
            log::debug!("no verified query for {}: source has no categorical dimensions", rel.describe());
            continue;
        }
        let Some(count) = metrics
            .iter()
            .find(|m| m.table == target.name && m.is_row_count())
        else {
            continue;
        };

        let base = format!("count_{}_by_{}", target.name, source.name);
        let name = unique_name(&base, &rel.source_column, &mut taken);

        let group_by = dimensions
            .iter()
            .map(|d| format!("s.{}", d))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "SELECT {group_by}, {aggregate} AS {metric} FROM {source} AS s JOIN {target} AS t ON s.{source_col} = t.{target_col} GROUP BY {group_by}",
            group_by = group_by,
            aggregate = count.to_sql(Some("t")),
            target_col = rel.target_column,
            metric = count.name,
            source = source.source,
            target = target.source,
            source_col = rel.source_column,
        );

        let mut referenced = vec![source.name.clone()];
        if target.name != source.name {
            referenced.push(target.name.clone());
        }
        queries.push(VerifiedQuery {
            name,
            tables: referenced,
            metrics: vec![count.name.clone()],
            query,
        });
    }

    queries
}

/// `base`, else `base_<qualifier>`, else `base_<qualifier>_<n>` for n = 2...
fn unique_name(base: &str, qualifier: &str, taken: &mut HashSet<String>) -> String {
    let mut candidate = base.to_string();
    if taken.contains(&candidate) {
        candidate = format!("{}_{}", base, qualifier);
        let mut n = 2;
        while taken.contains(&candidate) {
            candidate = format!("{}_{}_{}", base, qualifier, n);
            n += 1;
        }
    }
    taken.insert(candidate.clone());
    candidate
}
