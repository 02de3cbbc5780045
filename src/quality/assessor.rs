//! Score computation.

use std::collections::HashMap;

use crate::metadata::{ColumnMetadata, ContentStats, TableMetadata, ValuePattern};
use crate::model::{normalize_name, TypeFamily};
use crate::semantic::inference::singularize;

use super::report::{QualityReport, SubScore, TableQuality, Tier};
use super::{thresholds, weights};

const DOCUMENTATION: &str = "Documentation Coverage";
const PRIMARY_KEYS: &str = "Primary Key Coverage";
const FOREIGN_KEYS: &str = "Foreign Key Relationships";
const DATA_TYPES: &str = "Data Type Appropriateness";
const NULL_VALUES: &str = "Null Value Quality";
const CONSISTENCY: &str = "Data Consistency";
const DUPLICATES: &str = "Duplicate Records";

/// Score a set of tables for semantic-layer readiness.
///
/// Pure and total: any input, including an empty one, yields a report.
pub fn assess(tables: &[TableMetadata]) -> QualityReport {
    let mut sorted: Vec<&TableMetadata> = tables.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    let catalog = Catalog::new(&sorted);

    let per_table: Vec<TableQuality> = sorted.iter().map(|t| table_quality(t, &catalog)).collect();

    let documentation = documentation_score(&sorted);
    let primary_keys = primary_key_score(&sorted);
    let foreign_keys = foreign_key_score(&sorted, &catalog);
    let data_types = data_type_score(&sorted);
    let structural = round(
        weights::DOCUMENTATION * documentation.score
            + weights::PRIMARY_KEYS * primary_keys.score
            + weights::FOREIGN_KEYS * foreign_keys.score
            + weights::DATA_TYPES * data_types.score,
    );

    let mut sub_scores = vec![documentation, primary_keys, foreign_keys, data_types];

    let with_stats: Vec<(&TableMetadata, &ContentStats)> = sorted
        .iter()
        .filter_map(|t| t.content_stats.as_ref().map(|s| (*t, s)))
        .collect();
    let content = if with_stats.is_empty() {
        None
    } else {
        let (nulls, consistency, duplicates) = content_scores(&with_stats);
        let score = round(
            weights::NON_NULL * mean(with_stats.iter().map(|(t, s)| 100.0 - null_ratio(t, s)))
                + weights::CONSISTENCY * mean(with_stats.iter().map(|(t, _)| consistency_score(t)))
                + weights::UNIQUE_ROWS * mean(with_stats.iter().map(|(_, s)| 100.0 - duplicate_ratio(s))),
        );
        sub_scores.extend([nulls, consistency, duplicates]);
        Some(score)
    };

    let overall = match content {
        Some(content) => round(weights::STRUCTURAL * structural + weights::CONTENT * content),
        None => structural,
    };
    let tier = Tier::from_score(overall);
    let recommendations = recommendations(&sub_scores, &per_table);

    log::info!(
        "assessed {} tables: overall {:.1} ({}), structural {:.1}, content {}",
        per_table.len(),
        overall,
        tier,
        structural,
        content.map_or_else(|| "unavailable".to_string(), |c| format!("{:.1}", c))
    );

    QualityReport {
        overall_score: overall,
        tier,
        structural_score: structural,
        content_score: content,
        content_unavailable: content.is_none(),
        per_table,
        sub_scores,
        recommendations,
    }
}

/// Normalized table name to its normalized column names.
struct Catalog {
    columns: HashMap<String, Vec<String>>,
}

impl Catalog {
    fn new(tables: &[&TableMetadata]) -> Self {
        let columns = tables
            .iter()
            .map(|t| {
                (
                    normalize_name(&t.name),
                    t.columns.iter().map(|c| normalize_name(&c.name)).collect(),
                )
            })
            .collect();
        Self { columns }
    }

    fn resolves(&self, column: &ColumnMetadata) -> bool {
        column.foreign_key.as_ref().is_some_and(|fk| {
            self.columns
                .get(&normalize_name(&fk.target_table))
                .is_some_and(|cols| cols.contains(&normalize_name(&fk.target_column)))
        })
    }
}

/// `<stem>_id` columns other than the table's own `<singular>_id`.
fn is_foreign_key_shaped(table: &TableMetadata, column: &ColumnMetadata) -> bool {
    let name = normalize_name(&column.name);
    match name.strip_suffix("_id") {
        Some(stem) if !stem.is_empty() => stem != singularize(&normalize_name(&table.name)),
        _ => false,
    }
}

fn has_text(text: &Option<String>) -> bool {
    text.as_deref().is_some_and(|t| !t.trim().is_empty())
}

fn is_appropriately_typed(table: &TableMetadata, column: &ColumnMetadata) -> bool {
    let family = TypeFamily::from_physical(&column.physical_type);
    if family.is_generic() {
        return false;
    }
    let typed_values_in_text = family.is_textual()
        && table
            .column_stats(&column.name)
            .and_then(|s| s.pattern)
            .is_some_and(|p| matches!(p, ValuePattern::Numeric | ValuePattern::Temporal));
    !typed_values_in_text
}

fn documentation_score(tables: &[&TableMetadata]) -> SubScore {
    let mut total = 0usize;
    let mut documented = 0usize;
    let mut issues = Vec::new();
    for table in tables {
        total += 1;
        if has_text(&table.description) {
            documented += 1;
        } else {
            issues.push(format!("{}: no description", table.name));
        }
        for column in &table.columns {
            total += 1;
            if has_text(&column.description) {
                documented += 1;
            } else {
                issues.push(format!("{}.{}: no description", table.name, column.name));
            }
        }
    }
    sub_score(
        DOCUMENTATION,
        percentage(documented, total, 0.0),
        format!("{}/{} tables and columns are documented", documented, total),
        issues,
    )
}

fn primary_key_score(tables: &[&TableMetadata]) -> SubScore {
    let with_pk = tables.iter().filter(|t| t.has_primary_key()).count();
    let issues = tables
        .iter()
        .filter(|t| !t.has_primary_key())
        .map(|t| format!("{}: no primary key", t.name))
        .collect();
    sub_score(
        PRIMARY_KEYS,
        percentage(with_pk, tables.len(), 0.0),
        format!("{}/{} tables have a primary key", with_pk, tables.len()),
        issues,
    )
}

fn foreign_key_score(tables: &[&TableMetadata], catalog: &Catalog) -> SubScore {
    let mut shaped = 0usize;
    let mut resolved = 0usize;
    let mut issues = Vec::new();
    for table in tables {
        for column in table.columns.iter().filter(|c| is_foreign_key_shaped(table, c)) {
            shaped += 1;
            if catalog.resolves(column) {
                resolved += 1;
            } else {
                issues.push(format!("{}.{}: no resolvable foreign key", table.name, column.name));
            }
        }
    }
    sub_score(
        FOREIGN_KEYS,
        percentage(resolved, shaped, 100.0),
        format!("{}/{} key-like columns have a resolvable foreign key", resolved, shaped),
        issues,
    )
}

fn data_type_score(tables: &[&TableMetadata]) -> SubScore {
    let mut total = 0usize;
    let mut appropriate = 0usize;
    let mut issues = Vec::new();
    for table in tables {
        for column in &table.columns {
            total += 1;
            if is_appropriately_typed(table, column) {
                appropriate += 1;
            } else {
                issues.push(format!("{}.{}: {}", table.name, column.name, column.physical_type));
            }
        }
    }
    sub_score(
        DATA_TYPES,
        percentage(appropriate, total, 100.0),
        format!("{}/{} columns have appropriate types", appropriate, total),
        issues,
    )
}

/// Null percentage over every cell of the table.
fn null_ratio(table: &TableMetadata, stats: &ContentStats) -> f64 {
    let cells = stats.row_count.saturating_mul(table.columns.len() as u64);
    if cells == 0 {
        return 0.0;
    }
    let nulls: u64 = stats.per_column.iter().map(|c| c.null_count).sum();
    (nulls as f64 / cells as f64 * 100.0).min(100.0)
}

fn duplicate_ratio(stats: &ContentStats) -> f64 {
    if stats.row_count == 0 {
        return 0.0;
    }
    (stats.duplicate_row_count as f64 / stats.row_count as f64 * 100.0).min(100.0)
}

/// 100 minus the share of text columns with mixed-case values.
fn consistency_score(table: &TableMetadata) -> f64 {
    let text_columns: Vec<&ColumnMetadata> = table
        .columns
        .iter()
        .filter(|c| TypeFamily::from_physical(&c.physical_type).is_textual())
        .collect();
    let mixed = text_columns
        .iter()
        .filter(|c| table.column_stats(&c.name).and_then(|s| s.mixed_case) == Some(true))
        .count();
    100.0 - percentage(mixed, text_columns.len(), 0.0)
}

fn content_scores(with_stats: &[(&TableMetadata, &ContentStats)]) -> (SubScore, SubScore, SubScore) {
    let mut null_issues = Vec::new();
    let mut consistency_issues = Vec::new();
    let mut duplicate_issues = Vec::new();
    let mut high_null_columns = 0usize;
    let mut total_columns = 0usize;

    for (table, stats) in with_stats {
        for column in &table.columns {
            total_columns += 1;
            let Some(col_stats) = table.column_stats(&column.name) else {
                continue;
            };
            let pct = percentage_u64(col_stats.null_count, stats.row_count);
            if pct > thresholds::HIGH_NULL_PERCENT {
                high_null_columns += 1;
                null_issues.push(format!("{}.{}: {:.1}% null", table.name, column.name, pct));
            }
            if col_stats.mixed_case == Some(true) && TypeFamily::from_physical(&column.physical_type).is_textual() {
                consistency_issues.push(format!("{}.{}: mixed case formatting", table.name, column.name));
            }
        }
        if stats.duplicate_row_count > 0 {
            duplicate_issues.push(format!(
                "{}: {} duplicates ({:.1}%)",
                table.name,
                stats.duplicate_row_count,
                duplicate_ratio(stats)
            ));
        }
    }

    let nulls = sub_score(
        NULL_VALUES,
        round(mean(with_stats.iter().map(|(t, s)| 100.0 - null_ratio(t, s)))),
        format!(
            "{}/{} columns have >{}% null values",
            high_null_columns, total_columns, thresholds::HIGH_NULL_PERCENT
        ),
        null_issues,
    );
    let consistency = sub_score(
        CONSISTENCY,
        round(mean(with_stats.iter().map(|(t, _)| consistency_score(t)))),
        format!("{} text columns have formatting issues", consistency_issues.len()),
        consistency_issues,
    );
    let duplicates = sub_score(
        DUPLICATES,
        round(mean(with_stats.iter().map(|(_, s)| 100.0 - duplicate_ratio(s)))),
        format!(
            "{}/{} tables have duplicate records",
            duplicate_issues.len(),
            with_stats.len()
        ),
        duplicate_issues,
    );
    (nulls, consistency, duplicates)
}

fn table_quality(table: &TableMetadata, catalog: &Catalog) -> TableQuality {
    let documented = usize::from(has_text(&table.description))
        + table.columns.iter().filter(|c| has_text(&c.description)).count();

    let shaped: Vec<&ColumnMetadata> = table
        .columns
        .iter()
        .filter(|c| is_foreign_key_shaped(table, c))
        .collect();
    let resolved = shaped.iter().filter(|c| catalog.resolves(c)).count();

    let quality = TableQuality {
        table_name: table.name.clone(),
        doc_coverage: round(percentage(documented, table.columns.len() + 1, 0.0)),
        pk_present: table.has_primary_key(),
        fk_resolved_ratio: round(percentage(resolved, shaped.len(), 100.0)),
        null_ratio: table.content_stats.as_ref().map(|s| round(null_ratio(table, s))),
        duplicate_ratio: table.content_stats.as_ref().map(|s| round(duplicate_ratio(s))),
    };
    log::debug!("{:?}", quality);
    quality
}

fn recommendations(sub_scores: &[SubScore], per_table: &[TableQuality]) -> Vec<String> {
    let mut out: Vec<String> = sub_scores
        .iter()
        .filter(|s| s.score < thresholds::RECOMMEND_BELOW)
        .map(|s| {
            match s.name {
                DOCUMENTATION => "Add descriptions to tables and columns",
                PRIMARY_KEYS => "Define primary keys for all tables",
                FOREIGN_KEYS => "Establish foreign key relationships between tables",
                DATA_TYPES => "Replace generic or text types with specific data types",
                NULL_VALUES => "Address columns with high null percentages",
                CONSISTENCY => "Standardize data formatting across columns",
                _ => "Remove duplicate records and add uniqueness constraints",
            }
            .to_string()
        })
        .collect();

    for table in per_table {
        if !table.pk_present {
            out.push(format!("{}: declare a primary key", table.table_name));
        }
        if table.fk_resolved_ratio < 100.0 {
            out.push(format!(
                "{}: declare foreign keys for its key-like columns",
                table.table_name
            ));
        }
        if table.duplicate_ratio.is_some_and(|d| d > 0.0) {
            out.push(format!("{}: deduplicate rows", table.table_name));
        }
    }
    out
}

fn sub_score(name: &'static str, score: f64, details: String, mut issues: Vec<String>) -> SubScore {
    issues.truncate(thresholds::MAX_ISSUES);
    SubScore {
        name,
        score: round(score),
        details,
        issues,
    }
}

fn percentage(part: usize, whole: usize, empty: f64) -> f64 {
    if whole == 0 {
        empty
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn percentage_u64(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Two decimal places, so equal inputs print and compare identically.
fn round(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
