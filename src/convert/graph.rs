//! Graph-statement codec (Cypher, encode only).
//!
//! Emits, one statement per line:
//!
//! 1. a node per logical table, labelled with the table name and
//!    `LogicalTable`;
//! 2. in content-sampling mode, a node per sampled row (at most
//!    `row_limit` per table, in sampler order);
//! 3. a `RELATED_TO` edge statement per relationship, matching nodes on the
//!    two endpoint columns.
//!
//! Output is executed verbatim by a graph engine, so every identifier is
//! backtick-quoted and every string literal escaped.

use serde_json::Value;

use crate::metadata::TableSample;
use crate::model::{normalize_name, Relationship, SemanticModel};

use super::{ConversionResult, Encoder, ModelField};

/// Default cap on sampled rows emitted per table.
pub const DEFAULT_ROW_LIMIT: usize = 1000;

/// Graph codec options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphOptions {
    /// Maximum sampled rows emitted per table.
    pub row_limit: usize,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }
}

/// Cypher statement encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphCodec {
    options: GraphOptions,
}

impl GraphCodec {
    pub fn new(options: GraphOptions) -> Self {
        Self { options }
    }

    /// Codec with a custom per-table row limit.
    pub fn with_row_limit(row_limit: usize) -> Self {
        Self::new(GraphOptions { row_limit })
    }

    /// Structure-only statements: table nodes then relationship edges.
    pub fn statements(&self, model: &SemanticModel) -> Vec<String> {
        self.statements_with_samples(model, &[])
    }

    /// Structure plus one node statement per sampled row.
    ///
    /// Samples for tables not in the model are skipped.
    pub fn statements_with_samples(&self, model: &SemanticModel, samples: &[TableSample]) -> Vec<String> {
        let mut statements: Vec<String> = model
            .tables()
            .iter()
            .map(|table| {
                let columns = table
                    .columns
                    .iter()
                    .map(|c| string_literal(&c.name))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "CREATE (:{}:LogicalTable {{name: {}, source: {}, columns: [{}]}});",
                    quote_identifier(&table.name),
                    string_literal(&table.name),
                    string_literal(&table.source),
                    columns
                )
            })
            .collect();

        for sample in samples {
            let normalized = normalize_name(&sample.table);
            let Some(table) = model
                .tables()
                .iter()
                .find(|t| t.name == sample.table || t.name == normalized)
            else {
                log::warn!("skipping sample for '{}': table not in model", sample.table);
                continue;
            };

            if sample.rows.len() > self.options.row_limit {
                log::debug!(
                    "capping sample for '{}' at {} of {} rows",
                    table.name,
                    self.options.row_limit,
                    sample.rows.len()
                );
            }
            let rows = sample.rows.iter().filter(|row| {
                if row.len() == sample.columns.len() {
                    return true;
                }
                log::warn!(
                    "skipping sample row for '{}': {} values for {} columns",
                    table.name,
                    row.len(),
                    sample.columns.len()
                );
                false
            });
            for row in rows.take(self.options.row_limit) {
                statements.push(row_statement(&table.name, &sample.columns, row));
            }
        }

        statements.extend(model.relationships().iter().map(relationship_statement));
        statements
    }
}

impl Encoder for GraphCodec {
    fn format_name(&self) -> &'static str {
        "cypher"
    }

    fn unrepresented(&self) -> &'static [ModelField] {
        &[
            ModelField::ModelName,
            ModelField::ModelDescription,
            ModelField::TableDescription,
            ModelField::ColumnPhysicalType,
            ModelField::ColumnKind,
            ModelField::ColumnNullability,
            ModelField::ColumnPrimaryKey,
            ModelField::ColumnDescription,
            ModelField::Metrics,
            ModelField::VerifiedQueries,
        ]
    }

    fn encode(&self, model: &SemanticModel) -> ConversionResult<String> {
        let mut out = self.statements(model).join("\n");
        out.push('\n');
        Ok(out)
    }
}

fn relationship_statement(rel: &Relationship) -> String {
    format!(
        "MATCH (s:{}), (t:{}) WHERE s.{} = t.{} CREATE (s)-[:RELATED_TO {{source_column: {}, target_column: {}, cardinality: {}}}]->(t);",
        quote_identifier(&rel.source_table),
        quote_identifier(&rel.target_table),
        quote_identifier(&rel.source_column),
        quote_identifier(&rel.target_column),
        string_literal(&rel.source_column),
        string_literal(&rel.target_column),
        string_literal(rel.cardinality.as_str()),
    )
}

fn row_statement(table: &str, columns: &[String], row: &[Value]) -> String {
    let props = columns
        .iter()
        .zip(row)
        .filter(|(_, value)| !value.is_null())
        .map(|(col, value)| format!("{}: {}", quote_identifier(&normalize_name(col)), value_literal(value)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE (:{} {{{}}});", quote_identifier(table), props)
}

/// Backtick-quote an identifier, doubling embedded backticks.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Single-quoted string literal with backslash escapes.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn value_literal(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string_literal(s),
        // Nested values are stored as their JSON text.
        other => string_literal(&other.to_string()),
    }
}
