//! Schema-format codec.
//!
//! The canonical interchange format: a structured document with top-level
//! keys `model_name`, `description`, `tables`, `metrics` and
//! `verified_queries`, rendered as YAML or JSON. Relationships live on their
//! source column as `references`. Nothing is lost in either direction.
//!
//! ```yaml
//! model_name: clinical
//! tables:
//! - name: patients
//!   source: clinical.patients
//!   columns:
//!   - name: site_id
//!     physical_type: INT
//!     kind: identifier
//!     nullable: true
//!     primary_key: false
//!     references:
//!       table: sites
//!       column: site_id
//!       cardinality: many_to_one
//! metrics:
//! - name: count_patients
//!   aggregation: count
//!   table: patients
//! ```

use serde::{Deserialize, Serialize};

use crate::model::{
    Aggregation, Cardinality, Column, LogicalTable, Metric, Relationship, SemanticKind,
    SemanticModel, VerifiedQuery,
};

use super::{ConversionResult, Decoder, Encoder, ModelField};

/// Rendering of the schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaFormat {
    #[default]
    Yaml,
    Json,
}

/// The schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tables: Vec<TableEntry>,
    #[serde(default)]
    pub metrics: Vec<MetricEntry>,
    #[serde(default)]
    pub verified_queries: Vec<VerifiedQueryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableEntry {
    pub name: String,
    /// Defaults to `name` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnEntry {
    pub name: String,
    pub physical_type: String,
    pub kind: SemanticKind,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ReferenceEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceEntry {
    pub table: String,
    pub column: String,
    #[serde(default = "default_cardinality")]
    pub cardinality: Cardinality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricEntry {
    pub name: String,
    pub aggregation: Aggregation,
    pub table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifiedQueryEntry {
    pub name: String,
    #[serde(default)]
    pub tables: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<String>,
    pub query: String,
}

fn default_true() -> bool {
    true
}

fn default_cardinality() -> Cardinality {
    Cardinality::ManyToOne
}

impl From<&SemanticModel> for SchemaDocument {
    fn from(model: &SemanticModel) -> Self {
        let tables = model
            .tables()
            .iter()
            .map(|table| TableEntry {
                name: table.name.clone(),
                source: Some(table.source.clone()),
                description: table.description.clone(),
                columns: table
                    .columns
                    .iter()
                    .map(|col| ColumnEntry {
                        name: col.name.clone(),
                        physical_type: col.physical_type.clone(),
                        kind: col.kind,
                        nullable: col.nullable,
                        primary_key: col.primary_key,
                        description: col.description.clone(),
                        references: model.relationship_from(&table.name, &col.name).map(|rel| {
                            ReferenceEntry {
                                table: rel.target_table.clone(),
                                column: rel.target_column.clone(),
                                cardinality: rel.cardinality,
                            }
                        }),
                    })
                    .collect(),
            })
            .collect();

        let metrics = model
            .metrics()
            .iter()
            .map(|m| MetricEntry {
                name: m.name.clone(),
                aggregation: m.aggregation,
                table: m.table.clone(),
                column: m.column.clone(),
                filter: m.filter.clone(),
                description: m.description.clone(),
            })
            .collect();

        let verified_queries = model
            .verified_queries()
            .iter()
            .map(|q| VerifiedQueryEntry {
                name: q.name.clone(),
                tables: q.tables.clone(),
                metrics: q.metrics.clone(),
                query: q.query.clone(),
            })
            .collect();

        Self {
            model_name: model.name().to_string(),
            description: model.description().map(str::to_string),
            tables,
            metrics,
            verified_queries,
        }
    }
}

impl TryFrom<SchemaDocument> for SemanticModel {
    type Error = super::ConversionError;

    fn try_from(doc: SchemaDocument) -> ConversionResult<Self> {
        let mut relationships = Vec::new();
        let mut tables = Vec::with_capacity(doc.tables.len());

        for entry in doc.tables {
            let mut columns = Vec::with_capacity(entry.columns.len());
            for col in entry.columns {
                if let Some(r) = col.references {
                    relationships.push(Relationship::new(&entry.name, &col.name, r.table, r.column, r.cardinality));
                }
                columns.push(Column {
                    name: col.name,
                    physical_type: col.physical_type,
                    kind: col.kind,
                    nullable: col.nullable,
                    primary_key: col.primary_key,
                    description: col.description,
                });
            }
            tables.push(LogicalTable {
                source: entry.source.unwrap_or_else(|| entry.name.clone()),
                name: entry.name,
                columns,
                description: entry.description,
            });
        }

        let metrics = doc
            .metrics
            .into_iter()
            .map(|m| Metric {
                name: m.name,
                aggregation: m.aggregation,
                table: m.table,
                column: m.column,
                filter: m.filter,
                description: m.description,
            })
            .collect();

        let verified_queries = doc
            .verified_queries
            .into_iter()
            .map(|q| VerifiedQuery {
                name: q.name,
                tables: q.tables,
                metrics: q.metrics,
                query: q.query,
            })
            .collect();

        Ok(SemanticModel::new(
            doc.model_name,
            doc.description,
            tables,
            relationships,
            metrics,
            verified_queries,
        )?)
    }
}

/// Lossless YAML/JSON codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaCodec {
    format: SchemaFormat,
}

impl SchemaCodec {
    pub fn new(format: SchemaFormat) -> Self {
        Self { format }
    }

    pub fn yaml() -> Self {
        Self::new(SchemaFormat::Yaml)
    }

    pub fn json() -> Self {
        Self::new(SchemaFormat::Json)
    }

    pub fn format(&self) -> SchemaFormat {
        self.format
    }
}

impl Encoder for SchemaCodec {
    fn format_name(&self) -> &'static str {
        match self.format {
            SchemaFormat::Yaml => "schema-yaml",
            SchemaFormat::Json => "schema-json",
        }
    }

    fn unrepresented(&self) -> &'static [ModelField] {
        &[]
    }

    fn encode(&self, model: &SemanticModel) -> ConversionResult<String> {
        let doc = SchemaDocument::from(model);
        Ok(match self.format {
            SchemaFormat::Yaml => serde_yaml_ng::to_string(&doc)?,
            SchemaFormat::Json => {
                let mut json = serde_json::to_string_pretty(&doc)?;
                json.push('\n');
                json
            }
        })
    }
}

impl Decoder for SchemaCodec {
    fn decode(&self, input: &str) -> ConversionResult<SemanticModel> {
        let doc: SchemaDocument = match self.format {
            SchemaFormat::Yaml => serde_yaml_ng::from_str(input)?,
            SchemaFormat::Json => serde_json::from_str(input)?,
        };
        SemanticModel::try_from(doc)
    }
}
