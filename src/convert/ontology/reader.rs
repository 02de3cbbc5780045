//! Triples to model.
//!
//! Classes become tables and properties become columns. An object property
//! also yields a relationship to its range class. Anything the document
//! leaves out falls back to a default derived from what it does say: a
//! missing label from the IRI, a missing physical type or kind from the
//! `rdfs:range` datatype.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use crate::convert::{ConversionError, ConversionResult};
use crate::model::{Cardinality, Column, LogicalTable, Relationship, SemanticKind, SemanticModel};
use crate::semantic::inference::synthesize_metrics;

use super::parser::{Term, Triple};
use super::vocab;

/// Everything said about one subject, in document order.
struct Resource<'a> {
    iri: &'a str,
    statements: Vec<(&'a str, &'a Term)>,
}

impl<'a> Resource<'a> {
    fn has_type(&self, class: &str) -> bool {
        self.statements
            .iter()
            .any(|(p, o)| *p == vocab::RDF_TYPE && o.as_iri() == Some(class))
    }

    fn iri_of(&self, predicate: &str) -> Option<&'a str> {
        self.statements
            .iter()
            .find(|(p, _)| *p == predicate)
            .and_then(|(_, o)| o.as_iri())
    }

    fn literal_of(&self, predicate: &str) -> Option<&'a str> {
        self.statements
            .iter()
            .find(|(p, _)| *p == predicate)
            .and_then(|(_, o)| o.as_literal())
    }

    /// `rdfs:label`, else the last path segment of the IRI.
    fn label(&self) -> String {
        self.literal_of(vocab::RDFS_LABEL)
            .map(str::to_string)
            .unwrap_or_else(|| local_name(self.iri).to_string())
    }

    fn bool_of(&self, predicate: &str, default: bool) -> ConversionResult<bool> {
        match self.literal_of(predicate) {
            None => Ok(default),
            Some("true") | Some("1") => Ok(true),
            Some("false") | Some("0") => Ok(false),
            Some(other) => Err(self.invalid(format!("'{}' is not a boolean", other))),
        }
    }

    fn invalid(&self, message: String) -> ConversionError {
        ConversionError::InvalidResource {
            resource: self.iri.to_string(),
            message,
        }
    }
}

fn local_name(iri: &str) -> &str {
    iri.rsplit(['/', '#', ':']).next().unwrap_or(iri)
}

fn index(triples: &[Triple]) -> Vec<Resource<'_>> {
    let mut order: Vec<Resource<'_>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for triple in triples {
        let idx = *positions.entry(triple.subject.as_str()).or_insert_with(|| {
            order.push(Resource {
                iri: &triple.subject,
                statements: Vec::new(),
            });
            order.len() - 1
        });
        order[idx].statements.push((triple.predicate.as_str(), &triple.object));
    }
    order
}

/// A column read from a property, before relationships are resolved.
struct PendingColumn<'a> {
    table: &'a str,
    column: Column,
    target: Option<PendingTarget<'a>>,
}

struct PendingTarget<'a> {
    property: &'a str,
    class: &'a str,
    column: Option<&'a str>,
    cardinality: Cardinality,
}

pub(super) fn read_model(triples: &[Triple]) -> ConversionResult<SemanticModel> {
    let resources = index(triples);

    let ontology = resources
        .iter()
        .find(|r| r.has_type(vocab::OWL_ONTOLOGY))
        .ok_or(ConversionError::MissingOntology)?;
    let model_name = ontology.label();
    let description = ontology.literal_of(vocab::RDFS_COMMENT).map(str::to_string);

    let mut tables: Vec<LogicalTable> = Vec::new();
    let mut table_by_class: HashMap<&str, usize> = HashMap::new();
    for class in resources.iter().filter(|r| r.has_type(vocab::OWL_CLASS)) {
        let name = class.label();
        let mut table = LogicalTable::new(name.clone());
        table.source = class
            .literal_of(vocab::SL_PHYSICAL_SOURCE)
            .map(str::to_string)
            .unwrap_or(name);
        table.description = class.literal_of(vocab::RDFS_COMMENT).map(str::to_string);
        table_by_class.insert(class.iri, tables.len());
        tables.push(table);
    }

    let mut pending = Vec::new();
    let mut column_by_property: HashMap<&str, (&str, String)> = HashMap::new();
    for property in resources.iter() {
        let is_object = property.has_type(vocab::OWL_OBJECT_PROPERTY);
        if !is_object && !property.has_type(vocab::OWL_DATATYPE_PROPERTY) {
            continue;
        }
        let column = read_column(property, is_object, &table_by_class)?;
        column_by_property.insert(property.iri, (column.table, column.column.name.clone()));
        pending.push(column);
    }

    let mut relationships = Vec::new();
    for PendingColumn { table, column, target } in pending {
        if let Some(target) = target {
            let target_table = &tables[table_by_class[target.class]];
            let target_column = match target.column {
                Some(iri) => match column_by_property.get(iri) {
                    Some((class, name)) if *class == target.class => name.clone(),
                    _ => {
                        return Err(ConversionError::DanglingReference {
                            resource: target.property.to_string(),
                            target: iri.to_string(),
                        })
                    }
                },
                None => single_key_of(target.class, &column_by_property, triples)
                    .ok_or_else(|| ConversionError::InvalidResource {
                        resource: target.property.to_string(),
                        message: format!(
                            "no sl:targetColumn and table '{}' has no single primary key",
                            target_table.name
                        ),
                    })?,
            };
            relationships.push(Relationship::new(
                &tables[table_by_class[table]].name,
                &column.name,
                &target_table.name,
                target_column,
                target.cardinality,
            ));
        }
        tables[table_by_class[table]].columns.push(column);
    }

    tables.sort_by(|a, b| a.name.cmp(&b.name));
    for table in &mut tables {
        table.columns.sort_by(|a, b| a.name.cmp(&b.name));
    }
    let metrics = synthesize_metrics(&tables);

    log::debug!(
        "decoded ontology '{}': {} classes, {} relationships",
        model_name,
        tables.len(),
        relationships.len()
    );
    Ok(SemanticModel::new(
        model_name,
        description,
        tables,
        relationships,
        metrics,
        Vec::new(),
    )?)
}

fn read_column<'a>(
    property: &Resource<'a>,
    is_object: bool,
    table_by_class: &HashMap<&str, usize>,
) -> ConversionResult<PendingColumn<'a>> {
    let domain = property
        .iri_of(vocab::RDFS_DOMAIN)
        .ok_or_else(|| ConversionError::MissingDomain {
            resource: property.iri.to_string(),
        })?;
    if !table_by_class.contains_key(domain) {
        return Err(ConversionError::DanglingReference {
            resource: property.iri.to_string(),
            target: domain.to_string(),
        });
    }

    let range = property.iri_of(vocab::RDFS_RANGE);
    let target = if is_object {
        let class = range.ok_or_else(|| property.invalid("object property has no rdfs:range".to_string()))?;
        if !table_by_class.contains_key(class) {
            return Err(ConversionError::DanglingReference {
                resource: property.iri.to_string(),
                target: class.to_string(),
            });
        }
        let cardinality = match property.literal_of(vocab::SL_CARDINALITY) {
            Some(value) => Cardinality::from_str(value).map_err(|e| property.invalid(e))?,
            None => Cardinality::ManyToOne,
        };
        Some(PendingTarget {
            property: property.iri,
            class,
            column: property.iri_of(vocab::SL_TARGET_COLUMN),
            cardinality,
        })
    } else {
        None
    };

    let datatype = if is_object { None } else { range };
    let physical_type = property
        .literal_of(vocab::SL_PHYSICAL_TYPE)
        .map(str::to_string)
        .unwrap_or_else(|| physical_type_for(datatype).to_string());
    let kind = match property.literal_of(vocab::SL_SEMANTIC_KIND) {
        Some(value) => SemanticKind::from_str(value).map_err(|e| property.invalid(e))?,
        None if is_object => SemanticKind::Identifier,
        None => kind_for(datatype),
    };

    let column = Column {
        name: property.label(),
        physical_type,
        kind,
        nullable: property.bool_of(vocab::SL_NULLABLE, true)?,
        primary_key: property.bool_of(vocab::SL_PRIMARY_KEY, false)?,
        description: property.literal_of(vocab::RDFS_COMMENT).map(str::to_string),
    };
    Ok(PendingColumn {
        table: domain,
        column,
        target,
    })
}

/// The only primary-key column declared for a class, if exactly one.
fn single_key_of(
    class: &str,
    column_by_property: &HashMap<&str, (&str, String)>,
    triples: &[Triple],
) -> Option<String> {
    let keys: BTreeSet<&String> = triples
        .iter()
        .filter(|t| t.predicate == vocab::SL_PRIMARY_KEY && t.object.as_literal() == Some("true"))
        .filter_map(|t| column_by_property.get(t.subject.as_str()))
        .filter(|(owner, _)| *owner == class)
        .map(|(_, name)| name)
        .collect();
    match keys.len() {
        1 => keys.into_iter().next().cloned(),
        _ => None,
    }
}

fn xsd_local(datatype: Option<&str>) -> &str {
    datatype
        .and_then(|d| d.strip_prefix(vocab::XSD))
        .unwrap_or("string")
}

fn physical_type_for(datatype: Option<&str>) -> &'static str {
    match xsd_local(datatype) {
        "integer" | "int" | "long" | "short" => "INTEGER",
        "decimal" => "DECIMAL",
        "double" | "float" => "DOUBLE",
        "boolean" => "BOOLEAN",
        "date" => "DATE",
        "dateTime" => "TIMESTAMP",
        "time" => "TIME",
        "base64Binary" | "hexBinary" => "BINARY",
        _ => "VARCHAR",
    }
}

fn kind_for(datatype: Option<&str>) -> SemanticKind {
    match xsd_local(datatype) {
        "integer" | "int" | "long" | "short" | "decimal" | "double" | "float" => SemanticKind::MeasureCandidate,
        "date" | "dateTime" | "time" => SemanticKind::DimensionTemporal,
        _ => SemanticKind::DimensionCategorical,
    }
}
