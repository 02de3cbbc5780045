//! Model to Turtle.

use std::fmt::Write as _;

use crate::convert::{ConversionError, ConversionResult};
use crate::model::{normalize_name, Column, LogicalTable, SemanticModel};

use super::vocab::PREFIXES;

/// Check a namespace and strip one trailing `/` or `#`.
pub(super) fn validate_namespace(namespace: &str) -> ConversionResult<String> {
    let trimmed = namespace
        .strip_suffix('/')
        .or_else(|| namespace.strip_suffix('#'))
        .unwrap_or(namespace);

    let has_scheme = trimmed
        .split_once(':')
        .is_some_and(|(scheme, rest)| !scheme.is_empty() && !rest.is_empty());
    let has_bad_char = trimmed
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || "<>\"{}|^`\\".contains(c));
    if !has_scheme || has_bad_char {
        return Err(ConversionError::InvalidNamespace(namespace.to_string()));
    }
    Ok(trimmed.to_string())
}

pub(super) fn class_iri(namespace: &str, table: &str) -> String {
    format!("{}/{}", namespace, normalize_name(table))
}

pub(super) fn property_iri(namespace: &str, table: &str, column: &str) -> String {
    format!("{}/{}/{}", namespace, normalize_name(table), normalize_name(column))
}

/// Render the model. `namespace` must already be validated.
pub(super) fn write_turtle(model: &SemanticModel, namespace: &str) -> String {
    let mut out = String::new();
    for (prefix, iri) in PREFIXES {
        let _ = writeln!(out, "@prefix {}: <{}> .", prefix, iri);
    }

    let mut header = Block::new(format!("<{}>", namespace), "owl:Ontology");
    header.push("rdfs:label", quoted(model.name()));
    if let Some(description) = model.description() {
        header.push("rdfs:comment", quoted(description));
    }
    header.write_to(&mut out);

    for table in model.tables() {
        write_class(&mut out, namespace, table);
        for column in &table.columns {
            write_property(&mut out, namespace, model, table, column);
        }
    }
    out
}

fn write_class(out: &mut String, namespace: &str, table: &LogicalTable) {
    let mut block = Block::new(format!("<{}>", class_iri(namespace, &table.name)), "owl:Class");
    block.push("rdfs:label", quoted(&table.name));
    if let Some(description) = &table.description {
        block.push("rdfs:comment", quoted(description));
    }
    block.push("sl:physicalSource", quoted(&table.source));
    block.write_to(out);
}

fn write_property(out: &mut String, namespace: &str, model: &SemanticModel, table: &LogicalTable, column: &Column) {
    let subject = format!("<{}>", property_iri(namespace, &table.name, &column.name));
    let relationship = model.relationship_from(&table.name, &column.name);

    let mut block = Block::new(
        subject,
        if relationship.is_some() {
            "owl:ObjectProperty"
        } else {
            "owl:DatatypeProperty"
        },
    );
    block.push("rdfs:label", quoted(&column.name));
    if let Some(description) = &column.description {
        block.push("rdfs:comment", quoted(description));
    }
    block.push("rdfs:domain", format!("<{}>", class_iri(namespace, &table.name)));
    match relationship {
        Some(rel) => {
            block.push("rdfs:range", format!("<{}>", class_iri(namespace, &rel.target_table)));
            block.push(
                "sl:targetColumn",
                format!("<{}>", property_iri(namespace, &rel.target_table, &rel.target_column)),
            );
            block.push("sl:cardinality", quoted(rel.cardinality.as_str()));
        }
        None => block.push("rdfs:range", column.type_family().xsd_datatype().to_string()),
    }
    block.push("sl:physicalType", quoted(&column.physical_type));
    block.push("sl:semanticKind", quoted(column.kind.as_str()));
    block.push("sl:nullable", column.nullable.to_string());
    block.push("sl:primaryKey", column.primary_key.to_string());
    block.write_to(out);
}

/// One subject with its predicate list.
struct Block {
    subject: String,
    class: &'static str,
    pairs: Vec<(&'static str, String)>,
}

impl Block {
    fn new(subject: String, class: &'static str) -> Self {
        Self {
            subject,
            class,
            pairs: Vec::new(),
        }
    }

    fn push(&mut self, predicate: &'static str, object: String) {
        self.pairs.push((predicate, object));
    }

    fn write_to(&self, out: &mut String) {
        let _ = write!(out, "\n{} a {}", self.subject, self.class);
        for (predicate, object) in &self.pairs {
            let _ = write!(out, " ;\n    {} {}", predicate, object);
        }
        out.push_str(" .\n");
    }
}

/// Double-quoted Turtle string.
pub(super) fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_namespace() {
        assert_eq!(validate_namespace("http://example.org/onto/").unwrap(), "http://example.org/onto");
        assert_eq!(validate_namespace("http://example.org/onto#").unwrap(), "http://example.org/onto");
        assert_eq!(validate_namespace("urn:x").unwrap(), "urn:x");
        assert!(validate_namespace("example.org").is_err());
        assert!(validate_namespace("http://exa mple.org").is_err());
        assert!(validate_namespace("http://example.org/<x>").is_err());
    }

    #[test]
    fn test_iris_use_normalized_names() {
        assert_eq!(class_iri("urn:x", "Lab Results"), "urn:x/lab_results");
        assert_eq!(property_iri("urn:x", "Lab Results", "Result Value"), "urn:x/lab_results/result_value");
    }

    #[test]
    fn test_quoted() {
        assert_eq!(quoted("a \"b\"\n\\"), r#""a \"b\"\n\\""#);
    }

    #[test]
    fn test_block_layout() {
        let mut block = Block::new("<urn:x/t>".to_string(), "owl:Class");
        block.push("rdfs:label", quoted("t"));
        let mut out = String::new();
        block.write_to(&mut out);
        assert_eq!(out, "\n<urn:x/t> a owl:Class ;\n    rdfs:label \"t\" .\n");
    }
}
