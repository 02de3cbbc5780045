//! Physical type families.
//!
//! Databases spell the same logical type many ways (`INT4`, `NUMBER(38,0)`,
//! `BIGINT`). Inference and assessment only care about the family a physical
//! type belongs to, so every physical type string is classified once here.

use serde::{Deserialize, Serialize};

/// Family of a physical column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFamily {
    Integer,
    Decimal,
    Float,
    Boolean,
    Date,
    Timestamp,
    Time,
    /// Character data.
    Text,
    /// Declared enumeration (`ENUM(...)`).
    Enum,
    Binary,
    /// JSON, VARIANT, ARRAY and other schemaless containers.
    SemiStructured,
    /// Anything unrecognised.
    Unknown,
}

impl TypeFamily {
    /// Classify a physical type string.
    ///
    /// Parameters are inspected only for `NUMBER`/`NUMERIC`-style types,
    /// where a zero scale means an integer.
    ///
    /// # Examples
    /// ```
    /// use semantiaz::model::TypeFamily;
    ///
    /// assert_eq!(TypeFamily::from_physical("varchar(255)"), TypeFamily::Text);
    /// assert_eq!(TypeFamily::from_physical("NUMBER(38,0)"), TypeFamily::Integer);
    /// assert_eq!(TypeFamily::from_physical("TIMESTAMP_NTZ"), TypeFamily::Timestamp);
    /// ```
    pub fn from_physical(physical_type: &str) -> Self {
        let upper = physical_type.trim().to_uppercase();
        let (base, params) = match upper.find('(') {
            Some(idx) => (upper[..idx].trim(), Some(&upper[idx..])),
            None => (upper.as_str(), None),
        };
        // Sign modifiers may follow the base (`INT UNSIGNED`) or the params (`INT(11) UNSIGNED`).
        let base = strip_sign_modifier(base);
        let params = params.map(|p| match p.find(')') {
            Some(end) => &p[..=end],
            None => p,
        });

        if base.starts_with("ENUM") {
            return TypeFamily::Enum;
        }
        if base.starts_with("TIMESTAMP") || base.starts_with("DATETIME") || base == "SMALLDATETIME" {
            return TypeFamily::Timestamp;
        }
        if base.starts_with("TIME") {
            return TypeFamily::Time;
        }

        match base {
            "INT" | "INTEGER" | "BIGINT" | "SMALLINT" | "TINYINT" | "MEDIUMINT" | "INT2"
            | "INT4" | "INT8" | "INT64" | "SERIAL" | "BIGSERIAL" | "SMALLSERIAL" => {
                TypeFamily::Integer
            }
            "NUMBER" | "NUMERIC" | "DECIMAL" | "DEC" => {
                if zero_scale(params) {
                    TypeFamily::Integer
                } else {
                    TypeFamily::Decimal
                }
            }
            "MONEY" | "SMALLMONEY" => TypeFamily::Decimal,
            "FLOAT" | "FLOAT4" | "FLOAT8" | "FLOAT64" | "DOUBLE" | "DOUBLE PRECISION" | "REAL" => {
                TypeFamily::Float
            }
            "BOOLEAN" | "BOOL" | "BIT" => TypeFamily::Boolean,
            "DATE" => TypeFamily::Date,
            "VARCHAR" | "CHAR" | "CHARACTER" | "CHARACTER VARYING" | "NVARCHAR" | "NCHAR"
            | "VARCHAR2" | "NVARCHAR2" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "STRING"
            | "CLOB" | "NCLOB" | "NTEXT" | "UUID" | "UNIQUEIDENTIFIER" | "CITEXT" => {
                TypeFamily::Text
            }
            "BINARY" | "VARBINARY" | "BLOB" | "BYTEA" | "BYTES" | "IMAGE" => TypeFamily::Binary,
            "JSON" | "JSONB" | "VARIANT" | "OBJECT" | "ARRAY" | "STRUCT" | "MAP" | "XML" => {
                TypeFamily::SemiStructured
            }
            _ => TypeFamily::Unknown,
        }
    }

    /// Integer, decimal or floating point.
    pub fn is_numeric(self) -> bool {
        matches!(self, TypeFamily::Integer | TypeFamily::Decimal | TypeFamily::Float)
    }

    /// Date, timestamp or time of day.
    pub fn is_temporal(self) -> bool {
        matches!(self, TypeFamily::Date | TypeFamily::Timestamp | TypeFamily::Time)
    }

    /// Character data or an enumeration of strings.
    pub fn is_textual(self) -> bool {
        matches!(self, TypeFamily::Text | TypeFamily::Enum)
    }

    /// A catch-all type that says nothing about the values it holds.
    pub fn is_generic(self) -> bool {
        matches!(self, TypeFamily::SemiStructured | TypeFamily::Unknown)
    }

    /// Whether values of the two families can be joined on.
    pub fn is_join_compatible(self, other: TypeFamily) -> bool {
        self == other
            || (self.is_numeric() && other.is_numeric())
            || (self.is_textual() && other.is_textual())
            || (self.is_temporal() && other.is_temporal() && self != TypeFamily::Time && other != TypeFamily::Time)
    }

    /// XML Schema datatype for this family, as a prefixed name.
    pub fn xsd_datatype(self) -> &'static str {
        match self {
            TypeFamily::Integer => "xsd:integer",
            TypeFamily::Decimal => "xsd:decimal",
            TypeFamily::Float => "xsd:double",
            TypeFamily::Boolean => "xsd:boolean",
            TypeFamily::Date => "xsd:date",
            TypeFamily::Timestamp => "xsd:dateTime",
            TypeFamily::Time => "xsd:time",
            TypeFamily::Binary => "xsd:base64Binary",
            _ => "xsd:string",
        }
    }
}

fn strip_sign_modifier(mut base: &str) -> &str {
    while let Some(rest) = [" UNSIGNED", " SIGNED", " ZEROFILL"]
        .iter()
        .find_map(|m| base.strip_suffix(m))
    {
        base = rest.trim_end();
    }
    base
}

fn zero_scale(params: Option<&str>) -> bool {
    let Some(params) = params else {
        return false;
    };
    let inner = params.trim_start_matches('(').trim_end_matches(')');
    match inner.split_once(',') {
        Some((_, scale)) => scale.trim() == "0",
        // NUMBER(10) has an implicit scale of zero.
        None => !inner.trim().is_empty(),
    }
}
