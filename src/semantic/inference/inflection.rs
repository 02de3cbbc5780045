//! String inflection for table-name matching.
//!
//! The naming-convention fallback compares a column stem (`site` in
//! `site_id`) with table names that are usually plural (`sites`). The
//! `inflector` crate handles regular English; schema vocabularies add a few
//! irregulars it gets wrong.

use inflector::Inflector;

/// (singular, plural) pairs common in database schemas.
static IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("staff", "staff"),
    ("status", "statuses"),
    ("address", "addresses"),
    ("analysis", "analyses"),
    ("diagnosis", "diagnoses"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("medium", "media"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("species", "species"),
    ("series", "series"),
];

/// Singular form of a (lowercase) word.
///
/// # Examples
/// ```ignore
/// assert_eq!(singularize("sites"), "site");
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("people"), "person");
/// ```
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();
    if let Some((singular, _)) = IRREGULAR
        .iter()
        .find(|(singular, plural)| lower == *plural || lower == *singular)
    {
        return singular.to_string();
    }
    lower.to_singular()
}

/// Plural form of a (lowercase) word.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();
    if let Some((_, plural)) = IRREGULAR
        .iter()
        .find(|(singular, plural)| lower == *singular || lower == *plural)
    {
        return plural.to_string();
    }
    lower.to_plural()
}

/// Whether a table name is a spelling of `stem`.
///
/// Matches the stem itself (`site`), its plural (`sites`), and any table
/// whose singular is the stem.
pub fn table_matches_stem(table: &str, stem: &str) -> bool {
    table == stem || singularize(table) == stem || pluralize(stem) == table
}
