//! Identifier and literal quoting for generated SQL
//!
//! Values are always bound as query parameters. Identifiers cannot be bound,
//! so they are checked against the names the catalog itself reported and
//! then double-quoted.

/// Quote an identifier with double quotes, doubling embedded quotes
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote a `catalog.schema.table` reference
pub fn quote_qualified(catalog: &str, schema: &str, table: &str) -> String {
    format!(
        "{}.{}.{}",
        quote_identifier(catalog),
        quote_identifier(schema),
        quote_identifier(table)
    )
}

/// Quote a comma separated column list
pub fn quote_columns(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Quote a string literal with single quotes, doubling embedded quotes.
///
/// Only used for statements that take no parameters (`ATTACH`).
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Return the first name in `requested` that is missing from `allowed`
pub fn first_unknown<'a>(requested: &'a [String], allowed: &[String]) -> Option<&'a str> {
    requested
        .iter()
        .find(|name| !allowed.iter().any(|a| a == *name))
        .map(String::as_str)
}
