//! Resolve a table's column layout and declared identity

use crate::catalog::Catalog;
use crate::error::{ReconError, Result};
use crate::model::TableSchema;

/// Look up the ordered columns and declared primary key of `table`.
///
/// An unknown table and a table without columns are both `Schema` errors.
/// A failing primary-key lookup is not fatal: the table is treated as having
/// no declared identity so key inference can take over.
pub fn introspect(catalog: &dyn Catalog, table: &str) -> Result<TableSchema> {
    let columns = catalog.list_columns(table)?;
    if columns.is_empty() {
        return Err(ReconError::schema(table, "no columns found (unknown table?)"));
    }

    let identity = match catalog.list_declared_identity_columns(table) {
        Ok(identity) => identity,
        Err(e) => {
            log::warn!("Could not determine primary keys for table {}: {}", table, e);
            Vec::new()
        }
    };

    let mut schema = TableSchema {
        name: table.to_string(),
        columns,
        identity: Vec::new(),
    };
    if identity.iter().all(|c| schema.contains_column(c)) {
        schema.identity = identity;
    } else {
        log::warn!(
            "Declared key of table {} names columns outside its column list ({:?}); ignoring it",
            table,
            identity
        );
    }

    Ok(schema)
}
