//! `Catalog` implementation over a database attached to a DuckDB engine

use crate::catalog::Catalog;
use crate::config::SideConfig;
use crate::engine;
use crate::error::{Phase, ReconError, Result};
use crate::model::Row;
use crate::sql_quote::{first_unknown, quote_columns, quote_qualified};
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveTime};
use duckdb::types::{TimeUnit, ValueRef};
use duckdb::{params, Connection};

/// Catalog over one attached database (Postgres or a DuckDB file).
///
/// The connection is opened once and held for the catalog's lifetime.
pub struct DuckDbCatalog {
    connection: Connection,
    label: String,
    database: String,
    schema: String,
}

impl DuckDbCatalog {
    /// Open the side's target and attach it read-only under `alias`
    pub fn open(side: &SideConfig, alias: &str) -> Result<Self> {
        log::info!("Connecting to {} database ({})...", side.label, side.target.describe());
        let connection = engine::open_attached(&side.target, alias)?;
        Ok(Self::from_connection(
            connection,
            side.label.clone(),
            alias,
            side.target.schema(),
        ))
    }

    /// Wrap an existing connection on which `database` is already attached
    pub fn from_connection(
        connection: Connection,
        label: impl Into<String>,
        database: impl Into<String>,
        schema: impl Into<String>,
    ) -> Self {
        Self {
            connection,
            label: label.into(),
            database: database.into(),
            schema: schema.into(),
        }
    }

    fn qualified(&self, table: &str) -> String {
        quote_qualified(&self.database, &self.schema, table)
    }

    /// Refuse identifiers the catalog did not report itself
    fn ensure_known(&self, table: &str, columns: &[String], phase: Phase) -> Result<()> {
        let tables = self.list_base_tables()?;
        if !tables.iter().any(|t| t == table) {
            return Err(ReconError::fetch(
                table,
                phase,
                format!("table does not exist in {} database", self.label),
            ));
        }
        if columns.is_empty() {
            return Ok(());
        }
        let known = self.list_columns(table)?;
        if let Some(unknown) = first_unknown(columns, &known) {
            return Err(ReconError::fetch(
                table,
                phase,
                format!("column '{}' does not exist in {} database", unknown, self.label),
            ));
        }
        Ok(())
    }

    fn query_names(&self, sql: &str, table: &str) -> duckdb::Result<Vec<String>> {
        let mut stmt = self.connection.prepare(sql)?;
        let names = stmt.query_map(params![self.database, self.schema, table], |row| {
            row.get::<_, String>(0)
        })?;
        names.collect()
    }
}

impl Catalog for DuckDbCatalog {
    fn label(&self) -> &str {
        &self.label
    }

    fn list_base_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self.connection.prepare(
            "SELECT table_name FROM information_schema.tables
             WHERE table_catalog = ? AND table_schema = ? AND table_type = 'BASE TABLE'
             ORDER BY table_name",
        )?;
        let names = stmt.query_map(params![self.database, self.schema], |row| {
            row.get::<_, String>(0)
        })?;
        Ok(names.collect::<duckdb::Result<Vec<_>>>()?)
    }

    fn list_columns(&self, table: &str) -> Result<Vec<String>> {
        self.query_names(
            "SELECT column_name FROM information_schema.columns
             WHERE table_catalog = ? AND table_schema = ? AND table_name = ?
             ORDER BY ordinal_position",
            table,
        )
        .map_err(|e| ReconError::schema(table, format!("failed to get columns: {}", e)))
    }

    fn list_declared_identity_columns(&self, table: &str) -> Result<Vec<String>> {
        self.query_names(
            "SELECT UNNEST(constraint_column_names) FROM duckdb_constraints()
             WHERE database_name = ? AND schema_name = ? AND table_name = ?
               AND constraint_type = 'PRIMARY KEY'",
            table,
        )
        .map_err(|e| ReconError::schema(table, format!("failed to get primary key: {}", e)))
    }

    fn fetch_rows(
        &self,
        table: &str,
        columns: &[String],
        order_by: &[String],
        limit: usize,
    ) -> Result<Vec<Row>> {
        let referenced: Vec<String> = columns.iter().chain(order_by).cloned().collect();
        self.ensure_known(table, &referenced, Phase::Fetch)?;

        let order = if order_by.is_empty() {
            String::new()
        } else {
            format!(" ORDER BY {}", quote_columns(order_by))
        };
        let sql = format!(
            "SELECT {} FROM {}{} LIMIT ?",
            quote_columns(columns),
            self.qualified(table),
            order
        );
        let fetch_err = |e: duckdb::Error| {
            ReconError::fetch(
                table,
                Phase::Fetch,
                format!("failed to fetch data from {} table: {}", self.label, e),
            )
        };

        let mut stmt = self.connection.prepare(&sql).map_err(fetch_err)?;
        let mut rows = stmt.query(params![limit as i64]).map_err(fetch_err)?;

        let mut fetched = Vec::new();
        while let Some(row) = rows.next().map_err(fetch_err)? {
            let mut values = Row::with_capacity(columns.len());
            for (i, column) in columns.iter().enumerate() {
                let value = value_from_ref(row.get_ref(i).map_err(fetch_err)?);
                values.insert(column.clone(), value);
            }
            fetched.push(values);
        }

        Ok(fetched)
    }

    fn count_rows(&self, table: &str) -> Result<u64> {
        self.ensure_known(table, &[], Phase::Count)?;

        let sql = format!("SELECT COUNT(*) FROM {}", self.qualified(table));
        let count: i64 = self
            .connection
            .prepare(&sql)
            .and_then(|mut stmt| stmt.query_row([], |row| row.get(0)))
            .map_err(|e| {
                ReconError::fetch(
                    table,
                    Phase::Count,
                    format!("failed to count rows in {} table: {}", self.label, e),
                )
            })?;

        Ok(count.max(0) as u64)
    }
}

fn to_micros(unit: TimeUnit, value: i64) -> i64 {
    match unit {
        TimeUnit::Second => value.saturating_mul(1_000_000),
        TimeUnit::Millisecond => value.saturating_mul(1_000),
        TimeUnit::Microsecond => value,
        TimeUnit::Nanosecond => value / 1_000,
    }
}

/// Convert a DuckDB cell into a [`Value`]
fn value_from_ref(value: ValueRef<'_>) -> Value {
    // Days between 0001-01-01 and 1970-01-01
    const UNIX_EPOCH_FROM_CE: i32 = 719_163;

    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Boolean(b) => Value::Bool(b),
        ValueRef::TinyInt(i) => Value::Int(i as i128),
        ValueRef::SmallInt(i) => Value::Int(i as i128),
        ValueRef::Int(i) => Value::Int(i as i128),
        ValueRef::BigInt(i) => Value::Int(i as i128),
        ValueRef::HugeInt(i) => Value::Int(i),
        ValueRef::UTinyInt(i) => Value::Int(i as i128),
        ValueRef::USmallInt(i) => Value::Int(i as i128),
        ValueRef::UInt(i) => Value::Int(i as i128),
        ValueRef::UBigInt(i) => Value::Int(i as i128),
        ValueRef::Float(f) => Value::Float(f as f64),
        ValueRef::Double(f) => Value::Float(f),
        ValueRef::Decimal(d) => Value::decimal(d.to_string()),
        ValueRef::Text(s) => Value::Text(String::from_utf8_lossy(s).to_string()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        ValueRef::Date32(days) => NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_FROM_CE)
            .map(Value::Date)
            .unwrap_or_else(|| Value::Text(days.to_string())),
        ValueRef::Time64(unit, t) => {
            let micros = to_micros(unit, t);
            NaiveTime::from_num_seconds_from_midnight_opt(
                (micros / 1_000_000) as u32,
                ((micros % 1_000_000) * 1_000) as u32,
            )
            .map(Value::Time)
            .unwrap_or_else(|| Value::Text(t.to_string()))
        }
        ValueRef::Timestamp(unit, ts) => DateTime::from_timestamp_micros(to_micros(unit, ts))
            .map(|dt| Value::Timestamp(dt.naive_utc()))
            .unwrap_or_else(|| Value::Text(ts.to_string())),
        other => Value::Text(format!("{:?}", other)),
    }
}
