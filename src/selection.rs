//! Choosing which tables a run compares

/// Table names treated as reference data even without a `master`/`m_` marker
const MASTER_TABLE_NAMES: &[&str] = &[
    "categories",
    "products",
    "customers",
    "suppliers",
    "regions",
    "countries",
    "departments",
    "currencies",
    "users",
    "roles",
    "permissions",
];

/// Whether a table looks like master (reference) data, by name
pub fn is_master_table(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("master") || lower.starts_with("m_") || MASTER_TABLE_NAMES.contains(&lower.as_str())
}

/// Tables whose name contains `pattern`; an empty pattern keeps all
pub fn filter_by_pattern(tables: &[String], pattern: &str) -> Vec<String> {
    tables
        .iter()
        .filter(|t| t.contains(pattern))
        .cloned()
        .collect()
}

/// The requested tables that exist, in request order.
///
/// Names are trimmed; blanks and repeats are dropped. Unknown names are
/// reported and skipped.
pub fn select_requested(available: &[String], requested: &[String]) -> Vec<String> {
    let mut selected: Vec<String> = Vec::new();
    for name in requested.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if selected.iter().any(|s| s == name) {
            continue;
        }
        if available.iter().any(|a| a == name) {
            selected.push(name.to_string());
        } else {
            log::warn!("Table '{}' not found in available tables, skipping", name);
        }
    }
    selected
}

/// How the tables of a run are chosen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSelection {
    /// Explicit table names; take precedence over `pattern`
    pub tables: Vec<String>,
    pub pattern: Option<String>,
    /// Consider every base table instead of master tables only
    pub all_tables: bool,
}

impl TableSelection {
    /// Tables eligible before any explicit list or pattern is applied
    pub fn candidates(&self, base_tables: &[String]) -> Vec<String> {
        if self.all_tables {
            base_tables.to_vec()
        } else {
            base_tables
                .iter()
                .filter(|t| is_master_table(t))
                .cloned()
                .collect()
        }
    }

    pub fn apply(&self, base_tables: &[String]) -> Vec<String> {
        let candidates = self.candidates(base_tables);
        if !self.tables.is_empty() {
            select_requested(&candidates, &self.tables)
        } else if let Some(pattern) = &self.pattern {
            filter_by_pattern(&candidates, pattern)
        } else {
            candidates
        }
    }
}
