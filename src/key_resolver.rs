//! Decide which columns identify a row of a table

use crate::key_rules::{KeyRule, DEFAULT_RULES};
use crate::model::{ComparisonKey, KeyProvenance, TableSchema};

/// Outcome of key resolution, with the rule that produced an inferred key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResolution {
    pub key: ComparisonKey,
    pub rule: Option<&'static str>,
}

/// Resolves a table's comparison key: the declared primary key when there is
/// one, otherwise the first matching inference rule, otherwise all columns.
#[derive(Debug, Clone)]
pub struct KeyResolver {
    rules: Vec<KeyRule>,
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec())
    }
}

impl KeyResolver {
    pub fn with_rules(rules: Vec<KeyRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[KeyRule] {
        &self.rules
    }

    pub fn resolve(&self, schema: &TableSchema) -> KeyResolution {
        if schema.has_declared_identity() {
            return KeyResolution {
                key: ComparisonKey::new(schema.identity.clone(), KeyProvenance::Declared),
                rule: None,
            };
        }
        self.infer(&schema.columns)
    }

    /// Infer a key from column names alone
    pub fn infer(&self, columns: &[String]) -> KeyResolution {
        for rule in &self.rules {
            if let Some(selected) = rule.select(columns) {
                let provenance = if selected.len() == 1 {
                    KeyProvenance::InferredSingle
                } else {
                    KeyProvenance::InferredComposite
                };
                return KeyResolution {
                    key: ComparisonKey::new(selected, provenance),
                    rule: Some(rule.name),
                };
            }
        }

        KeyResolution {
            key: ComparisonKey::new(columns.to_vec(), KeyProvenance::FallbackAllColumns),
            rule: None,
        }
    }
}
