//! Naming-convention rules for inferring a comparison key
//!
//! Each rule pairs a predicate over column names with a way of picking key
//! columns. Rules are plain data, so supporting another convention means
//! adding an entry to a rule list rather than new control flow.

/// Predicate over one column name, evaluated case-insensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePattern {
    /// Name equals one of the tokens
    Equals(&'static [&'static str]),
    /// Name ends with one of the suffixes
    EndsWith(&'static [&'static str]),
    /// Name contains one of `any` and none of `none`
    Contains {
        any: &'static [&'static str],
        none: &'static [&'static str],
    },
}

impl NamePattern {
    pub fn matches(&self, column: &str) -> bool {
        let lower = column.to_lowercase();
        match self {
            NamePattern::Equals(tokens) => tokens.iter().any(|t| lower == t.to_lowercase()),
            NamePattern::EndsWith(suffixes) => suffixes.iter().any(|s| lower.ends_with(s)),
            NamePattern::Contains { any, none } => {
                any.iter().any(|t| lower.contains(t)) && !none.iter().any(|t| lower.contains(t))
            }
        }
    }
}

/// Extra column pulled into a key when one of the selected columns is an
/// owner of it (e.g. a role code that grants a permission)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Companion {
    pub owner: NamePattern,
    pub extra: NamePattern,
}

/// How a rule chooses key columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySelection {
    /// The first column matching the pattern, alone
    FirstMatch(NamePattern),
    /// Two-column tables whose columns match `first` and `second` in either
    /// order; both columns in schema order
    Pair {
        first: NamePattern,
        second: NamePattern,
    },
    /// Every matching column, extended by the first non-selected column
    /// matching the companion when a selected column owns it
    AllMatches {
        pattern: NamePattern,
        companion: Option<Companion>,
    },
    /// Small tables (at most `max_columns`) with any column matching
    /// `indicator`: the leading `width` columns
    Prefix {
        max_columns: usize,
        indicator: NamePattern,
        width: usize,
    },
}

/// A named key inference rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRule {
    pub name: &'static str,
    pub selection: KeySelection,
}

impl KeyRule {
    /// Key columns chosen by this rule, or `None` when it does not apply
    pub fn select(&self, columns: &[String]) -> Option<Vec<String>> {
        let picked = match self.selection {
            KeySelection::FirstMatch(pattern) => columns
                .iter()
                .find(|c| pattern.matches(c))
                .map(|c| vec![c.clone()]),

            KeySelection::Pair { first, second } => match columns {
                [a, b] if (first.matches(a) && second.matches(b))
                    || (first.matches(b) && second.matches(a)) =>
                {
                    Some(columns.to_vec())
                }
                _ => None,
            },

            KeySelection::AllMatches { pattern, companion } => {
                let mut selected: Vec<String> =
                    columns.iter().filter(|c| pattern.matches(c)).cloned().collect();
                if let Some(companion) = companion {
                    let owned = selected.iter().any(|c| companion.owner.matches(c));
                    let extra = columns
                        .iter()
                        .find(|c| !selected.contains(c) && companion.extra.matches(c));
                    if let (true, Some(extra)) = (owned, extra) {
                        selected.push(extra.clone());
                    }
                }
                Some(selected)
            }

            KeySelection::Prefix {
                max_columns,
                indicator,
                width,
            } => {
                if columns.len() <= max_columns && columns.iter().any(|c| indicator.matches(c)) {
                    Some(columns.iter().take(width).cloned().collect())
                } else {
                    None
                }
            }
        };

        picked.filter(|cols| !cols.is_empty())
    }
}

const IDENTITY_TOKENS: &[&str] = &[
    "id",
    "_id",
    "uuid",
    "guid",
    "key",
    "primary_key",
    "primarykey",
    "primary_id",
    "primaryid",
];

const ROLE_OR_CODE: NamePattern = NamePattern::Contains {
    any: &["role", "code"],
    none: &[],
};

const PERMISSION: NamePattern = NamePattern::Contains {
    any: &["permission"],
    none: &[],
};

/// The conventions applied, in order, when a table declares no primary key.
/// The first rule that selects columns wins.
pub const DEFAULT_RULES: &[KeyRule] = &[
    KeyRule {
        name: "identity-column",
        selection: KeySelection::FirstMatch(NamePattern::Equals(IDENTITY_TOKENS)),
    },
    KeyRule {
        name: "role-permission-pair",
        selection: KeySelection::Pair {
            first: ROLE_OR_CODE,
            second: PERMISSION,
        },
    },
    KeyRule {
        name: "id-or-code-suffix",
        selection: KeySelection::AllMatches {
            pattern: NamePattern::EndsWith(&["_id", "_code"]),
            companion: Some(Companion {
                owner: ROLE_OR_CODE,
                extra: PERMISSION,
            }),
        },
    },
    KeyRule {
        name: "id-fragment",
        selection: KeySelection::AllMatches {
            pattern: NamePattern::Contains {
                any: &["id"],
                none: &["hide", "guid"],
            },
            companion: None,
        },
    },
    KeyRule {
        name: "small-relation-table",
        selection: KeySelection::Prefix {
            max_columns: 5,
            indicator: NamePattern::Contains {
                any: &["role", "permission", "code", "relation"],
                none: &[],
            },
            width: 2,
        },
    },
];
