pub mod schema;
pub mod shortcut;

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

pub use schema::{Deserializer, SchemaValidationError, ShortcutSchema, StateSchema};
pub use shortcut::{add_shortcut, resolve, ShortcutError, RESERVED_SHORTCUT, SHORTCUT_FILE};

/// One result row: the ordered field strings returned by a validation query.
pub type Row = Vec<String>;

/// Snapshot of a single check's query results at one point in time.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct State {
    pub name: String,
    pub validation_query: String,
    pub properties: Vec<String>,
    /// Distinct rows in order of first appearance.
    pub results: Vec<Row>,
}

impl State {
    pub fn new(
        name: impl Into<String>,
        validation_query: impl Into<String>,
        properties: Vec<String>,
        results: Vec<Row>,
    ) -> Self {
        let mut seen = HashSet::with_capacity(results.len());
        let distinct = results
            .into_iter()
            .filter(|row| seen.insert(row.clone()))
            .collect();
        Self {
            name: name.into(),
            validation_query: validation_query.into(),
            properties,
            results: distinct,
        }
    }
}

/// Alias table stored as `shortcut.json` in a query directory.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct ShortcutTable {
    pub name: String,
    pub shortcuts: BTreeMap<String, String>,
}

impl ShortcutTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shortcuts: BTreeMap::new(),
        }
    }

    pub fn with_shortcut(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.shortcuts.insert(alias.into(), target.into());
        self
    }

    pub fn resolve<'a>(&'a self, identifier: &'a str) -> &'a str {
        resolve(&self.shortcuts, identifier)
    }
}
