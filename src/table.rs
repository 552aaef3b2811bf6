//! Resolved per-message table description

use crate::descriptor::{Key, TableRule};
use crate::mapper::ColumnFragment;

/// Everything needed to render one `CREATE TABLE` statement.
///
/// Built and consumed within a single message's translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSpec {
    /// Empty means no `CREATE DATABASE` / `USE` prologue
    pub database: String,
    pub table_name: String,
    /// Columns in field declaration order
    pub fields: Vec<ColumnFragment>,
    pub primary_key: Key,
    pub unique_keys: Vec<Key>,
    pub secondary_keys: Vec<Key>,
}

impl TableSpec {
    /// Start a table from a message's table rule; keys still use declared field names
    pub fn from_rule(database: &str, rule: &TableRule, fields: Vec<ColumnFragment>) -> Self {
        Self {
            database: database.to_string(),
            table_name: rule.table.clone(),
            fields,
            primary_key: rule.primary_key.clone(),
            unique_keys: rule.unique_keys.clone(),
            secondary_keys: rule.keys.clone(),
        }
    }

    /// All keys: primary first, then unique, then secondary
    pub(crate) fn keys_mut(&mut self) -> impl Iterator<Item = &mut Key> {
        std::iter::once(&mut self.primary_key)
            .chain(self.unique_keys.iter_mut())
            .chain(self.secondary_keys.iter_mut())
    }
}
