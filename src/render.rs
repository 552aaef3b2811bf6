//! DDL renderer
//!
//! Produces the final MySQL text for a [`TableSpec`]:
//!
//! ```sql
//! CREATE DATABASE IF NOT EXISTS shop COLLATE utf8mb4_unicode_ci;
//!
//! USE shop;
//!
//! CREATE TABLE orders (
//!     id BIGINT NOT NULL AUTO_INCREMENT,
//!     uid BIGINT NOT NULL DEFAULT 0,
//!     UNIQUE KEY uk_uid(`uid`),
//!     KEY idx_created_at(`created_at`),
//!     PRIMARY KEY (`id`)
//! ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci;
//! ```
//!
//! Column and key lines are tab-indented; the primary key line uses four
//! spaces. Rendering is a pure function of the table: no clock, locale or map
//! iteration order is involved.

use crate::descriptor::Key;
use crate::table::TableSpec;
use std::fmt;

const DATABASE_COLLATE: &str = "COLLATE utf8mb4_unicode_ci";
const TABLE_OPTIONS: &str = "ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci";

/// Render the DDL for one table, trimmed of leading and trailing line breaks
pub fn render(table: &TableSpec) -> String {
    table
        .to_string()
        .trim_matches(&['\r', '\n'][..])
        .to_string()
}

impl fmt::Display for TableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.database.is_empty() {
            writeln!(
                f,
                "CREATE DATABASE IF NOT EXISTS {} {};",
                self.database, DATABASE_COLLATE
            )?;
            writeln!(f)?;
            writeln!(f, "USE {};", self.database)?;
            writeln!(f)?;
        }

        writeln!(f, "CREATE TABLE {} (", self.table_name)?;
        for column in &self.fields {
            writeln!(f, "\t{column},")?;
        }
        for key in &self.unique_keys {
            writeln!(f, "\tUNIQUE KEY uk_{},", NamedKey(key))?;
        }
        for key in &self.secondary_keys {
            writeln!(f, "\tKEY idx_{},", NamedKey(key))?;
        }
        writeln!(f, "    PRIMARY KEY {}", KeyColumns(&self.primary_key))?;
        write!(f, ") {TABLE_OPTIONS};")
    }
}

/// Back-quoted, comma-joined column list in parentheses
struct KeyColumns<'a>(&'a Key);

impl fmt::Display for KeyColumns<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, field) in self.0.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "`{field}`")?;
        }
        f.write_str(")")
    }
}

/// Synthetic name (field names joined by `_`) followed by the column list
struct NamedKey<'a>(&'a Key);

impl fmt::Display for NamedKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0.fields.join("_"), KeyColumns(self.0))
    }
}
