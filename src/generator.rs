//! Per-message translation pipeline.
//!
//! For each message carrying table metadata: verify key references, map every
//! field to a column in declaration order, rewrite keys to canonical column
//! names, then render. Messages are independent; nothing is carried between
//! them, so a [`Generator`] can be shared across threads.

use crate::config::GeneratorConfig;
use crate::descriptor::{MessageDescriptor, SchemaFile};
use crate::error::Result;
use crate::extension::resolve_table;
use crate::keys::{normalize, verify_key_fields};
use crate::mapper::map_fields;
use crate::render::render;
use crate::table::TableSpec;

/// DDL produced for one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTable {
    pub table_name: String,
    pub ddl: String,
}

impl GeneratedTable {
    /// Output file name: `<table_name>.sql`
    pub fn file_name(&self) -> String {
        format!("{}.sql", self.table_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Build the resolved table for a message, or `None` if it is not a table
    pub fn table_spec(&self, message: &MessageDescriptor) -> Result<Option<TableSpec>> {
        let Some(rule) = resolve_table(message) else {
            log::debug!("message `{}` has no table rule, skipping", message.name);
            return Ok(None);
        };

        verify_key_fields(&rule.table, rule.all_keys(), &message.fields)?;

        let (columns, renames) = map_fields(rule, &message.fields)?;
        let mut table = TableSpec::from_rule(&self.config.database, rule, columns);
        normalize(&renames, &mut table);

        Ok(Some(table))
    }

    /// Translate one message; `None` if it carries no table metadata
    pub fn translate_message(&self, message: &MessageDescriptor) -> Result<Option<GeneratedTable>> {
        let Some(table) = self.table_spec(message)? else {
            return Ok(None);
        };

        log::info!(
            "generated table `{}` from message `{}` ({} columns)",
            table.table_name,
            message.name,
            table.fields.len()
        );

        Ok(Some(GeneratedTable {
            ddl: render(&table),
            table_name: table.table_name,
        }))
    }

    /// Translate every table message of a file, stopping at the first error.
    ///
    /// Files marked as not generated yield nothing.
    pub fn translate_file(&self, file: &SchemaFile) -> Result<Vec<GeneratedTable>> {
        if !file.generate {
            log::debug!("schema file `{}` is not marked for generation", file.name);
            return Ok(Vec::new());
        }

        let mut tables = Vec::new();
        for message in &file.messages {
            if let Some(table) = self.translate_message(message)? {
                tables.push(table);
            }
        }
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldDescriptor, FieldKind, Key, TableRule};
    use crate::error::TranslateError;

    fn message(rule: Option<TableRule>, fields: Vec<FieldDescriptor>) -> MessageDescriptor {
        let mut message = MessageDescriptor {
            name: "Msg".to_string(),
            options: Default::default(),
            fields,
        };
        message.options.table = rule;
        message
    }

    #[test]
    fn test_message_without_table_is_skipped() {
        let msg = message(None, vec![FieldDescriptor::new("payload", FieldKind::String)]);
        assert_eq!(Generator::default().translate_message(&msg).unwrap(), None);
    }

    #[test]
    fn test_dangling_key_reported_before_field_errors() {
        let rule = TableRule {
            table: "t".to_string(),
            primary_key: Key::new(["missing"]),
            ..Default::default()
        };
        // `payload` would fail mapping too; the key check runs first.
        let msg = message(Some(rule), vec![FieldDescriptor::new("payload", FieldKind::String)]);
        let err = Generator::default().translate_message(&msg).unwrap_err();
        assert!(matches!(err, TranslateError::MissingKeyField { .. }));
    }

    #[test]
    fn test_file_not_marked_for_generation() {
        let rule = TableRule {
            table: "t".to_string(),
            primary_key: Key::new(["id"]),
            ..Default::default()
        };
        let file = SchemaFile {
            name: "dep.proto".to_string(),
            generate: false,
            messages: vec![message(Some(rule), vec![FieldDescriptor::new("id", FieldKind::Int64)])],
        };
        assert!(Generator::default().translate_file(&file).unwrap().is_empty());
    }

    #[test]
    fn test_generator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Generator>();
        assert_send_sync::<GeneratedTable>();
    }
}
