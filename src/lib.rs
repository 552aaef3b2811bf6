//! # protoddl
//!
//! Translates message schemas annotated with table, key, rename and string
//! length metadata into MySQL `CREATE TABLE` statements.
//!
//! The pipeline per message is:
//! [`extension`] resolves metadata, [`mapper`] maps fields to columns,
//! [`keys`] rewrites key references to canonical column names, and
//! [`render`] produces the DDL text. [`Generator`] drives all of it.
//!
//! ```
//! use protoddl::{FieldDescriptor, FieldKind, Generator, GeneratorConfig, Key, MessageDescriptor, TableRule};
//!
//! let mut message = MessageDescriptor {
//!     name: "User".to_string(),
//!     options: Default::default(),
//!     fields: vec![
//!         FieldDescriptor::new("id", FieldKind::Int64),
//!         FieldDescriptor::new("name", FieldKind::String).with_max_len(255),
//!     ],
//! };
//! message.options.table = Some(TableRule {
//!     table: "users".to_string(),
//!     primary_key: Key::new(["id"]),
//!     ..Default::default()
//! });
//!
//! let generator = Generator::new(GeneratorConfig::default());
//! let table = generator.translate_message(&message).unwrap().unwrap();
//! assert_eq!(table.file_name(), "users.sql");
//! assert!(table.ddl.contains("\tid BIGINT NOT NULL AUTO_INCREMENT,"));
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod extension;
pub mod generator;
pub mod keys;
pub mod mapper;
pub mod render;
pub mod table;

pub use config::GeneratorConfig;
pub use descriptor::{
    EnumValue, FieldDescriptor, FieldKind, Key, MessageDescriptor, SchemaFile, TableRule,
};
pub use error::{Result, TranslateError};
pub use generator::{GeneratedTable, Generator};
pub use mapper::{ColumnFragment, RenameMap};
pub use table::TableSpec;
