//! Tests for the DDL file writer
//!
//! Tests verify that:
//! - One `<table>.sql` file is written per table message
//! - Existing files are replaced, not partially overwritten
//! - A failing message stops the run but keeps earlier files

use protoddl::{
    FieldDescriptor, FieldKind, GeneratedTable, Generator, GeneratorConfig, Key, MessageDescriptor,
    SchemaFile, TableRule, TranslateError,
};
use protoddl_gen::{GenError, SqlWriter};
use std::fs;
use tempfile::TempDir;

fn table_message(table: &str, fields: Vec<FieldDescriptor>) -> MessageDescriptor {
    let mut message = MessageDescriptor {
        name: table.to_string(),
        options: Default::default(),
        fields,
    };
    message.options.table = Some(TableRule {
        table: table.to_string(),
        primary_key: Key::new(["id"]),
        ..Default::default()
    });
    message
}

fn schema(messages: Vec<MessageDescriptor>) -> SchemaFile {
    SchemaFile {
        name: "shop.proto".to_string(),
        generate: true,
        messages,
    }
}

#[test]
fn test_write_table_creates_outdir() {
    let temp_dir = TempDir::new().unwrap();
    let outdir = temp_dir.path().join("sql").join("nested");
    let writer = SqlWriter::new(&outdir);

    let path = writer
        .write_table(&GeneratedTable {
            table_name: "users".to_string(),
            ddl: "CREATE TABLE users (\n    PRIMARY KEY (`id`)\n);".to_string(),
        })
        .unwrap();

    assert_eq!(path, outdir.join("users.sql"));
    assert!(fs::read_to_string(&path).unwrap().starts_with("CREATE TABLE users"));
}

#[test]
fn test_write_table_replaces_longer_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let stale = temp_dir.path().join("users.sql");
    fs::write(&stale, "x".repeat(4096)).unwrap();

    let writer = SqlWriter::new(temp_dir.path());
    writer
        .write_table(&GeneratedTable {
            table_name: "users".to_string(),
            ddl: "short".to_string(),
        })
        .unwrap();

    assert_eq!(fs::read_to_string(&stale).unwrap(), "short");
}

#[test]
fn test_write_schema_writes_one_file_per_table() {
    let temp_dir = TempDir::new().unwrap();
    let writer = SqlWriter::new(temp_dir.path());
    let generator = Generator::new(GeneratorConfig::new("shop", temp_dir.path()));

    let plain = MessageDescriptor {
        name: "ListRequest".to_string(),
        options: Default::default(),
        fields: vec![],
    };
    let file = schema(vec![
        table_message("users", vec![FieldDescriptor::new("id", FieldKind::Int64)]),
        plain,
        table_message("orders", vec![FieldDescriptor::new("id", FieldKind::Uint64)]),
    ]);

    let written = writer.write_schema(&generator, &file).unwrap();
    assert_eq!(
        written,
        vec![temp_dir.path().join("users.sql"), temp_dir.path().join("orders.sql")]
    );

    let users = fs::read_to_string(temp_dir.path().join("users.sql")).unwrap();
    assert!(users.starts_with("CREATE DATABASE IF NOT EXISTS shop COLLATE utf8mb4_unicode_ci;"));
    assert!(users.contains("\tid BIGINT NOT NULL AUTO_INCREMENT,"));
    assert!(!users.ends_with('\n'));

    let orders = fs::read_to_string(temp_dir.path().join("orders.sql")).unwrap();
    assert!(orders.contains("\tid BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,"));
}

#[test]
fn test_failing_message_keeps_earlier_files() {
    let temp_dir = TempDir::new().unwrap();
    let writer = SqlWriter::new(temp_dir.path());
    let generator = Generator::default();

    let file = schema(vec![
        table_message("users", vec![FieldDescriptor::new("id", FieldKind::Int64)]),
        table_message(
            "events",
            vec![
                FieldDescriptor::new("id", FieldKind::Int64),
                FieldDescriptor::new("payload", FieldKind::String),
            ],
        ),
        table_message("orders", vec![FieldDescriptor::new("id", FieldKind::Int64)]),
    ]);

    let err = writer.write_schema(&generator, &file).unwrap_err();
    assert!(matches!(
        err,
        GenError::Translate(TranslateError::MissingLengthConstraint { ref field }) if field == "payload"
    ));

    assert!(temp_dir.path().join("users.sql").exists());
    assert!(!temp_dir.path().join("events.sql").exists());
    assert!(!temp_dir.path().join("orders.sql").exists());
}

#[test]
fn test_schema_not_marked_for_generation_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let writer = SqlWriter::new(temp_dir.path());

    let mut file = schema(vec![table_message(
        "users",
        vec![FieldDescriptor::new("id", FieldKind::Int64)],
    )]);
    file.generate = false;

    let written = writer.write_schema(&Generator::default(), &file).unwrap();
    assert!(written.is_empty());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}
