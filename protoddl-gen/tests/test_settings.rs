//! Tests for generator configuration resolution
//!
//! Tests verify that:
//! - The configuration file is honoured by every subcommand's resolution
//! - Plugin parameters override the file and explicit flags override both
//! - Bad configuration surfaces as an error instead of silent defaults

use protoddl::{FieldDescriptor, FieldKind, Generator, Key, MessageDescriptor, TableRule};
use protoddl_gen::{resolve_config, ConfigOverrides, GenError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn config_file(temp_dir: &TempDir, contents: &str) -> PathBuf {
    let path = temp_dir.path().join("protoddl.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_config_file_is_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let path = config_file(&temp_dir, "[generator]\ndatabase = \"shop\"\noutdir = \"sql\"\n");

    let config = resolve_config(&ConfigOverrides {
        config_file: Some(path),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(config.database, "shop");
    assert_eq!(config.outdir, PathBuf::from("sql"));
}

#[test]
fn test_loaded_database_reaches_the_generated_ddl() {
    let temp_dir = TempDir::new().unwrap();
    let path = config_file(&temp_dir, "[generator]\ndatabase = \"shop\"\n");
    let config = resolve_config(&ConfigOverrides {
        config_file: Some(path),
        ..Default::default()
    })
    .unwrap();

    let mut message = MessageDescriptor {
        name: "User".to_string(),
        options: Default::default(),
        fields: vec![FieldDescriptor::new("id", FieldKind::Int64)],
    };
    message.options.table = Some(TableRule {
        table: "users".to_string(),
        primary_key: Key::new(["id"]),
        ..Default::default()
    });

    let table = Generator::new(config).translate_message(&message).unwrap().unwrap();
    assert!(table.ddl.starts_with("CREATE DATABASE IF NOT EXISTS shop COLLATE utf8mb4_unicode_ci;"));
}

#[test]
fn test_parameters_then_flags_override_the_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = config_file(&temp_dir, "[generator]\ndatabase = \"shop\"\noutdir = \"sql\"\n");

    let config = resolve_config(&ConfigOverrides {
        config_file: Some(path.clone()),
        param: Some("database=crm,outdir=out".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(config.database, "crm");
    assert_eq!(config.outdir, PathBuf::from("out"));

    let config = resolve_config(&ConfigOverrides {
        config_file: Some(path),
        param: Some("database=crm".to_string()),
        database: Some("billing".to_string()),
        outdir: Some(PathBuf::from("ddl")),
    })
    .unwrap();
    assert_eq!(config.database, "billing");
    assert_eq!(config.outdir, PathBuf::from("ddl"));
}

#[test]
fn test_bad_generator_section_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = config_file(&temp_dir, "[generator]\ndatabase = [\"a\", \"b\"]\n");

    let err = resolve_config(&ConfigOverrides {
        config_file: Some(path),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, GenError::Config(_)));
}

#[test]
fn test_unknown_parameter_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = config_file(&temp_dir, "");

    let err = resolve_config(&ConfigOverrides {
        config_file: Some(path),
        param: Some("colour=red".to_string()),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, GenError::Config(ref message) if message.contains("colour")));
}
