//! Schema file loading
//!
//! Schema descriptor files are TOML or JSON renderings of
//! [`protoddl::SchemaFile`]. The format is picked by extension, falling back
//! to sniffing the content.

use crate::error::{GenError, Result};
use protoddl::SchemaFile;
use std::fs;
use std::path::{Path, PathBuf};

pub fn parse_schema_from_file(path: &Path) -> Result<SchemaFile> {
    let content = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");

    let parsed = match ext {
        "toml" => parse_toml(&content),
        "json" => parse_json(&content),
        _ => {
            // Try to detect format from content
            if content.trim_start().starts_with('{') {
                parse_json(&content)
            } else if content.contains('=') {
                parse_toml(&content)
            } else {
                return Err(GenError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        }
    };

    parsed.map_err(|message| GenError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_toml(content: &str) -> std::result::Result<SchemaFile, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}

fn parse_json(content: &str) -> std::result::Result<SchemaFile, String> {
    serde_json::from_str(content).map_err(|e| e.to_string())
}

/// Schema files (`.toml` / `.json`) directly inside `dir`, sorted by path
pub fn schema_files_in_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| GenError::io(dir, e))? {
        let path = entry.map_err(|e| GenError::io(dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        if matches!(ext, "toml" | "json") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Load schemas from a file or every schema file in a directory.
///
/// A file that fails to parse fails the whole load.
pub fn load_schemas(input: &Path) -> Result<Vec<(PathBuf, SchemaFile)>> {
    let files = if input.is_dir() {
        schema_files_in_dir(input)?
    } else {
        vec![input.to_path_buf()]
    };

    files
        .into_iter()
        .map(|path| {
            let schema = parse_schema_from_file(&path)?;
            log::debug!(
                "loaded schema `{}` from {} ({} messages)",
                schema.name,
                path.display(),
                schema.messages.len()
            );
            Ok((path, schema))
        })
        .collect()
}
