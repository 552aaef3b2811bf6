//! Key normalizer
//!
//! Keys are declared against field names, but columns may be renamed.
//! [`verify_key_fields`] checks references against the declared fields before
//! any mapping happens; [`normalize`] then rewrites every key to canonical
//! column names before rendering.

use crate::descriptor::{FieldDescriptor, Key};
use crate::error::{Result, TranslateError};
use crate::mapper::RenameMap;
use crate::table::TableSpec;
use std::collections::HashSet;

/// Check that every field named by `keys` is declared on the message.
///
/// Keys are walked in order (primary, unique, secondary) so the reported
/// field is the first dangling reference in declaration order.
pub fn verify_key_fields<'a>(
    table: &str,
    keys: impl IntoIterator<Item = &'a Key>,
    declared: &[FieldDescriptor],
) -> Result<()> {
    let declared: HashSet<&str> = declared.iter().map(|f| f.name.as_str()).collect();

    for key in keys {
        if let Some(missing) = key.fields.iter().find(|f| !declared.contains(f.as_str())) {
            return Err(TranslateError::MissingKeyField {
                table: table.to_string(),
                field: missing.clone(),
            });
        }
    }

    Ok(())
}

/// Rewrite every key of the table to canonical column names
pub fn normalize(renames: &RenameMap, table: &mut TableSpec) {
    if renames.is_empty() {
        return;
    }

    for key in table.keys_mut() {
        rename_key(renames, key);
    }
}

fn rename_key(renames: &RenameMap, key: &mut Key) {
    for field in &mut key.fields {
        if let Some(canonical) = renames.get(field) {
            *field = canonical.to_string();
        }
    }
}
