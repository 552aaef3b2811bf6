//! Extension resolver
//!
//! Pulls table metadata off messages and rename/length metadata off fields.
//! Absence is never an error here: a message without a table rule is simply
//! not a table, and a field without a tag or rule gets no override. Whether
//! absence matters is up to the caller.

use crate::descriptor::{FieldDescriptor, MessageDescriptor, TableRule};
use crate::error::{Result, TranslateError};

/// Tag attribute carrying column directives
const GORM_ATTRIBUTE: &str = "gorm:";
/// Column directive subkey inside the `gorm` attribute
const COLUMN_SUBKEY: &str = "column";

/// Field-level metadata resolved from a field's options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldExtensions {
    /// Column name override from a `gorm:"column:<name>"` tag
    pub column_override: Option<String>,
    pub length_rule: Option<LengthRule>,
}

/// String length validation attached to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRule {
    /// Zero when the rule was attached without a maximum
    pub max_len: u64,
}

/// Table metadata attached to a message, if any
pub fn resolve_table(message: &MessageDescriptor) -> Option<&TableRule> {
    message.options.table.as_ref()
}

/// Resolve the rename directive and length rule attached to a field
pub fn resolve_field(field: &FieldDescriptor) -> Result<FieldExtensions> {
    let column_override = match field.options.tags.as_deref() {
        Some(tags) if !tags.is_empty() => parse_column_tag(&field.name, tags)?,
        _ => None,
    };

    let length_rule = field
        .options
        .rules
        .as_ref()
        .and_then(|rules| rules.string.as_ref())
        .map(|string| LengthRule {
            max_len: string.max_len.unwrap_or(0),
        });

    Ok(FieldExtensions {
        column_override,
        length_rule,
    })
}

/// Parse a struct tag string like `gorm:"column:uid"`.
///
/// The whole tag is a single `attribute:"value"` pair: split on `"` it must
/// yield exactly three parts. Only the `gorm` attribute is interpreted, and its
/// value must be a single `subkey:value` pair.
fn parse_column_tag(field: &str, tags: &str) -> Result<Option<String>> {
    let parts: Vec<&str> = tags.split('"').collect();
    if parts.len() != 3 {
        return Err(TranslateError::InvalidTagFormat {
            field: field.to_string(),
            tag: tags.to_string(),
        });
    }

    if parts[0] != GORM_ATTRIBUTE {
        return Ok(None);
    }

    let directive: Vec<&str> = parts[1].split(':').collect();
    if directive.len() != 2 {
        return Err(TranslateError::InvalidAttributeFormat {
            field: field.to_string(),
            tag: tags.to_string(),
        });
    }

    if directive[0] == COLUMN_SUBKEY {
        Ok(Some(directive[1].to_string()))
    } else {
        Ok(None)
    }
}
