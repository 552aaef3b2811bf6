//! Field type mapper
//!
//! Turns one field descriptor into a rendered column clause and the column's
//! canonical name. Dispatch is an exhaustive match over [`FieldKind`]; kinds
//! without a mapping fall to an explicit [`TranslateError::UnsupportedKind`] arm.

use crate::descriptor::{EnumValue, FieldDescriptor, FieldKind, TableRule};
use crate::error::{Result, TranslateError};
use crate::extension::{resolve_field, LengthRule};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Strings up to this length are stored as `VARCHAR(n)`; longer ones as `TEXT`
pub const MAX_VARCHAR_LEN: u64 = 1024;

/// SQL column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Bool,
    Int { unsigned: bool },
    BigInt { unsigned: bool },
    Float,
    Double,
    Varchar(u64),
    Text,
    Json,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("BOOL"),
            Self::Int { unsigned: false } => f.write_str("INT"),
            Self::Int { unsigned: true } => f.write_str("INT UNSIGNED"),
            Self::BigInt { unsigned: false } => f.write_str("BIGINT"),
            Self::BigInt { unsigned: true } => f.write_str("BIGINT UNSIGNED"),
            Self::Float => f.write_str("FLOAT"),
            Self::Double => f.write_str("DOUBLE"),
            Self::Varchar(len) => write!(f, "VARCHAR({len})"),
            Self::Text => f.write_str("TEXT"),
            Self::Json => f.write_str("JSON"),
        }
    }
}

/// Column default value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDefault {
    False,
    Zero,
    EmptyString,
}

impl fmt::Display for ColumnDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::False => f.write_str("false"),
            Self::Zero => f.write_str("0"),
            Self::EmptyString => f.write_str("''"),
        }
    }
}

/// A fully resolved column clause under its canonical name.
///
/// `Display` renders the clause without the trailing comma, e.g.
/// `id BIGINT NOT NULL AUTO_INCREMENT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFragment {
    pub name: String,
    pub column_type: ColumnType,
    pub not_null: bool,
    pub default: Option<ColumnDefault>,
    pub auto_increment: bool,
    pub comment: Option<String>,
}

impl ColumnFragment {
    fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            not_null: false,
            default: None,
            auto_increment: false,
            comment: None,
        }
    }

    fn not_null(mut self, default: ColumnDefault) -> Self {
        self.not_null = true;
        self.default = Some(default);
        self
    }

    /// Integer column: auto-increment when it is the sole primary key, default 0 otherwise
    fn integer(name: &str, column_type: ColumnType, sole_key: bool) -> Self {
        if sole_key {
            Self {
                not_null: true,
                auto_increment: true,
                ..Self::new(name, column_type)
            }
        } else {
            Self::new(name, column_type).not_null(ColumnDefault::Zero)
        }
    }
}

impl fmt::Display for ColumnFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.column_type)?;
        if self.not_null {
            f.write_str(" NOT NULL")?;
        }
        if let Some(default) = self.default {
            write!(f, " DEFAULT {default}")?;
        }
        if self.auto_increment {
            f.write_str(" AUTO_INCREMENT")?;
        }
        if let Some(comment) = &self.comment {
            write!(f, " COMMENT '{comment}'")?;
        }
        Ok(())
    }
}

/// Original field name to canonical column name, for renamed fields only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameMap(BTreeMap<String, String>);

impl RenameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field's canonical name; unchanged names are not stored
    pub fn record(&mut self, original: &str, canonical: &str) {
        if original != canonical {
            self.0.insert(original.to_string(), canonical.to_string());
        }
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.0.get(original).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Map one field to its column clause and canonical name.
///
/// `sole_key` must be true only when the field is the single member of the
/// primary key; members of a composite key never auto-increment.
pub fn map_field(sole_key: bool, field: &FieldDescriptor) -> Result<(ColumnFragment, String)> {
    let extensions = resolve_field(field)?;
    let name = extensions
        .column_override
        .unwrap_or_else(|| field.name.clone());

    let fragment = match &field.kind {
        FieldKind::Bool => ColumnFragment::new(&name, ColumnType::Bool).not_null(ColumnDefault::False),
        FieldKind::Int32 => {
            ColumnFragment::integer(&name, ColumnType::Int { unsigned: false }, sole_key)
        }
        FieldKind::Int64 => {
            ColumnFragment::integer(&name, ColumnType::BigInt { unsigned: false }, sole_key)
        }
        FieldKind::Uint32 => {
            ColumnFragment::integer(&name, ColumnType::Int { unsigned: true }, sole_key)
        }
        FieldKind::Uint64 => {
            ColumnFragment::integer(&name, ColumnType::BigInt { unsigned: true }, sole_key)
        }
        FieldKind::Enum { values } => ColumnFragment {
            comment: Some(enum_comment(values)),
            ..ColumnFragment::new(&name, ColumnType::Int { unsigned: false })
                .not_null(ColumnDefault::Zero)
        },
        FieldKind::Float => ColumnFragment::new(&name, ColumnType::Float).not_null(ColumnDefault::Zero),
        FieldKind::Double => {
            ColumnFragment::new(&name, ColumnType::Double).not_null(ColumnDefault::Zero)
        }
        FieldKind::String => string_column(&name, extensions.length_rule)?,
        FieldKind::Bytes => ColumnFragment::new(&name, ColumnType::Text),
        FieldKind::Message => ColumnFragment::new(&name, ColumnType::Json),
        kind @ (FieldKind::Sint32
        | FieldKind::Sfixed32
        | FieldKind::Sint64
        | FieldKind::Sfixed64
        | FieldKind::Fixed32
        | FieldKind::Fixed64
        | FieldKind::Group) => {
            return Err(TranslateError::UnsupportedKind {
                field: field.name.clone(),
                kind: kind.to_string(),
            })
        }
    };

    Ok((fragment, name))
}

/// Map every field of a message in declaration order, collecting renames
pub fn map_fields(
    rule: &TableRule,
    fields: &[FieldDescriptor],
) -> Result<(Vec<ColumnFragment>, RenameMap)> {
    let primary: BTreeSet<&str> = rule.primary_key.fields.iter().map(String::as_str).collect();

    let mut fragments = Vec::with_capacity(fields.len());
    let mut renames = RenameMap::new();

    for field in fields {
        let sole_key = primary.len() == 1 && primary.contains(field.name.as_str());
        let (fragment, canonical) = map_field(sole_key, field)?;
        if canonical != field.name {
            log::debug!("field `{}` renamed to column `{}`", field.name, canonical);
        }
        renames.record(&field.name, &canonical);
        fragments.push(fragment);
    }

    Ok((fragments, renames))
}

fn string_column(name: &str, rule: Option<LengthRule>) -> Result<ColumnFragment> {
    match rule {
        None | Some(LengthRule { max_len: 0 }) => Err(TranslateError::MissingLengthConstraint {
            field: name.to_string(),
        }),
        Some(LengthRule { max_len }) if max_len <= MAX_VARCHAR_LEN => {
            Ok(ColumnFragment::new(name, ColumnType::Varchar(max_len))
                .not_null(ColumnDefault::EmptyString))
        }
        Some(_) => Ok(ColumnFragment::new(name, ColumnType::Text)),
    }
}

/// `0=UNKNOWN; 1=ACTIVE` in declaration order
fn enum_comment(values: &[EnumValue]) -> String {
    values
        .iter()
        .map(|v| format!("{}={}", v.number, v.name))
        .collect::<Vec<_>>()
        .join("; ")
}
