//! Schema descriptor object model
//!
//! These are the already-parsed, already-resolved message and field
//! descriptors the translation core consumes. Table, tag and validation
//! options are plain typed fields resolved once when the schema is loaded,
//! so nothing downstream has to inspect options reflectively.
//!
//! The model deserializes from TOML or JSON. A field's kind is flattened into
//! the field itself:
//!
//! ```toml
//! [[messages.fields]]
//! name = "status"
//! type = "enum"
//! values = [{ name = "ACTIVE", number = 0 }, { name = "BANNED", number = 1 }]
//! ```

use serde::Deserialize;
use std::fmt;

/// One schema file with the messages it declares
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchemaFile {
    pub name: String,
    /// Files loaded only as dependencies are not generated
    #[serde(default = "default_generate")]
    pub generate: bool,
    #[serde(default)]
    pub messages: Vec<MessageDescriptor>,
}

fn default_generate() -> bool {
    true
}

/// Message definition with its attached options
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageDescriptor {
    pub name: String,
    #[serde(default)]
    pub options: MessageOptions,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageOptions {
    pub table: Option<TableRule>,
}

/// Table metadata attached to a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TableRule {
    pub table: String,
    #[serde(default)]
    pub primary_key: Key,
    #[serde(default)]
    pub unique_keys: Vec<Key>,
    /// Secondary (non-unique) keys
    #[serde(default)]
    pub keys: Vec<Key>,
}

impl TableRule {
    /// All keys: primary first, then unique, then secondary
    pub fn all_keys(&self) -> impl Iterator<Item = &Key> {
        std::iter::once(&self.primary_key)
            .chain(self.unique_keys.iter())
            .chain(self.keys.iter())
    }
}

/// Ordered field names forming one key
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Key {
    #[serde(alias = "f", default)]
    pub fields: Vec<String>,
}

impl Key {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Field definition within a message
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub options: FieldOptions,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            options: FieldOptions::default(),
        }
    }

    /// Attach a struct tag string such as `gorm:"column:uid"`
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.options.tags = Some(tags.into());
        self
    }

    /// Attach a string max length validation rule
    pub fn with_max_len(mut self, max_len: u64) -> Self {
        self.options.rules = Some(FieldRules {
            string: Some(StringRules {
                max_len: Some(max_len),
            }),
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldOptions {
    pub tags: Option<String>,
    pub rules: Option<FieldRules>,
}

/// Validation rules attached to a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldRules {
    pub string: Option<StringRules>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StringRules {
    pub max_len: Option<u64>,
}

/// Declared kind of a field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Bool,
    Int32,
    Sint32,
    Sfixed32,
    Int64,
    Sint64,
    Sfixed64,
    Uint32,
    Fixed32,
    Uint64,
    Fixed64,
    Float,
    Double,
    String,
    Bytes,
    Enum {
        #[serde(default)]
        values: Vec<EnumValue>,
    },
    Message,
    Group,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Sint32 => "sint32",
            Self::Sfixed32 => "sfixed32",
            Self::Int64 => "int64",
            Self::Sint64 => "sint64",
            Self::Sfixed64 => "sfixed64",
            Self::Uint32 => "uint32",
            Self::Fixed32 => "fixed32",
            Self::Uint64 => "uint64",
            Self::Fixed64 => "fixed64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Enum { .. } => "enum",
            Self::Message => "message",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One enum value, kept in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
}

impl EnumValue {
    pub fn new(name: impl Into<String>, number: i32) -> Self {
        Self {
            name: name.into(),
            number,
        }
    }
}
