//! Translation error types

use thiserror::Error;

/// Errors raised while translating one message into table DDL.
///
/// Every variant is terminal for the message being translated. They describe
/// defects in the schema itself, so each carries enough context (table, field,
/// tag or kind) for the schema author to find the offending declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// A primary, unique or secondary key names a field the message does not declare
    #[error("not found key field: {field} (table `{table}`)")]
    MissingKeyField { table: String, field: String },

    /// The tag string is not a single `attribute:"value"` pair
    #[error("tag is invalid: field `{field}`, tag `{tag}`")]
    InvalidTagFormat { field: String, tag: String },

    /// The `gorm` attribute value is not a `subkey:value` pair
    #[error("gorm tag is invalid: field `{field}`, tag `{tag}`")]
    InvalidAttributeFormat { field: String, tag: String },

    /// A string field has no max length rule, or the rule allows zero characters
    #[error("no max_len validation for field: {field}")]
    MissingLengthConstraint { field: String },

    /// The field kind has no column mapping
    #[error("not support field kind `{kind}` for field: {field}")]
    UnsupportedKind { field: String, kind: String },
}

pub type Result<T> = std::result::Result<T, TranslateError>;
