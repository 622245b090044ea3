// ============================================================================
// domain/error.rs - SCHEMA AND DIALECT ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Everything that can go wrong between reading the schema text and having a
/// fully resolved [`Database`](crate::domain::Database). All of these are
/// fatal for a generation run: no file is produced from an invalid schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Parse Errors
    // ========================================================================
    #[error("malformed schema: {reason}")]
    MalformedSchema { reason: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("unsupported SQL dialect '{dialect}'")]
    UnsupportedDialect { dialect: String },

    #[error("database name is missing")]
    MissingDatabaseName,

    #[error("database '{database}' has no tables")]
    NoTables { database: String },

    #[error("table #{table_index} has no name")]
    MissingTableName { table_index: usize },

    #[error("table '{table}' (#{table_index}) has no fields")]
    NoFields { table: String, table_index: usize },

    #[error("table '{table}' (#{table_index}) has no primary key field")]
    MissingPrimaryKey { table: String, table_index: usize },

    #[error("field #{field_index} of table '{table}' (#{table_index}) has no name")]
    MissingFieldName {
        table: String,
        table_index: usize,
        field_index: usize,
    },

    #[error("table name '{table}' is used more than once (#{table_index})")]
    DuplicateTableName { table: String, table_index: usize },

    #[error("field name '{field}' is used more than once in table '{table}' (#{field_index})")]
    DuplicateFieldName {
        table: String,
        field: String,
        field_index: usize,
    },

    // ========================================================================
    // Resolution Errors
    // ========================================================================
    #[error("no plugin registered for dialect '{name}'")]
    PluginNotFound { name: String },

    #[error("field '{field}' of table '{table}' has unknown type '{type_name}'")]
    UnknownFieldType {
        table: String,
        field: String,
        type_name: String,
    },

    #[error("database '{database}' has no resolved SQL plugin")]
    PluginNotResolved { database: String },

    #[error("table '{table}' has no primary key")]
    NoPrimaryKey { table: String },

    // ========================================================================
    // Planning Errors
    // ========================================================================
    #[error("output path '{path}' must stay inside the output directory")]
    InvalidOutputPath { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedSchema { reason } => vec![
                "The schema file is not valid JSON".into(),
                format!("Parser said: {}", reason),
                "Comments (// and /* */) are allowed, trailing commas are not".into(),
            ],
            Self::UnsupportedDialect { dialect } => vec![
                format!("'{}' is not a supported SqlType", dialect),
                "Use one of: mariadb, mssql, mysql, postgres, sqlite".into(),
                "Dialect names are case-sensitive".into(),
            ],
            Self::MissingDatabaseName => vec!["Add a top-level \"Name\" to the schema".into()],
            Self::NoTables { .. } => vec!["Add at least one entry to \"Tables\"".into()],
            Self::MissingTableName { table_index } => {
                vec![format!("Give table #{} a \"Name\"", table_index)]
            }
            Self::NoFields { table, .. } => {
                vec![format!("Add at least one entry to \"Fields\" of '{}'", table)]
            }
            Self::MissingPrimaryKey { table, .. } | Self::NoPrimaryKey { table } => vec![
                format!("Mark a field of '{}' with \"PrimaryKey\": true", table),
            ],
            Self::MissingFieldName {
                table, field_index, ..
            } => vec![format!("Give field #{} of '{}' a \"Name\"", field_index, table)],
            Self::DuplicateTableName { table, .. } => {
                vec![format!("Rename one of the '{}' tables", table)]
            }
            Self::DuplicateFieldName { table, field, .. } => {
                vec![format!("Rename one of the '{}' fields in '{}'", field, table)]
            }
            Self::PluginNotFound { .. } => vec![
                "Try: genapp dialects to see registered dialects".into(),
            ],
            Self::UnknownFieldType { type_name, .. } => vec![
                format!("'{}' is not a known field type", type_name),
                "Known types: date, datetime, email, dec, decimal, int, integer, money, number, tel, text, time, url".into(),
            ],
            Self::PluginNotResolved { .. } => vec![
                "The schema must be validated and resolved before generation".into(),
            ],
            Self::InvalidOutputPath { .. } => vec![
                "Database and table names end up in output paths".into(),
                "Avoid '/' and '..' in \"Name\" values".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PluginNotFound { .. } => ErrorCategory::NotFound,
            Self::PluginNotResolved { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_message_names_table_field_and_type() {
        let err = DomainError::UnknownFieldType {
            table: "Customer".into(),
            field: "SomeField".into(),
            type_name: "bogus".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Customer"));
        assert!(msg.contains("SomeField"));
        assert!(msg.contains("bogus"));
    }

    #[test]
    fn plugin_not_found_is_not_found() {
        let err = DomainError::PluginNotFound { name: "MySQL".into() };
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn validation_errors_have_suggestions() {
        let err = DomainError::NoFields {
            table: "t".into(),
            table_index: 0,
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }
}
