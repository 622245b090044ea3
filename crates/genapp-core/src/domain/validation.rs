use std::collections::HashSet;

use crate::domain::{dialects, entities::Database, error::DomainError};

/// Centralized schema validation.
///
/// Checks run in a fixed order: dialect, database name, table list, then
/// per table its name, fields and primary key, then per field its name,
/// and finally name uniqueness.
pub struct DomainValidator;

impl DomainValidator {
    /// Fail-fast: the first violation in check order.
    pub fn validate(db: &Database) -> Result<(), DomainError> {
        match Self::violations(db).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Every violation, in check order.
    pub fn violations(db: &Database) -> Vec<DomainError> {
        let mut errors = Vec::new();

        if !dialects::is_supported(&db.sql_type) {
            errors.push(DomainError::UnsupportedDialect {
                dialect: db.sql_type.clone(),
            });
        }
        if db.name.is_empty() {
            errors.push(DomainError::MissingDatabaseName);
        }
        if db.tables.is_empty() {
            errors.push(DomainError::NoTables {
                database: db.name.clone(),
            });
        }

        for (ti, table) in db.tables.iter().enumerate() {
            if table.name.is_empty() {
                errors.push(DomainError::MissingTableName { table_index: ti });
            }
            if table.fields.is_empty() {
                errors.push(DomainError::NoFields {
                    table: table.name.clone(),
                    table_index: ti,
                });
            } else if table.primary_key_field().is_none() {
                errors.push(DomainError::MissingPrimaryKey {
                    table: table.name.clone(),
                    table_index: ti,
                });
            }
            for (fi, field) in table.fields.iter().enumerate() {
                if field.name.is_empty() {
                    errors.push(DomainError::MissingFieldName {
                        table: table.name.clone(),
                        table_index: ti,
                        field_index: fi,
                    });
                }
            }
        }

        let mut seen_tables = HashSet::new();
        for (ti, table) in db.tables.iter().enumerate() {
            if !table.name.is_empty() && !seen_tables.insert(table.name.as_str()) {
                errors.push(DomainError::DuplicateTableName {
                    table: table.name.clone(),
                    table_index: ti,
                });
            }
            let mut seen_fields = HashSet::new();
            for (fi, field) in table.fields.iter().enumerate() {
                if !field.name.is_empty() && !seen_fields.insert(field.name.as_str()) {
                    errors.push(DomainError::DuplicateFieldName {
                        table: table.name.clone(),
                        field: field.name.clone(),
                        field_index: fi,
                    });
                }
            }
        }

        errors
    }
}
