//! Core domain layer for genapp.
//!
//! Pure schema logic: the JSON schema model, the SQL dialect plugins, the
//! validator and the string generators that feed the model templates. All
//! filesystem and rendering concerns live behind the ports of the
//! application layer.
//!
//! ## Flow
//!
//! - [`json::parse_schema`] decodes the schema text
//! - [`DomainValidator`] checks its structure
//! - [`Database::resolve_plugin`] attaches the dialect from a [`PluginRegistry`]
//! - [`entities::plan`] turns the schema into [`GenerationTask`]s
pub mod dialects;
pub mod entities;
pub mod error;
pub mod fragments;
pub mod json;
pub mod plugin;
pub mod registry;

mod validation;

pub use entities::{
    Database, FILE_DEFNS, Field, FieldRef, FileDefn, GenMode, GenerationGroup, GenerationTask,
    Permissions, RelativePath, RenderContext, Table, TableRef, TypeDefn, TypeTable, title_case,
};
pub use error::{DomainError, ErrorCategory};
pub use fragments::{FieldView, TableView};
pub use plugin::{ConnectionParams, Plugin};
pub use registry::PluginRegistry;
pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;

    const FINANCES: &str = r#"
    {
        "Name": "Finances",
        "SqlType": "sqlite",
        "Tables": [
            {
                "Name": "Customer",
                "Fields": [
                    {"Name": "Num", "TypeDef": "integer", "PrimaryKey": true, "Incr": true},
                    {"Name": "Name", "TypeDef": "text", "Len": 40, "List": true},
                    {"Name": "Addr1", "TypeDef": "text", "Len": 40},
                    {"Name": "Addr2", "TypeDef": "text", "Len": 40, "Null": true},
                    {"Name": "City", "TypeDef": "text", "Len": 40},
                    {"Name": "State", "TypeDef": "text", "Len": 2},
                    {"Name": "Zip", "TypeDef": "text", "Len": 10},
                    {"Name": "Curbal", "TypeDef": "money", "Len": 15, "Dec": 2}
                ]
            },
            {
                "Name": "Transaction",
                "Fields": [
                    {"Name": "Id", "TypeDef": "integer", "PrimaryKey": true},
                    {"Name": "Amount", "TypeDef": "money", "Len": 15, "Dec": 2},
                    {"Name": "Posted", "TypeDef": "date"}
                ]
            }
        ]
    }"#;

    fn load(text: &str) -> Database {
        let mut db = json::parse_schema(text).unwrap();
        DomainValidator::validate(&db).unwrap();
        db.resolve_plugin(&PluginRegistry::bootstrap()).unwrap();
        db
    }

    #[test]
    fn finances_schema_loads_and_validates() {
        let db = load(FINANCES);
        assert_eq!(db.tables.len(), 2);
        assert_eq!(db.tables[0].fields.len(), 8);
        assert!(db.is_resolved());
    }

    #[test]
    fn bogus_type_fails_resolution() {
        let text = FINANCES.replace(r#""Name": "State", "TypeDef": "text""#, r#""Name": "SomeField", "TypeDef": "bogus""#);
        let mut db = json::parse_schema(&text).unwrap();
        DomainValidator::validate(&db).unwrap();
        assert_eq!(
            db.resolve_plugin(&PluginRegistry::bootstrap()).unwrap_err(),
            DomainError::UnknownFieldType {
                table: "Customer".into(),
                field: "SomeField".into(),
                type_name: "bogus".into(),
            }
        );
    }

    #[test]
    fn single_key_table() {
        let db = load(FINANCES);
        assert_eq!(db.tables[0].keys().unwrap(), vec!["Num"]);
    }

    #[test]
    fn planned_paths_are_title_cased() {
        let db = load(&FINANCES.replace("Finances", "movies"));
        let tasks = entities::plan(&db, FILE_DEFNS).unwrap();
        let root = Path::new("/tmp/testgen");
        assert!(
            tasks
                .iter()
                .any(|t| t.output_path(root) == PathBuf::from("/tmp/testgen/src/ioMovies/ioMovies.go"))
        );
    }

    #[test]
    fn only_mssql_ddl_has_batch_terminator() {
        let mut db = load(FINANCES);
        let view = db.table_views().next().unwrap();
        assert!(!view.create_table_statement().unwrap().contains("GO\n"));

        db.sql_type = "mssql".into();
        db.resolve_plugin(&PluginRegistry::bootstrap()).unwrap();
        let view = db.table_views().next().unwrap();
        assert!(view.create_table_statement().unwrap().ends_with(");\nGO\n"));
    }
}
