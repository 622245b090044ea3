use crate::domain::{
    entities::{TypeDefn, TypeTable},
    plugin::{ConnectionParams, Plugin},
};

const TYPES: &[TypeDefn] = &[
    TypeDefn::new("date", "date", "DATE", "time.Time", 0),
    TypeDefn::new("datetime", "datetime", "DATETIME", "time.Time", 0),
    TypeDefn::new("email", "email", "VARCHAR", "string", 50),
    TypeDefn::new("dec", "number", "TEXT", "string", 0),
    TypeDefn::new("decimal", "number", "TEXT", "string", 0),
    TypeDefn::new("int", "number", "INTEGER", "int64", 0),
    TypeDefn::new("integer", "number", "INTEGER", "int64", 0),
    TypeDefn::new("money", "number", "TEXT", "string", 0),
    TypeDefn::new("number", "number", "INT", "int64", 0),
    TypeDefn::new("tel", "tel", "VARCHAR", "string", 19),
    TypeDefn::new("text", "text", "VARCHAR", "string", 0),
    TypeDefn::new("time", "time", "TIME", "time.Time", 0),
    TypeDefn::new("url", "url", "VARCHAR", "string", 50),
];

/// Embedded, file-backed SQLite. There is no server to talk to, so every
/// connection default is empty and the "connection string" is a file path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Plugin for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn types(&self) -> TypeTable {
        TypeTable::new(TYPES)
    }

    fn driver_name(&self) -> &'static str {
        "sqlite3"
    }

    fn import_string(&self) -> &'static str {
        "\"github.com/mattn/go-sqlite3\""
    }

    fn connection_string(&self, params: &ConnectionParams) -> String {
        params.database.clone().unwrap_or_default()
    }

    fn default_server(&self) -> &'static str {
        ""
    }

    fn default_port(&self) -> &'static str {
        ""
    }

    fn default_user(&self) -> &'static str {
        ""
    }

    fn default_password(&self) -> &'static str {
        ""
    }

    fn flag_defns(&self, db_name: &str) -> String {
        format!(
            "\tflag.StringVar(&db_name,\"dbName\",\"{}.db\",\"the database path\")\n",
            db_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_map_to_time() {
        let td = Sqlite.find_type("datetime").unwrap();
        assert_eq!(td.sql, "DATETIME");
        assert_eq!(td.host, "time.Time");
    }

    #[test]
    fn only_name_flag_is_defined() {
        let flags = Sqlite.flag_defns("Finances");
        assert_eq!(
            flags,
            "\tflag.StringVar(&db_name,\"dbName\",\"Finances.db\",\"the database path\")\n"
        );
    }

    #[test]
    fn connection_string_is_the_file() {
        let params = ConnectionParams {
            database: Some("Finances.db".into()),
            ..ConnectionParams::default()
        };
        assert_eq!(Sqlite.connection_string(&params), "Finances.db");
    }
}
