use crate::domain::{
    entities::{TypeDefn, TypeTable},
    plugin::{ConnectionParams, Plugin},
};

const TYPES: &[TypeDefn] = &[
    TypeDefn::new("date", "date", "DATE", "time.Time", 0),
    TypeDefn::new("datetime", "datetime", "DATETIME", "time.Time", 0),
    TypeDefn::new("email", "email", "VARCHAR", "string", 50),
    TypeDefn::new("dec", "number", "DEC", "float64", 0),
    TypeDefn::new("decimal", "number", "DEC", "float64", 0),
    TypeDefn::new("int", "number", "INT", "int64", 0),
    TypeDefn::new("integer", "number", "INT", "int64", 0),
    TypeDefn::new("money", "number", "DEC", "float64", 0),
    TypeDefn::new("number", "number", "INT", "int64", 0),
    TypeDefn::new("tel", "tel", "VARCHAR", "string", 19),
    TypeDefn::new("text", "text", "NVARCHAR", "string", 0),
    TypeDefn::new("time", "time", "TIME", "time.Time", 0),
    TypeDefn::new("url", "url", "TEXT", "string", 50),
];

/// Microsoft SQL Server.
///
/// Scripts are run through `sqlcmd`, so every statement is followed by a
/// `GO` batch separator. T-SQL has no `LIMIT`; single-row selects use
/// `TOP 1` and paging uses `OFFSET .. FETCH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mssql;

impl Plugin for Mssql {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn types(&self) -> TypeTable {
        TypeTable::new(TYPES)
    }

    fn driver_name(&self) -> &'static str {
        "mssql"
    }

    fn import_string(&self) -> &'static str {
        "\"github.com/denisenkom/go-mssqldb\""
    }

    fn connection_string(&self, params: &ConnectionParams) -> String {
        let database = params
            .database
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| format!("database={}&", d))
            .unwrap_or_default();
        format!(
            "sqlserver://{}:{}@{}:{}?{}connection+timeout=30",
            params.user, params.password, params.server, params.port, database
        )
    }

    fn default_port(&self) -> &'static str {
        "1401"
    }

    fn default_user(&self) -> &'static str {
        "sa"
    }

    fn needs_use(&self) -> bool {
        true
    }

    fn creates_database(&self) -> bool {
        true
    }

    fn schema_name(&self) -> Option<&'static str> {
        Some("dbo.")
    }

    fn docker_image(&self) -> Option<&'static str> {
        Some("mcr.microsoft.com/mssql/server:2017-latest")
    }

    fn batch_terminator(&self) -> Option<&'static str> {
        Some("GO")
    }

    fn create_database_sql(&self, name: &str) -> String {
        let create = self.terminate(format!("create database {};\n", name));
        create + &self.use_database_sql(name)
    }

    fn drop_database_sql(&self, name: &str) -> String {
        self.terminate(format!(
            "IF DB_ID (N'{}') IS NOT NULL\nDROP DATABASE {} ;\n",
            name, name
        ))
    }

    fn select_one_sql(&self, table: &str, filter: Option<&str>, order_by: &str) -> String {
        let filter = filter.map(|f| format!(" WHERE {}", f)).unwrap_or_default();
        format!("SELECT TOP 1 * FROM {}{} ORDER BY {};", table, filter, order_by)
    }

    // Parameters are (offset, limit).
    fn page_clause(&self) -> String {
        format!(
            "OFFSET {} ROWS FETCH NEXT {} ROWS ONLY",
            self.placeholder(1),
            self.placeholder(2)
        )
    }
}
