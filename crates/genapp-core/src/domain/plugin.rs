//! The SQL dialect capability set.
//!
//! Every supported engine is a small value implementing [`Plugin`]. The
//! trait's default methods carry the ANSI-ish behaviour shared by most
//! engines; dialects override only what differs.

use std::fmt;

use serde::Serialize;

use crate::domain::entities::{TypeDefn, TypeTable};

/// Connection settings used to build a dialect's connection string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionParams {
    pub server: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub database: Option<String>,
}

impl ConnectionParams {
    /// The plugin's docker-friendly defaults, with no database selected.
    pub fn defaults(plugin: &dyn Plugin) -> Self {
        Self {
            server: plugin.default_server().to_string(),
            port: plugin.default_port().to_string(),
            user: plugin.default_user().to_string(),
            password: plugin.default_password().to_string(),
            database: None,
        }
    }
}

/// Capability set of one SQL engine.
///
/// Implementations must be stateless: the same plugin instance is shared by
/// every schema that selects its dialect.
pub trait Plugin: Send + Sync + fmt::Debug {
    /// Dialect identifier as written in a schema's `SqlType`.
    fn name(&self) -> &'static str;

    /// The abstract-type → concrete-type table.
    fn types(&self) -> TypeTable;

    fn find_type(&self, type_name: &str) -> Option<&'static TypeDefn> {
        self.types().find(type_name)
    }

    /// Name passed to `sql.Open` in generated code.
    fn driver_name(&self) -> &'static str;

    /// Quoted import path of the host-language driver package.
    fn import_string(&self) -> &'static str;

    fn connection_string(&self, params: &ConnectionParams) -> String;

    fn default_server(&self) -> &'static str {
        "localhost"
    }

    fn default_port(&self) -> &'static str;

    fn default_user(&self) -> &'static str;

    fn default_password(&self) -> &'static str {
        "Passw0rd!"
    }

    /// Whether generated code must issue `USE <db>` after connecting.
    fn needs_use(&self) -> bool {
        false
    }

    /// Whether generated code creates the database itself.
    fn creates_database(&self) -> bool {
        false
    }

    /// Schema prefix applied to table names, e.g. `dbo.`.
    fn schema_name(&self) -> Option<&'static str> {
        None
    }

    /// Container image for a throw-away test server.
    fn docker_image(&self) -> Option<&'static str> {
        None
    }

    /// Positional parameter marker for the 1-based `position`.
    fn placeholder(&self, _position: usize) -> String {
        "?".to_string()
    }

    /// Line that must follow every statement in a script, e.g. `GO`.
    fn batch_terminator(&self) -> Option<&'static str> {
        None
    }

    /// Append the batch terminator line, if the dialect has one.
    fn terminate(&self, mut statement: String) -> String {
        if let Some(term) = self.batch_terminator() {
            statement.push_str(term);
            statement.push('\n');
        }
        statement
    }

    fn create_database_sql(&self, name: &str) -> String {
        let create = self.terminate(format!("CREATE DATABASE IF NOT EXISTS {};\n", name));
        create + &self.use_database_sql(name)
    }

    fn drop_database_sql(&self, name: &str) -> String {
        self.terminate(format!("DROP DATABASE IF EXISTS {};\n", name))
    }

    fn use_database_sql(&self, name: &str) -> String {
        self.terminate(format!("USE {};\n", name))
    }

    /// `SELECT` of a single row ordered by `order_by`, with optional `WHERE`.
    fn select_one_sql(&self, table: &str, filter: Option<&str>, order_by: &str) -> String {
        let filter = filter.map(|f| format!(" WHERE {}", f)).unwrap_or_default();
        format!(
            "SELECT * FROM {}{} ORDER BY {} LIMIT 1;",
            table, filter, order_by
        )
    }

    /// Paging tail for a `SELECT`; parameters are (limit, offset).
    fn page_clause(&self) -> String {
        format!(
            "LIMIT {} OFFSET {}",
            self.placeholder(1),
            self.placeholder(2)
        )
    }

    /// Command-line flag declarations for the generated `main`.
    fn flag_defns(&self, db_name: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "\tflag.StringVar(&db_pw,\"dbPW\",\"{}\",\"the database password\")\n",
            self.default_password()
        ));
        out.push_str(&format!(
            "\tflag.StringVar(&db_port,\"dbPort\",\"{}\",\"the database port\")\n",
            self.default_port()
        ));
        out.push_str(&format!(
            "\tflag.StringVar(&db_srvr,\"dbServer\",\"{}\",\"the database server\")\n",
            self.default_server()
        ));
        out.push_str(&format!(
            "\tflag.StringVar(&db_user,\"dbUser\",\"{}\",\"the database user\")\n",
            self.default_user()
        ));
        out.push_str(&format!(
            "\tflag.StringVar(&db_name,\"dbName\",\"{}\",\"the database name\")\n",
            db_name
        ));
        out
    }
}
