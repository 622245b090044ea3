use crate::domain::{
    entities::{TypeDefn, TypeTable},
    plugin::{ConnectionParams, Plugin},
};

const TYPES: &[TypeDefn] = &[
    TypeDefn::new("date", "date", "DATE", "string", 0),
    TypeDefn::new("datetime", "datetime", "DATETIME", "string", 0),
    TypeDefn::new("email", "email", "NVARCHAR", "string", 50),
    TypeDefn::new("dec", "number", "DEC", "float64", 0),
    TypeDefn::new("decimal", "number", "DEC", "float64", 0),
    TypeDefn::new("int", "number", "INT", "int", 0),
    TypeDefn::new("integer", "number", "INT", "int", 0),
    TypeDefn::new("money", "number", "DEC", "float64", 0),
    TypeDefn::new("number", "number", "INT", "int", 0),
    TypeDefn::new("tel", "tel", "NVARCHAR", "string", 19),
    TypeDefn::new("text", "text", "NVARCHAR", "string", 0),
    TypeDefn::new("time", "time", "TIME", "string", 0),
    TypeDefn::new("url", "url", "NVARCHAR", "string", 50),
];

/// `user:password@tcp(server:port)/[database]`, shared with MariaDB.
pub(super) fn tcp_dsn(params: &ConnectionParams) -> String {
    format!(
        "{}:{}@tcp({}:{})/{}",
        params.user,
        params.password,
        params.server,
        params.port,
        params.database.as_deref().unwrap_or("")
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Plugin for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn types(&self) -> TypeTable {
        TypeTable::new(TYPES)
    }

    fn driver_name(&self) -> &'static str {
        "mysql"
    }

    fn import_string(&self) -> &'static str {
        "\"github.com/go-sql-driver/mysql\""
    }

    fn connection_string(&self, params: &ConnectionParams) -> String {
        tcp_dsn(params)
    }

    fn default_port(&self) -> &'static str {
        "3306"
    }

    fn default_user(&self) -> &'static str {
        "root"
    }

    fn needs_use(&self) -> bool {
        true
    }

    fn docker_image(&self) -> Option<&'static str> {
        Some("mysql:5.7")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_are_floats() {
        assert!(MySql.find_type("money").unwrap().is_float());
        assert_eq!(MySql.find_type("text").unwrap().sql, "NVARCHAR");
    }

    #[test]
    fn dsn_uses_defaults() {
        let params = ConnectionParams::defaults(&MySql);
        assert_eq!(
            MySql.connection_string(&params),
            "root:Passw0rd!@tcp(localhost:3306)/"
        );
    }

    #[test]
    fn create_database_then_use() {
        assert_eq!(
            MySql.create_database_sql("Movies"),
            "CREATE DATABASE IF NOT EXISTS Movies;\nUSE Movies;\n"
        );
    }
}
