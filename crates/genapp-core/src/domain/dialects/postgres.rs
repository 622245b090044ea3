use crate::domain::{
    entities::{TypeDefn, TypeTable},
    plugin::{ConnectionParams, Plugin},
};

const TYPES: &[TypeDefn] = &[
    TypeDefn::new("date", "date", "DATE", "string", 0),
    TypeDefn::new("datetime", "datetime", "DATETIME", "string", 0),
    TypeDefn::new("email", "email", "VARCHAR", "string", 50),
    TypeDefn::new("dec", "number", "DEC", "string", 0),
    TypeDefn::new("decimal", "number", "DEC", "string", 0),
    TypeDefn::new("int", "number", "INT", "int", 0),
    TypeDefn::new("integer", "number", "INT", "int", 0),
    TypeDefn::new("money", "number", "DEC", "string", 0),
    TypeDefn::new("number", "number", "INT", "int", 0),
    TypeDefn::new("tel", "tel", "VARCHAR", "string", 19),
    TypeDefn::new("text", "text", "VARCHAR", "string", 0),
    TypeDefn::new("time", "time", "TIME", "string", 0),
    TypeDefn::new("url", "url", "VARCHAR", "string", 50),
];

/// PostgreSQL uses numbered `$n` parameters instead of `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Plugin for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn types(&self) -> TypeTable {
        TypeTable::new(TYPES)
    }

    fn driver_name(&self) -> &'static str {
        "postgres"
    }

    fn import_string(&self) -> &'static str {
        "\"github.com/lib/pq\""
    }

    fn connection_string(&self, params: &ConnectionParams) -> String {
        let mut dsn = format!(
            "user={} password='{}' host={} port={} ",
            params.user, params.password, params.server, params.port
        );
        if let Some(db) = params.database.as_deref().filter(|d| !d.is_empty()) {
            dsn.push_str(&format!("dbname='{}' ", db));
        }
        dsn.push_str("sslmode=disable");
        dsn
    }

    fn default_port(&self) -> &'static str {
        "5430"
    }

    fn default_user(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, position: usize) -> String {
        format!("${}", position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_placeholders() {
        assert_eq!(Postgres.placeholder(1), "$1");
        assert_eq!(Postgres.placeholder(12), "$12");
        assert_eq!(Postgres.page_clause(), "LIMIT $1 OFFSET $2");
    }

    #[test]
    fn dsn_with_and_without_database() {
        let mut params = ConnectionParams::defaults(&Postgres);
        assert_eq!(
            Postgres.connection_string(&params),
            "user=postgres password='Passw0rd!' host=localhost port=5430 sslmode=disable"
        );
        params.database = Some("Movies".into());
        assert!(Postgres.connection_string(&params).contains("dbname='Movies' "));
    }
}
