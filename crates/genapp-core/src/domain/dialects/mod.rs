//! Concrete SQL dialects.
//!
//! Each dialect is a unit struct implementing [`Plugin`](crate::domain::Plugin)
//! with its own type table. They are registered by
//! [`PluginRegistry::bootstrap`](crate::domain::PluginRegistry::bootstrap).

mod mariadb;
mod mssql;
mod mysql;
mod postgres;
mod sqlite;

pub use mariadb::MariaDb;
pub use mssql::Mssql;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;

/// Dialect identifiers accepted in a schema's `SqlType`, in bootstrap order.
pub const SUPPORTED_DIALECTS: [&str; 5] = ["mariadb", "mssql", "mysql", "postgres", "sqlite"];

/// `true` if `name` is exactly one of [`SUPPORTED_DIALECTS`].
pub fn is_supported(name: &str) -> bool {
    SUPPORTED_DIALECTS.contains(&name)
}
