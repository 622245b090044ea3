use crate::domain::{
    entities::{DEFAULT_TYPES, TypeTable},
    plugin::{ConnectionParams, Plugin},
};

/// MariaDB speaks the MySQL wire protocol; only the defaults differ.
#[derive(Debug, Clone, Copy, Default)]
pub struct MariaDb;

impl Plugin for MariaDb {
    fn name(&self) -> &'static str {
        "mariadb"
    }

    fn types(&self) -> TypeTable {
        TypeTable::new(DEFAULT_TYPES)
    }

    fn driver_name(&self) -> &'static str {
        "mysql"
    }

    fn import_string(&self) -> &'static str {
        "\"github.com/go-sql-driver/mysql\""
    }

    fn connection_string(&self, params: &ConnectionParams) -> String {
        super::mysql::tcp_dsn(params)
    }

    fn default_server(&self) -> &'static str {
        "127.0.0.1"
    }

    fn default_port(&self) -> &'static str {
        "4306"
    }

    fn default_user(&self) -> &'static str {
        "root"
    }

    fn needs_use(&self) -> bool {
        true
    }
}
