//! Dialect name → plugin directory.
//!
//! The registry is built explicitly by [`PluginRegistry::bootstrap`] and
//! handed to whoever resolves schemas; there is no process-global map.
//! It is read-only once generation starts, so `&PluginRegistry` can be
//! shared freely across threads.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    DomainError,
    dialects::{MariaDb, MySql, Mssql, Postgres, Sqlite},
    plugin::Plugin,
};

#[derive(Debug, Default, Clone)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, Arc<dyn Plugin>>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with all five built-in dialects, registered in a fixed order.
    pub fn bootstrap() -> Self {
        let mut registry = Self::new();
        registry.register("mariadb", Arc::new(MariaDb));
        registry.register("mssql", Arc::new(Mssql));
        registry.register("mysql", Arc::new(MySql));
        registry.register("postgres", Arc::new(Postgres));
        registry.register("sqlite", Arc::new(Sqlite));
        registry
    }

    /// Insert or replace the plugin for `name`. Last registration wins.
    pub fn register(&mut self, name: impl Into<String>, plugin: Arc<dyn Plugin>) {
        let name = name.into();
        debug!(dialect = %name, "Registering SQL plugin");
        if self.plugins.insert(name.clone(), plugin).is_some() {
            debug!(dialect = %name, "Replaced previously registered plugin");
        }
    }

    /// Remove the plugin for `name`, if any.
    pub fn unregister(&mut self, name: &str) {
        self.plugins.remove(name);
    }

    /// Exact, case-sensitive lookup.
    pub fn find_plugin(&self, name: &str) -> Result<Arc<dyn Plugin>, DomainError> {
        self.plugins
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::PluginNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Registered dialect names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.plugins.keys().map(String::as_str).collect()
    }

    pub fn plugins(&self) -> impl Iterator<Item = &Arc<dyn Plugin>> {
        self.plugins.values()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialects::SUPPORTED_DIALECTS;

    #[test]
    fn bootstrap_registers_every_supported_dialect() {
        let registry = PluginRegistry::bootstrap();
        assert_eq!(registry.len(), 5);
        for name in SUPPORTED_DIALECTS {
            let plugin = registry.find_plugin(name).unwrap();
            assert_eq!(plugin.name(), name);
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = PluginRegistry::bootstrap();
        for name in ["MySQL", "SQLITE", "Postgres", "", "oracle"] {
            assert!(matches!(
                registry.find_plugin(name),
                Err(DomainError::PluginNotFound { .. })
            ));
        }
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = PluginRegistry::new();
        registry.register("sql", Arc::new(MySql));
        registry.register("sql", Arc::new(Postgres));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find_plugin("sql").unwrap().name(), "postgres");
    }

    #[test]
    fn unregister_removes_and_tolerates_missing() {
        let mut registry = PluginRegistry::bootstrap();
        registry.unregister("mssql");
        registry.unregister("mssql");
        registry.unregister("never-registered");
        assert!(!registry.contains("mssql"));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn names_are_sorted() {
        let registry = PluginRegistry::bootstrap();
        assert_eq!(
            registry.names(),
            vec!["mariadb", "mssql", "mysql", "postgres", "sqlite"]
        );
    }
}
