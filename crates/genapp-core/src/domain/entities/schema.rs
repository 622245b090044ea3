//! In-memory form of the user's JSON schema.
//!
//! The [`Database`] owns its tables and every table owns its fields, by
//! value. Upward links are plain indices ([`TableRef`], [`FieldRef`])
//! filled in by [`Database::link`] after decoding and resolved through the
//! owning database, so there are no reference cycles.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::common::title_case;
use crate::domain::{DomainError, plugin::ConnectionParams, plugin::Plugin, registry::PluginRegistry};

/// Position of a table inside its database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableRef(pub usize);

/// Position of a field: owning table, then field inside that table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub table: usize,
    pub field: usize,
}

// ── Field ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "Name", default)]
    pub name: String,

    /// Form label; the title-cased name is used when empty.
    #[serde(rename = "Label", default, skip_serializing_if = "String::is_empty")]
    pub label: String,

    /// Abstract type name, resolved against the dialect's type table.
    #[serde(rename = "TypeDef", default)]
    pub type_name: String,

    #[serde(rename = "Len", default)]
    pub len: u32,

    #[serde(rename = "Dec", default)]
    pub dec: u32,

    #[serde(rename = "PrimaryKey", default)]
    pub primary_key: bool,

    #[serde(rename = "Hidden", default)]
    pub hidden: bool,

    #[serde(rename = "Null", default)]
    pub nullable: bool,

    /// Auto-increment column; never supplied on insert.
    #[serde(rename = "Incr", default)]
    pub incr: bool,

    #[serde(rename = "SQLParms", default, skip_serializing_if = "String::is_empty")]
    pub sql_parms: String,

    /// Shown in the generated list page.
    #[serde(rename = "List", default)]
    pub list: bool,

    #[serde(skip)]
    pub(crate) owner: Option<FieldRef>,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn with_len(mut self, len: u32, dec: u32) -> Self {
        self.len = len;
        self.dec = dec;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn titled_name(&self) -> String {
        title_case(&self.name)
    }

    /// Form label: explicit `Label` if present, else the name, title-cased.
    pub fn display_label(&self) -> String {
        if self.label.is_empty() {
            title_case(&self.name)
        } else {
            title_case(&self.label)
        }
    }

    /// Back-reference to the owning table (set by [`Database::link`]).
    pub fn owner(&self) -> Option<FieldRef> {
        self.owner
    }
}

// ── Table ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Fields", default)]
    pub fields: Vec<Field>,

    /// Extra table-level clauses appended to `CREATE TABLE`.
    #[serde(rename = "SQLParms", default, skip_serializing_if = "Vec::is_empty")]
    pub sql_parms: Vec<String>,

    #[serde(skip)]
    pub(crate) owner: Option<TableRef>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn titled_name(&self) -> String {
        title_case(&self.name)
    }

    /// The first field marked primary key, in declared order.
    pub fn primary_key_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.primary_key)
    }

    /// Names of every primary-key field, in declared order.
    pub fn keys(&self) -> Result<Vec<&str>, DomainError> {
        let keys: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.primary_key)
            .map(|f| f.name.as_str())
            .collect();
        if keys.is_empty() {
            return Err(DomainError::NoPrimaryKey {
                table: self.name.clone(),
            });
        }
        Ok(keys)
    }

    pub fn find_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// `a, b, c` or, with a prefix, `p.a, p.b, p.c`.
    pub fn field_name_list(&self, prefix: &str) -> String {
        join_prefixed(self.fields.iter().map(|f| f.name.as_str()), prefix, "")
    }

    /// Primary-key names joined by `, `, each wrapped in `prefix`/`suffix`.
    pub fn keys_list(&self, prefix: &str, suffix: &str) -> String {
        join_prefixed(
            self.fields
                .iter()
                .filter(|f| f.primary_key)
                .map(|f| f.name.as_str()),
            prefix,
            suffix,
        )
    }

    pub fn owner(&self) -> Option<TableRef> {
        self.owner
    }
}

fn join_prefixed<'a>(names: impl Iterator<Item = &'a str>, prefix: &str, suffix: &str) -> String {
    names
        .map(|n| {
            if prefix.is_empty() {
                format!("{}{}", n, suffix)
            } else {
                format!("{}.{}{}", prefix, n, suffix)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Database ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Database {
    #[serde(rename = "Name", default)]
    pub name: String,

    /// Dialect identifier, e.g. `sqlite`.
    #[serde(rename = "SqlType", default)]
    pub sql_type: String,

    #[serde(rename = "SQLParms", default, skip_serializing_if = "String::is_empty")]
    pub sql_parms: String,

    /// Table-name prefix; filled from the plugin when left empty.
    #[serde(rename = "Schema", default, skip_serializing_if = "String::is_empty")]
    pub schema: String,

    #[serde(rename = "Server", default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    #[serde(rename = "Port", default, skip_serializing_if = "String::is_empty")]
    pub port: String,

    #[serde(rename = "PW", default, skip_serializing_if = "String::is_empty")]
    pub password: String,

    #[serde(rename = "Tables", default)]
    pub tables: Vec<Table>,

    #[serde(skip)]
    plugin: Option<Arc<dyn Plugin>>,
}

impl Database {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            ..Self::default()
        }
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self.link();
        self
    }

    /// Fill in the table and field back-references.
    pub fn link(&mut self) {
        for (ti, table) in self.tables.iter_mut().enumerate() {
            table.owner = Some(TableRef(ti));
            for (fi, field) in table.fields.iter_mut().enumerate() {
                field.owner = Some(FieldRef {
                    table: ti,
                    field: fi,
                });
            }
        }
    }

    pub fn titled_name(&self) -> String {
        title_case(&self.name)
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn find_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Follow a field back-reference.
    pub fn field_at(&self, at: FieldRef) -> Option<&Field> {
        self.tables.get(at.table)?.fields.get(at.field)
    }

    pub fn table_at(&self, at: TableRef) -> Option<&Table> {
        self.tables.get(at.0)
    }

    pub fn is_resolved(&self) -> bool {
        self.plugin.is_some()
    }

    /// The resolved plugin, or `PluginNotResolved`.
    pub fn plugin(&self) -> Result<&Arc<dyn Plugin>, DomainError> {
        self.plugin
            .as_ref()
            .ok_or_else(|| DomainError::PluginNotResolved {
                database: self.name.clone(),
            })
    }

    /// Look up the dialect plugin and check every field's type against it.
    ///
    /// On success the plugin is attached and, if the schema left `Schema`
    /// empty, the plugin's schema prefix is copied in. Calling this again on
    /// a resolved database re-checks the field types and keeps the plugin
    /// already attached.
    #[instrument(skip_all, fields(database = %self.name, dialect = %self.sql_type))]
    pub fn resolve_plugin(&mut self, registry: &PluginRegistry) -> Result<(), DomainError> {
        let plugin = match &self.plugin {
            Some(existing) if existing.name() == self.sql_type => Arc::clone(existing),
            _ => registry.find_plugin(&self.sql_type)?,
        };

        for table in &self.tables {
            for field in &table.fields {
                if plugin.find_type(&field.type_name).is_none() {
                    return Err(DomainError::UnknownFieldType {
                        table: table.name.clone(),
                        field: field.name.clone(),
                        type_name: field.type_name.clone(),
                    });
                }
            }
        }

        if self.schema.is_empty() {
            if let Some(prefix) = plugin.schema_name() {
                self.schema = prefix.to_string();
            }
        }

        self.link();
        debug!(plugin = plugin.name(), "SQL plugin resolved");
        self.plugin = Some(plugin);
        Ok(())
    }

    /// Connection settings: schema values where given, plugin defaults else.
    pub fn connection_params(&self) -> Result<ConnectionParams, DomainError> {
        let plugin = self.plugin()?;
        let defaults = ConnectionParams::defaults(plugin.as_ref());
        let pick = |given: &str, fallback: String| {
            if given.is_empty() {
                fallback
            } else {
                given.to_string()
            }
        };

        let database = if plugin.name() == "sqlite" {
            format!("{}.db", self.titled_name())
        } else {
            self.titled_name()
        };

        Ok(ConnectionParams {
            server: pick(&self.server, defaults.server),
            port: pick(&self.port, defaults.port),
            user: defaults.user,
            password: pick(&self.password, defaults.password),
            database: Some(database),
        })
    }
}
